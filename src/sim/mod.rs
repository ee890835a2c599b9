//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and device concerns:
//! - Wall-clock timestamps are passed in, never read
//! - Seeded RNG only
//! - Systems are free functions over `GameState`

pub mod collision;
pub mod geometry;
pub mod movement;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve};
pub use geometry::{TubeCoord, segment_distance, tube_metric, wrap_segment};
pub use snapshot::{Hud, Snapshot};
pub use state::{
    Enemy, EnemyKind, GameEvent, GamePhase, GameState, Heading, Player, PowerUp, Projectile,
    Vitality,
};
pub use tick::{restart, tick, toggle_pause};
