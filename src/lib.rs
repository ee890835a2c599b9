//! Tube Tempest - A tube shooter arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (movement, collisions, game state, spawning)
//! - `config`: Variant rules (vitality, collision tolerances, pacing)
//! - `input`: Normalized player intent, tilt calibration, autopilot
//! - `projection`: Presentation-side tube to screen mapping

pub mod config;
pub mod input;
pub mod projection;
pub mod sim;

pub use config::{CollisionTolerances, GameConfig, PairTolerance, Variant, VitalityMode};
pub use input::{Intent, TickInput, TiltCalibration, TiltReading};

/// Wall-clock timestamp or duration in milliseconds
pub type Millis = u64;

/// Game configuration constants
pub mod consts {
    use crate::Millis;

    /// Tube dimensions
    pub const TUBE_SEGMENTS: u32 = 16;
    pub const TUBE_DEPTH: u32 = 20;

    /// Player starts at the tube mouth
    pub const PLAYER_START_DEPTH: f32 = (TUBE_DEPTH - 1) as f32;

    /// Movement cooldowns (grid-like control)
    pub const TURN_COOLDOWN_MS: Millis = 150;
    pub const DEPTH_MOVE_COOLDOWN_MS: Millis = 100;
    pub const SHOT_COOLDOWN_MS: Millis = 200;

    /// Projectile speeds (depth units per tick before scaling)
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 2.0;
    /// Per-tick multiplier applied to projectile speed
    pub const BULLET_DEPTH_SCALE: f32 = 0.1;

    /// Chance per tick that any single enemy fires
    pub const ENEMY_FIRE_CHANCE: f64 = 0.002;

    /// Power-ups drift outward by this much each tick
    pub const POWER_UP_DRIFT: f32 = 0.01;

    /// Enemies and power-ups enter in this depth band [min, max)
    pub const SPAWN_DEPTH_MIN: u32 = 2;
    pub const SPAWN_DEPTH_MAX: u32 = 7;

    /// Score needed per level before the next wave can level up
    pub const LEVEL_SCORE_STEP: u64 = 1000;
}
