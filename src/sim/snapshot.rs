//! Read-only view of the game for presentation
//!
//! Renderers and HUDs borrow a [`Snapshot`] each frame; it cannot be used to
//! mutate the simulation.

use serde::Serialize;

use super::geometry::TubeCoord;
use crate::Millis;
use super::state::{Enemy, GamePhase, GameState, PowerUp, Projectile, Vitality};

/// HUD scalars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub vitality: Vitality,
    pub level: u32,
    pub phase: GamePhase,
}

/// Borrowed frame view
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub player: TubeCoord,
    /// Player is flashing (damage immunity active)
    pub player_invulnerable: bool,
    pub enemies: &'a [Enemy],
    pub player_bullets: &'a [Projectile],
    pub enemy_bullets: &'a [Projectile],
    pub power_ups: &'a [PowerUp],
    pub hud: Hud,
}

impl GameState {
    /// Presentation view of the frame rendered at `now`
    pub fn snapshot(&self, now: Millis) -> Snapshot<'_> {
        Snapshot {
            player: self.player.pos,
            player_invulnerable: self.player.is_invulnerable(now),
            enemies: &self.enemies,
            player_bullets: &self.player_bullets,
            enemy_bullets: &self.enemy_bullets,
            power_ups: &self.power_ups,
            hud: Hud {
                score: self.score,
                vitality: self.vitality,
                level: self.level,
                phase: self.phase,
            },
        }
    }
}

impl Snapshot<'_> {
    /// JSON for web or tooling bridges
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
