//! Enemy and power-up spawning
//!
//! Everything enters in the far band near the tube mouth, so it is visible
//! before it can threaten the player.

use rand::Rng;

use super::geometry::TubeCoord;
use super::state::{Enemy, EnemyKind, GameState, PowerUp};
use crate::Millis;
use crate::consts::*;

/// Random placement inside the spawn band
fn spawn_coord<R: Rng>(rng: &mut R) -> TubeCoord {
    let segment = rng.random_range(0..TUBE_SEGMENTS);
    let depth = rng.random_range(SPAWN_DEPTH_MIN..SPAWN_DEPTH_MAX);
    TubeCoord::new(segment as i64, depth as f32)
}

/// Create one enemy with a uniformly chosen archetype
pub fn spawn_enemy<R: Rng>(state: &mut GameState, rng: &mut R) {
    let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];
    let pos = spawn_coord(rng);
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        kind,
        pos,
        speed: kind.speed(),
        health: kind.max_health(),
        points: kind.points(),
    });
}

/// Spawn the wave for the current level
pub fn spawn_initial_wave<R: Rng>(state: &mut GameState, rng: &mut R) {
    let count = state.config.wave_size(state.level);
    for _ in 0..count {
        spawn_enemy(state, rng);
    }
    log::info!("Level {}: spawned wave of {} enemies", state.level, count);
}

/// Create one healing power-up
pub fn spawn_power_up<R: Rng>(state: &mut GameState, rng: &mut R) {
    let pos = spawn_coord(rng);
    let id = state.next_entity_id();
    let heal_amount = state.config.heal_amount;
    state.power_ups.push(PowerUp { id, pos, heal_amount });
}

/// True once `interval` has fully elapsed since `last`; anchors `last` on first use
fn timer_elapsed(last: &mut Option<Millis>, now: Millis, interval: Millis) -> bool {
    match *last {
        None => {
            *last = Some(now);
            false
        }
        Some(at) if now.saturating_sub(at) > interval => {
            *last = Some(now);
            true
        }
        Some(_) => false,
    }
}

/// Run the wall-clock spawn timers for this tick
pub fn run_spawn_timers<R: Rng>(state: &mut GameState, now: Millis, rng: &mut R) {
    let interval = state.config.enemy_spawn_interval(state.level);
    if timer_elapsed(&mut state.timers.last_enemy_at, now, interval) {
        spawn_enemy(state, rng);
    }

    if state.config.power_ups {
        let interval = state.config.power_up_interval_ms;
        if timer_elapsed(&mut state.timers.last_power_up_at, now, interval) {
            spawn_power_up(state, rng);
        }
    }
}
