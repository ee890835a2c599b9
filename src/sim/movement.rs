//! Movement system
//!
//! Player control is cooldown-gated on wall-clock time so it feels grid-like.
//! Projectiles, enemies and power-ups advance a fixed amount per tick.

use rand::Rng;

use super::geometry::{TubeCoord, clamp_player_depth};
use super::state::{GameState, Heading, Projectile};
use crate::Millis;
use crate::consts::*;
use crate::input::Intent;

/// True if at least `cooldown` has passed since `last`
#[inline]
fn cooled_down(last: Option<Millis>, now: Millis, cooldown: Millis) -> bool {
    last.is_none_or(|at| now.saturating_sub(at) > cooldown)
}

/// Apply player intent: turn, depth move, fire
pub fn move_player(state: &mut GameState, intent: &Intent, now: Millis) {
    let player = &mut state.player;

    let turn = intent.turn();
    if turn != 0 && cooled_down(player.last_turn_at, now, TURN_COOLDOWN_MS) {
        player.pos.rotate(turn);
        player.last_turn_at = Some(now);
    }

    let step = intent.depth_step();
    if state.config.depth_movement
        && step != 0
        && cooled_down(player.last_depth_move_at, now, DEPTH_MOVE_COOLDOWN_MS)
    {
        player.pos.depth = clamp_player_depth(player.pos.depth + step as f32);
        player.last_depth_move_at = Some(now);
    }

    if intent.fire && cooled_down(player.last_shot_at, now, SHOT_COOLDOWN_MS) {
        player.last_shot_at = Some(now);
        fire_player_bullet(state);
    }
}

/// Append a bullet at the player's position heading for the center
pub fn fire_player_bullet(state: &mut GameState) {
    let id = state.next_entity_id();
    let pos = state.player.pos;
    state
        .player_bullets
        .push(Projectile::fired(id, pos, PLAYER_BULLET_SPEED, Heading::Inward));
}

/// Advance a projectile one tick along its heading
#[inline]
pub fn advance_projectile(bullet: &mut Projectile) {
    let delta = bullet.speed * BULLET_DEPTH_SCALE;
    match bullet.heading {
        Heading::Inward => bullet.pos.depth -= delta,
        Heading::Outward => bullet.pos.depth += delta,
    }
    bullet.ticks_left = bullet.ticks_left.saturating_sub(1);
}

/// Move all bullets, dropping those past their terminal depth
pub fn advance_projectiles(state: &mut GameState) {
    for bullet in state.player_bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        advance_projectile(bullet);
    }
    state.player_bullets.retain(|b| !b.is_spent());
    state.enemy_bullets.retain(|b| !b.is_spent());
}

/// Move enemies outward; each may fire at its current position
pub fn advance_enemies<R: Rng>(state: &mut GameState, rng: &mut R) {
    let scale = state.config.enemy_speed_scale;
    let mut shots: Vec<TubeCoord> = Vec::new();

    for enemy in &mut state.enemies {
        enemy.pos.depth += enemy.speed * scale;
        if rng.random_bool(ENEMY_FIRE_CHANCE) {
            shots.push(enemy.pos);
        }
    }

    // Escaped enemies leave the tube
    let depth_limit = TUBE_DEPTH as f32;
    state.enemies.retain(|e| e.pos.depth < depth_limit);

    for pos in shots {
        if pos.depth >= depth_limit {
            continue;
        }
        let id = state.next_entity_id();
        state
            .enemy_bullets
            .push(Projectile::fired(id, pos, ENEMY_BULLET_SPEED, Heading::Outward));
    }
}

/// Drift power-ups outward, dropping those that leave the tube
pub fn advance_power_ups(state: &mut GameState) {
    for power_up in &mut state.power_ups {
        power_up.pos.depth += POWER_UP_DRIFT;
    }
    let depth_limit = TUBE_DEPTH as f32;
    state.power_ups.retain(|p| p.pos.depth < depth_limit);
}

/// Run every movement step for one tick
pub fn run<R: Rng>(state: &mut GameState, intent: &Intent, now: Millis, rng: &mut R) {
    state.player.expire_invulnerability(now);
    move_player(state, intent, now);
    advance_projectiles(state);
    advance_enemies(state, rng);
    advance_power_ups(state);
}
