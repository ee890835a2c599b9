//! Collision detection and resolution in tube space
//!
//! Every check compares the wrapped integer segment gap and the raw depth gap
//! against a per-pair tolerance from the config table. Resolution is
//! two-phase: scan all pairs into a hit list, then apply it, so nothing is
//! removed from a collection while it is being scanned.

use super::geometry::{TubeCoord, segment_distance};
use super::state::{GameEvent, GameState};
use crate::Millis;
use crate::config::PairTolerance;
use crate::consts::TUBE_SEGMENTS;

/// Whether two coordinates overlap under `tolerance`
#[inline]
pub fn overlaps(a: TubeCoord, b: TubeCoord, tolerance: &PairTolerance) -> bool {
    let segment_gap = segment_distance(a.segment, b.segment, TUBE_SEGMENTS);
    tolerance.overlaps(segment_gap, (a.depth - b.depth).abs())
}

/// A player bullet striking an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletHit {
    pub bullet: usize,
    pub enemy: usize,
}

/// Something touching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerContact {
    EnemyBullet(usize),
    Enemy(usize),
    PowerUp(usize),
}

/// All overlaps found in one scan, in resolution order
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    pub bullet_hits: Vec<BulletHit>,
    pub player_contacts: Vec<PlayerContact>,
}

/// Phase one: find every overlapping pair without mutating anything.
///
/// Each bullet is credited to the first enemy in iteration order that it
/// overlaps and that still has hit points left after earlier bullets this
/// tick. A bullet with no such enemy flies on.
pub fn scan(state: &GameState) -> CollisionReport {
    let tolerances = &state.config.tolerances;
    let mut report = CollisionReport::default();

    let mut remaining: Vec<i32> = state.enemies.iter().map(|e| e.health).collect();
    for (bullet_idx, bullet) in state.player_bullets.iter().enumerate() {
        let target = state.enemies.iter().enumerate().find(|(enemy_idx, enemy)| {
            remaining[*enemy_idx] > 0 && overlaps(bullet.pos, enemy.pos, &tolerances.bullet_enemy)
        });
        if let Some((enemy_idx, _)) = target {
            remaining[enemy_idx] -= 1;
            report.bullet_hits.push(BulletHit {
                bullet: bullet_idx,
                enemy: enemy_idx,
            });
        }
    }

    let player = state.player.pos;
    for (idx, bullet) in state.enemy_bullets.iter().enumerate() {
        if overlaps(bullet.pos, player, &tolerances.enemy_bullet_player) {
            report.player_contacts.push(PlayerContact::EnemyBullet(idx));
        }
    }
    for (idx, enemy) in state.enemies.iter().enumerate() {
        // Enemies already shot down this tick never reach the player
        if remaining[idx] > 0 && overlaps(enemy.pos, player, &tolerances.enemy_player) {
            report.player_contacts.push(PlayerContact::Enemy(idx));
        }
    }
    for (idx, power_up) in state.power_ups.iter().enumerate() {
        if overlaps(power_up.pos, player, &tolerances.power_up_player) {
            report.player_contacts.push(PlayerContact::PowerUp(idx));
        }
    }

    report
}

/// Phase two: apply a scan's hits, then sweep consumed entities
pub fn apply(state: &mut GameState, report: &CollisionReport, now: Millis) {
    let mut spent_bullets = vec![false; state.player_bullets.len()];
    let mut dead_enemies = vec![false; state.enemies.len()];
    let mut spent_enemy_bullets = vec![false; state.enemy_bullets.len()];
    let mut taken_power_ups = vec![false; state.power_ups.len()];

    for hit in &report.bullet_hits {
        spent_bullets[hit.bullet] = true;
        let enemy = &mut state.enemies[hit.enemy];
        enemy.health -= 1;
        if enemy.health <= 0 && !dead_enemies[hit.enemy] {
            dead_enemies[hit.enemy] = true;
            let (kind, points) = (enemy.kind, enemy.points);
            log::debug!("Destroyed {:?} enemy for {} points", kind, points);
            state.add_score(points);
            state.emit(GameEvent::EnemyDestroyed { kind, points });
        }
    }

    for contact in &report.player_contacts {
        match *contact {
            PlayerContact::EnemyBullet(idx) => {
                // Invulnerability is re-checked per contact: the first hit of
                // a tick shields the player from the rest
                if state.player.is_invulnerable(now) {
                    continue;
                }
                spent_enemy_bullets[idx] = true;
                state.take_damage(state.config.bullet_damage, now);
            }
            PlayerContact::Enemy(idx) => {
                if state.player.is_invulnerable(now) || dead_enemies[idx] {
                    continue;
                }
                dead_enemies[idx] = true;
                state.take_damage(state.config.collision_damage, now);
            }
            PlayerContact::PowerUp(idx) => {
                taken_power_ups[idx] = true;
                let heal_amount = state.power_ups[idx].heal_amount;
                state.heal(heal_amount);
                state.emit(GameEvent::PowerUpCollected { heal_amount });
            }
        }
    }

    sweep(&mut state.player_bullets, &spent_bullets);
    sweep(&mut state.enemies, &dead_enemies);
    sweep(&mut state.enemy_bullets, &spent_enemy_bullets);
    sweep(&mut state.power_ups, &taken_power_ups);
}

/// Remove flagged items, preserving order
fn sweep<T>(items: &mut Vec<T>, remove: &[bool]) {
    let mut flags = remove.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Detect and resolve all collisions for one tick
pub fn resolve(state: &mut GameState, now: Millis) {
    let report = scan(state);
    apply(state, &report, now);
}
