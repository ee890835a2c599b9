//! Per-frame simulation tick and game state transitions
//!
//! One call advances the game by one display frame. The host captures the
//! wall-clock timestamp once per frame and passes it in; every cooldown,
//! spawn timer and invulnerability check in the tick reads that same value.

use super::state::{GameEvent, GamePhase, GameState, Player, SpawnTimers, Vitality};
use super::{collision, movement, spawn};
use crate::Millis;
use crate::consts::LEVEL_SCORE_STEP;
use crate::input::TickInput;

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, now: Millis) {
    if input.toggle_pause {
        toggle_pause(state);
    }

    // Paused and game over freeze the whole pipeline
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let mut rng = state.rng_state.next_rng();

    spawn::run_spawn_timers(state, now, &mut rng);
    movement::run(state, &input.effective_intent(), now, &mut rng);
    collision::resolve(state, now);

    if state.vitality.is_depleted() {
        game_over(state);
        return;
    }

    check_level_up(state, &mut rng);
}

/// Flip between Playing and Paused; ignored after game over
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.emit(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.emit(GameEvent::Resumed);
        }
        GamePhase::GameOver => {}
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    log::info!("Game over: score {} at level {}", state.score, state.level);
    state.emit(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
}

/// Level up once the tube is clear and the score passes `level * 1000`.
///
/// The new wave refills the tube, so the condition cannot hold again on the
/// following tick.
pub fn check_level_up<R: rand::Rng>(state: &mut GameState, rng: &mut R) -> bool {
    let threshold = state.level as u64 * LEVEL_SCORE_STEP;
    if !state.enemies.is_empty() || state.score <= threshold {
        return false;
    }

    state.level += 1;
    log::info!(
        "Level up to {} (spawn interval {} ms)",
        state.level,
        state.config.enemy_spawn_interval(state.level)
    );
    state.emit(GameEvent::LevelChanged(state.level));
    spawn::spawn_initial_wave(state, rng);
    true
}

/// Reset to a fresh run and spawn the first wave. Leaves any phase.
pub fn restart(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.score = 0;
    state.level = 1;
    state.vitality = Vitality::full(state.config.vitality);
    state.player = Player::default();
    state.enemies.clear();
    state.player_bullets.clear();
    state.enemy_bullets.clear();
    state.power_ups.clear();
    state.timers = SpawnTimers::default();

    let mut rng = state.rng_state.next_rng();
    spawn::spawn_initial_wave(state, &mut rng);

    log::info!("Restarted");
    state.emit(GameEvent::Restarted);
    state.emit(GameEvent::ScoreChanged(state.score));
    state.emit(GameEvent::VitalityChanged(state.vitality));
    state.emit(GameEvent::LevelChanged(state.level));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Variant};
    use crate::consts::*;
    use crate::input::Intent;
    use crate::sim::geometry::TubeCoord;
    use crate::sim::state::{Enemy, EnemyKind, Heading, Projectile};
    use proptest::prelude::*;

    fn pause() -> TickInput {
        TickInput {
            toggle_pause: true,
            ..Default::default()
        }
    }

    fn fire() -> TickInput {
        TickInput {
            intent: Intent {
                fire: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Game with no spawns or enemy fire interfering
    fn quiet_state(variant: Variant) -> GameState {
        let mut config = GameConfig::for_variant(variant);
        config.power_ups = false;
        config.spawn_interval_ms = Millis::MAX;
        config.spawn_interval_floor_ms = Millis::MAX;
        GameState::empty(config, 4242)
    }

    #[test]
    fn test_fresh_game_has_base_wave() {
        let state = GameState::new(GameConfig::default(), 1);
        assert_eq!(state.enemies.len(), state.config.base_enemies as usize);
        assert_eq!(state.enemies.len(), 8);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = GameState::new(GameConfig::default(), 5);
        tick(&mut state, &TickInput::default(), 0);
        let depths: Vec<f32> = state.enemies.iter().map(|e| e.pos.depth).collect();

        tick(&mut state, &pause(), 16);
        assert_eq!(state.phase, GamePhase::Paused);
        for i in 0..100 {
            tick(&mut state, &fire(), 32 + i * 16);
        }
        let frozen: Vec<f32> = state.enemies.iter().map(|e| e.pos.depth).collect();
        assert_eq!(depths, frozen);
        assert!(state.player_bullets.is_empty());

        tick(&mut state, &pause(), 5_000);
        assert_eq!(state.phase, GamePhase::Playing);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Paused));
        assert!(events.contains(&GameEvent::Resumed));
    }

    #[test]
    fn test_fire_kills_enemy_in_lane() {
        let mut state = quiet_state(Variant::Keyboard);
        state.enemies.push(Enemy {
            id: 900,
            kind: EnemyKind::Yellow,
            pos: TubeCoord::new(0, PLAYER_START_DEPTH - 2.0),
            speed: 0.0,
            health: 1,
            points: 200,
        });
        state.score = 0;

        tick(&mut state, &fire(), 1_000);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_health_hits_to_game_over() {
        let mut state = quiet_state(Variant::Keyboard);
        state.vitality = Vitality::Health { current: 15, max: 100 };
        state.enemy_bullets.push(Projectile::fired(
            77,
            TubeCoord::new(0, PLAYER_START_DEPTH - 0.1),
            0.0,
            Heading::Outward,
        ));

        tick(&mut state, &TickInput::default(), 100);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver { score: 0, level: 1 }));

        // Terminal: pause toggles and ticks do nothing
        tick(&mut state, &pause(), 200);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_level_up_once_per_clear() {
        let mut state = quiet_state(Variant::Classic);
        state.score = 1_001;

        tick(&mut state, &TickInput::default(), 0);
        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), state.config.wave_size(2));
        assert!(state.drain_events().contains(&GameEvent::LevelChanged(2)));

        // Same score, new wave on the board: no further level up
        tick(&mut state, &TickInput::default(), 16);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_no_level_up_at_exact_threshold() {
        let mut state = quiet_state(Variant::Classic);
        state.score = 1_000;
        tick(&mut state, &TickInput::default(), 0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.score = 4_500;
        state.level = 4;
        state.vitality = Vitality::Health { current: 0, max: 100 };
        state.phase = GamePhase::GameOver;
        state.player.pos = TubeCoord::new(5, 3.0);
        state.player.invulnerable_until = Some(10_000);
        state
            .player_bullets
            .push(Projectile::fired(1, TubeCoord::new(1, 1.0), 8.0, Heading::Inward));

        restart(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.vitality, Vitality::Health { current: 100, max: 100 });
        assert_eq!(state.player.pos, TubeCoord::new(0, PLAYER_START_DEPTH));
        assert!(state.player.invulnerable_until.is_none());
        assert!(state.player_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.enemies.len(), 8);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Restarted));
        assert!(events.contains(&GameEvent::LevelChanged(1)));
    }

    #[test]
    fn test_restart_escapes_pause() {
        let mut state = GameState::new(GameConfig::for_variant(Variant::Classic), 3);
        toggle_pause(&mut state);
        restart(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.vitality, Vitality::Lives(3));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameState::new(GameConfig::default(), 2024);
        let mut b = GameState::new(GameConfig::default(), 2024);
        for i in 0..600 {
            let input = if i % 3 == 0 { fire() } else { TickInput::default() };
            tick(&mut a, &input, i * 16);
            tick(&mut b, &input, i * 16);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.enemy_bullets.len(), b.enemy_bullets.len());
    }

    #[test]
    fn test_collections_stay_in_range() {
        let mut state = GameState::new(GameConfig::default(), 11);
        for i in 0..3_000 {
            tick(&mut state, &fire(), i * 16);
            for e in &state.enemies {
                assert!(e.pos.depth < TUBE_DEPTH as f32);
                assert!(e.pos.segment < TUBE_SEGMENTS);
            }
            assert!(state.player_bullets.iter().all(|b| b.pos.depth > 0.0));
            assert!(state.enemy_bullets.iter().all(|b| b.pos.depth < TUBE_DEPTH as f32));
            assert!(state.power_ups.iter().all(|p| p.pos.depth < TUBE_DEPTH as f32));
        }
    }

    proptest! {
        #[test]
        fn score_and_level_never_decrease(
            seed in any::<u64>(),
            inputs in proptest::collection::vec((any::<bool>(), 0u8..3), 1..300),
        ) {
            let mut state = GameState::new(GameConfig::for_variant(Variant::Classic), seed);
            let mut now = 0;
            for (fire, dir) in inputs {
                now += 16;
                let input = TickInput {
                    intent: Intent {
                        fire,
                        move_left: dir == 1,
                        move_right: dir == 2,
                        ..Default::default()
                    },
                    ..Default::default()
                };
                let (score, level) = (state.score, state.level);
                tick(&mut state, &input, now);
                prop_assert!(state.score >= score);
                prop_assert!(state.level >= level);
            }
        }
    }
}
