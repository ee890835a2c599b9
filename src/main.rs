//! Tube Tempest entry point
//!
//! Headless native driver: runs a demo session under the autopilot at a
//! simulated 60 Hz and logs HUD events. Presentation hosts link the library
//! and drive `tick` from their own frame callback instead.
//!
//! Usage: `tube-tempest [variant] [seconds] [config.json]`

use tube_tempest::input::autopilot;
use tube_tempest::sim::{GameEvent, GamePhase, GameState, tick};
use tube_tempest::{GameConfig, Millis, TickInput, Variant};

/// Simulated frame interval (60 Hz)
const FRAME_MS: Millis = 16;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let variant = args
        .next()
        .and_then(|s| Variant::from_str(&s))
        .unwrap_or_default();
    let seconds: Millis = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);
    let config = match args.next() {
        Some(path) => GameConfig::load_or_default(path, variant),
        None => GameConfig::for_variant(variant),
    };

    log::info!("Tube Tempest (native) starting: {} rules, {}s demo", config.variant.as_str(), seconds);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut state = GameState::new(config, seed);

    let mut now: Millis = 0;
    while now < seconds * 1000 && state.phase != GamePhase::GameOver {
        let input = TickInput {
            intent: autopilot(&state),
            ..Default::default()
        };
        tick(&mut state, &input, now);
        now += FRAME_MS;

        for event in state.drain_events() {
            match event {
                GameEvent::LevelChanged(level) => log::info!("[{:>6} ms] level {}", now, level),
                GameEvent::VitalityChanged(vitality) => {
                    log::info!("[{:>6} ms] vitality {:?}", now, vitality)
                }
                GameEvent::GameOver { score, level } => {
                    log::info!("[{:>6} ms] game over, score {} level {}", now, score, level)
                }
                other => log::debug!("[{:>6} ms] {:?}", now, other),
            }
        }
    }

    let hud = state.snapshot(now).hud;
    println!(
        "Final: score {} | level {} | {:?} | {:?} after {} ticks",
        hud.score, hud.level, hud.vitality, hud.phase, state.time_ticks
    );
}
