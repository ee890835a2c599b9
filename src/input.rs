//! Normalized player input
//!
//! Device plumbing (keyboard listeners, touch, orientation sensors) lives
//! with the host. The simulation only sees an [`Intent`] set sampled at the
//! start of each tick, optionally driven by a calibrated tilt reading.

use serde::{Deserialize, Serialize};

use crate::consts::TUBE_SEGMENTS;
use crate::sim::GameState;
use crate::sim::geometry::segment_distance;

/// Tilt beyond this many degrees counts as a held direction
pub const TILT_DEAD_ZONE: f32 = 8.0;

/// Directional and action intents for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub move_left: bool,
    pub move_right: bool,
    /// Toward the center (decreasing depth)
    pub move_in: bool,
    /// Toward the mouth (increasing depth)
    pub move_out: bool,
    pub fire: bool,
}

impl Intent {
    /// Net angular direction: -1, 0 or +1
    pub fn turn(&self) -> i64 {
        self.move_right as i64 - self.move_left as i64
    }

    /// Net depth direction: -1 (in), 0 or +1 (out)
    pub fn depth_step(&self) -> i64 {
        self.move_out as i64 - self.move_in as i64
    }
}

/// Device orientation in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltReading {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub calibrated: bool,
}

impl TiltReading {
    /// Directional intent implied by this reading
    pub fn to_intent(&self) -> Intent {
        Intent {
            move_left: self.roll < -TILT_DEAD_ZONE,
            move_right: self.roll > TILT_DEAD_ZONE,
            move_in: self.pitch > TILT_DEAD_ZONE,
            move_out: self.pitch < -TILT_DEAD_ZONE,
            fire: false,
        }
    }
}

/// Zero point captured from the device's resting orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltCalibration {
    offset: Option<(f32, f32, f32)>,
}

impl TiltCalibration {
    /// Use `raw` as the new resting orientation
    pub fn calibrate(&mut self, raw: TiltReading) {
        self.offset = Some((raw.yaw, raw.pitch, raw.roll));
    }

    /// Forget the resting orientation
    pub fn reset(&mut self) {
        self.offset = None;
    }

    pub fn is_calibrated(&self) -> bool {
        self.offset.is_some()
    }

    /// Raw reading relative to the resting orientation
    pub fn apply(&self, raw: TiltReading) -> TiltReading {
        match self.offset {
            Some((yaw, pitch, roll)) => TiltReading {
                yaw: raw.yaw - yaw,
                pitch: raw.pitch - pitch,
                roll: raw.roll - roll,
                calibrated: true,
            },
            None => TiltReading {
                calibrated: false,
                ..raw
            },
        }
    }
}

/// Input snapshot consumed by one tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub intent: Intent,
    /// Calibrated tilt replaces directional keys when present
    pub tilt: Option<TiltReading>,
    /// Pause toggle (one-shot, cleared by the host after each tick)
    pub toggle_pause: bool,
}

impl TickInput {
    /// Intent after folding in tilt control; keyboard is the fallback
    pub fn effective_intent(&self) -> Intent {
        match self.tilt {
            Some(tilt) if tilt.calibrated => Intent {
                fire: self.intent.fire,
                ..tilt.to_intent()
            },
            _ => self.intent,
        }
    }
}

/// Demo-mode pilot: chase the nearest inbound threat and keep firing
pub fn autopilot(state: &GameState) -> Intent {
    let player = state.player.pos;

    // Nearest threat is whatever is closest to the player's depth
    let target = state
        .enemies
        .iter()
        .map(|e| e.pos)
        .chain(state.enemy_bullets.iter().map(|b| b.pos))
        .min_by(|a, b| {
            let da = (a.depth - player.depth).abs();
            let db = (b.depth - player.depth).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    let mut intent = Intent {
        fire: !state.enemies.is_empty(),
        ..Default::default()
    };

    if let Some(target) = target {
        if segment_distance(player.segment, target.segment, TUBE_SEGMENTS) > 0 {
            // Shorter way around the tube
            let forward = (target.segment + TUBE_SEGMENTS - player.segment) % TUBE_SEGMENTS;
            if forward <= TUBE_SEGMENTS / 2 {
                intent.move_right = true;
            } else {
                intent.move_left = true;
            }
        }
    }

    intent
}
