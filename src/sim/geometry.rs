//! Tube geometry
//!
//! The play-field is a cylinder addressed by `(segment, depth)`:
//! - segment: angular slot, cyclic modulo the segment count
//! - depth: linear radial position, 0 at the center, `TUBE_DEPTH` at the mouth

use serde::{Deserialize, Serialize};

use crate::consts::{TUBE_DEPTH, TUBE_SEGMENTS};

/// A position inside the tube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeCoord {
    /// Angular slot in [0, TUBE_SEGMENTS)
    pub segment: u32,
    /// Radial position
    pub depth: f32,
}

impl TubeCoord {
    /// Build a coordinate, wrapping the segment into range
    pub fn new(segment: i64, depth: f32) -> Self {
        Self {
            segment: wrap_segment(segment, TUBE_SEGMENTS),
            depth,
        }
    }

    /// Angle of this segment in radians
    #[inline]
    pub fn angle(&self) -> f32 {
        segment_angle(self.segment, TUBE_SEGMENTS)
    }

    /// Shift the segment by `delta` slots, wrapping around the tube
    pub fn rotate(&mut self, delta: i64) {
        self.segment = wrap_segment(self.segment as i64 + delta, TUBE_SEGMENTS);
    }
}

/// Wrap any segment index into [0, segments)
#[inline]
pub fn wrap_segment(segment: i64, segments: u32) -> u32 {
    segment.rem_euclid(segments as i64) as u32
}

/// Wrapped segment gap: `min(|s1 - s2|, S - |s1 - s2|)`
#[inline]
pub fn segment_distance(s1: u32, s2: u32, segments: u32) -> u32 {
    let diff = s1.abs_diff(s2) % segments;
    diff.min(segments - diff)
}

/// Angle of a segment in radians
#[inline]
pub fn segment_angle(segment: u32, segments: u32) -> f32 {
    segment as f32 / segments as f32 * std::f32::consts::TAU
}

/// Shortest-arc angular difference combined with depth difference.
///
/// Presentation and tooling use this; collision checks use the integer
/// [`segment_distance`] instead.
pub fn tube_metric(a: TubeCoord, b: TubeCoord) -> f32 {
    let angle_diff = (a.angle() - b.angle()).abs();
    let wrapped = angle_diff.min(std::f32::consts::TAU - angle_diff);
    let depth_diff = (a.depth - b.depth).abs();
    (wrapped * wrapped + depth_diff * depth_diff).sqrt()
}

/// Clamp a movable depth into the playable band [0, D-1]
#[inline]
pub fn clamp_player_depth(depth: f32) -> f32 {
    depth.clamp(0.0, (TUBE_DEPTH - 1) as f32)
}
