//! Tube to screen projection
//!
//! Presentation-side only. The simulation never reads projected positions;
//! the viewport clamp here changes where the player is drawn, not where it is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{TUBE_DEPTH, TUBE_SEGMENTS};
use crate::sim::geometry::{TubeCoord, segment_angle};

/// Distance kept between sprites and the viewport edge (pixels)
pub const VIEWPORT_MARGIN: f32 = 20.0;

/// How depth maps to radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionStyle {
    /// Radius grows linearly with depth
    #[default]
    Linear,
    /// Radius widens toward the mouth (`1 + 2 * depth / D` factor)
    Spiral,
}

/// Maps tube coordinates onto a viewport
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projection {
    pub viewport: Vec2,
    pub radius: f32,
    pub style: ProjectionStyle,
}

impl Projection {
    /// Fit the tube to a viewport (radius is 40% of the short side)
    pub fn fit(width: f32, height: f32, style: ProjectionStyle) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            radius: width.min(height) * 0.4,
            style,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.viewport / 2.0
    }

    /// Screen radius for a depth
    pub fn radius_at(&self, depth: f32) -> f32 {
        let t = depth / TUBE_DEPTH as f32;
        match self.style {
            ProjectionStyle::Linear => self.radius * t,
            ProjectionStyle::Spiral => self.radius * t * (1.0 + t * 2.0),
        }
    }

    /// Screen position of a tube coordinate
    pub fn tube_to_screen(&self, coord: TubeCoord) -> Vec2 {
        let angle = segment_angle(coord.segment, TUBE_SEGMENTS);
        self.center() + Vec2::from_angle(angle) * self.radius_at(coord.depth)
    }

    /// Player sprite size shrinks as it moves toward the center
    pub fn player_size(depth: f32) -> f32 {
        (25.0 - depth * 0.8).max(12.0)
    }

    fn inside_margin(&self, pos: Vec2, size: f32) -> bool {
        let half = size / 2.0;
        let min = Vec2::splat(VIEWPORT_MARGIN);
        let max = self.viewport - VIEWPORT_MARGIN;
        pos.x - half >= min.x && pos.y - half >= min.y && pos.x + half <= max.x && pos.y + half <= max.y
    }

    /// Depth at which to draw the player so the sprite stays inside the
    /// viewport margin. Steps inward one unit at a time.
    pub fn clamp_depth_to_viewport(&self, coord: TubeCoord) -> f32 {
        let mut depth = coord.depth;
        while depth > 0.0 {
            let pos = self.tube_to_screen(TubeCoord { depth, ..coord });
            if self.inside_margin(pos, Self::player_size(depth)) {
                break;
            }
            depth = (depth - 1.0).max(0.0);
        }
        depth
    }
}
