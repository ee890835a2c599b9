//! Game rules configuration
//!
//! The tube shooter shipped as several builds whose rules drifted apart
//! (lives vs health, strict vs lenient hit boxes, fixed vs movable depth).
//! Each build is a [`Variant`] preset over one [`GameConfig`] table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Millis;

/// Rule presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Three lives, lenient hit boxes, player pinned to the tube mouth
    Classic,
    /// Health bar with invulnerability, strict hit boxes, depth movement
    #[default]
    Keyboard,
    /// Keyboard rules driven by device tilt
    Mobile,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Keyboard => "Keyboard",
            Variant::Mobile => "Mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "lives" => Some(Variant::Classic),
            "keyboard" | "health" => Some(Variant::Keyboard),
            "mobile" | "tilt" => Some(Variant::Mobile),
            _ => None,
        }
    }
}

/// How the player's vitality is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalityMode {
    /// Discrete lives, every hit costs one, no invulnerability
    Lives { start: u32 },
    /// 0..=max health with a post-hit invulnerability window
    Health { max: u32 },
}

/// Overlap thresholds for one kind of collision pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairTolerance {
    /// Inclusive wrapped segment gap
    pub max_segment_gap: f32,
    /// Exclusive depth gap
    pub max_depth_gap: f32,
}

impl PairTolerance {
    pub const fn new(max_segment_gap: f32, max_depth_gap: f32) -> Self {
        Self {
            max_segment_gap,
            max_depth_gap,
        }
    }

    /// True if the given gaps count as an overlap
    #[inline]
    pub fn overlaps(&self, segment_gap: u32, depth_gap: f32) -> bool {
        segment_gap as f32 <= self.max_segment_gap && depth_gap < self.max_depth_gap
    }
}

/// Collision thresholds for every pair the resolver checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionTolerances {
    pub bullet_enemy: PairTolerance,
    pub enemy_bullet_player: PairTolerance,
    pub enemy_player: PairTolerance,
    pub power_up_player: PairTolerance,
}

impl CollisionTolerances {
    /// Wide hit boxes used by the lives-based build
    pub const LENIENT: Self = Self {
        bullet_enemy: PairTolerance::new(1.0, 3.0),
        enemy_bullet_player: PairTolerance::new(1.0, 2.0),
        enemy_player: PairTolerance::new(1.0, 2.0),
        power_up_player: PairTolerance::new(1.0, 2.0),
    };

    /// Tight player hit box used by the health-based builds
    pub const STRICT: Self = Self {
        bullet_enemy: PairTolerance::new(1.0, 3.0),
        enemy_bullet_player: PairTolerance::new(0.5, 1.0),
        enemy_player: PairTolerance::new(0.5, 1.0),
        power_up_player: PairTolerance::new(1.0, 2.0),
    };
}

/// Complete rule set for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: Variant,
    pub vitality: VitalityMode,
    pub tolerances: CollisionTolerances,

    // === Player ===
    /// Player may move toward/away from the center
    pub depth_movement: bool,
    /// Health lost to an enemy bullet (one life in lives mode)
    pub bullet_damage: u32,
    /// Health lost when an enemy rams the player
    pub collision_damage: u32,
    /// Immunity after a hit (health mode only)
    pub invulnerability_ms: Millis,

    // === Enemies ===
    /// Per-tick multiplier on enemy speed
    pub enemy_speed_scale: f32,
    /// Enemies in the first wave
    pub base_enemies: u32,
    /// Extra enemies per level above 1
    pub wave_growth: u32,
    /// Enemy spawn interval at level 1
    pub spawn_interval_ms: Millis,
    /// Interval reduction per level
    pub spawn_interval_step_ms: Millis,
    /// Interval never drops below this
    pub spawn_interval_floor_ms: Millis,

    // === Power-ups ===
    pub power_ups: bool,
    pub power_up_interval_ms: Millis,
    pub heal_amount: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl GameConfig {
    /// Rules for a given build
    pub fn for_variant(variant: Variant) -> Self {
        let classic = variant == Variant::Classic;
        Self {
            variant,
            vitality: if classic {
                VitalityMode::Lives { start: 3 }
            } else {
                VitalityMode::Health { max: 100 }
            },
            tolerances: if classic {
                CollisionTolerances::LENIENT
            } else {
                CollisionTolerances::STRICT
            },

            depth_movement: !classic,
            bullet_damage: if classic { 1 } else { 15 },
            collision_damage: if classic { 1 } else { 20 },
            invulnerability_ms: 2000,

            enemy_speed_scale: if classic { 0.02 } else { 0.005 },
            base_enemies: 8,
            wave_growth: 2,
            spawn_interval_ms: 2000,
            spawn_interval_step_ms: 100,
            spawn_interval_floor_ms: 500,

            power_ups: !classic,
            power_up_interval_ms: 5000,
            heal_amount: 25,
        }
    }

    /// Enemy spawn interval for a level: `max(floor, base - step * (level - 1))`
    pub fn enemy_spawn_interval(&self, level: u32) -> Millis {
        let reduction = self.spawn_interval_step_ms * level.saturating_sub(1) as Millis;
        self.spawn_interval_ms
            .saturating_sub(reduction)
            .max(self.spawn_interval_floor_ms)
    }

    /// Size of the wave spawned when a level begins
    pub fn wave_size(&self, level: u32) -> usize {
        (self.base_enemies + level.saturating_sub(1) * self.wave_growth) as usize
    }

    /// Parse a config from JSON; missing fields take the default variant's values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config file, falling back to the variant preset on any failure
    pub fn load_or_default(path: impl AsRef<Path>, fallback: Variant) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded {} rules from {}", config.variant.as_str(), path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Invalid config {}: {}, using {} rules", path.display(), err, fallback.as_str());
                    Self::for_variant(fallback)
                }
            },
            Err(err) => {
                log::info!("No config at {} ({}), using {} rules", path.display(), err, fallback.as_str());
                Self::for_variant(fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_uses_lives_and_lenient_boxes() {
        let config = GameConfig::for_variant(Variant::Classic);
        assert_eq!(config.vitality, VitalityMode::Lives { start: 3 });
        assert_eq!(config.tolerances, CollisionTolerances::LENIENT);
        assert!(!config.depth_movement);
        assert!(!config.power_ups);
    }

    #[test]
    fn test_health_variants_share_rules() {
        let keyboard = GameConfig::for_variant(Variant::Keyboard);
        let mobile = GameConfig::for_variant(Variant::Mobile);
        assert_eq!(keyboard.vitality, VitalityMode::Health { max: 100 });
        assert_eq!(keyboard.vitality, mobile.vitality);
        assert_eq!(keyboard.tolerances, CollisionTolerances::STRICT);
    }

    #[test]
    fn test_strict_half_segment_means_same_segment() {
        let tol = CollisionTolerances::STRICT.enemy_player;
        assert!(tol.overlaps(0, 0.5));
        assert!(!tol.overlaps(1, 0.5));
        assert!(!tol.overlaps(0, 1.0));
    }

    #[test]
    fn test_spawn_interval_floors() {
        let config = GameConfig::default();
        assert_eq!(config.enemy_spawn_interval(1), 2000);
        assert_eq!(config.enemy_spawn_interval(2), 1900);
        assert_eq!(config.enemy_spawn_interval(16), 500);
        assert_eq!(config.enemy_spawn_interval(100), 500);
    }

    #[test]
    fn test_wave_size_grows_per_level() {
        let config = GameConfig::default();
        assert_eq!(config.wave_size(1), 8);
        assert_eq!(config.wave_size(3), 12);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{ "base_enemies": 4, "power_ups": false }"#)
            .expect("partial config should parse");
        assert_eq!(config.base_enemies, 4);
        assert!(!config.power_ups);
        assert_eq!(config.heal_amount, 25);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = GameConfig::load_or_default("/nonexistent/tube-tempest.json", Variant::Classic);
        assert_eq!(config.variant, Variant::Classic);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("TILT"), Some(Variant::Mobile));
        assert_eq!(Variant::from_str("lives"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("vector"), None);
    }
}
