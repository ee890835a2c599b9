//! Game state and core simulation types
//!
//! Everything the simulation mutates lives on [`GameState`]. Systems are free
//! functions over it, so each can be exercised without the others.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::TubeCoord;
use crate::Millis;
use crate::config::{GameConfig, VitalityMode};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen until toggled back
    Paused,
    /// Run ended, only restart leaves this
    GameOver,
}

/// Player vitality, either lives or a health bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vitality {
    Lives(u32),
    Health { current: u32, max: u32 },
}

impl Vitality {
    /// Full vitality for a mode
    pub fn full(mode: VitalityMode) -> Self {
        match mode {
            VitalityMode::Lives { start } => Vitality::Lives(start),
            VitalityMode::Health { max } => Vitality::Health { current: max, max },
        }
    }

    /// Lose `amount` health, or one life. Clamps at zero.
    pub fn damage(&mut self, amount: u32) {
        match self {
            Vitality::Lives(n) => *n = n.saturating_sub(1),
            Vitality::Health { current, .. } => *current = current.saturating_sub(amount),
        }
    }

    /// Restore `amount` health, or one life, capped at the maximum
    pub fn heal(&mut self, amount: u32, mode: VitalityMode) {
        match (self, mode) {
            (Vitality::Lives(n), VitalityMode::Lives { start }) => *n = (*n + 1).min(start),
            (Vitality::Health { current, max }, _) => *current = (*current + amount).min(*max),
            (Vitality::Lives(n), _) => *n += 1,
        }
    }

    pub fn is_depleted(&self) -> bool {
        match self {
            Vitality::Lives(n) => *n == 0,
            Vitality::Health { current, .. } => *current == 0,
        }
    }

    /// True for health-based vitality (grants invulnerability on hit)
    pub fn uses_invulnerability(&self) -> bool {
        matches!(self, Vitality::Health { .. })
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: TubeCoord,
    /// Last angular move
    pub last_turn_at: Option<Millis>,
    /// Last depth move
    pub last_depth_move_at: Option<Millis>,
    /// Last shot fired
    pub last_shot_at: Option<Millis>,
    /// Immune to damage until this timestamp (inclusive)
    pub invulnerable_until: Option<Millis>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: TubeCoord::new(0, PLAYER_START_DEPTH),
            last_turn_at: None,
            last_depth_move_at: None,
            last_shot_at: None,
            invulnerable_until: None,
        }
    }
}

impl Player {
    /// Whether damage is ignored at `now`
    pub fn is_invulnerable(&self, now: Millis) -> bool {
        self.invulnerable_until.is_some_and(|until| now <= until)
    }

    /// Drop an expired invulnerability window
    pub fn expire_invulnerability(&mut self, now: Millis) {
        if self.invulnerable_until.is_some_and(|until| now > until) {
            self.invulnerable_until = None;
        }
    }
}

/// Enemy archetypes (the kind doubles as the cosmetic tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow, fragile
    Red,
    /// Takes three hits
    Orange,
    /// Fast, fragile, worth the most
    Yellow,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Red, EnemyKind::Orange, EnemyKind::Yellow];

    pub fn points(&self) -> u64 {
        match self {
            EnemyKind::Red => 100,
            EnemyKind::Orange => 150,
            EnemyKind::Yellow => 200,
        }
    }

    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Red => 1.0,
            EnemyKind::Orange => 2.0,
            EnemyKind::Yellow => 3.0,
        }
    }

    pub fn max_health(&self) -> i32 {
        match self {
            EnemyKind::Orange => 3,
            EnemyKind::Red | EnemyKind::Yellow => 1,
        }
    }
}

/// An inbound enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: TubeCoord,
    pub speed: f32,
    pub health: i32,
    pub points: u64,
}

/// Which way a projectile travels along the depth axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Toward the center (player bullets)
    Inward,
    /// Toward the mouth (enemy bullets)
    Outward,
}

/// A bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: TubeCoord,
    pub speed: f32,
    pub heading: Heading,
    /// Ticks until the terminal depth is crossed
    pub ticks_left: u32,
}

impl Projectile {
    /// A bullet leaving `pos`, with its flight time fixed up front.
    ///
    /// Flight time is `ceil(distance / step)` computed once, so repeated f32
    /// steps can never stretch or shorten the lifetime.
    pub fn fired(id: u32, pos: TubeCoord, speed: f32, heading: Heading) -> Self {
        let distance = match heading {
            Heading::Inward => pos.depth,
            Heading::Outward => TUBE_DEPTH as f32 - pos.depth,
        };
        Self {
            id,
            pos,
            speed,
            heading,
            ticks_left: flight_ticks(distance, speed * BULLET_DEPTH_SCALE),
        }
    }

    /// True once the projectile has crossed its terminal depth
    pub fn is_spent(&self) -> bool {
        self.ticks_left == 0
    }
}

/// Ticks needed to cover `distance` at `step` per tick
fn flight_ticks(distance: f32, step: f32) -> u32 {
    if distance <= 0.0 {
        return 0;
    }
    if step <= 0.0 {
        return u32::MAX;
    }
    (distance as f64 / step as f64).ceil() as u32
}

/// A healing pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: TubeCoord,
    pub heal_amount: u32,
}

/// Notifications for HUD and overlay collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    VitalityChanged(Vitality),
    /// New level after a level-up or restart
    LevelChanged(u32),
    EnemyDestroyed { kind: EnemyKind, points: u64 },
    PowerUpCollected { heal_amount: u32 },
    Paused,
    Resumed,
    GameOver { score: u64, level: u32 },
    Restarted,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Derive the next generator; each call yields an independent stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }

    /// Generator for the run's first wave
    pub fn initial_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Spawn timer anchors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub last_enemy_at: Option<Millis>,
    pub last_power_up_at: Option<Millis>,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Rules for this run
    pub config: GameConfig,
    /// Run seed and stream for reproducibility
    pub rng_state: RngState,
    pub phase: GamePhase,
    pub score: u64,
    pub vitality: Vitality,
    /// Current level (1-based)
    pub level: u32,
    /// Simulated tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub timers: SpawnTimers,
    /// Pending notifications (drained by the host)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with its initial wave already spawned
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = Self::empty(config, seed);
        let mut rng = state.rng_state.initial_rng();
        super::spawn::spawn_initial_wave(&mut state, &mut rng);
        state
    }

    /// A game with no entities (wave not yet spawned)
    pub fn empty(config: GameConfig, seed: u64) -> Self {
        Self {
            vitality: Vitality::full(config.vitality),
            config,
            rng_state: RngState::new(seed),
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            time_ticks: 0,
            player: Player::default(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            timers: SpawnTimers::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a notification
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add points (score never decreases)
    pub fn add_score(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score += points;
        self.emit(GameEvent::ScoreChanged(self.score));
    }

    /// Apply damage to the player, opening an invulnerability window in health mode
    pub fn take_damage(&mut self, amount: u32, now: Millis) {
        self.vitality.damage(amount);
        if self.vitality.uses_invulnerability() {
            self.player.invulnerable_until = Some(now + self.config.invulnerability_ms);
        }
        log::debug!("Player hit for {}, vitality now {:?}", amount, self.vitality);
        self.emit(GameEvent::VitalityChanged(self.vitality));
    }

    /// Restore player vitality
    pub fn heal(&mut self, amount: u32) {
        self.vitality.heal(amount, self.config.vitality);
        self.emit(GameEvent::VitalityChanged(self.vitality));
    }
}
