//! Game state and core simulation types
//!
//! Everything the per-frame update touches lives in [`GameState`]; there is
//! no module-level mutable state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::SlotPool;
use super::rect::Rect;
use super::saucer::BonusTarget;
use super::shield::Shields;
use super::swarm::Swarm;
use crate::consts::*;
use crate::player_spawn_position;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused, nothing advances
    Paused,
    /// Run ended
    GameOver,
}

/// Sound cues and lifecycle notifications for the host, drained each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player fired a shot
    ShotFired,
    /// An alien was destroyed
    AlienKilled,
    /// Player ship hit (death explosion starts)
    PlayerDestroyed,
    /// Swarm marched one step; carries the rotating 0..=3 cue index
    SwarmStep(u8),
    /// Bonus target entered the field
    TargetSpawned,
    /// Periodic cue while the bonus target is on screen
    TargetHum,
    /// Bonus target left the field without being hit
    TargetLeft,
    /// Bonus target was shot
    TargetDestroyed,
    /// Wave cleared, carries the number of the wave that starts next
    WaveCleared(u32),
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub lives: u8,
    /// Remaining death-explosion time; > 0 while exploding
    pub explosion_timer: f32,
}

impl Player {
    pub fn new(lives: u8) -> Self {
        Self {
            pos: player_spawn_position(),
            lives,
            explosion_timer: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.explosion_timer > 0.0
    }

    /// Return to the spawn point
    pub fn respawn(&mut self) {
        self.pos = player_spawn_position();
        self.explosion_timer = 0.0;
    }
}

/// A shot in flight (player or enemy)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed vertical speed (px/s); negative moves up
    pub speed: f32,
}

impl Projectile {
    /// Player shot launched from the top center of the ship
    pub fn player(ship: &Rect, speed: f32) -> Self {
        let size = Vec2::new(PLAYER_SHOT_WIDTH, PLAYER_SHOT_HEIGHT);
        Self {
            pos: Vec2::new(ship.center().x - size.x / 2.0, ship.top() - size.y),
            size,
            speed: -speed.abs(),
        }
    }

    /// Enemy shot with its top-left corner at `pos`
    pub fn enemy(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(ENEMY_SHOT_WIDTH, ENEMY_SHOT_HEIGHT),
            speed: speed.abs(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Point that touches a target first, given the direction of travel
    pub fn leading_edge(&self) -> Vec2 {
        if self.speed < 0.0 {
            self.rect().top_center()
        } else {
            self.rect().bottom_center()
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }
}

/// Explosion flavour, used by the renderer to pick a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExplosionKind {
    #[default]
    AlienKill,
    /// Player shot stopped by a shield
    PlayerShotImpact,
    /// Enemy projectile stopped by a shield
    EnemyShotImpact,
}

/// A short-lived explosion effect
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Explosion {
    /// Center of the effect
    pub pos: Vec2,
    pub lifetime: f32,
    pub kind: ExplosionKind,
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score seen this process (never persisted)
    pub hi_score: u64,
    /// Current wave (1-based)
    pub wave: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// At most one player shot exists at a time
    pub player_shot: Option<Projectile>,
    pub enemy_shots: SlotPool<Projectile>,
    pub swarm: Swarm,
    pub target: BonusTarget,
    pub shields: Shields,
    pub explosions: SlotPool<Explosion>,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Random source for shot timing, shooter choice and target entry side
    #[serde(skip, default = "unseeded_rng")]
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game with the given balance parameters
    pub fn with_tuning(seed: u64, mut tuning: Tuning) -> Self {
        tuning.validate();
        let mut rng = Pcg32::seed_from_u64(seed);
        let wave = 1;
        let swarm = Swarm::new(&tuning, wave, &mut rng);
        let target = BonusTarget::new(&tuning, &mut rng);

        log::info!("New game (seed {seed})");

        Self {
            seed,
            phase: GamePhase::Playing,
            score: 0,
            hi_score: 0,
            wave,
            time_ticks: 0,
            player: Player::new(tuning.starting_lives),
            player_shot: None,
            enemy_shots: SlotPool::new(tuning.enemy_shot_capacity),
            swarm,
            target,
            shields: Shields::new(&tuning),
            explosions: SlotPool::new(tuning.explosion_capacity),
            events: Vec::new(),
            rng,
            tuning,
        }
    }

    /// Start over after a game over, keeping the high score and RNG stream
    pub fn restart(&mut self) {
        let tuning = &self.tuning;
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.wave = 1;
        self.time_ticks = 0;
        self.player = Player::new(tuning.starting_lives);
        self.player_shot = None;
        self.enemy_shots.clear();
        self.explosions.clear();
        self.swarm.reset(tuning, self.wave, &mut self.rng);
        self.target.reschedule(tuning, &mut self.rng);
        self.shields = Shields::new(tuning);
        self.events.clear();
        log::info!("New game (hi-score {})", self.hi_score);
    }

    /// Add points, tracking the high score
    pub fn add_score(&mut self, points: u32) {
        self.score += u64::from(points);
        self.hi_score = self.hi_score.max(self.score);
    }

    /// Spawn an explosion; silently dropped if the pool is full
    pub fn spawn_explosion(&mut self, pos: Vec2, kind: ExplosionKind) {
        let explosion = Explosion {
            pos,
            lifetime: self.tuning.explosion_lifetime,
            kind,
        };
        if self.explosions.spawn(explosion).is_none() {
            log::debug!("Explosion pool full, {kind:?} effect dropped");
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
