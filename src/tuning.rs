//! Data-driven game balance
//!
//! Every gameplay constant that is not pure field geometry lives here so a
//! JSON file can rebalance the game without a rebuild. Missing fields fall
//! back to the classic values.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Balance parameters for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal ship speed (px/s)
    pub player_speed: f32,
    /// Player shot speed, upward (px/s)
    pub player_shot_speed: f32,
    /// Lives at the start of a game
    pub starting_lives: u8,
    /// Duration of the player death explosion (s)
    pub player_explosion_time: f32,

    // === Swarm ===
    pub swarm_rows: usize,
    pub swarm_cols: usize,
    /// World position of the top-left alien
    pub swarm_origin: Vec2,
    /// Distance between neighbouring alien cells
    pub swarm_spacing: Vec2,
    /// Horizontal distance covered by one lockstep move
    pub swarm_step: f32,
    /// Vertical drop when the swarm reverses at an edge
    pub swarm_drop: f32,
    /// Time between lockstep moves at the start of wave 1 (s)
    pub move_wait_base: f32,
    /// Multiplier applied to the move wait per alien killed
    pub move_speedup_factor: f32,
    /// Floor for the move wait (s)
    pub move_wait_min: f32,
    /// Extra starting speed per wave (wave N starts at base / (1 + (N-1) * this))
    pub wave_speedup: f32,
    pub shoot_interval_min: f32,
    pub shoot_interval_max: f32,
    /// Floor for the scaled shoot interval (s)
    pub shoot_interval_floor: f32,

    // === Enemy projectiles ===
    /// Enemy projectile speed, downward (px/s)
    pub enemy_shot_speed: f32,
    pub enemy_shot_capacity: usize,

    // === Bonus target ===
    pub target_speed: f32,
    pub target_points: u32,
    pub target_spawn_min: f32,
    pub target_spawn_max: f32,
    /// Vertical position of the target's top edge
    pub target_y: f32,
    pub target_explosion_time: f32,
    /// Period of the "target present" audio cue (s)
    pub target_cue_period: f32,

    // === Shields ===
    pub shield_count: usize,
    pub shield_mask_width: usize,
    pub shield_mask_height: usize,
    /// World size of a shield relative to its mask resolution
    pub shield_scale: f32,
    /// Distance from the shield top edge to the bottom of the field
    pub shield_offset_from_bottom: f32,
    /// Radius of a damage stamp, in mask pixels
    pub shield_damage_radius: f32,
    /// Minimum mask opacity treated as solid
    pub shield_opaque_threshold: u8,
    /// Damage stamps applied per frame while an alien overlaps a shield
    pub shield_contact_stamps: u32,

    // === Explosions ===
    pub explosion_capacity: usize,
    pub explosion_lifetime: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Player
            player_speed: 300.0,
            player_shot_speed: 420.0,
            starting_lives: 3,
            player_explosion_time: 1.0,

            // Swarm
            swarm_rows: 5,
            swarm_cols: 11,
            swarm_origin: Vec2::new(80.0, 80.0),
            swarm_spacing: Vec2::new(45.0, 35.0),
            swarm_step: 3.0,
            swarm_drop: 2.0,
            move_wait_base: 0.8,
            move_speedup_factor: 0.97,
            move_wait_min: 0.05,
            wave_speedup: 0.2,
            shoot_interval_min: 0.5,
            shoot_interval_max: 2.0,
            shoot_interval_floor: 0.1,

            // Enemy projectiles
            enemy_shot_speed: 240.0,
            enemy_shot_capacity: 10,

            // Bonus target
            target_speed: 55.0,
            target_points: 200,
            target_spawn_min: 30.0,
            target_spawn_max: 240.0,
            target_y: 50.0,
            target_explosion_time: 0.5,
            target_cue_period: 0.5,

            // Shields
            shield_count: 4,
            shield_mask_width: 44,
            shield_mask_height: 32,
            shield_scale: 2.0,
            shield_offset_from_bottom: 120.0,
            shield_damage_radius: 5.0,
            shield_opaque_threshold: 10,
            shield_contact_stamps: 3,

            // Explosions
            explosion_capacity: 10,
            explosion_lifetime: 0.3,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate();
        Ok(tuning)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning file {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values that would break the simulation
    pub fn validate(&mut self) {
        let defaults = Self::default();

        if self.swarm_rows == 0 || self.swarm_cols == 0 {
            log::warn!(
                "Swarm grid {}x{} is empty, using {}x{}",
                self.swarm_rows,
                self.swarm_cols,
                defaults.swarm_rows,
                defaults.swarm_cols
            );
            self.swarm_rows = defaults.swarm_rows;
            self.swarm_cols = defaults.swarm_cols;
        }
        if !(self.move_speedup_factor > 0.0 && self.move_speedup_factor < 1.0) {
            log::warn!(
                "move_speedup_factor {} outside (0, 1), using {}",
                self.move_speedup_factor,
                defaults.move_speedup_factor
            );
            self.move_speedup_factor = defaults.move_speedup_factor;
        }
        if self.move_wait_min <= 0.0 {
            log::warn!("move_wait_min must be positive, using {}", defaults.move_wait_min);
            self.move_wait_min = defaults.move_wait_min;
        }
        if self.shoot_interval_min > self.shoot_interval_max {
            log::warn!(
                "shoot interval [{}, {}] is inverted, swapping",
                self.shoot_interval_min,
                self.shoot_interval_max
            );
            std::mem::swap(&mut self.shoot_interval_min, &mut self.shoot_interval_max);
        }
        if self.target_spawn_min > self.target_spawn_max {
            log::warn!(
                "target spawn interval [{}, {}] is inverted, swapping",
                self.target_spawn_min,
                self.target_spawn_max
            );
            std::mem::swap(&mut self.target_spawn_min, &mut self.target_spawn_max);
        }
        if self.enemy_shot_capacity == 0 {
            log::warn!("enemy_shot_capacity is 0, using 1");
            self.enemy_shot_capacity = 1;
        }
        if self.explosion_capacity == 0 {
            log::warn!("explosion_capacity is 0, using 1");
            self.explosion_capacity = 1;
        }
        // A zero-length death explosion would never count down, so lives never drop
        if self.player_explosion_time <= 0.0 {
            log::warn!(
                "player_explosion_time must be positive, using {}",
                defaults.player_explosion_time
            );
            self.player_explosion_time = defaults.player_explosion_time;
        }
        if self.target_explosion_time <= 0.0 {
            log::warn!(
                "target_explosion_time must be positive, using {}",
                defaults.target_explosion_time
            );
            self.target_explosion_time = defaults.target_explosion_time;
        }
        if self.explosion_lifetime <= 0.0 {
            log::warn!(
                "explosion_lifetime must be positive, using {}",
                defaults.explosion_lifetime
            );
            self.explosion_lifetime = defaults.explosion_lifetime;
        }
        if self.shield_mask_width == 0 || self.shield_mask_height == 0 {
            log::warn!(
                "Shield mask {}x{} is empty, using {}x{}",
                self.shield_mask_width,
                self.shield_mask_height,
                defaults.shield_mask_width,
                defaults.shield_mask_height
            );
            self.shield_mask_width = defaults.shield_mask_width;
            self.shield_mask_height = defaults.shield_mask_height;
        }
        if self.shield_scale <= 0.0 {
            log::warn!("shield_scale must be positive, using {}", defaults.shield_scale);
            self.shield_scale = defaults.shield_scale;
        }
        if self.target_cue_period <= 0.0 {
            self.target_cue_period = defaults.target_cue_period;
        }
    }

    /// Move wait at the start of the given wave (1-based)
    pub fn move_wait_for_wave(&self, wave: u32) -> f32 {
        self.move_wait_base / (1.0 + wave.saturating_sub(1) as f32 * self.wave_speedup)
    }

    /// World size of one shield
    pub fn shield_size(&self) -> Vec2 {
        Vec2::new(
            self.shield_mask_width as f32 * self.shield_scale,
            self.shield_mask_height as f32 * self.shield_scale,
        )
    }
}
