//! Invaders Core - simulation core of a fixed-screen invaders-style shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (swarm, shields, projectiles, collisions)
//! - `renderer`: Draw-request list built from the simulation state
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Play-field configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play-field dimensions (world units are screen pixels, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player ship size (26x16 sprite drawn at 1.5x)
    pub const PLAYER_WIDTH: f32 = 39.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Gap between the player ship and the bottom of the field
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Player shot size (2x8 sprite drawn at 1.5x)
    pub const PLAYER_SHOT_WIDTH: f32 = 3.0;
    pub const PLAYER_SHOT_HEIGHT: f32 = 12.0;

    /// Enemy projectile size (6x14 sprite drawn at 1.5x)
    pub const ENEMY_SHOT_WIDTH: f32 = 9.0;
    pub const ENEMY_SHOT_HEIGHT: f32 = 21.0;

    /// Alien size (all tiers share one cell size)
    pub const ALIEN_WIDTH: f32 = 36.0;
    pub const ALIEN_HEIGHT: f32 = 24.0;

    /// Bonus target size (32x14 sprite drawn at 1.5x)
    pub const TARGET_WIDTH: f32 = 48.0;
    pub const TARGET_HEIGHT: f32 = 21.0;
}

/// Default player spawn point: horizontally centered, near the bottom edge
#[inline]
pub fn player_spawn_position() -> Vec2 {
    use consts::*;
    Vec2::new(
        FIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
        FIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
    )
}
