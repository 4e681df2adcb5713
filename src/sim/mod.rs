//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (grid index, pool slot index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod mask;
pub mod pool;
pub mod rect;
pub mod saucer;
pub mod shield;
pub mod state;
pub mod swarm;
pub mod tick;

pub use collision::{CollisionReport, ShotOutcome, resolve_collisions};
pub use mask::{FULL_OPACITY, RasterMask};
pub use pool::{Slot, SlotPool};
pub use rect::Rect;
pub use saucer::{BonusTarget, TargetState};
pub use shield::{Shield, Shields};
pub use state::{
    Explosion, ExplosionKind, GameEvent, GamePhase, GameState, Player, Projectile,
};
pub use swarm::{Alien, AlienTier, Swarm, SwarmStep};
pub use tick::{TickInput, fire_player_shot, next_wave, tick, wave_cleared};
