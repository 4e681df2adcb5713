//! Draw-request builder
//!
//! Turns a [`GameState`](crate::sim::GameState) into a flat list of textured
//! quads for whatever backend the host uses. No text or HUD is produced.

pub mod draw;

pub use draw::{DrawCommand, SpriteId, Tint, draw_list};

/// Colors for game elements
pub mod colors {
    use super::Tint;

    pub const WHITE: Tint = [1.0, 1.0, 1.0, 1.0];
    pub const TARGET: Tint = [0.9, 0.16, 0.22, 1.0];
    pub const PLAYER: Tint = [0.2, 0.8, 0.4, 1.0];
    pub const SHIELD: Tint = [0.2, 0.8, 0.4, 1.0];
}
