//! Sprite selection and draw-list generation

use glam::Vec2;

use super::colors;
use crate::consts::*;
use crate::sim::state::{ExplosionKind, GameState};
use crate::sim::swarm::AlienTier;
use crate::sim::{Rect, TargetState};

/// RGBA tint, components in 0..=1
pub type Tint = [f32; 4];

/// Sprites are authored at 2/3 of their on-screen size
const SPRITE_SCALE: f32 = 1.5;

/// Ticks between frames of the rolling enemy-shot animation
const SHOT_ANIM_TICKS: u64 = 6;

/// Which texture a command samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    /// Alien tier plus animation frame (false = first frame)
    Alien(AlienTier, bool),
    Player,
    PlayerShot,
    /// Rolling enemy projectile, frame 0..=3
    EnemyShot(u8),
    Target,
    /// Destructible mask of the shield at this index
    ShieldMask(usize),
    AlienExplosion,
    ShotExplosion,
    PlayerExplosion,
    TargetExplosion,
}

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    /// Region of the sprite texture; a negative height mirrors vertically
    pub source: Rect,
    /// Destination in field coordinates
    pub dest: Rect,
    pub tint: Tint,
}

impl DrawCommand {
    /// Whole sprite stretched over `dest`
    fn sprite(sprite: SpriteId, dest: Rect, tint: Tint) -> Self {
        let size = dest.size / SPRITE_SCALE;
        Self {
            sprite,
            source: Rect::new(0.0, 0.0, size.x, size.y),
            dest,
            tint,
        }
    }

    /// Sprite of the given world size centered on `center`
    fn centered(sprite: SpriteId, center: Vec2, size: Vec2, tint: Tint) -> Self {
        Self::sprite(sprite, Rect::from_pos_size(center - size / 2.0, size), tint)
    }
}

/// Build the draw list for one frame, back to front
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(
        state.swarm.alive() + state.enemy_shots.active_count() + state.shields.len() + 8,
    );

    // Shields: the mask is stored bottom-up, so sample it mirrored
    for (i, shield) in state.shields.iter().enumerate() {
        if !shield.active {
            continue;
        }
        out.push(DrawCommand {
            sprite: SpriteId::ShieldMask(i),
            source: Rect::new(
                0.0,
                0.0,
                shield.mask.width() as f32,
                -(shield.mask.height() as f32),
            ),
            dest: shield.bounds,
            tint: colors::SHIELD,
        });
    }

    for (_, alien) in state.swarm.active() {
        out.push(DrawCommand::sprite(
            SpriteId::Alien(alien.tier, alien.frame),
            alien.rect(),
            colors::WHITE,
        ));
    }

    match state.target.state {
        TargetState::Traveling => out.push(DrawCommand::sprite(
            SpriteId::Target,
            state.target.rect(),
            colors::TARGET,
        )),
        TargetState::Exploding => out.push(DrawCommand::sprite(
            SpriteId::TargetExplosion,
            state.target.rect(),
            colors::TARGET,
        )),
        TargetState::Idle => {}
    }

    if state.player.is_exploding() {
        out.push(DrawCommand::sprite(
            SpriteId::PlayerExplosion,
            state.player.rect(),
            colors::PLAYER,
        ));
    } else if !state.is_game_over() {
        out.push(DrawCommand::sprite(
            SpriteId::Player,
            state.player.rect(),
            colors::PLAYER,
        ));
    }

    if let Some(shot) = &state.player_shot {
        out.push(DrawCommand::sprite(
            SpriteId::PlayerShot,
            shot.rect(),
            colors::WHITE,
        ));
    }

    let frame = ((state.time_ticks / SHOT_ANIM_TICKS) % 4) as u8;
    for (_, shot) in state.enemy_shots.iter_active() {
        out.push(DrawCommand::sprite(
            SpriteId::EnemyShot(frame),
            shot.rect(),
            colors::WHITE,
        ));
    }

    for (_, explosion) in state.explosions.iter_active() {
        let (sprite, size) = match explosion.kind {
            ExplosionKind::AlienKill => (
                SpriteId::AlienExplosion,
                Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT),
            ),
            ExplosionKind::PlayerShotImpact | ExplosionKind::EnemyShotImpact => {
                (SpriteId::ShotExplosion, Vec2::splat(12.0))
            }
        };
        out.push(DrawCommand::centered(sprite, explosion.pos, size, colors::WHITE));
    }

    out
}
