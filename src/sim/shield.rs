//! Destructible shields
//!
//! Shields never move once placed; only their masks change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::RasterMask;
use super::rect::Rect;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::tuning::Tuning;

/// A single shield: fixed world bounds plus its coverage mask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub bounds: Rect,
    pub mask: RasterMask,
    pub active: bool,
}

impl Shield {
    pub fn new(bounds: Rect, mask_width: usize, mask_height: usize) -> Self {
        Self {
            bounds,
            mask: RasterMask::new(mask_width, mask_height),
            active: true,
        }
    }

    /// Map a world point onto this shield's mask
    pub fn to_mask_coords(&self, world: Vec2) -> Vec2 {
        self.mask.to_mask_coords(&self.bounds, world)
    }

    /// Whether a world point lands on intact coverage
    pub fn test_opaque(&self, world: Vec2, threshold: u8) -> bool {
        self.hit_test(&Rect::point(world), world, threshold)
    }

    /// Coarse `rect` vs bounds rejection, then sample the mask at `contact`
    pub fn hit_test(&self, rect: &Rect, contact: Vec2, threshold: u8) -> bool {
        if !self.active || !rect.intersects(&self.bounds) {
            return false;
        }
        self.mask.sample(&self.bounds, contact) > threshold
    }

    /// Carve a circular hole centered on a world point
    pub fn damage(&mut self, world: Vec2, radius: f32) {
        if !self.active {
            return;
        }
        self.mask.erase_circle(&self.bounds, world, radius);
    }

    pub fn reset(&mut self) {
        self.mask.reset();
        self.active = true;
    }
}

/// The fixed row of shields protecting the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shields {
    pub shields: Vec<Shield>,
    pub damage_radius: f32,
    pub opaque_threshold: u8,
}

impl Shields {
    /// Place `tuning.shield_count` shields evenly across the field width
    pub fn new(tuning: &Tuning) -> Self {
        let size = tuning.shield_size();
        let count = tuning.shield_count;
        let gap = (FIELD_WIDTH - count as f32 * size.x) / (count as f32 + 1.0);
        let y = FIELD_HEIGHT - tuning.shield_offset_from_bottom;

        let shields = (0..count)
            .map(|i| {
                let x = gap + i as f32 * (size.x + gap);
                Shield::new(
                    Rect::from_pos_size(Vec2::new(x, y), size),
                    tuning.shield_mask_width,
                    tuning.shield_mask_height,
                )
            })
            .collect();

        Self {
            shields,
            damage_radius: tuning.shield_damage_radius,
            opaque_threshold: tuning.shield_opaque_threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.shields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shield> {
        self.shields.iter()
    }

    pub fn test_opaque(&self, index: usize, world: Vec2) -> bool {
        self.shields
            .get(index)
            .is_some_and(|s| s.test_opaque(world, self.opaque_threshold))
    }

    /// Index of the first shield whose coverage stops `rect` at `contact`
    pub fn first_hit(&self, rect: &Rect, contact: Vec2) -> Option<usize> {
        self.shields
            .iter()
            .position(|s| s.hit_test(rect, contact, self.opaque_threshold))
    }

    pub fn damage(&mut self, index: usize, world: Vec2) {
        let radius = self.damage_radius;
        if let Some(shield) = self.shields.get_mut(index) {
            shield.damage(world, radius);
        }
    }

    /// Restore every shield to full coverage
    pub fn reset_all(&mut self) {
        for shield in &mut self.shields {
            shield.reset();
        }
    }
}
