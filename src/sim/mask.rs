//! Destructible coverage raster for shields
//!
//! A mask stores one opacity byte per pixel at a fixed resolution that is
//! independent of the shield's world size. Every read and write goes through
//! [`RasterMask::to_mask_coords`], so collision sampling and damage stamping
//! always agree on which pixel a world point lands on.
//!
//! Storage is Y-flipped relative to world space: the renderer composites the
//! mask through a vertically mirrored source region, so mask row 0 is the
//! bottom of the shield on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Opacity of an untouched mask pixel
pub const FULL_OPACITY: u8 = 255;

/// Per-shield opacity buffer (0 = destroyed, >0 = intact)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterMask {
    /// Create a fully opaque mask
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![FULL_OPACITY; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw opacity rows, row 0 first (for uploading to a texture)
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Opacity at a mask pixel; out-of-range pixels read as destroyed
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Restore full opacity everywhere
    pub fn reset(&mut self) {
        self.data.fill(FULL_OPACITY);
    }

    /// Number of pixels still above the given opacity threshold
    pub fn opaque_count(&self, threshold: u8) -> usize {
        self.data.iter().filter(|&&a| a > threshold).count()
    }

    /// Map a world point into mask space for a shield occupying `bounds`
    ///
    /// Scales each axis by `mask_dim / bounds_dim`, flips Y, then clamps into
    /// `[0, dim - 1]` so the result is always a valid pixel coordinate.
    pub fn to_mask_coords(&self, bounds: &Rect, world: Vec2) -> Vec2 {
        let w = self.width as f32;
        let h = self.height as f32;
        let scale = Vec2::new(w / bounds.size.x, h / bounds.size.y);

        let mut local = (world - bounds.pos) * scale;
        local.y = h - local.y;

        Vec2::new(
            local.x.clamp(0.0, (w - 1.0).max(0.0)),
            local.y.clamp(0.0, (h - 1.0).max(0.0)),
        )
    }

    /// Opacity of the pixel a world point maps to
    pub fn sample(&self, bounds: &Rect, world: Vec2) -> u8 {
        let p = self.to_mask_coords(bounds, world);
        self.get(p.x as usize, p.y as usize)
    }

    /// Zero every pixel within `radius` mask units of the mapped world point
    pub fn erase_circle(&mut self, bounds: &Rect, world: Vec2, radius: f32) {
        if self.data.is_empty() {
            return;
        }
        let center = self.to_mask_coords(bounds, world);
        let r2 = radius * radius;

        // Only pixels inside the stamp's bounding box can be within the radius
        let x0 = (center.x - radius).floor().max(0.0) as usize;
        let y0 = (center.y - radius).floor().max(0.0) as usize;
        let x1 = ((center.x + radius).ceil().max(0.0) as usize).min(self.width - 1);
        let y1 = ((center.y + radius).ceil().max(0.0) as usize).min(self.height - 1);

        for y in y0..=y1 {
            let dy = y as f32 - center.y;
            for x in x0..=x1 {
                let dx = x as f32 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.data[y * self.width + x] = 0;
                }
            }
        }
    }
}
