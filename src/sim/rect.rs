//! Axis-aligned rectangles for coarse collision rejection
//!
//! World space has its origin at the top-left of the field with y growing
//! downward, so `pos` is a rectangle's top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Zero-sized rectangle at a point
    #[inline]
    pub fn point(p: Vec2) -> Self {
        Self {
            pos: p,
            size: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Midpoint of the top edge (leading edge of an upward projectile)
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.top())
    }

    /// Midpoint of the bottom edge (leading edge of a downward projectile)
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.bottom())
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_point_inside_rect() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(Rect::point(Vec2::new(5.0, 5.0)).intersects(&r));
        assert!(!Rect::point(Vec2::new(15.0, 5.0)).intersects(&r));
    }

    #[test]
    fn test_edge_midpoints() {
        let r = Rect::new(10.0, 20.0, 4.0, 8.0);
        assert_eq!(r.top_center(), Vec2::new(12.0, 20.0));
        assert_eq!(r.bottom_center(), Vec2::new(12.0, 28.0));
        assert_eq!(r.center(), Vec2::new(12.0, 24.0));
    }
}
