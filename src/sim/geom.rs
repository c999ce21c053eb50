//! Axis-aligned rectangles and overlap tests
//!
//! Everything in the arena is a box: bodies, attack areas and the arena itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Expand by `margin` on every side
    pub fn grow(&self, margin: f32) -> Self {
        Self {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }
}

/// Check whether two rectangles intersect.
///
/// Closed intervals on both axes: rectangles that only share an edge or a
/// corner still collide.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.right() >= b.pos.x
        && a.pos.x <= b.right()
        && a.bottom() >= b.pos.y
        && a.pos.y <= b.bottom()
}
