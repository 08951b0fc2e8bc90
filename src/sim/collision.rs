//! Collision detection for axis-aligned boxes
//!
//! Everything in Flap Dash is a rectangle, so one overlap test covers
//! flyer-vs-barrier. The world floor/ceiling gets its own inclusive test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (y grows downward, like the canvas)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a top-left corner and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Check whether two boxes overlap
///
/// Intervals are half-open: boxes that only share an edge do not intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Check whether a box touches the world ceiling or floor
///
/// Inclusive on both ends, so a box resting exactly on a boundary counts.
#[inline]
pub fn touches_world_bounds(rect: &Rect, world_height: f32) -> bool {
    rect.y <= 0.0 || rect.bottom() >= world_height
}
