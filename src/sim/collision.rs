//! Axis-aligned bounding boxes
//!
//! The only collision primitive in the game. Every entity is center-anchored:
//! its bounds are derived from its position and size the same way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with a top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of a center-anchored entity
    #[inline]
    pub fn centered(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x - size.x / 2.0,
            y: pos.y - size.y / 2.0,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        intersects(self, other)
    }
}

/// Open AABB overlap test; boxes that only share an edge do not overlap
#[inline]
pub fn intersects(a: &Bounds, b: &Bounds) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
