//! Axis-aligned bounding boxes
//!
//! Every collision in the game is a rectangle overlap test. Coordinates are
//! screen space: x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOUNDS_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Rectangle stored as centre + full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Rectangle whose top edge is centred on `midtop`
    pub fn from_midtop(midtop: Vec2, size: Vec2) -> Self {
        Self {
            center: Vec2::new(midtop.x, midtop.y + size.y / 2.0),
            size,
        }
    }

    /// The playfield itself
    pub fn playfield() -> Self {
        Self::new(
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        )
    }

    /// The region outside of which projectiles are despawned
    pub fn despawn_bounds() -> Self {
        Self::playfield().expanded(BOUNDS_MARGIN)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Centre of the bottom edge
    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.center.x, self.bottom())
    }

    /// Strict overlap: rectangles that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            center: self.center,
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }

    /// Shift so the rectangle lies inside `bounds` (when it fits)
    pub fn clamp_within(&mut self, bounds: &Rect) {
        let half = self.size / 2.0;
        self.center.x = self
            .center
            .x
            .clamp(bounds.left() + half.x, (bounds.right() - half.x).max(bounds.left() + half.x));
        self.center.y = self
            .center
            .y
            .clamp(bounds.top() + half.y, (bounds.bottom() - half.y).max(bounds.top() + half.y));
    }
}
