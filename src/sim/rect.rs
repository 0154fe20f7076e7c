//! Axis-aligned rectangle geometry
//!
//! Top-left origin, y grows downward. Intersection is strict: rectangles that
//! only share an edge do not overlap, so a mover resting exactly on a solid's
//! top edge is not in contact with it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle with top-left corner at `pos`
    #[inline]
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Zero or negative extent on either axis
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// Strict overlap test
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True if `self` overlaps any rectangle in `others`
    pub fn intersects_any(&self, others: &[Rect]) -> bool {
        others.iter().any(|o| self.intersects(o))
    }

    /// Move so the left edge sits on `x`
    #[inline]
    pub fn set_left(&mut self, x: f32) {
        self.x = x;
    }

    /// Move so the right edge sits on `x`
    #[inline]
    pub fn set_right(&mut self, x: f32) {
        self.x = x - self.w;
    }

    #[inline]
    pub fn set_top(&mut self, y: f32) {
        self.y = y;
    }

    #[inline]
    pub fn set_bottom(&mut self, y: f32) {
        self.y = y - self.h;
    }
}
