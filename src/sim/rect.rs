//! Axis-aligned rectangle geometry
//!
//! Every physical entity is an axis-aligned box in scene units with `y`
//! growing downward (top edge = `y`, bottom edge = `y + h`).

use glam::Vec2;
use serde::Serialize;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Create a rectangle. Panics on non-positive dimensions.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        assert!(
            w > 0.0 && h > 0.0,
            "rect dimensions must be positive, got {w}x{h}"
        );
        Self { x, y, w, h }
    }

    /// Rectangle with its top-left corner at `pos`
    pub fn at(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
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

    /// Open-interval overlap of the horizontal spans
    #[inline]
    pub fn spans_x(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }
}

/// Standard AABB test; touching edges do not count as overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Anything that occupies a box in the scene
pub trait Collidable {
    fn rect(&self) -> Rect;

    fn overlaps_with(&self, other: &impl Collidable) -> bool
    where
        Self: Sized,
    {
        overlaps(&self.rect(), &other.rect())
    }
}

impl Collidable for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}
