//! Axis-aligned rectangle geometry for ships, projectiles and hazards
//!
//! Screen space: origin at the top-left corner, +x to the right, +y down.
//! A rectangle is stored as its top-left corner plus its size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height (never negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w.max(0.0), h.max(0.0)),
        }
    }

    /// Build a rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let size = size.max(Vec2::ZERO);
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test; rectangles that only share an edge don't collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Shrink both dimensions by `fraction` of their size, keeping the center
    ///
    /// Used to turn a sprite's bounding box into a hitbox that matches its
    /// visible silhouette (0.0 = unchanged, 0.5 = half as wide and tall).
    pub fn shrunk(&self, fraction: f32) -> Rect {
        let fraction = fraction.clamp(0.0, 1.0);
        Rect::from_center(self.center(), self.size * (1.0 - fraction))
    }

    /// Inset every edge by `margin`
    pub fn inset(&self, margin: f32) -> Rect {
        Rect::new(
            self.min.x + margin,
            self.min.y + margin,
            self.size.x - 2.0 * margin,
            self.size.y - 2.0 * margin,
        )
    }

    /// Move this rectangle so it lies inside `bounds`
    ///
    /// If `bounds` is smaller than the rectangle along an axis, the rectangle
    /// is pinned to the bound's leading edge on that axis.
    pub fn clamped_into(&self, bounds: &Rect) -> Rect {
        let max_x = (bounds.right() - self.size.x).max(bounds.left());
        let max_y = (bounds.bottom() - self.size.y).max(bounds.top());
        Rect {
            min: Vec2::new(
                self.min.x.clamp(bounds.left(), max_x),
                self.min.y.clamp(bounds.top(), max_y),
            ),
            size: self.size,
        }
    }

    /// Translate by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect {
            min: self.min + delta,
            size: self.size,
        }
    }
}
