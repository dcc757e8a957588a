//! Axis-Aligned Rectangle
//!
//! The only geometry the simulation needs: axis-aligned boxes with exact
//! and margin-padded overlap tests.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in playfield pixels.
///
/// `x`/`y` is the top-left corner; y grows downward, matching the drawing
/// surface convention.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a rectangle from corner and extent.
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a square from corner and a single size.
    ///
    /// Entities described by one `size` field (players, power-ups) go
    /// through here instead of carrying width and height.
    #[inline]
    pub const fn square(x: f32, y: f32, size: f32) -> Self {
        Self { x, y, w: size, h: size }
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True iff this box, inflated by `margin` on all sides, intersects `other`.
    ///
    /// `margin = 0.0` is the exact test. Player-vs-player separation uses a
    /// small positive margin so the squares never visually touch.
    #[inline]
    pub fn overlaps(&self, other: &Rect, margin: f32) -> bool {
        self.x < other.x + other.w + margin
            && self.x + self.w > other.x - margin
            && self.y < other.y + other.h + margin
            && self.y + self.h > other.y - margin
    }

    /// Closed point-containment test (edges count as inside).
    #[inline]
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}
