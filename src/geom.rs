//! Axis-aligned rectangle geometry
//!
//! Every gameplay check (hit-testing, containment, zone overlap) runs on
//! these logical rectangles, never on texture pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A floating-point rectangle in logical render coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
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

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Point-in-rect test (edges inclusive)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True if `other` lies wholly inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// True if `other` spans a horizontal range wholly inside this one
    pub fn contains_span_x(&self, other: &Rect) -> bool {
        other.x >= self.x && other.right() <= self.right()
    }

    /// Horizontal overlap with positive width (touching edges do not count)
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.x && self.x < other.right()
    }

    /// Split at a horizontal ratio in [0, 1], returning (left, right)
    pub fn split_x(&self, ratio: f32) -> (Rect, Rect) {
        let left_w = self.w * ratio;
        (
            Rect::new(self.x, self.y, left_w, self.h),
            Rect::new(self.x + left_w, self.y, self.w - left_w, self.h),
        )
    }

    /// Clamp this rectangle's position so it stays inside `bounds`
    pub fn clamped_within(&self, bounds: &Rect) -> Rect {
        let x = self.x.clamp(bounds.x, (bounds.right() - self.w).max(bounds.x));
        let y = self.y.clamp(bounds.y, (bounds.bottom() - self.h).max(bounds.y));
        Rect::new(x, y, self.w, self.h)
    }

    /// Largest rectangle with the given aspect ratio that fits inside `self`,
    /// centered along the slack axis
    pub fn fit_aspect(&self, aspect: f32) -> Rect {
        if aspect <= 0.0 || self.h <= 0.0 {
            return *self;
        }
        if aspect > self.w / self.h {
            let h = self.w / aspect;
            Rect::new(self.x, self.y + (self.h - h) / 2.0, self.w, h)
        } else {
            let w = self.h * aspect;
            Rect::new(self.x + (self.w - w) / 2.0, self.y, w, self.h)
        }
    }
}
