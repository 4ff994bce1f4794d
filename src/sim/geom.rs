//! Axis-aligned geometry for bricks, paddle, items and the arena
//!
//! Screen coordinates: origin at the top-left corner, y grows downward.
//! Every overlap test uses closed intervals, so touching edges count as overlap.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The playfield. Immutable for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "arena must have positive size, got {width}x{height}"
        );
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if a circle pokes past any edge (strictly; touching is still inside)
    pub fn circle_escapes(&self, center: DVec2, radius: f64) -> bool {
        center.x - radius < 0.0
            || center.x + radius > self.width
            || center.y - radius < 0.0
            || center.y + radius > self.height
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(crate::consts::ARENA_WIDTH, crate::consts::ARENA_HEIGHT)
    }
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "degenerate rectangle {width}x{height}"
        );
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Closest point inside the rectangle to `p`
    pub fn closest_point(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// Point containment, edges included
#[inline]
pub fn point_in_rect(p: DVec2, rect: &Rect) -> bool {
    p.x >= rect.left() && p.x <= rect.right() && p.y >= rect.top() && p.y <= rect.bottom()
}

/// Circle vs rectangle overlap via the rectangle's closest point to the center
pub fn rect_overlaps_circle(rect: &Rect, center: DVec2, radius: f64) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}

/// Rectangle vs rectangle overlap
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() <= b.right() && a.right() >= b.left() && a.top() <= b.bottom() && a.bottom() >= b.top()
}

/// Circle vs circle overlap
pub fn circles_overlap(a: DVec2, ra: f64, b: DVec2, rb: f64) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}
