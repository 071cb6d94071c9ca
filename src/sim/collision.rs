//! Collision tests between the ball, the basket and obstacles
//!
//! Two tests only: circle vs circle for scoring, and the ball's bounding
//! square vs an axis-aligned rectangle for obstacles. The obstacle test is
//! deliberately the square approximation, not a true circle/rectangle test,
//! so corners register a little early.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
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
}

/// Distance between two circle centers
#[inline]
pub fn circle_distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Circle overlap with a strict boundary: touching circles do not overlap
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    circle_distance(a, b) < a_radius + b_radius
}

/// Axis-aligned square of side `2 * radius` centered on the circle
#[inline]
pub fn bounding_square(center: Vec2, radius: f32) -> Rect {
    Rect::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius)
}

/// Rectangle overlap; shared edges and empty rectangles don't count
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    if a.width <= 0.0 || a.height <= 0.0 || b.width <= 0.0 || b.height <= 0.0 {
        return false;
    }
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Ball vs obstacle, using the ball's bounding square
#[inline]
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    rects_overlap(&bounding_square(center, radius), rect)
}
