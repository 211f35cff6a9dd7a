//! Axis-aligned bounding box collision
//!
//! Every gameplay contact (bullet vs enemy, player vs enemy, player vs
//! power-up) reduces to the same strict-inequality rectangle overlap test.
//! Touching edges do not count as a hit.

use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle, `x`/`y` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
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

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Anything with a collision box
pub trait Aabb {
    fn aabb(&self) -> Rect;
}

impl Aabb for Rect {
    fn aabb(&self) -> Rect {
        *self
    }
}

/// Strict AABB overlap test
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Overlap test between two entities
#[inline]
pub fn collides<A: Aabb + ?Sized, B: Aabb + ?Sized>(a: &A, b: &B) -> bool {
    overlaps(&a.aabb(), &b.aabb())
}

/// Index of the first item in `items` overlapping `target`
pub fn first_hit<T: Aabb, U: Aabb + ?Sized>(items: &[T], target: &U) -> Option<usize> {
    let bounds = target.aabb();
    items.iter().position(|item| overlaps(&item.aabb(), &bounds))
}
