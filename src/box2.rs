//! Axis-aligned bounding box.
//!
//! The canonical empty box has `min = (+∞, +∞)` and `max = (-∞, -∞)`, so the
//! first `expand_by_point` snaps both corners onto that point.

#[cfg(test)]
#[path = "box2_test.rs"]
mod box2_test;

use serde::{Deserialize, Serialize};

use crate::matrix2::Matrix2;
use crate::vector2::Vector2;

/// Axis-aligned box between `min` and `max` (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box2 {
    pub min: Vector2,
    pub max: Vector2,
}

impl Default for Box2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Box2 {
    #[must_use]
    pub const fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: Vector2::new(f64::INFINITY, f64::INFINITY),
            max: Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box enclosing every point.
    #[must_use]
    pub fn from_points(points: &[Vector2]) -> Self {
        let mut b = Self::empty();
        b.set_from_points(points);
        b
    }

    pub fn set(&mut self, min: Vector2, max: Vector2) -> &mut Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn set_from_points(&mut self, points: &[Vector2]) -> &mut Self {
        self.make_empty();
        for p in points {
            self.expand_by_point(*p);
        }
        self
    }

    pub fn make_empty(&mut self) -> &mut Self {
        *self = Self::empty();
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    #[must_use]
    pub fn get_center(&self) -> Vector2 {
        let mut c = self.min;
        c.add(self.max).multiply_scalar(0.5);
        c
    }

    /// Width and height; zero for an empty box.
    #[must_use]
    pub fn get_size(&self) -> Vector2 {
        if self.is_empty() {
            return Vector2::zero();
        }
        let mut s = self.max;
        s.sub(self.min);
        s
    }

    pub fn expand_by_point(&mut self, p: Vector2) -> &mut Self {
        self.min.min(p);
        self.max.max(p);
        self
    }

    /// Grow outward by `v` on each side (shrinks for negative components).
    pub fn expand_by_vector(&mut self, v: Vector2) -> &mut Self {
        self.min.sub(v);
        self.max.add(v);
        self
    }

    pub fn expand_by_scalar(&mut self, s: f64) -> &mut Self {
        self.min.sub_scalar(s);
        self.max.add_scalar(s);
        self
    }

    #[must_use]
    pub fn contains_point(&self, p: Vector2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[must_use]
    pub fn contains_box(&self, other: &Box2) -> bool {
        self.min.x <= other.min.x && other.max.x <= self.max.x && self.min.y <= other.min.y && other.max.y <= self.max.y
    }

    #[must_use]
    pub fn intersects_box(&self, other: &Box2) -> bool {
        !(other.max.x < self.min.x || other.min.x > self.max.x || other.max.y < self.min.y || other.min.y > self.max.y)
    }

    /// Nearest point inside the box.
    #[must_use]
    pub fn clamp_point(&self, p: Vector2) -> Vector2 {
        let mut out = p;
        out.clamp(self.min, self.max);
        out
    }

    /// Distance from `p` to the nearest point of the box; zero inside.
    #[must_use]
    pub fn distance_to_point(&self, p: Vector2) -> f64 {
        let mut d = self.clamp_point(p);
        d.sub(p);
        d.length()
    }

    /// Shrink to the overlap with `other`. Disjoint boxes become empty.
    pub fn intersect(&mut self, other: &Box2) -> &mut Self {
        self.min.max(other.min);
        self.max.min(other.max);
        self
    }

    pub fn union(&mut self, other: &Box2) -> &mut Self {
        self.min.min(other.min);
        self.max.max(other.max);
        self
    }

    pub fn translate(&mut self, offset: Vector2) -> &mut Self {
        self.min.add(offset);
        self.max.add(offset);
        self
    }

    /// Map the four corners through `m` and enclose them. Overestimates the
    /// true extent whenever `m` rotates.
    #[must_use]
    pub fn transformed(&self, m: &Matrix2) -> Box2 {
        if self.is_empty() {
            return Self::empty();
        }
        Self::from_points(&[
            m.transform_point(self.min),
            m.transform_point(Vector2::new(self.max.x, self.min.y)),
            m.transform_point(self.max),
            m.transform_point(Vector2::new(self.min.x, self.max.y)),
        ])
    }
}
