//! Two-component vector used for positions, scales, deltas and sizes.
//!
//! Arithmetic methods mutate `self` and return `&mut Self` so calls chain the
//! way scene code reads: `position.add(delta).multiply_scalar(0.5)`. The type
//! is `Copy`, so take a copy first when the original must survive.

#[cfg(test)]
#[path = "vector2_test.rs"]
mod vector2_test;

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// A point or direction in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[must_use]
    pub const fn one() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn add(&mut self, v: Vector2) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self
    }

    pub fn add_scalar(&mut self, s: f64) -> &mut Self {
        self.x += s;
        self.y += s;
        self
    }

    pub fn sub(&mut self, v: Vector2) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self
    }

    pub fn sub_scalar(&mut self, s: f64) -> &mut Self {
        self.x -= s;
        self.y -= s;
        self
    }

    /// Component-wise product.
    pub fn multiply(&mut self, v: Vector2) -> &mut Self {
        self.x *= v.x;
        self.y *= v.y;
        self
    }

    pub fn multiply_scalar(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    /// Component-wise quotient. Division by a zero component yields a non-finite value.
    pub fn divide(&mut self, v: Vector2) -> &mut Self {
        self.x /= v.x;
        self.y /= v.y;
        self
    }

    pub fn divide_scalar(&mut self, s: f64) -> &mut Self {
        self.x /= s;
        self.y /= s;
        self
    }

    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    pub fn min(&mut self, v: Vector2) -> &mut Self {
        self.x = self.x.min(v.x);
        self.y = self.y.min(v.y);
        self
    }

    pub fn max(&mut self, v: Vector2) -> &mut Self {
        self.x = self.x.max(v.x);
        self.y = self.y.max(v.y);
        self
    }

    /// Clamp each component into `[min, max]`. Assumes `min <= max` per component.
    pub fn clamp(&mut self, min: Vector2, max: Vector2) -> &mut Self {
        self.x = self.x.max(min.x).min(max.x);
        self.y = self.y.max(min.y).min(max.y);
        self
    }

    #[must_use]
    pub fn dot(&self, v: Vector2) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// Z component of the 3D cross product; positive when `v` is clockwise
    /// from `self` in a y-down screen frame.
    #[must_use]
    pub fn cross(&self, v: Vector2) -> f64 {
        self.x * v.y - self.y * v.x
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn manhattan_length(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    /// Scale to unit length. A zero vector stays zero.
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            self.divide_scalar(len);
        }
        self
    }

    pub fn set_length(&mut self, length: f64) -> &mut Self {
        self.normalize().multiply_scalar(length)
    }

    /// Angle of this vector relative to the positive x axis, in `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        let angle = self.y.atan2(self.x);
        if angle < 0.0 { angle + TAU } else { angle }
    }

    /// Rotate this point by `angle` radians around `center`.
    pub fn rotate_around(&mut self, center: Vector2, angle: f64) -> &mut Self {
        let (s, c) = angle.sin_cos();
        let x = self.x - center.x;
        let y = self.y - center.y;
        self.x = x * c - y * s + center.x;
        self.y = x * s + y * c + center.y;
        self
    }

    /// Move `t` of the way towards `v`.
    pub fn lerp(&mut self, v: Vector2, t: f64) -> &mut Self {
        self.x += (v.x - self.x) * t;
        self.y += (v.y - self.y) * t;
        self
    }

    /// Set to the point `t` of the way from `a` to `b`.
    pub fn lerp_vectors(&mut self, a: Vector2, b: Vector2, t: f64) -> &mut Self {
        self.x = a.x + (b.x - a.x) * t;
        self.y = a.y + (b.y - a.y) * t;
        self
    }

    #[must_use]
    pub fn distance_to_squared(&self, v: Vector2) -> f64 {
        let dx = self.x - v.x;
        let dy = self.y - v.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn distance_to(&self, v: Vector2) -> f64 {
        self.distance_to_squared(v).sqrt()
    }

    #[must_use]
    pub fn manhattan_distance_to(&self, v: Vector2) -> f64 {
        (self.x - v.x).abs() + (self.y - v.y).abs()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn approx_eq(&self, v: Vector2, epsilon: f64) -> bool {
        (self.x - v.x).abs() <= epsilon && (self.y - v.y).abs() <= epsilon
    }
}
