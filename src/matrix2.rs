//! 2×3 affine matrix.
//!
//! Stored as `[a, b, c, d, tx, ty]`, the canvas `setTransform` order, which
//! represents
//!
//! ```text
//! | a  c  tx |
//! | b  d  ty |
//! | 0  0  1  |
//! ```
//!
//! `multiply(m)` computes `self × m`: `m` is applied to a point first, then
//! `self`. That is how a child's local matrix composes under its parent's
//! global one: `child_global = child_local.premultiply(parent_global)`.

#[cfg(test)]
#[path = "matrix2_test.rs"]
mod matrix2_test;

use serde::{Deserialize, Serialize};

use crate::vector2::Vector2;

/// Affine transform in canvas order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2 {
    pub m: [f64; 6],
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix2 {
    #[must_use]
    pub const fn identity() -> Self {
        Self { m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0] }
    }

    #[must_use]
    pub const fn new(m: [f64; 6]) -> Self {
        Self { m }
    }

    #[must_use]
    pub const fn from_translation(tx: f64, ty: f64) -> Self {
        Self { m: [1.0, 0.0, 0.0, 1.0, tx, ty] }
    }

    #[must_use]
    pub fn from_rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self { m: [c, s, -s, c, 0.0, 0.0] }
    }

    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        Self { m: [sx, 0.0, 0.0, sy, 0.0, 0.0] }
    }

    pub fn set_identity(&mut self) -> &mut Self {
        self.m = Self::identity().m;
        self
    }

    /// Rebuild as `translate(px, py) ∘ rotate(rot) ∘ scale(sx, sy) ∘ translate(-ox, -oy)`.
    #[allow(clippy::too_many_arguments, clippy::float_cmp)]
    pub fn compose(&mut self, px: f64, py: f64, sx: f64, sy: f64, ox: f64, oy: f64, rot: f64) -> &mut Self {
        self.m = [1.0, 0.0, 0.0, 1.0, px, py];
        if rot != 0.0 {
            self.rotate(rot);
        }
        if sx != 1.0 || sy != 1.0 {
            self.scale(sx, sy);
        }
        if ox != 0.0 || oy != 0.0 {
            self.translate(-ox, -oy);
        }
        self
    }

    /// `self = self × other`.
    pub fn multiply(&mut self, other: &Matrix2) -> &mut Self {
        let [a0, b0, c0, d0, e0, f0] = self.m;
        let [a1, b1, c1, d1, e1, f1] = other.m;
        self.m = [
            a0 * a1 + c0 * b1,
            b0 * a1 + d0 * b1,
            a0 * c1 + c0 * d1,
            b0 * c1 + d0 * d1,
            a0 * e1 + c0 * f1 + e0,
            b0 * e1 + d0 * f1 + f0,
        ];
        self
    }

    /// `self = other × self`.
    pub fn premultiply(&mut self, other: &Matrix2) -> &mut Self {
        let mut out = *other;
        out.multiply(self);
        self.m = out.m;
        self
    }

    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.m[4] += self.m[0] * x + self.m[2] * y;
        self.m[5] += self.m[1] * x + self.m[3] * y;
        self
    }

    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        self.multiply(&Self::from_rotation(radians))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.multiply(&Self::from_scale(sx, sy))
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.m[0] * self.m[3] - self.m[1] * self.m[2]
    }

    /// Analytic inverse. A singular matrix produces non-finite entries; points
    /// mapped through it fail every containment test.
    #[must_use]
    pub fn get_inverse(&self) -> Matrix2 {
        let [a, b, c, d, e, f] = self.m;
        let inv = 1.0 / (a * d - b * c);
        Matrix2 {
            m: [
                d * inv,
                -b * inv,
                -c * inv,
                a * inv,
                (c * f - d * e) * inv,
                (b * e - a * f) * inv,
            ],
        }
    }

    #[must_use]
    pub fn transform_point(&self, p: Vector2) -> Vector2 {
        Vector2::new(
            self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        )
    }

    /// Apply only the linear part (no translation).
    #[must_use]
    pub fn transform_vector(&self, v: Vector2) -> Vector2 {
        Vector2::new(self.m[0] * v.x + self.m[2] * v.y, self.m[1] * v.x + self.m[3] * v.y)
    }

    #[must_use]
    pub fn get_position(&self) -> Vector2 {
        Vector2::new(self.m[4], self.m[5])
    }

    /// Scale factors, assuming no shear. A reflection shows up as a negative y.
    #[must_use]
    pub fn get_scale(&self) -> Vector2 {
        let sx = self.m[0].hypot(self.m[1]);
        if sx == 0.0 {
            return Vector2::new(0.0, self.m[2].hypot(self.m[3]));
        }
        Vector2::new(sx, self.determinant() / sx)
    }

    /// Rotation in radians, assuming no shear.
    #[must_use]
    pub fn get_rotation(&self) -> f64 {
        self.m[1].atan2(self.m[0])
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.m == Self::identity().m
    }

    #[must_use]
    pub fn approx_eq(&self, other: &Matrix2, epsilon: f64) -> bool {
        self.m.iter().zip(other.m.iter()).all(|(a, b)| (a - b).abs() <= epsilon)
    }
}
