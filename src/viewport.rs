//! Screen-space culling rectangle.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::box2::Box2;
use crate::matrix2::Matrix2;
use crate::vector2::Vector2;

/// The visible drawing area, `[0, 0]` to `[width, height]` in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn bounds(&self) -> Box2 {
        Box2::new(Vector2::zero(), Vector2::new(self.width, self.height))
    }

    /// Viewport centre, the camera's rotation pivot.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a world-space box, mapped through the camera matrix `view`,
    /// overlaps the viewport. Empty boxes have unknown extent and always pass.
    #[must_use]
    pub fn is_visible(&self, world: &Box2, view: &Matrix2) -> bool {
        if world.is_empty() {
            return true;
        }
        world.transformed(view).intersects_box(&self.bounds())
    }
}
