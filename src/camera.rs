#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::matrix2::Matrix2;
use crate::vector2::Vector2;

/// View transform for the 2D scene: pan, uniform zoom and rotation.
///
/// The matrix maps world coordinates to screen (CSS pixel) coordinates.
/// Rotation pivots around an offset supplied by the caller, normally the
/// viewport centre, so that rotating keeps the middle of the screen fixed.
#[derive(Debug, Clone, Copy)]
pub struct Camera2D {
    position: Vector2,
    scale: f64,
    rotation: f64,
    matrix: Matrix2,
    inverse_matrix: Matrix2,
    matrix_needs_update: bool,
    pivot: Vector2,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            position: Vector2::zero(),
            scale: 1.0,
            rotation: 0.0,
            matrix: Matrix2::identity(),
            inverse_matrix: Matrix2::identity(),
            matrix_needs_update: true,
            pivot: Vector2::zero(),
        }
    }
}

impl Camera2D {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen-space translation applied after scaling.
    #[must_use]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
        self.matrix_needs_update = true;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.matrix_needs_update = true;
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.matrix_needs_update = true;
    }

    #[must_use]
    pub fn matrix_needs_update(&self) -> bool {
        self.matrix_needs_update
    }

    /// Move linearly from `from` towards `to`.
    pub fn lerp_position(&mut self, from: Vector2, to: Vector2, t: f64) {
        self.position.lerp_vectors(from, to, t);
        self.matrix_needs_update = true;
    }

    /// Rebuild the view matrix around the pivot `(offset_x, offset_y)`:
    /// `translate(offset) ∘ rotate ∘ translate(-offset) ∘ translate(position) ∘ scale`.
    ///
    /// Only recomputes when something changed, including the pivot.
    #[allow(clippy::float_cmp)]
    pub fn update_matrix(&mut self, offset_x: f64, offset_y: f64) {
        if !self.matrix_needs_update && self.pivot.x == offset_x && self.pivot.y == offset_y {
            return;
        }
        self.pivot.set(offset_x, offset_y);
        let mut m = Matrix2::from_translation(offset_x, offset_y);
        m.rotate(self.rotation)
            .translate(-offset_x, -offset_y)
            .translate(self.position.x, self.position.y)
            .scale(self.scale, self.scale);
        self.matrix = m;
        self.inverse_matrix = m.get_inverse();
        self.matrix_needs_update = false;
    }

    /// World → screen.
    #[must_use]
    pub fn matrix(&self) -> Matrix2 {
        self.matrix
    }

    /// Screen → world.
    #[must_use]
    pub fn inverse_matrix(&self) -> Matrix2 {
        self.inverse_matrix
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        self.inverse_matrix.transform_point(screen)
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        self.matrix.transform_point(world)
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
