#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use super::*;

const EPSILON: f64 = 1e-10;

fn vec_approx_eq(a: Vector2, b: Vector2) -> bool {
    a.approx_eq(b, EPSILON)
}

// --- Defaults ---

#[test]
fn camera_default_is_identity_view() {
    let mut cam = Camera2D::default();
    cam.update_matrix(0.0, 0.0);
    assert!(cam.matrix().approx_eq(&Matrix2::identity(), EPSILON));
    assert_eq!(cam.scale(), 1.0);
    assert_eq!(cam.rotation(), 0.0);
}

#[test]
fn setters_mark_matrix_dirty() {
    let mut cam = Camera2D::new();
    cam.update_matrix(0.0, 0.0);
    assert!(!cam.matrix_needs_update());
    cam.set_scale(2.0);
    assert!(cam.matrix_needs_update());
}

// --- Matrix ---

#[test]
fn position_then_scale() {
    let mut cam = Camera2D::new();
    cam.set_position(Vector2::new(10.0, 20.0));
    cam.set_scale(2.0);
    cam.update_matrix(0.0, 0.0);
    let screen = cam.world_to_screen(Vector2::new(5.0, 5.0));
    assert!(vec_approx_eq(screen, Vector2::new(20.0, 30.0)));
}

#[test]
fn rotation_pivots_around_offset() {
    let mut cam = Camera2D::new();
    cam.set_rotation(FRAC_PI_2);
    cam.update_matrix(100.0, 50.0);
    // The pivot itself stays put.
    assert!(vec_approx_eq(cam.world_to_screen(Vector2::new(100.0, 50.0)), Vector2::new(100.0, 50.0)));
    // A point right of the pivot swings below it.
    assert!(vec_approx_eq(cam.world_to_screen(Vector2::new(110.0, 50.0)), Vector2::new(100.0, 60.0)));
}

#[test]
fn inverse_round_trips() {
    let mut cam = Camera2D::new();
    cam.set_position(Vector2::new(-30.0, 12.0));
    cam.set_scale(0.75);
    cam.set_rotation(0.4);
    cam.update_matrix(400.0, 300.0);
    let world = Vector2::new(123.0, -45.0);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(back.approx_eq(world, 1e-9));
}

#[test]
fn pivot_change_forces_rebuild() {
    let mut cam = Camera2D::new();
    cam.set_rotation(FRAC_PI_2);
    cam.update_matrix(0.0, 0.0);
    let before = cam.matrix();
    cam.update_matrix(50.0, 50.0);
    assert!(!cam.matrix().approx_eq(&before, EPSILON));
}

#[test]
fn clean_matrix_is_not_rebuilt() {
    let mut cam = Camera2D::new();
    cam.update_matrix(10.0, 10.0);
    let before = cam.matrix();
    cam.update_matrix(10.0, 10.0);
    assert_eq!(cam.matrix(), before);
}

// --- Helpers ---

#[test]
fn lerp_position_interpolates_and_dirties() {
    let mut cam = Camera2D::new();
    cam.update_matrix(0.0, 0.0);
    cam.lerp_position(Vector2::new(0.0, 0.0), Vector2::new(10.0, -10.0), 0.25);
    assert_eq!(cam.position(), Vector2::new(2.5, -2.5));
    assert!(cam.matrix_needs_update());
}

#[test]
fn screen_dist_to_world_divides_by_scale() {
    let mut cam = Camera2D::new();
    cam.set_scale(4.0);
    assert_eq!(cam.screen_dist_to_world(20.0), 5.0);
}
