#![allow(clippy::float_cmp)]

use super::*;
use crate::vector2::Vector2;

#[test]
fn records_calls_in_order() {
    let mut ctx = RecordingContext::new();
    ctx.begin_path();
    ctx.move_to(1.0, 2.0);
    ctx.line_to(3.0, 4.0);
    ctx.stroke();
    assert_eq!(
        ctx.calls,
        vec![DrawCall::BeginPath, DrawCall::MoveTo(1.0, 2.0), DrawCall::LineTo(3.0, 4.0), DrawCall::Stroke]
    );
}

#[test]
fn transform_accumulates_and_restores() {
    let mut ctx = RecordingContext::new();
    ctx.set_transform(&Matrix2::from_translation(10.0, 0.0)).unwrap();
    ctx.save();
    ctx.transform(&Matrix2::from_scale(2.0, 2.0)).unwrap();
    let p = ctx.current_transform().transform_point(Vector2::new(1.0, 1.0));
    assert_eq!(p, Vector2::new(12.0, 2.0));
    ctx.restore();
    assert_eq!(ctx.current_transform(), Matrix2::from_translation(10.0, 0.0));
}

#[test]
fn restore_without_save_keeps_transform() {
    let mut ctx = RecordingContext::new();
    ctx.set_transform(&Matrix2::from_scale(3.0, 3.0)).unwrap();
    ctx.restore();
    assert_eq!(ctx.current_transform(), Matrix2::from_scale(3.0, 3.0));
}

#[test]
fn negative_arc_radius_is_an_error() {
    let mut ctx = RecordingContext::new();
    let err = ctx.arc(0.0, 0.0, -1.0, 0.0, 1.0).unwrap_err();
    assert!(err.to_string().contains("negative arc radius"));
}

#[test]
fn measure_text_uses_char_width() {
    let mut ctx = RecordingContext { char_width: 5.0, ..RecordingContext::default() };
    assert_eq!(ctx.measure_text("hello").unwrap(), 25.0);
}

#[test]
fn resolve_color_passes_through_by_default() {
    let ctx = RecordingContext::new();
    assert_eq!(ctx.resolve_color("var(--accent)"), "var(--accent)");
}

#[test]
fn count_filters_calls() {
    let mut ctx = RecordingContext::new();
    ctx.fill();
    ctx.fill();
    ctx.stroke();
    assert_eq!(ctx.count(|c| matches!(c, DrawCall::Fill)), 2);
    ctx.clear();
    assert!(ctx.calls.is_empty());
}
