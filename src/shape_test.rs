#![allow(clippy::float_cmp)]

use super::*;
use crate::context::{DrawCall, RecordingContext};

// =============================================================
// Bounds
// =============================================================

#[test]
fn box_is_centred_on_origin() {
    let shape = Shape::Box(BoxShape::new(100.0, 40.0));
    let bbox = shape.compute_bounding_box();
    assert_eq!(bbox.min, Vector2::new(-50.0, -20.0));
    assert_eq!(bbox.max, Vector2::new(50.0, 20.0));
}

#[test]
fn empty_shape_has_empty_bounds() {
    assert!(Shape::Empty.compute_bounding_box().is_empty());
}

#[test]
fn line_bounds_include_half_width() {
    let mut line = LineShape::new(Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0));
    line.width = 4.0;
    let bbox = Shape::Line(line).compute_bounding_box();
    assert_eq!(bbox.min, Vector2::new(-2.0, -2.0));
    assert_eq!(bbox.max, Vector2::new(12.0, 2.0));
}

#[test]
fn text_bounds_empty_until_measured() {
    let mut shape = Shape::Text(TextShape::new("abcd"));
    assert!(shape.compute_bounding_box().is_empty());

    let mut ctx = RecordingContext::new();
    shape.draw(&mut ctx).unwrap();
    let bbox = shape.compute_bounding_box();
    assert_eq!(bbox.min, Vector2::new(-16.0, -8.0));
    assert_eq!(bbox.max, Vector2::new(16.0, 8.0));
}

#[test]
fn text_bounds_follow_alignment() {
    let mut text = TextShape::new("ab");
    text.align = TextAlign::Start;
    text.baseline = TextBaseline::Top;
    let mut shape = Shape::Text(text);
    shape.draw(&mut RecordingContext::new()).unwrap();
    let bbox = shape.compute_bounding_box();
    assert_eq!(bbox.min, Vector2::new(0.0, 0.0));
    assert_eq!(bbox.max, Vector2::new(16.0, 16.0));
}

// =============================================================
// Hit tests
// =============================================================

#[test]
fn circle_hit_uses_radius() {
    let shape = Shape::Circle(CircleShape::new(10.0));
    assert!(shape.is_inside(Vector2::new(6.0, 8.0)));
    assert!(!shape.is_inside(Vector2::new(8.0, 8.0)));
}

#[test]
fn line_hit_has_slop() {
    let shape = Shape::Line(LineShape::new(Vector2::new(0.0, 0.0), Vector2::new(100.0, 0.0)));
    assert!(shape.is_inside(Vector2::new(50.0, 2.4)));
    assert!(!shape.is_inside(Vector2::new(50.0, 3.0)));
    assert!(!shape.is_inside(Vector2::new(104.0, 0.0)));
}

#[test]
fn line_hit_slop_is_per_line() {
    let mut line = LineShape::new(Vector2::new(0.0, 0.0), Vector2::new(100.0, 0.0));
    line.width = 0.1;
    line.hit_slop = 0.05;
    let shape = Shape::Line(line);
    assert!(shape.is_inside(Vector2::new(50.0, 0.09)));
    assert!(!shape.is_inside(Vector2::new(50.0, 0.2)));
}

#[test]
fn zero_length_line_falls_back_to_point_distance() {
    let line = LineShape::new(Vector2::new(5.0, 5.0), Vector2::new(5.0, 5.0));
    assert_eq!(line.distance_to(Vector2::new(8.0, 9.0)), 5.0);
    assert!(Shape::Line(line).is_inside(Vector2::new(6.0, 5.0)));
}

#[test]
fn masks_and_empty_are_never_hit() {
    assert!(!Shape::Empty.is_inside(Vector2::zero()));
    assert!(!Shape::BoxMask(BoxMask::new(10.0, 10.0)).is_inside(Vector2::zero()));
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn box_draw_fills_and_strokes() {
    let mut shape = Shape::Box(BoxShape::new(20.0, 10.0));
    let mut ctx = RecordingContext::new();
    shape.style(&mut ctx).unwrap();
    shape.draw(&mut ctx).unwrap();
    assert!(ctx.calls.contains(&DrawCall::FillRect(-10.0, -5.0, 20.0, 10.0)));
    assert!(ctx.calls.contains(&DrawCall::StrokeRect(-10.0, -5.0, 20.0, 10.0)));
    assert!(ctx.calls.contains(&DrawCall::LineWidth(1.0)));
}

#[test]
fn box_without_stroke_only_fills() {
    let mut b = BoxShape::new(2.0, 2.0);
    b.style.stroke = None;
    let mut shape = Shape::Box(b);
    let mut ctx = RecordingContext::new();
    shape.draw(&mut ctx).unwrap();
    assert_eq!(ctx.count(|c| matches!(c, DrawCall::StrokeRect(..))), 0);
    assert_eq!(ctx.count(|c| matches!(c, DrawCall::FillRect(..))), 1);
}

#[test]
fn negative_circle_radius_reports_error() {
    let mut shape = Shape::Circle(CircleShape::new(-1.0));
    assert!(shape.draw(&mut RecordingContext::new()).is_err());
}

#[test]
fn mask_clips_rect() {
    let shape = Shape::BoxMask(BoxMask::new(10.0, 20.0));
    let mut ctx = RecordingContext::new();
    shape.clip(&mut ctx);
    assert_eq!(ctx.calls, vec![DrawCall::BeginPath, DrawCall::Rect(-5.0, -10.0, 10.0, 20.0), DrawCall::Clip]);
}

#[test]
fn inverted_mask_clips_four_outer_rects() {
    let mut mask = BoxMask::new(10.0, 10.0);
    mask.invert = true;
    let shape = Shape::BoxMask(mask);
    let mut ctx = RecordingContext::new();
    shape.clip(&mut ctx);
    assert_eq!(ctx.count(|c| matches!(c, DrawCall::Rect(..))), 4);
    assert_eq!(ctx.calls.last(), Some(&DrawCall::Clip));
}

#[test]
fn non_mask_clip_is_noop() {
    let mut ctx = RecordingContext::new();
    Shape::Box(BoxShape::new(1.0, 1.0)).clip(&mut ctx);
    assert!(ctx.calls.is_empty());
}
