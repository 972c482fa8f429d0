//! Drawable payloads carried by scene nodes.
//!
//! Every node holds exactly one [`Shape`]. The renderer never asks a node what
//! it can do; it matches on the shape, so adding a variant is a compile error
//! everywhere a decision depends on it.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::f64::consts::TAU;

use crate::box2::Box2;
use crate::consts::{INVERTED_MASK_EXTENT, LINE_HIT_SLOP};
use crate::context::{DrawingContext, RenderError};
use crate::style::Style;
use crate::vector2::Vector2;

/// Fill and stroke settings shared by the closed shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Style>,
    pub stroke: Option<Style>,
    pub line_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self { fill: Some(Style::color("#FFFFFF")), stroke: Some(Style::color("#000000")), line_width: 1.0 }
    }
}

impl ShapeStyle {
    /// Push line width and both styles into `ctx`.
    fn apply(&mut self, ctx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        ctx.set_line_width(self.line_width);
        if let Some(fill) = &mut self.fill {
            let paint = fill.get(&*ctx);
            ctx.set_fill_style(paint)?;
        }
        if let Some(stroke) = &mut self.stroke {
            let paint = stroke.get(&*ctx);
            ctx.set_stroke_style(paint)?;
        }
        Ok(())
    }
}

/// Axis-aligned rectangle in local space.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub rect: Box2,
    pub style: ShapeStyle,
}

impl BoxShape {
    /// Rectangle of the given size centred on the local origin.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let half = Vector2::new(width / 2.0, height / 2.0);
        Self {
            rect: Box2::new(Vector2::new(-half.x, -half.y), half),
            style: ShapeStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub radius: f64,
    pub style: ShapeStyle,
}

impl CircleShape {
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self { radius, style: ShapeStyle::default() }
    }
}

/// Segment between two local points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub from: Vector2,
    pub to: Vector2,
    pub width: f64,
    /// Extra grab distance on each side of the stroke, in local units.
    pub hit_slop: f64,
    pub stroke: Style,
}

impl LineShape {
    #[must_use]
    pub fn new(from: Vector2, to: Vector2) -> Self {
        Self { from, to, width: 1.0, hit_slop: LINE_HIT_SLOP, stroke: Style::color("#000000") }
    }

    fn apply(&mut self, ctx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        ctx.set_line_width(self.width);
        let paint = self.stroke.get(&*ctx);
        ctx.set_stroke_style(paint)
    }

    /// Distance from `p` to the segment; a zero-length line measures to its
    /// single point.
    #[must_use]
    pub fn distance_to(&self, p: Vector2) -> f64 {
        let mut dir = self.to;
        dir.sub(self.from);
        let len_sq = dir.length_squared();
        if len_sq <= f64::EPSILON {
            return p.distance_to(self.from);
        }
        let mut rel = p;
        rel.sub(self.from);
        let t = (rel.dot(dir) / len_sq).clamp(0.0, 1.0);
        let mut closest = self.from;
        closest.add(*dir.multiply_scalar(t));
        p.distance_to(closest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Start,
    #[default]
    Center,
    End,
}

impl TextAlign {
    fn as_css(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl TextBaseline {
    fn as_css(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Single line of text anchored at the local origin.
///
/// The width is only known after the backend has measured it, so the
/// bounding box is empty until the first draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub style: ShapeStyle,
    measured_width: Option<f64>,
}

impl TextShape {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 16.0,
            font_family: "Arial".to_owned(),
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            style: ShapeStyle { fill: Some(Style::color("#000000")), stroke: None, line_width: 1.0 },
            measured_width: None,
        }
    }

    #[must_use]
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }

    /// Width from the last draw, if any.
    #[must_use]
    pub fn measured_width(&self) -> Option<f64> {
        self.measured_width
    }

    fn bounds(&self) -> Box2 {
        let Some(width) = self.measured_width else {
            return Box2::empty();
        };
        let (x0, x1) = match self.align {
            TextAlign::Start => (0.0, width),
            TextAlign::Center => (-width / 2.0, width / 2.0),
            TextAlign::End => (-width, 0.0),
        };
        let h = self.font_size;
        let (y0, y1) = match self.baseline {
            TextBaseline::Top => (0.0, h),
            TextBaseline::Middle => (-h / 2.0, h / 2.0),
            TextBaseline::Bottom => (-h, 0.0),
        };
        Box2::new(Vector2::new(x0, y0), Vector2::new(x1, y1))
    }
}

/// Rectangular clip region. With `invert` set the clip keeps everything
/// outside the rectangle instead.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxMask {
    pub rect: Box2,
    pub invert: bool,
}

impl BoxMask {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let half = Vector2::new(width / 2.0, height / 2.0);
        Self { rect: Box2::new(Vector2::new(-half.x, -half.y), half), invert: false }
    }
}

/// What a node draws and how it is hit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Shape {
    /// Pure grouping node.
    #[default]
    Empty,
    Box(BoxShape),
    Circle(CircleShape),
    Line(LineShape),
    Text(TextShape),
    BoxMask(BoxMask),
}

impl Shape {
    /// Local-space bounds of the payload.
    #[must_use]
    pub fn compute_bounding_box(&self) -> Box2 {
        match self {
            Self::Empty => Box2::empty(),
            Self::Box(b) => b.rect,
            Self::Circle(c) => Box2::new(Vector2::new(-c.radius, -c.radius), Vector2::new(c.radius, c.radius)),
            Self::Line(l) => {
                let mut bbox = Box2::from_points(&[l.from, l.to]);
                bbox.expand_by_scalar(l.width / 2.0);
                bbox
            }
            Self::Text(t) => t.bounds(),
            Self::BoxMask(m) => m.rect,
        }
    }

    /// Local-space hit test. Masks and empty nodes are never hit.
    #[must_use]
    pub fn is_inside(&self, p: Vector2) -> bool {
        match self {
            Self::Empty | Self::BoxMask(_) => false,
            Self::Box(b) => b.rect.contains_point(p),
            Self::Circle(c) => p.length() <= c.radius,
            Self::Line(l) => l.distance_to(p) <= l.width / 2.0 + l.hit_slop,
            Self::Text(t) => t.bounds().contains_point(p),
        }
    }

    #[must_use]
    pub fn is_mask(&self) -> bool {
        matches!(self, Self::BoxMask(_))
    }

    /// Push this shape's paint state into `ctx`.
    ///
    /// # Errors
    ///
    /// Propagates backend failures building a paint.
    pub fn style(&mut self, ctx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        match self {
            Self::Empty | Self::BoxMask(_) => Ok(()),
            Self::Box(b) => b.style.apply(ctx),
            Self::Circle(c) => c.style.apply(ctx),
            Self::Line(l) => l.apply(ctx),
            Self::Text(t) => {
                ctx.set_font(&t.font());
                ctx.set_text_align(t.align.as_css());
                ctx.set_text_baseline(t.baseline.as_css());
                t.style.apply(ctx)
            }
        }
    }

    /// Draw in local space; the caller has already set the transform.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn draw(&mut self, ctx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        match self {
            Self::Empty | Self::BoxMask(_) => {}
            Self::Box(b) => {
                let size = b.rect.get_size();
                if b.style.fill.is_some() {
                    ctx.fill_rect(b.rect.min.x, b.rect.min.y, size.x, size.y);
                }
                if b.style.stroke.is_some() {
                    ctx.stroke_rect(b.rect.min.x, b.rect.min.y, size.x, size.y);
                }
            }
            Self::Circle(c) => {
                ctx.begin_path();
                ctx.arc(0.0, 0.0, c.radius, 0.0, TAU)?;
                if c.style.fill.is_some() {
                    ctx.fill();
                }
                if c.style.stroke.is_some() {
                    ctx.stroke();
                }
            }
            Self::Line(l) => {
                ctx.begin_path();
                ctx.move_to(l.from.x, l.from.y);
                ctx.line_to(l.to.x, l.to.y);
                ctx.stroke();
            }
            Self::Text(t) => {
                t.measured_width = Some(ctx.measure_text(&t.text)?);
                if t.style.fill.is_some() {
                    ctx.fill_text(&t.text, 0.0, 0.0)?;
                }
                if t.style.stroke.is_some() {
                    ctx.stroke_text(&t.text, 0.0, 0.0)?;
                }
            }
        }
        Ok(())
    }

    /// Intersect the current clip with this shape. Only masks clip.
    pub fn clip(&self, ctx: &mut dyn DrawingContext) {
        let Self::BoxMask(m) = self else {
            return;
        };
        let r = m.rect;
        ctx.begin_path();
        if m.invert {
            let e = INVERTED_MASK_EXTENT;
            ctx.rect(-e, -e, 2.0 * e, r.min.y + e);
            ctx.rect(-e, r.max.y, 2.0 * e, e - r.max.y);
            ctx.rect(-e, r.min.y, r.min.x + e, r.max.y - r.min.y);
            ctx.rect(r.max.x, r.min.y, e - r.max.x, r.max.y - r.min.y);
        } else {
            let size = r.get_size();
            ctx.rect(r.min.x, r.min.y, size.x, size.y);
        }
        ctx.clip();
    }
}
