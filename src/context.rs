//! The drawing capability the renderer paints through.
//!
//! [`DrawingContext`] mirrors the subset of the canvas 2D API the engine
//! needs. The browser implementation lives in [`crate::web`]; the
//! [`RecordingContext`] here keeps every call in memory so frames can be
//! asserted on without a browser.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use crate::matrix2::Matrix2;
use crate::style::Paint;

/// A drawing backend call failed.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("canvas call failed: {0}")]
    Canvas(String),
    #[error("no 2d context available on the canvas element")]
    NoContext,
}

/// Canvas-2D-shaped drawing surface.
///
/// Methods the browser API can reject return `Result`; the rest cannot fail.
pub trait DrawingContext {
    fn save(&mut self);
    fn restore(&mut self);

    /// Replace the current transform.
    ///
    /// # Errors
    ///
    /// Backend rejected the matrix.
    fn set_transform(&mut self, m: &Matrix2) -> Result<(), RenderError>;

    /// Multiply the current transform by `m`.
    ///
    /// # Errors
    ///
    /// Backend rejected the matrix.
    fn transform(&mut self, m: &Matrix2) -> Result<(), RenderError>;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Add a circular arc to the current path.
    ///
    /// # Errors
    ///
    /// Backend rejected the arc (e.g. negative radius).
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Result<(), RenderError>;

    fn fill(&mut self);
    fn stroke(&mut self);
    fn clip(&mut self);

    /// # Errors
    ///
    /// Backend could not build the paint (e.g. an invalid gradient stop).
    fn set_fill_style(&mut self, paint: &Paint) -> Result<(), RenderError>;

    /// # Errors
    ///
    /// Backend could not build the paint (e.g. an invalid gradient stop).
    fn set_stroke_style(&mut self, paint: &Paint) -> Result<(), RenderError>;

    fn set_line_width(&mut self, width: f64);

    /// Alternating dash/gap lengths for strokes; an empty slice means solid.
    ///
    /// # Errors
    ///
    /// Backend rejected the call.
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), RenderError>;

    fn set_global_alpha(&mut self, alpha: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn set_text_baseline(&mut self, baseline: &str);

    /// # Errors
    ///
    /// Backend rejected the call.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError>;

    /// # Errors
    ///
    /// Backend rejected the call.
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError>;

    /// Advance width of `text` in the current font.
    ///
    /// # Errors
    ///
    /// Backend rejected the call.
    fn measure_text(&mut self, text: &str) -> Result<f64, RenderError>;

    /// Turn a colour that may reference host state (a CSS custom property)
    /// into a concrete colour. Plain colours pass through.
    fn resolve_color(&self, color: &str) -> String {
        color.to_owned()
    }
}

/// One recorded [`DrawingContext`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Save,
    Restore,
    SetTransform(Matrix2),
    Transform(Matrix2),
    ClearRect(f64, f64, f64, f64),
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    Rect(f64, f64, f64, f64),
    Arc(f64, f64, f64, f64, f64),
    Fill,
    Stroke,
    Clip,
    FillStyle(Paint),
    StrokeStyle(Paint),
    LineWidth(f64),
    LineDash(Vec<f64>),
    GlobalAlpha(f64),
    Font(String),
    TextAlign(String),
    TextBaseline(String),
    FillText(String, f64, f64),
    StrokeText(String, f64, f64),
}

/// Headless context that records calls and tracks the current transform.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    pub calls: Vec<DrawCall>,
    /// Advance width per character reported by `measure_text`.
    pub char_width: f64,
    current: Matrix2,
    stack: Vec<Matrix2>,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self { calls: Vec::new(), char_width: 8.0, current: Matrix2::identity(), stack: Vec::new() }
    }
}

impl RecordingContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform that would apply to the next drawing call.
    #[must_use]
    pub fn current_transform(&self) -> Matrix2 {
        self.current
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl DrawingContext for RecordingContext {
    fn save(&mut self) {
        self.stack.push(self.current);
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        if let Some(m) = self.stack.pop() {
            self.current = m;
        }
        self.calls.push(DrawCall::Restore);
    }

    fn set_transform(&mut self, m: &Matrix2) -> Result<(), RenderError> {
        self.current = *m;
        self.calls.push(DrawCall::SetTransform(*m));
        Ok(())
    }

    fn transform(&mut self, m: &Matrix2) -> Result<(), RenderError> {
        self.current.multiply(m);
        self.calls.push(DrawCall::Transform(*m));
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::ClearRect(x, y, width, height));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::FillRect(x, y, width, height));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::StrokeRect(x, y, width, height));
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Rect(x, y, width, height));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Result<(), RenderError> {
        if radius < 0.0 {
            return Err(RenderError::Canvas(format!("negative arc radius {radius}")));
        }
        self.calls.push(DrawCall::Arc(x, y, radius, start_angle, end_angle));
        Ok(())
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }

    fn clip(&mut self) {
        self.calls.push(DrawCall::Clip);
    }

    fn set_fill_style(&mut self, paint: &Paint) -> Result<(), RenderError> {
        self.calls.push(DrawCall::FillStyle(paint.clone()));
        Ok(())
    }

    fn set_stroke_style(&mut self, paint: &Paint) -> Result<(), RenderError> {
        self.calls.push(DrawCall::StrokeStyle(paint.clone()));
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.calls.push(DrawCall::LineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), RenderError> {
        self.calls.push(DrawCall::LineDash(segments.to_vec()));
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.calls.push(DrawCall::GlobalAlpha(alpha));
    }

    fn set_font(&mut self, font: &str) {
        self.calls.push(DrawCall::Font(font.to_owned()));
    }

    fn set_text_align(&mut self, align: &str) {
        self.calls.push(DrawCall::TextAlign(align.to_owned()));
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.calls.push(DrawCall::TextBaseline(baseline.to_owned()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        self.calls.push(DrawCall::FillText(text.to_owned(), x, y));
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        self.calls.push(DrawCall::StrokeText(text.to_owned(), x, y));
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&mut self, text: &str) -> Result<f64, RenderError> {
        Ok(text.chars().count() as f64 * self.char_width)
    }
}
