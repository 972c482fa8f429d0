//! Browser drawing backend.
//!
//! [`WebContext`] implements [`DrawingContext`] over
//! [`web_sys::CanvasRenderingContext2d`]. This is the only module that talks to
//! the canvas API; every `JsValue` failure is turned into
//! [`RenderError::Canvas`] at the call site.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::context::{DrawingContext, RenderError};
use crate::matrix2::Matrix2;
use crate::style::{ColorStop, Paint};

pub(crate) fn js_error(err: JsValue) -> RenderError {
    RenderError::Canvas(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// A canvas 2D context as a [`DrawingContext`].
#[derive(Debug, Clone)]
pub struct WebContext {
    ctx: CanvasRenderingContext2d,
}

impl WebContext {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn raw(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn gradient(&self, paint: &Paint) -> Result<Option<CanvasGradient>, RenderError> {
        let (gradient, stops) = match paint {
            Paint::Color(_) => return Ok(None),
            Paint::LinearGradient { start, end, stops } => {
                (self.ctx.create_linear_gradient(start.x, start.y, end.x, end.y), stops)
            }
            Paint::RadialGradient { start, start_radius, end, end_radius, stops } => (
                self.ctx
                    .create_radial_gradient(start.x, start.y, *start_radius, end.x, end.y, *end_radius)
                    .map_err(js_error)?,
                stops,
            ),
        };
        add_stops(&gradient, stops)?;
        Ok(Some(gradient))
    }

    /// Value of a CSS custom property on the canvas element, if set.
    fn css_variable(&self, name: &str) -> Option<String> {
        let canvas = self.ctx.canvas()?;
        let window = web_sys::window()?;
        let declaration = match window.get_computed_style(&canvas) {
            Ok(Some(declaration)) => declaration,
            Ok(None) | Err(_) => return None,
        };
        match declaration.get_property_value(name) {
            Ok(value) if !value.trim().is_empty() => Some(value.trim().to_owned()),
            Ok(_) | Err(_) => None,
        }
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[ColorStop]) -> Result<(), RenderError> {
    for stop in stops {
        // The canvas API takes single-precision offsets.
        #[allow(clippy::cast_possible_truncation)]
        let offset = stop.offset as f32;
        gradient.add_color_stop(offset, &stop.color).map_err(js_error)?;
    }
    Ok(())
}

/// `var(--name)` or `var(--name, fallback)` → (`--name`, fallback).
fn parse_css_var(color: &str) -> Option<(&str, Option<&str>)> {
    let inner = color.trim().strip_prefix("var(")?.strip_suffix(')')?;
    match inner.split_once(',') {
        Some((name, fallback)) => Some((name.trim(), Some(fallback.trim()))),
        None => Some((inner.trim(), None)),
    }
}

impl DrawingContext for WebContext {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_transform(&mut self, m: &Matrix2) -> Result<(), RenderError> {
        let [a, b, c, d, e, f] = m.m;
        self.ctx.set_transform(a, b, c, d, e, f).map_err(js_error)
    }

    fn transform(&mut self, m: &Matrix2) -> Result<(), RenderError> {
        let [a, b, c, d, e, f] = m.m;
        self.ctx.transform(a, b, c, d, e, f).map_err(js_error)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Result<(), RenderError> {
        self.ctx.arc(x, y, radius, start_angle, end_angle).map_err(js_error)
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn clip(&mut self) {
        self.ctx.clip();
    }

    fn set_fill_style(&mut self, paint: &Paint) -> Result<(), RenderError> {
        match (paint, self.gradient(paint)?) {
            (_, Some(gradient)) => self.ctx.set_fill_style_canvas_gradient(&gradient),
            (Paint::Color(color), None) => self.ctx.set_fill_style_str(color),
            (_, None) => {}
        }
        Ok(())
    }

    fn set_stroke_style(&mut self, paint: &Paint) -> Result<(), RenderError> {
        match (paint, self.gradient(paint)?) {
            (_, Some(gradient)) => self.ctx.set_stroke_style_canvas_gradient(&gradient),
            (Paint::Color(color), None) => self.ctx.set_stroke_style_str(color),
            (_, None) => {}
        }
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), RenderError> {
        let dash_array = js_sys::Array::new();
        for segment in segments {
            dash_array.push(&(*segment).into());
        }
        self.ctx.set_line_dash(&dash_array).map_err(js_error)
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: &str) {
        self.ctx.set_text_align(align);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.ctx.set_text_baseline(baseline);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        self.ctx.fill_text(text, x, y).map_err(js_error)
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        self.ctx.stroke_text(text, x, y).map_err(js_error)
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, RenderError> {
        self.ctx.measure_text(text).map(|m| m.width()).map_err(js_error)
    }

    fn resolve_color(&self, color: &str) -> String {
        let Some((name, fallback)) = parse_css_var(color) else {
            return color.to_owned();
        };
        self.css_variable(name)
            .or_else(|| fallback.map(str::to_owned))
            .unwrap_or_else(|| color.to_owned())
    }
}
