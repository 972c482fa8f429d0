//! Paint styles for fills and strokes.
//!
//! A [`Style`] describes what to paint with; [`Style::get`] resolves it
//! against a drawing context into a [`Paint`] and caches the result until the
//! style is edited. Colours may name a CSS custom property (`var(--accent)`),
//! which only the host can resolve.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::{Deserialize, Serialize};

use crate::context::DrawingContext;
use crate::vector2::Vector2;

/// Offset/colour pair along a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    pub color: String,
}

impl ColorStop {
    #[must_use]
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self { offset, color: color.into() }
    }
}

/// Concrete paint handed to a [`DrawingContext`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Color(String),
    LinearGradient {
        start: Vector2,
        end: Vector2,
        stops: Vec<ColorStop>,
    },
    RadialGradient {
        start: Vector2,
        start_radius: f64,
        end: Vector2,
        end_radius: f64,
        stops: Vec<ColorStop>,
    },
}

/// What a style paints with, before host resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleKind {
    Color(String),
    LinearGradient {
        start: Vector2,
        end: Vector2,
        stops: Vec<ColorStop>,
    },
    RadialGradient {
        start: Vector2,
        start_radius: f64,
        end: Vector2,
        end_radius: f64,
        stops: Vec<ColorStop>,
    },
}

/// A lazily resolved paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    kind: StyleKind,
    needs_update: bool,
    cache: Option<Paint>,
}

impl Style {
    #[must_use]
    pub fn new(kind: StyleKind) -> Self {
        Self { kind, needs_update: true, cache: None }
    }

    #[must_use]
    pub fn color(color: impl Into<String>) -> Self {
        Self::new(StyleKind::Color(color.into()))
    }

    #[must_use]
    pub fn linear_gradient(start: Vector2, end: Vector2, stops: Vec<ColorStop>) -> Self {
        Self::new(StyleKind::LinearGradient { start, end, stops })
    }

    #[must_use]
    pub fn radial_gradient(start: Vector2, start_radius: f64, end: Vector2, end_radius: f64, stops: Vec<ColorStop>) -> Self {
        Self::new(StyleKind::RadialGradient { start, start_radius, end, end_radius, stops })
    }

    #[must_use]
    pub fn kind(&self) -> &StyleKind {
        &self.kind
    }

    /// Edit the style; the cached paint is rebuilt on the next `get`.
    pub fn kind_mut(&mut self) -> &mut StyleKind {
        self.needs_update = true;
        &mut self.kind
    }

    /// Force re-resolution, e.g. after the host's CSS variables changed.
    pub fn invalidate(&mut self) {
        self.needs_update = true;
    }

    #[must_use]
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Resolve against `ctx`, reusing the cached paint when nothing changed.
    pub fn get(&mut self, ctx: &dyn DrawingContext) -> &Paint {
        if self.needs_update || self.cache.is_none() {
            self.needs_update = false;
            self.cache = Some(self.resolve(ctx));
        }
        self.cache.get_or_insert_with(|| Paint::Color(String::new()))
    }

    fn resolve(&self, ctx: &dyn DrawingContext) -> Paint {
        let resolve_stops = |stops: &[ColorStop]| {
            stops
                .iter()
                .map(|s| ColorStop::new(s.offset, ctx.resolve_color(&s.color)))
                .collect::<Vec<_>>()
        };
        match &self.kind {
            StyleKind::Color(c) => Paint::Color(ctx.resolve_color(c)),
            StyleKind::LinearGradient { start, end, stops } => {
                Paint::LinearGradient { start: *start, end: *end, stops: resolve_stops(stops) }
            }
            StyleKind::RadialGradient { start, start_radius, end, end_radius, stops } => Paint::RadialGradient {
                start: *start,
                start_radius: *start_radius,
                end: *end,
                end_radius: *end_radius,
                stops: resolve_stops(stops),
            },
        }
    }
}
