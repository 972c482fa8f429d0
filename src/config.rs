//! Engine configuration.
//!
//! Every section deserialises with defaults, so a host can pass `{}` or only
//! the keys it cares about:
//!
//! ```json
//! { "renderer": { "pixel_ratio": 2.0 }, "controls": { "allow_rotation": false } }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{FOCUS_DURATION_MS, MAX_CAMERA_SCALE, MIN_CAMERA_SCALE, ROTATION_SENSITIVITY, ZOOM_SENSITIVITY};
use crate::input::Button;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for [`crate::engine::EngineCore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub renderer: RendererConfig,
    pub controls: ControlsConfig,
    pub pointer: PointerConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the types cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.renderer.pixel_ratio.is_nan() || self.renderer.pixel_ratio <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "renderer.pixel_ratio must be > 0, got {}",
                self.renderer.pixel_ratio
            )));
        }
        if self.renderer.selection_line_width < 0.0 {
            return Err(ConfigError::Invalid("renderer.selection_line_width must be >= 0".to_owned()));
        }
        if self.renderer.selection_dash.is_nan() || self.renderer.selection_dash < 0.0 {
            return Err(ConfigError::Invalid("renderer.selection_dash must be >= 0".to_owned()));
        }
        if self.controls.focus_duration_ms.is_nan() || self.controls.focus_duration_ms < 0.0 {
            return Err(ConfigError::Invalid("controls.focus_duration_ms must be >= 0".to_owned()));
        }
        if self.controls.min_scale.is_nan() || self.controls.min_scale <= 0.0 || self.controls.min_scale > self.controls.max_scale {
            return Err(ConfigError::Invalid(format!(
                "controls scale range must satisfy 0 < min_scale <= max_scale, got [{}, {}]",
                self.controls.min_scale, self.controls.max_scale
            )));
        }
        Ok(())
    }
}

/// Frame rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Clear the whole surface before drawing each frame.
    pub auto_clear: bool,
    /// Device pixels per CSS pixel; applied as an outer scale on every transform.
    pub pixel_ratio: f64,
    /// Skip drawing and picking for nodes outside the viewport.
    pub culling: bool,
    /// Stroke colour for selected nodes' bounding boxes.
    pub selection_color: String,
    /// Selection outline width in screen pixels.
    pub selection_line_width: f64,
    /// Dash length of the selection outline in screen pixels; `0` draws it solid.
    pub selection_dash: f64,
    /// Cursor used when nothing under the pointer provides one.
    pub default_cursor: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            auto_clear: true,
            pixel_ratio: 1.0,
            culling: true,
            selection_color: "#00AAFF".to_owned(),
            selection_line_width: 2.0,
            selection_dash: 0.0,
            default_cursor: "default".to_owned(),
        }
    }
}

/// Camera controls options.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Pan with `drag_button`.
    pub allow_drag: bool,
    /// Zoom with the wheel.
    pub allow_scale: bool,
    /// Rotate with `rotate_button`.
    pub allow_rotation: bool,
    /// Animate focus on left double-click.
    pub focus_on_double_click: bool,
    /// DOM button number used to pan.
    pub drag_button: i16,
    /// DOM button number used to rotate.
    pub rotate_button: i16,
    /// Scale change per wheel unit, relative to the current scale.
    pub zoom_sensitivity: f64,
    /// Radians per horizontal pixel while rotating.
    pub rotation_sensitivity: f64,
    /// Focus animation length.
    pub focus_duration_ms: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            allow_drag: true,
            allow_scale: true,
            allow_rotation: true,
            focus_on_double_click: true,
            drag_button: Button::Right as i16,
            rotate_button: Button::Middle as i16,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            rotation_sensitivity: ROTATION_SENSITIVITY,
            focus_duration_ms: FOCUS_DURATION_MS,
            min_scale: MIN_CAMERA_SCALE,
            max_scale: MAX_CAMERA_SCALE,
        }
    }
}

/// Pointer binding options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Suppress the browser context menu on the bound element.
    pub prevent_context_menu: bool,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self { prevent_context_menu: true }
    }
}
