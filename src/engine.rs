use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::Camera2D;
use crate::config::{ConfigError, EngineConfig};
use crate::context::{DrawingContext, RenderError};
use crate::controls::CameraControls;
use crate::input::Button;
use crate::keyboard::Keyboard;
use crate::node::NodeId;
use crate::pointer::Pointer;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::web::{WebContext, js_error};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Core engine state: everything that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be driven headlessly with a
/// [`crate::context::RecordingContext`].
#[derive(Debug)]
pub struct EngineCore {
    pub scene: Option<Scene>,
    pub camera: Option<Camera2D>,
    pub pointer: Pointer,
    pub keyboard: Keyboard,
    pub renderer: Renderer,
    pub controls: Option<CameraControls>,
    config: EngineConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scene: Some(Scene::new()),
            camera: Some(Camera2D::new()),
            pointer: Pointer::new(config.pointer.clone()),
            keyboard: Keyboard::new(),
            renderer: Renderer::new(config.renderer.clone()),
            controls: Some(CameraControls::new(config.controls.clone())),
            config,
        }
    }

    /// Build from a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(EngineConfig::from_json(raw)?))
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.renderer.set_viewport(width_css, height_css);
        self.renderer.set_pixel_ratio(dpr);
        self.pointer.set_pixel_ratio(dpr);
    }

    // --- Input events ---

    pub fn on_pointer_move(&mut self, x: f64, y: f64, movement_x: f64, movement_y: f64) {
        self.pointer.on_pointer_move(x, y, movement_x, movement_y);
    }

    pub fn on_pointer_down(&mut self, button: i16) {
        if let Some(button) = Self::button(button) {
            self.pointer.on_pointer_down(button);
        }
    }

    pub fn on_pointer_up(&mut self, button: i16) {
        if let Some(button) = Self::button(button) {
            self.pointer.on_pointer_up(button);
        }
    }

    pub fn on_double_click(&mut self, button: i16) {
        if let Some(button) = Self::button(button) {
            self.pointer.on_double_click(button);
        }
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.pointer.on_wheel(delta_y);
    }

    pub fn on_pointer_enter(&mut self) {
        self.pointer.on_pointer_enter();
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.on_pointer_leave();
    }

    pub fn on_key_down(&mut self, code: &str) {
        self.keyboard.on_key_down(code);
    }

    pub fn on_key_up(&mut self, code: &str) {
        self.keyboard.on_key_up(code);
    }

    /// The host lost focus; key-up events for held keys will never arrive.
    pub fn on_blur(&mut self) {
        self.keyboard.reset();
    }

    fn button(raw: i16) -> Option<Button> {
        let button = Button::from_dom(raw);
        if button.is_none() {
            warn!(button = raw, "ignoring unknown pointer button");
        }
        button
    }

    // --- Frame ---

    /// Run one frame: publish input, apply camera controls, render.
    ///
    /// Does nothing beyond publishing input when there is no scene or camera.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's drawing backend failure.
    pub fn tick(&mut self, ctx: &mut dyn DrawingContext, now_ms: f64) -> Result<(), RenderError> {
        self.pointer.update();
        self.keyboard.update();

        let (Some(scene), Some(camera)) = (self.scene.as_mut(), self.camera.as_mut()) else {
            trace!("tick without scene or camera");
            return Ok(());
        };
        if let Some(controls) = &mut self.controls {
            controls.update(scene, camera, &self.pointer, self.renderer.viewport(), now_ms);
        }
        self.renderer.render(ctx, scene, camera, &self.pointer)
    }

    // --- Queries ---

    /// Cursor the canvas should show.
    #[must_use]
    pub fn cursor(&self) -> &str {
        self.renderer.cursor()
    }

    #[must_use]
    pub fn selection(&self) -> &[NodeId] {
        self.renderer.selection()
    }

    /// Whether the host should suppress the context menu on the canvas.
    #[must_use]
    pub fn prevent_context_menu(&self) -> bool {
        self.pointer.config().prevent_context_menu
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
#[derive(Debug)]
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: WebContext,
    cursor: String,
    pub core: EngineCore,
}

impl Engine {
    /// Bind a new engine to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoContext`] when the element has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: EngineConfig) -> Result<Self, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(RenderError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::NoContext)?;
        let cursor = config.renderer.default_cursor.clone();
        Ok(Self { canvas, ctx: WebContext::new(ctx), cursor, core: EngineCore::new(config) })
    }

    // --- Viewport ---

    /// Resize the backing store to `width_css × height_css` at `dpr` device
    /// pixels per CSS pixel.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        let (width, height) = (device_pixels(width_css, dpr), device_pixels(height_css, dpr));
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.core.set_viewport(width_css, height_css, dpr);
    }

    // --- Input events ---

    pub fn on_pointer_move(&mut self, x: f64, y: f64, movement_x: f64, movement_y: f64) {
        self.core.on_pointer_move(x, y, movement_x, movement_y);
    }

    /// Button pressed; captures the pointer so drags continue outside the canvas.
    pub fn on_pointer_down(&mut self, pointer_id: i32, button: i16) {
        self.core.on_pointer_down(button);
        if let Err(e) = self.canvas.set_pointer_capture(pointer_id) {
            warn!(pointer_id, error = ?e, "set_pointer_capture failed");
        }
    }

    pub fn on_pointer_up(&mut self, pointer_id: i32, button: i16) {
        self.core.on_pointer_up(button);
        if self.canvas.has_pointer_capture(pointer_id) {
            if let Err(e) = self.canvas.release_pointer_capture(pointer_id) {
                warn!(pointer_id, error = ?e, "release_pointer_capture failed");
            }
        }
    }

    pub fn on_double_click(&mut self, button: i16) {
        self.core.on_double_click(button);
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.core.on_wheel(delta_y);
    }

    pub fn on_pointer_enter(&mut self) {
        self.core.on_pointer_enter();
    }

    pub fn on_pointer_leave(&mut self) {
        self.core.on_pointer_leave();
    }

    pub fn on_key_down(&mut self, code: &str) {
        self.core.on_key_down(code);
    }

    pub fn on_key_up(&mut self, code: &str) {
        self.core.on_key_up(code);
    }

    pub fn on_blur(&mut self) {
        self.core.on_blur();
    }

    /// Returns whether the host should call `preventDefault` on the event.
    #[must_use]
    pub fn on_context_menu(&self) -> bool {
        self.core.prevent_context_menu()
    }

    // --- Render ---

    /// Run one animation frame and apply the resolved cursor to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any canvas call fails.
    pub fn frame(&mut self, now_ms: f64) -> Result<(), RenderError> {
        self.core.tick(&mut self.ctx, now_ms)?;
        let cursor = self.core.cursor();
        if cursor != self.cursor {
            self.canvas.style().set_property("cursor", cursor).map_err(js_error)?;
            self.cursor = cursor.to_owned();
        }
        Ok(())
    }
}

/// CSS length → whole device pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_pixels(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(0.0) as u32
}
