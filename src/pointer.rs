//! Pointer (mouse / pen / touch) state with double-buffered edge detection.
//!
//! Host event handlers may fire any number of times between frames; they only
//! touch the shadow buffer. [`Pointer::update`] publishes the shadow once per
//! frame, so every reader in that frame sees the same position, delta, wheel
//! and button edges, and every edge stays visible for exactly one frame.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use crate::config::PointerConfig;
use crate::input::{Button, Key, KeyAction};
use crate::vector2::Vector2;

/// Pointer snapshot plus its pending shadow state.
#[derive(Debug, Clone, Default)]
pub struct Pointer {
    /// Published position in element (CSS pixel) coordinates.
    pub position: Vector2,
    /// Published movement accumulated over the last frame.
    pub delta: Vector2,
    /// Published wheel movement accumulated over the last frame.
    pub wheel: f64,

    keys: [Key; Button::COUNT],
    double_clicked: [bool; Button::COUNT],
    inside: bool,

    shadow_position: Vector2,
    shadow_delta: Vector2,
    shadow_wheel: f64,
    shadow_keys: [Key; Button::COUNT],
    shadow_double_clicked: [bool; Button::COUNT],
    shadow_inside: bool,

    pixel_ratio: f64,
    config: PointerConfig,
}

impl Pointer {
    #[must_use]
    pub fn new(config: PointerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[must_use]
    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Device pixels per CSS pixel of the element the pointer reports in.
    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    /// Device pixels per CSS pixel; `1.0` until a positive ratio is set.
    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 }
    }

    // --- Host events (shadow buffer only) ---

    /// Pointer moved to `(x, y)` in element coordinates, having travelled
    /// `(movement_x, movement_y)` since the previous move event.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, movement_x: f64, movement_y: f64) {
        self.shadow_position.set(x, y);
        self.shadow_delta.add(Vector2::new(movement_x, movement_y));
    }

    pub fn on_pointer_down(&mut self, button: Button) {
        self.shadow_keys[button.index()].update(KeyAction::Down);
    }

    pub fn on_pointer_up(&mut self, button: Button) {
        self.shadow_keys[button.index()].update(KeyAction::Up);
    }

    /// Wheel moved by `delta_y` (DOM `deltaY`; positive scrolls down / zooms out).
    pub fn on_wheel(&mut self, delta_y: f64) {
        self.shadow_wheel += delta_y;
    }

    pub fn on_double_click(&mut self, button: Button) {
        self.shadow_double_clicked[button.index()] = true;
    }

    pub fn on_pointer_enter(&mut self) {
        self.shadow_inside = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.shadow_inside = false;
    }

    // --- Frame publication ---

    /// Publish the shadow buffer as this frame's snapshot.
    pub fn update(&mut self) {
        for i in 0..Button::COUNT {
            let shadow = &mut self.shadow_keys[i];
            let published = self.keys[i];

            if shadow.just_pressed && published.just_pressed {
                shadow.just_pressed = false;
            }
            if shadow.just_released && published.just_released {
                shadow.just_released = false;
            }

            self.keys[i].set(shadow.just_pressed, shadow.pressed, shadow.just_released);

            self.double_clicked[i] = self.shadow_double_clicked[i];
            self.shadow_double_clicked[i] = false;
        }

        self.position = self.shadow_position;
        self.delta = self.shadow_delta;
        self.shadow_delta = Vector2::zero();
        self.wheel = self.shadow_wheel;
        self.shadow_wheel = 0.0;
        self.inside = self.shadow_inside;
    }

    // --- Snapshot queries ---

    #[must_use]
    pub fn key(&self, button: Button) -> Key {
        self.keys[button.index()]
    }

    #[must_use]
    pub fn button_pressed(&self, button: Button) -> bool {
        self.keys[button.index()].pressed
    }

    #[must_use]
    pub fn button_just_pressed(&self, button: Button) -> bool {
        self.keys[button.index()].just_pressed
    }

    #[must_use]
    pub fn button_just_released(&self, button: Button) -> bool {
        self.keys[button.index()].just_released
    }

    #[must_use]
    pub fn button_double_clicked(&self, button: Button) -> bool {
        self.double_clicked[button.index()]
    }

    /// Whether the pointer was over the bound element at the last update.
    #[must_use]
    pub fn inside_dom(&self) -> bool {
        self.inside
    }

    /// Position at the start of the last published movement.
    #[must_use]
    pub fn previous_position(&self) -> Vector2 {
        let mut p = self.position;
        p.sub(self.delta);
        p
    }
}
