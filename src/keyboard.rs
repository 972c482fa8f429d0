//! Keyboard state with the same double-buffered edge detection as the pointer.
//!
//! Keys are addressed by their DOM `KeyboardEvent.code` (`"KeyA"`,
//! `"ArrowLeft"`, `"Space"`), which names the physical key independent of
//! layout. A key that has never been seen reads as released.

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

use std::collections::HashMap;

use crate::input::{Key, KeyAction};

#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    keys: HashMap<String, Key>,
    shadow: HashMap<String, Key>,
}

impl Keyboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Host events ---

    pub fn on_key_down(&mut self, code: &str) {
        self.shadow.entry(code.to_owned()).or_default().update(KeyAction::Down);
    }

    pub fn on_key_up(&mut self, code: &str) {
        self.shadow.entry(code.to_owned()).or_default().update(KeyAction::Up);
    }

    /// Release every held key, e.g. when the host window loses focus and the
    /// matching key-up events will never arrive.
    pub fn reset(&mut self) {
        for key in self.shadow.values_mut() {
            if key.pressed {
                key.update(KeyAction::Up);
            }
        }
    }

    // --- Frame publication ---

    /// Publish the shadow buffer as this frame's snapshot.
    pub fn update(&mut self) {
        for (code, shadow) in &mut self.shadow {
            let published = self.keys.entry(code.clone()).or_default();

            if shadow.just_pressed && published.just_pressed {
                shadow.just_pressed = false;
            }
            if shadow.just_released && published.just_released {
                shadow.just_released = false;
            }

            published.set(shadow.just_pressed, shadow.pressed, shadow.just_released);
        }
    }

    // --- Snapshot queries ---

    #[must_use]
    pub fn key(&self, code: &str) -> Key {
        self.keys.get(code).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn key_pressed(&self, code: &str) -> bool {
        self.key(code).pressed
    }

    #[must_use]
    pub fn key_just_pressed(&self, code: &str) -> bool {
        self.key(code).just_pressed
    }

    #[must_use]
    pub fn key_just_released(&self, code: &str) -> bool {
        self.key(code).just_released
    }
}
