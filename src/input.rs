//! Input model: the tri-state key machine and pointer button identifiers.
//!
//! `Key` is shared by [`crate::pointer::Pointer`] (one per mouse button) and
//! [`crate::keyboard::Keyboard`] (one per key code). It only changes through
//! [`Key::update`]; the owners decide when edges become visible by
//! double-buffering whole sets of keys once per frame.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Transition fed into [`Key::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The key went down (repeat events are harmless).
    Down,
    /// The key went up.
    Up,
    /// Clear the one-frame edges without touching `pressed`.
    Reset,
}

/// State of one key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Key {
    /// Held down right now.
    pub pressed: bool,
    /// Went down since the last transition.
    pub just_pressed: bool,
    /// Went up since the last transition.
    pub just_released: bool,
}

impl Key {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a transition. Each call clears the previous edges first, so an
    /// edge is only ever visible until the next `update`.
    pub fn update(&mut self, action: KeyAction) {
        self.just_pressed = false;
        self.just_released = false;

        match action {
            KeyAction::Down => {
                if !self.pressed {
                    self.just_pressed = true;
                }
                self.pressed = true;
            }
            KeyAction::Up => {
                if self.pressed {
                    self.just_released = true;
                }
                self.pressed = false;
            }
            KeyAction::Reset => {}
        }
    }

    /// Overwrite all three flags (used when publishing a snapshot).
    pub fn set(&mut self, just_pressed: bool, pressed: bool, just_released: bool) {
        self.just_pressed = just_pressed;
        self.pressed = pressed;
        self.just_released = just_released;
    }
}

/// Pointer button, numbered the way DOM `PointerEvent.button` numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Primary button (left click, touch contact).
    Left = 0,
    /// Wheel click.
    Middle = 1,
    /// Secondary button (right click).
    Right = 2,
    /// Browser "back" side button.
    Back = 3,
    /// Browser "forward" side button.
    Forward = 4,
}

impl Button {
    /// Number of tracked buttons.
    pub const COUNT: usize = 5;

    /// Every button in index order.
    pub const ALL: [Button; Self::COUNT] = [Button::Left, Button::Middle, Button::Right, Button::Back, Button::Forward];

    /// Map a DOM button number. Unknown numbers are not tracked.
    #[must_use]
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            3 => Some(Self::Back),
            4 => Some(Self::Forward),
            _ => None,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}
