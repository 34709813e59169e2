//! Input snapshots

use bitflags::bitflags;

use super::TextInputCommand;
use crate::foundation::math::{Point, Rect};

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button / wheel click
    Wheel,
}

bitflags! {
    /// Set of mouse buttons held down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left button
        const LEFT = 1;
        /// Right button
        const RIGHT = 1 << 1;
        /// Middle button
        const WHEEL = 1 << 2;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Right => Self::RIGHT,
            MouseButton::Wheel => Self::WHEEL,
        }
    }
}

/// One frame of raw input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentInputState {
    /// Pointer position in screen space
    pub mouse_position: Point,
    /// Buttons held down
    pub buttons: MouseButtons,
    /// Discrete wheel delta this frame
    pub mouse_wheel_change: i32,
    /// Text editing commands emitted this frame
    pub text_input_commands: Vec<TextInputCommand>,
}

impl CurrentInputState {
    /// True if `button` is held
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(button.into())
    }
}

/// Current and previous snapshot plus screen bounds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Previous frame
    pub previous: CurrentInputState,
    /// This frame
    pub current: CurrentInputState,
    /// Screen rectangle at the time of the snapshot
    pub screen_bounds: Rect,
}

impl InputState {
    /// Pointer position
    pub fn mouse_position(&self) -> Point {
        self.current.mouse_position
    }

    /// Wheel delta this frame
    pub const fn mouse_wheel_change(&self) -> i32 {
        self.current.mouse_wheel_change
    }

    /// Text commands this frame
    pub fn text_input_commands(&self) -> &[TextInputCommand] {
        &self.current.text_input_commands
    }

    /// Button held this frame
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.current.is_down(button)
    }

    /// Button went down this frame
    pub fn pressed_now(&self, button: MouseButton) -> bool {
        self.current.is_down(button) && !self.previous.is_down(button)
    }

    /// Button went up this frame
    pub fn released_now(&self, button: MouseButton) -> bool {
        !self.current.is_down(button) && self.previous.is_down(button)
    }

    /// Left button held
    pub fn left_mouse_down(&self) -> bool {
        self.is_down(MouseButton::Left)
    }

    /// Left button went down this frame
    pub fn left_mouse_pressed_now(&self) -> bool {
        self.pressed_now(MouseButton::Left)
    }

    /// Left button went up this frame
    pub fn left_mouse_released_now(&self) -> bool {
        self.released_now(MouseButton::Left)
    }

    /// Right button held
    pub fn right_mouse_down(&self) -> bool {
        self.is_down(MouseButton::Right)
    }

    /// Right button went down this frame
    pub fn right_mouse_pressed_now(&self) -> bool {
        self.pressed_now(MouseButton::Right)
    }

    /// Right button went up this frame
    pub fn right_mouse_released_now(&self) -> bool {
        self.released_now(MouseButton::Right)
    }

    /// Wheel button held
    pub fn wheel_mouse_down(&self) -> bool {
        self.is_down(MouseButton::Wheel)
    }

    /// Wheel button went down this frame
    pub fn wheel_mouse_pressed_now(&self) -> bool {
        self.pressed_now(MouseButton::Wheel)
    }

    /// Wheel button went up this frame
    pub fn wheel_mouse_released_now(&self) -> bool {
        self.released_now(MouseButton::Wheel)
    }
}
