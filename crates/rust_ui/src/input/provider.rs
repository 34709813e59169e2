//! Input provider seam

use super::{CurrentInputState, MouseButton, MouseButtons, TextInputCommand};
use crate::foundation::math::Point;

/// Source of per-frame input, implemented by the host application
pub trait InputProvider {
    /// Pointer position in screen space, already transformed to UI coordinates
    fn mouse_position(&self) -> Point;

    /// True while `button` is held
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    /// Discrete wheel delta since the previous frame
    fn mouse_wheel_change(&self) -> i32;

    /// Text editing commands for this frame, key repeat already applied
    fn text_input_commands(&mut self) -> Vec<TextInputCommand> {
        Vec::new()
    }

    /// Gather a full snapshot
    fn snapshot(&mut self) -> CurrentInputState {
        let mut buttons = MouseButtons::empty();
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Wheel] {
            if self.is_mouse_button_down(button) {
                buttons |= button.into();
            }
        }
        CurrentInputState {
            mouse_position: self.mouse_position(),
            buttons,
            mouse_wheel_change: self.mouse_wheel_change(),
            text_input_commands: self.text_input_commands(),
        }
    }
}
