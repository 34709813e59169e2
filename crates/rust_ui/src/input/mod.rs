//! Input handling
//!
//! The toolkit never polls devices itself. An [`InputProvider`] supplies a
//! per-frame [`CurrentInputState`]; the UI system pairs it with the previous
//! frame's snapshot into an [`InputState`] so edges (pressed / released this
//! frame) can be derived.

mod provider;
mod state;
mod text_commands;

pub use provider::InputProvider;
pub use state::{CurrentInputState, InputState, MouseButton, MouseButtons};
pub use text_commands::{TextInputCommand, TextInputKey, TextInputRepeater};
