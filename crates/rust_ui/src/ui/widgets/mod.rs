//! UI widget definitions
//!
//! - `core`: anchors, states and the other shared enums
//! - `control`: the [`Control`] node and its [`ControlKind`]
//! - `panel`, `slider`, `progress_bar`: built-in kinds and their tree operations

pub mod core;

mod control;
mod panel;
mod progress_bar;
mod slider;

pub use control::{ColorAnimator, Control, ControlBehavior, ControlFrame, ControlKind, ControlType};
pub use self::core::{Anchor, ControlState, DraggableMode, Orientation, OverflowMode};
pub use panel::PanelData;
pub use slider::SliderData;
