//! # Rust UI
//!
//! A retained-mode GUI toolkit core for games: a tree of controls laid out
//! every frame from anchors, offsets and sizes, styled per interaction state,
//! and driven by a single mouse pointer.
//!
//! ## Features
//!
//! - **Anchored layout**: nine fixed anchors plus auto-flow and inline rows
//! - **State machine**: targeted, pressed, checked, disabled and locked states
//!   with anti-flicker press locking and style interpolation
//! - **Interaction**: hit testing with topmost layers, focus locking, dragging
//!   with confinement, wheel scrolling
//! - **Panels and scrollbars**: overflow clipping and scrolled content
//! - **Themes**: RON / TOML stylesheets loaded from theme folders
//! - **Backend agnostic**: drawing goes through the [`ui::Renderer`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_ui::prelude::*;
//!
//! fn run(renderer: &mut dyn Renderer, input: &mut dyn InputProvider) -> Result<(), UiError> {
//!     let mut ui = UiSystem::init(UiConfig::default())?;
//!     let root = ui.root();
//!     let panel = ui.create_panel(root)?;
//!     ui.tree_mut()[panel].anchor = Anchor::Center;
//!
//!     loop {
//!         ui.update(1.0 / 60.0, renderer, input);
//!         ui.draw(renderer);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod error;
pub mod events;
pub mod foundation;
pub mod input;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{UiError, UiResult};

/// Common imports for toolkit users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, UiConfig},
        error::{UiError, UiResult},
        events::{ControlEvent, ControlEvents},
        foundation::{
            collections::ControlId,
            math::{Color, Point, Rect, Sides},
        },
        input::{CurrentInputState, InputProvider, InputState, MouseButton, MouseButtons},
        ui::{
            Anchor, Control, ControlBehavior, ControlKind, ControlState, ControlTree, DefaultStyleKey,
            DraggableMode, HasGui, MeasureVector, Orientation, OverflowMode, Renderer, StyleSheet, Theme,
            ThemeError, TreeError, UiSystem,
        },
    };
}
