//! UI System Module
//!
//! Retained-mode control tree with anchored layout, per-state styling and
//! pointer interaction, kept independent of the host renderer.
//!
//! Architecture:
//! - `UiSystem`: context owning the tree, the theme and the input snapshots
//! - `tree/`: arena of controls with the state, layout, draw, update and
//!   interaction passes
//! - `widgets/`: the control node and the built-in kinds (panel, slider,
//!   progress bar)
//! - `style/`: stylesheets, default stylesheet registry, system stylesheet
//! - `theme`: loading a theme folder
//! - `owner`: per-owner root panels
//! - `backend`: the renderer seam

pub mod backend;
pub mod manager;
pub mod measure;
pub mod owner;
pub mod style;
pub mod theme;
pub mod tree;
pub mod widgets;

pub use backend::Renderer;
pub use manager::{ThemeChangedCallback, UiSystem};
pub use measure::{MeasureUnit, MeasureVector, Measurement};
pub use owner::HasGui;
pub use style::{
    CursorProperties, DefaultStyleKey, DefaultStylesheets, StyleProperty, StyleSheet, StyleSheetState,
    SystemStyleSheet,
};
pub use theme::{Theme, ThemeError};
pub use tree::{ControlTree, DrawResult, PostDrawAction, TreeError};

// Re-export widgets
pub use widgets::{
    Anchor, Control, ControlBehavior, ControlFrame, ControlKind, ControlState, ControlType, DraggableMode,
    Orientation, OverflowMode, PanelData, SliderData,
};
