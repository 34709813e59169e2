//! Theme-wide settings loaded from `system_style.ron` / `system_style.toml`

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{Color, Point, Rect};

/// A cursor sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorProperties {
    /// Renderer texture identifier
    pub texture_id: String,
    /// Source region inside the texture
    pub source_rect: Rect,
    /// Hot-spot offset applied before scaling
    #[serde(default = "Point::zeros")]
    pub offset: Point,
    /// Per-cursor scale
    #[serde(default = "unit_scale")]
    pub scale: f32,
    /// Tint colour
    #[serde(default)]
    pub fill_color: Color,
}

const fn unit_scale() -> f32 {
    1.0
}

/// Theme-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStyleSheet {
    /// Optional human-readable theme name
    pub theme_identifier: Option<String>,
    /// Seconds a pressed control keeps reporting `Interacted`
    pub time_to_lock_interactive_state: f32,
    /// Global text scale
    pub text_scale: f32,
    /// Global cursor scale
    pub cursor_scale: f32,
    /// Cursor shown by default
    pub cursor_default: Option<CursorProperties>,
    /// Cursor over interactable controls
    pub cursor_interactable: Option<CursorProperties>,
    /// Cursor over disabled controls
    pub cursor_disabled: Option<CursorProperties>,
    /// Cursor over locked controls
    pub cursor_locked: Option<CursorProperties>,
    /// Default stylesheet files, keyed by control-style key, relative to the theme folder
    pub load_default_stylesheets: BTreeMap<String, PathBuf>,
}

impl Default for SystemStyleSheet {
    fn default() -> Self {
        Self {
            theme_identifier: None,
            time_to_lock_interactive_state: 0.1,
            text_scale: 1.0,
            cursor_scale: 1.0,
            cursor_default: None,
            cursor_interactable: None,
            cursor_disabled: None,
            cursor_locked: None,
            load_default_stylesheets: BTreeMap::new(),
        }
    }
}

impl Config for SystemStyleSheet {}
