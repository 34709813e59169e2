//! UI system settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Config;

/// Settings for a [`crate::ui::UiSystem`]
///
/// # Example
///
/// ```toml
/// theme_base_folder = "assets/themes"
/// theme_name = "default"
/// show_cursor = true
/// debug_draw = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Folder holding one sub-folder per theme
    pub theme_base_folder: PathBuf,
    /// Theme sub-folder to load
    pub theme_name: String,
    /// Render the cursor in [`crate::ui::UiSystem::draw_cursor`]
    pub show_cursor: bool,
    /// Draw the debug overlay after the tree
    pub debug_draw: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_base_folder: PathBuf::from("assets/themes"),
            theme_name: "default".to_string(),
            show_cursor: true,
            debug_draw: false,
        }
    }
}

impl Config for UiConfig {}

impl UiConfig {
    /// Set the theme base folder
    #[must_use]
    pub fn with_theme_base_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.theme_base_folder = folder.into();
        self
    }

    /// Set the theme name
    #[must_use]
    pub fn with_theme_name(mut self, name: impl Into<String>) -> Self {
        self.theme_name = name.into();
        self
    }

    /// Enable or disable the debug overlay
    #[must_use]
    pub const fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug_draw = enabled;
        self
    }

    /// Folder of the configured theme
    pub fn active_theme_folder(&self) -> PathBuf {
        self.theme_base_folder.join(&self.theme_name)
    }
}
