//! Theme loading
//!
//! A theme is a folder holding a `system_style.ron` (or `.toml`) plus the
//! default stylesheet files it lists under `load_default_stylesheets`. Paths
//! in that table are relative to the theme folder.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::ui::style::{DefaultStyleKey, DefaultStylesheets, StyleSheet, SystemStyleSheet, UnknownStyleKey};

/// File names tried for the system stylesheet, in order
pub const SYSTEM_STYLE_FILES: [&str; 2] = ["system_style.ron", "system_style.toml"];

/// Theme loading errors
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The theme folder is missing or holds no system stylesheet
    #[error("no system stylesheet found in theme folder {}", .0.display())]
    MissingSystemStyle(PathBuf),

    /// The system stylesheet could not be read or parsed
    #[error("failed to read or deserialize system stylesheet {}: {source}", path.display())]
    SystemStyle {
        /// File that failed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: ConfigError,
    },

    /// The theme lists a key with no default stylesheet slot
    #[error("error loading default stylesheets: {0}")]
    UnknownKey(#[from] UnknownStyleKey),

    /// A listed stylesheet file does not exist
    #[error("error loading stylesheet for control style id '{key}': stylesheet file '{}' not found", path.display())]
    MissingStylesheet {
        /// Control-style key
        key: DefaultStyleKey,
        /// Resolved file path
        path: PathBuf,
    },

    /// A listed stylesheet file could not be parsed
    #[error("error loading stylesheet for control style id '{key}' from {}: {source}", path.display())]
    Stylesheet {
        /// Control-style key
        key: DefaultStyleKey,
        /// Resolved file path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: ConfigError,
    },

    /// Listing the theme base folder failed
    #[error("failed to list themes in {}: {source}", path.display())]
    ListThemes {
        /// Base folder
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

/// A fully loaded theme
#[derive(Debug, Clone)]
pub struct Theme {
    /// Folder name of the theme
    pub name: String,
    /// Folder the theme was loaded from
    pub folder: PathBuf,
    /// Theme-wide settings
    pub system: SystemStyleSheet,
    /// Default stylesheets per control-style key
    pub stylesheets: DefaultStylesheets,
}

impl Theme {
    /// Load the theme stored in `folder`
    ///
    /// Nothing is returned unless every listed stylesheet loaded.
    pub fn load(folder: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let folder = folder.as_ref();
        let system_path = SYSTEM_STYLE_FILES
            .iter()
            .map(|file| folder.join(file))
            .find(|path| path.is_file())
            .ok_or_else(|| ThemeError::MissingSystemStyle(folder.to_path_buf()))?;

        log::info!("Loading UI theme from {}", system_path.display());
        let system = SystemStyleSheet::load_from_file(&system_path).map_err(|source| ThemeError::SystemStyle {
            path: system_path.clone(),
            source,
        })?;
        let stylesheets = load_default_stylesheets(&system, folder)?;

        let name = folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::info!("Theme '{}' loaded with {} default stylesheets", name, stylesheets.len());

        Ok(Self {
            name,
            folder: folder.to_path_buf(),
            system,
            stylesheets,
        })
    }
}

/// Load every stylesheet listed by `system`, resolving paths against `folder`
pub fn load_default_stylesheets(system: &SystemStyleSheet, folder: &Path) -> Result<DefaultStylesheets, ThemeError> {
    let mut stylesheets = DefaultStylesheets::new();
    for (name, relative) in &system.load_default_stylesheets {
        let key: DefaultStyleKey = name.parse()?;
        let path = folder.join(relative);
        let sheet = StyleSheet::load_from_file(&path).map_err(|source| {
            if source.is_not_found() {
                ThemeError::MissingStylesheet { key, path: path.clone() }
            } else {
                ThemeError::Stylesheet {
                    key,
                    path: path.clone(),
                    source,
                }
            }
        })?;
        log::debug!("Loaded default stylesheet '{}' from {}", key, path.display());
        stylesheets.insert(key, sheet);
    }
    Ok(stylesheets)
}

/// Names of the theme folders under `base`, sorted
pub fn theme_folders(base: impl AsRef<Path>) -> Result<Vec<String>, ThemeError> {
    let base = base.as_ref();
    let entries = std::fs::read_dir(base).map_err(|source| ThemeError::ListThemes {
        path: base.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}
