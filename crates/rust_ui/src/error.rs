//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::ui::theme::ThemeError;
use crate::ui::TreeError;

/// Any failure surfaced by the toolkit outside the frame loop
#[derive(Debug, Error)]
pub enum UiError {
    /// Structural misuse of the control tree
    #[error("control tree error: {0}")]
    Tree(#[from] TreeError),

    /// Theme loading failed
    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),

    /// Settings file failed to load or save
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias for toolkit operations
pub type UiResult<T> = Result<T, UiError>;
