//! # Error Types
//!
//! Custom error types for Gamepad Viewer using `thiserror`.
//!
//! The conversion core never fails; these errors only come from the outer
//! surfaces (configuration, device access, state output).

use thiserror::Error;

/// Main error type for Gamepad Viewer
#[derive(Debug, Error)]
pub enum GamepadViewerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Controller access errors
    #[error("Controller error: {0}")]
    Controller(String),

    /// No gamepad found while scanning input devices
    #[error("No gamepad found")]
    ControllerNotFound,
}

/// Result type alias for Gamepad Viewer
pub type Result<T> = std::result::Result<T, GamepadViewerError>;
