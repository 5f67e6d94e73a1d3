//! Error types for zwidget_app

use thiserror::Error;
use zwidget_platform::PlatformError;
use zwidget_render::RenderError;

/// Errors that can occur in a zwidget application
#[derive(Error, Debug)]
pub enum AppError {
    /// Platform error (windowing, notification source)
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Rendering failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to install the log subscriber
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type for zwidget_app operations
pub type Result<T> = std::result::Result<T, AppError>;
