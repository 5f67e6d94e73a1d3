//! Application configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! name = "inspector"
//! log_filter = "zwidget_platform=trace,info"
//! event_mode = "poll"
//!
//! [window]
//! title = "Inspector"
//! width = 1024
//! ```

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use zwidget_platform::WindowConfig;

/// How the run loop pulls events
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    /// Block until the platform has something
    #[default]
    Wait,
    /// Never block; spin between events
    Poll,
}

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application name, used in log output
    pub name: String,
    /// Default log filter when `RUST_LOG` is not set
    pub log_filter: String,
    pub event_mode: EventMode,
    /// Configuration for the main window
    pub window: WindowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "zwidget".to_string(),
            log_filter: "info".to_string(),
            event_mode: EventMode::Wait,
            window: WindowConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), name = %config.name, "configuration loaded");
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| AppError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = AppConfig::from_toml_str(
            r#"
            name = "inspector"
            event_mode = "poll"

            [window]
            title = "Inspector"
            width = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "inspector");
        assert_eq!(config.event_mode, EventMode::Poll);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.window.title, "Inspector");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn test_invalid_document_is_a_config_error() {
        let err = AppConfig::from_toml_str("event_mode = \"sometimes\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = AppConfig::load("/nonexistent/zwidget.toml").unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let config = AppConfig {
            name: "demo".into(),
            event_mode: EventMode::Poll,
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}
