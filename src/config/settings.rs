//! Application settings loaded from `stockroom.toml`.
//!
//! The settings file is optional; every field has a default, and the
//! `DATABASE_URL` environment variable (usually via `.env`) overrides the
//! file for the database location.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Database URL used when neither the environment nor the settings file
/// provides one.
const DEFAULT_DATABASE_URL: &str = "sqlite://stockroom.sqlite?mode=rwc";

/// Configuration structure representing the `stockroom.toml` file
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Database URL; overridden by the `DATABASE_URL` environment variable
    pub database_url: Option<String>,
    /// How many transactions the history view shows
    pub history_limit: Option<usize>,
}

impl Settings {
    /// History length shown by the console adapter, defaulting to 20.
    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit.unwrap_or(20)
    }

    /// Resolves the database URL: environment first, then the settings
    /// file, then the built-in default.
    #[must_use]
    pub fn resolve_database_url(&self) -> String {
        std::env::var("DATABASE_URL")
            .ok()
            .or_else(|| self.database_url.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }
}

/// Loads settings from a TOML file, or the defaults when the file does not
/// exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("failed to parse {}: {e}", path.display()),
    })
}

/// Loads settings from the default location (`./stockroom.toml`).
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_settings() -> Result<Settings> {
    load_settings("stockroom.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            database_url = "sqlite://tmp/test.sqlite?mode=rwc"
            history_limit = 50
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(
            settings.database_url.as_deref(),
            Some("sqlite://tmp/test.sqlite?mode=rwc")
        );
        assert_eq!(settings.history_limit(), 50);
    }

    #[test]
    fn test_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.database_url.is_none());
        assert_eq!(settings.history_limit(), 20);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = load_settings("does-not-exist.toml").unwrap();
        assert!(settings.database_url.is_none());
    }
}
