// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Layers, lowest first: built-in defaults, the config file, then
//! `FLIGHT_BASAR_*` environment variables. Command-line flags are applied on
//! top by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `FLIGHT_BASAR_BASE_URL`
pub const ENV_PREFIX: &str = "FLIGHT_BASAR";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Delay before destination panels reload, in milliseconds
    pub debounce_ms: u64,
    /// Fallback city for the sights lookup
    pub default_city: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 10,
            debounce_ms: 150,
            default_city: crate::session::DEFAULT_CITY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Panel reload delay
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Default config file location (`<config dir>/flight-basar/config.toml`)
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "hyperpolymath", "flight-basar")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration
///
/// An explicit `path` must exist; the default location is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let defaults = Config::default();
    let mut builder = config::Config::builder()
        .set_default("base_url", defaults.base_url)?
        .set_default("timeout_secs", defaults.timeout_secs)?
        .set_default("debounce_ms", defaults.debounce_ms)?
        .set_default("default_city", defaults.default_city)?
        .set_default("log_level", defaults.log_level)?;

    match path {
        Some(p) => {
            builder = builder.add_source(config::File::from(p.to_path_buf()).required(true));
        }
        None => {
            if let Some(p) = default_path() {
                builder = builder.add_source(config::File::from(p).required(false));
            }
        }
    }

    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

    let settings = builder.build().with_context(|| match path {
        Some(p) => format!("Failed to load configuration from {}", p.display()),
        None => "Failed to load configuration".to_string(),
    })?;

    settings
        .try_deserialize()
        .context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.default_city, "Zürich");
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "base_url = \"http://flights.example:8080\"\ndebounce_ms = 300\n",
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();

        assert_eq!(config.base_url, "http://flights.example:8080");
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn test_config_serializes_to_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("base_url = \"http://127.0.0.1:5000\""));
        assert!(text.contains("debounce_ms = 150"));
    }
}
