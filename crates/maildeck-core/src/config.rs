//! Configuration management for maildeck.
//!
//! Loads configuration from ${MAILDECK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Status bar configuration subset.
///
/// Widgets hold a reference to this subset rather than the whole config, so
/// the keys a widget reads are visible in its signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Template for the status bar line.
    pub status_format: String,
    /// Template for the terminal title when terminal status is enabled.
    pub ts_status_format: String,
    /// Template for the terminal icon name when terminal status is enabled.
    pub ts_icon_format: String,
    /// Whether to mirror the status line into the terminal title/icon.
    pub ts_enabled: bool,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            status_format: "-%r %f [Msgs:%m, New:%n]".to_string(),
            ts_status_format: "maildeck %f".to_string(),
            ts_icon_format: "M".to_string(),
            ts_enabled: false,
        }
    }
}

impl StatusConfig {
    /// Looks up a string option by key.
    ///
    /// Returns `None` for unknown keys or keys that are not strings.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match key {
            "status_format" => Some(&self.status_format),
            "ts_status_format" => Some(&self.ts_status_format),
            "ts_icon_format" => Some(&self.ts_icon_format),
            _ => None,
        }
    }

    /// Looks up a boolean option by key.
    ///
    /// Returns `None` for unknown keys or keys that are not booleans.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            "ts_enabled" => Some(self.ts_enabled),
            _ => None,
        }
    }
}

/// Top-level maildeck configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Status bar options.
    pub status: StatusConfig,
}

impl Config {
    /// Loads configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

pub mod paths {
    //! Path resolution for maildeck configuration directories.
    //!
    //! MAILDECK_HOME resolution order:
    //! 1. MAILDECK_HOME environment variable (if set)
    //! 2. ~/.config/maildeck (default)

    use std::path::PathBuf;

    /// Returns the maildeck home directory.
    ///
    /// Checks MAILDECK_HOME env var first, falls back to ~/.config/maildeck
    pub fn maildeck_home() -> PathBuf {
        if let Ok(home) = std::env::var("MAILDECK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("maildeck"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        maildeck_home().join("config.toml")
    }
}
