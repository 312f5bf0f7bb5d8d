//! Configuration management for `nbsync.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                        |
//! |-----------|------------------------------------------------|
//! | `[watch]` | Polling period, suppression window, on/off     |
//!
//! A missing config file yields defaults; unknown keys produce a warning
//! line rather than an error; out-of-range values are clamped with a hint.

pub mod watch;

pub use watch::WatchConfig;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Root configuration structure representing nbsync.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    pub watch: WatchConfig,
}

impl Config {
    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self {
                config_path: path.to_path_buf(),
                ..Self::default()
            });
        }

        let raw =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::parse(&raw, &path.display().to_string())?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Parse a config document, warning about unknown keys and clamping
    /// out-of-range values.
    fn parse(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let de = toml::Deserializer::new(raw);
        let mut unknown = Vec::new();
        let mut config: Config =
            serde_ignored::deserialize(de, |key| unknown.push(key.to_string()))?;

        for key in &unknown {
            crate::log!("config"; "unknown key `{}` in {}", key, origin);
        }

        config.watch.clamp_with_hints();
        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
