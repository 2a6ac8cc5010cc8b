//! TOML configuration: where the reference list lives, the prefix, and the
//! default roll parameters.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::request::RollRequest;
use crate::roller::DEFAULT_PREFIX;

/// File name of the bundled reference resource.
pub const DEFAULT_REFERENCE: &str = "danbooru_art_001.csv";

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Roller configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollerConfig {
    /// Path to the reference resource.
    pub reference: PathBuf,
    /// Prefix applied to names when a request enables it.
    pub prefix: String,
    /// Default parameters for rolls.
    pub defaults: RollRequest,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            reference: PathBuf::from(DEFAULT_REFERENCE),
            prefix: DEFAULT_PREFIX.to_string(),
            defaults: RollRequest::default(),
        }
    }
}

impl RollerConfig {
    /// Load from a TOML file. A relative `reference` path is resolved
    /// against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        if config.reference.is_relative() {
            if let Some(dir) = path.parent() {
                config.reference = dir.join(&config.reference);
            }
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
