use crate::check::{DEFAULT_RUNTIME_NAME, MIN_DOCKER_VERSION};
use crate::version::VersionTriplet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config error: failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("config error: HOME not set")]
    NoHome,
}

/// Release configuration for the preflight check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreflightConfig {
    #[serde(default = "default_minimum")]
    pub minimum_version: VersionTriplet,
    #[serde(default = "default_runtime_name")]
    pub runtime_name: String,
}

fn default_minimum() -> VersionTriplet {
    MIN_DOCKER_VERSION
}

fn default_runtime_name() -> String {
    DEFAULT_RUNTIME_NAME.to_owned()
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            minimum_version: default_minimum(),
            runtime_name: default_runtime_name(),
        }
    }
}

impl PreflightConfig {
    /// Load config from `~/.config/dockgate/preflight.toml`, falling back to
    /// defaults when the file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path()?;
        Self::load_or_default(&path)
    }

    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(".config/dockgate/preflight.toml"))
}
