use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::state::{DEFAULT_STORE_NAME, StoreFile};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Root configuration for flystate.
///
/// Example:
/// ```toml
/// [store]
/// name = "playerFlyState"
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Store file configuration section.
    /// Example: [store]
    pub store: StoreConfig,
    /// Logging configuration section.
    /// Example: [logging]
    pub logging: LoggingConfig,
}

/// Where the fly state snapshot lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Store name; the file is `<data_dir>/<name>.bin`.
    /// Example: name = "playerFlyState"
    pub name: String,
    /// Data directory (platform default if not set).
    /// Example: data_dir = "/srv/minecraft/plugins/XFly"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Paths::data_dir)
    }

    pub fn store_file(&self) -> StoreFile {
        StoreFile::in_dir(&self.resolved_data_dir(), &self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    /// Example: level = "info"
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    /// Example: json = false
    pub json: bool,
    /// Optional log file; stderr is used when unset.
    /// Example: file = "/var/log/flystate.log"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(path, &contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn from_toml(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
