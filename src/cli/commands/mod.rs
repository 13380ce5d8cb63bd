pub mod config;
pub mod run;
pub mod store;

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError, Paths};

/// Loads the config file and applies command-line overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
) -> Result<Config, ConfigError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Paths::config_file);
    let mut config = Config::load_or_default(&path)?;
    if data_dir.is_some() {
        config.store.data_dir = data_dir;
    }
    Ok(config)
}
