use std::env;
use std::path::PathBuf;

/// Platform-specific path resolution for flystate.
pub struct Paths;

impl Paths {
    /// Returns the configuration directory path.
    /// - Linux: ~/.config/flystate/
    /// - macOS: ~/Library/Application Support/flystate/
    /// - Override: FLYSTATE_CONFIG env var (directory derived from file path)
    pub fn config_dir() -> PathBuf {
        if let Ok(path) = env::var("FLYSTATE_CONFIG") {
            let path = PathBuf::from(path);
            return path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("flystate")
    }

    /// Returns the full config file path.
    pub fn config_file() -> PathBuf {
        if let Ok(path) = env::var("FLYSTATE_CONFIG") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Returns the data directory holding store files.
    /// - Linux: ~/.local/share/flystate/
    /// - macOS: ~/Library/Application Support/flystate/
    /// - Override: FLYSTATE_DATA env var
    pub fn data_dir() -> PathBuf {
        if let Ok(path) = env::var("FLYSTATE_DATA") {
            return PathBuf::from(path);
        }

        dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join("flystate")
    }
}
