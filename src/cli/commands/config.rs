use std::fs;
use std::path::Path;

use crate::config::{Config, validate_config};

pub fn handle_init(config_path: &Path, force: bool) -> anyhow::Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}; use --force to overwrite",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(config_path, generate_default_config_toml())?;

    println!("Config created at {}", config_path.display());
    Ok(())
}

pub fn handle_show(config: &Config) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub fn handle_validate(config: &Config) -> anyhow::Result<()> {
    let result = validate_config(config);

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.field, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.field, error.message);
        if let Some(suggestion) = &error.suggestion {
            println!("  hint: {suggestion}");
        }
    }

    if !result.is_valid() {
        anyhow::bail!("Configuration has {} error(s)", result.errors.len());
    }
    println!("Configuration is valid");
    Ok(())
}

fn generate_default_config_toml() -> String {
    r#"# flystate configuration file

# Fly state store
[store]
# Store name; the snapshot is written to <data_dir>/<name>.bin
name = "playerFlyState"
# Optional: data directory (platform default if not set)
# data_dir = "/srv/minecraft/plugins/XFly"

# Logging
[logging]
# Log level: trace, debug, info, warn, error
level = "info"
# Emit JSON lines
json = false
# Optional: log to file instead of stderr
# file = "/var/log/flystate.log"
"#
    .to_string()
}
