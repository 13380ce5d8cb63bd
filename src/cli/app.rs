use std::path::PathBuf;

use clap::Parser;

/// Durable per-player flight permission store
#[derive(Parser, Debug)]
#[command(name = "flystate", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path (platform default if not set)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Data directory holding the store file (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Allow a player to fly
    Grant {
        /// Player name (case-sensitive)
        player: String,
    },
    /// Stop a player from flying
    Revoke {
        /// Player name (case-sensitive)
        player: String,
    },
    /// Show a player's fly state
    Show {
        /// Player name (case-sensitive)
        player: String,
    },
    /// List all stored fly states
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget a player's stored state
    Reset {
        /// Player name (case-sensitive)
        player: String,
    },
    /// Run the plugin against a script of host events
    Run {
        /// Event script (reads stdin if not set)
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show current configuration
    Show,
    /// Validate configuration
    Validate,
}
