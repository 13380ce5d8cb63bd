use std::path::Path;

use clap::Parser;
use tracing::{Level, warn};

use flystate::cli::commands::{config, resolve_config, run, store};
use flystate::cli::{Cli, Commands, ConfigAction};
use flystate::config::{Config, Paths};
use flystate::state::FlyState;
use flystate::telemetry::{TracingConfig, init_tracing};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Paths::config_file);

    // Init must work even when the existing file does not parse.
    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = cli.command
    {
        return config::handle_init(&config_path, force);
    }

    let settings = resolve_config(Some(config_path.as_path()), cli.data_dir.clone())?;
    let mut tracing_config = TracingConfig::from_logging(&settings.logging, cli.debug);
    // Config subcommands report on the log target instead of opening it.
    if matches!(cli.command, Commands::Config { .. }) {
        tracing_config.log_file = None;
    }
    let _tracing = init_tracing(&tracing_config)?;
    if !cli.debug && settings.logging.level.parse::<Level>().is_err() {
        warn!(level = %settings.logging.level, "Unknown log level, using info");
    }

    dispatch(cli.command, &settings, &config_path)
}

fn dispatch(command: Commands, settings: &Config, config_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Grant { player } => {
            store::handle_set(&settings.store, &player, FlyState::Enabled)
        }
        Commands::Revoke { player } => {
            store::handle_set(&settings.store, &player, FlyState::Disabled)
        }
        Commands::Show { player } => store::handle_show(&settings.store, &player),
        Commands::List { json } => store::handle_list(&settings.store, json),
        Commands::Reset { player } => store::handle_reset(&settings.store, &player),
        Commands::Run { script } => run::handle_run(&settings.store, script.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => config::handle_init(config_path, force),
            ConfigAction::Show => config::handle_show(settings),
            ConfigAction::Validate => config::handle_validate(settings),
        },
    }
}
