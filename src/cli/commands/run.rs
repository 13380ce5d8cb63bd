use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::config::StoreConfig;
use crate::host::{FlyPlugin, ScriptHost};

/// Enables the plugin, replays host events, then disables it.
///
/// A failed save on disable is logged but does not fail the run.
pub fn handle_run(config: &StoreConfig, script: Option<&Path>) -> anyhow::Result<()> {
    let mut plugin = FlyPlugin::enable(config).context("Fly plugin could not be enabled")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let errors = {
        let mut host = ScriptHost::new(&mut plugin);
        match script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script {}", path.display()))?;
                host.run(BufReader::new(file), &mut out)?;
            }
            None => host.run(io::stdin().lock(), &mut out)?,
        }
        host.errors()
    };

    info!(errors, "Script finished");
    if plugin.disable().is_err() {
        eprintln!("Warning: fly state was not saved; see log for details");
    }
    Ok(())
}
