use std::fs;

use tracing::{error, info, warn};

use crate::config::StoreConfig;
use crate::state::{FlyState, LoadError, SaveError, StateStore, StoreFile};

use super::{CommandSender, Player, Trigger};

pub const MSG_NOT_A_PLAYER: &str = "This command can only be executed by a player.";
pub const MSG_INVALID_ARGS: &str = "Invalid number of arguments.";
pub const MSG_FLY_ENABLED: &str = "Flying has been enabled.";
pub const MSG_FLY_DISABLED: &str = "Flying has been disabled.";

/// Result of dispatching a command trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The store was updated and the player's capability changed.
    Applied { player_state: FlyState },
    /// Sender was not an interactive player; nothing changed.
    NotAPlayer,
    /// Arguments were supplied; nothing changed. The host should show usage.
    InvalidArguments,
}

impl CommandOutcome {
    /// Whether the host should treat the command as handled.
    pub fn handled(self) -> bool {
        !matches!(self, Self::InvalidArguments)
    }
}

/// Owns the store for the lifetime of one enable/disable cycle.
#[derive(Debug)]
pub struct FlyPlugin {
    store: StateStore,
    file: StoreFile,
}

impl FlyPlugin {
    /// Loads the store. On error the host must keep the feature disabled.
    pub fn enable(config: &StoreConfig) -> Result<Self, LoadError> {
        let data_dir = config.resolved_data_dir();
        if let Err(err) = fs::create_dir_all(&data_dir) {
            warn!(path = %data_dir.display(), error = %err, "Failed to create data directory");
        }

        let file = config.store_file();
        let store = match file.load() {
            Ok(store) => store,
            Err(err) => {
                error!(error = %err, "Unable to load plugin data.");
                return Err(err);
            }
        };

        info!(path = %file.path().display(), players = store.len(), "Fly plugin enabled.");
        Ok(Self { store, file })
    }

    pub fn with_store(store: StateStore, file: StoreFile) -> Self {
        Self { store, file }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn store_file(&self) -> &StoreFile {
        &self.file
    }

    /// Flushes the store. A failure is logged and returned, never retried.
    pub fn disable(self) -> Result<(), SaveError> {
        let result = self.file.save(&self.store);
        if let Err(err) = &result {
            error!(error = %err, "Unable to save plugin data.");
        }
        info!("Fly plugin disabled.");
        result
    }

    pub fn on_command(
        &mut self,
        sender: &mut dyn CommandSender,
        trigger: Trigger,
        args: &[&str],
    ) -> CommandOutcome {
        let player = match sender.as_player() {
            Some(player) => player,
            None => {
                sender.send_message(MSG_NOT_A_PLAYER);
                return CommandOutcome::NotAPlayer;
            }
        };

        if !args.is_empty() {
            player.send_message(MSG_INVALID_ARGS);
            return CommandOutcome::InvalidArguments;
        }

        let state = trigger.target_state();
        self.store.set(player.name(), state);
        player.set_allow_flight(state.allows_flight());
        player.send_message(match state {
            FlyState::Enabled => MSG_FLY_ENABLED,
            FlyState::Disabled => MSG_FLY_DISABLED,
        });

        info!(player = %player.name(), command = %trigger, state = %state, "Fly command applied");
        CommandOutcome::Applied {
            player_state: state,
        }
    }

    /// Applies the stored state to a joining player. Unknown players cannot fly.
    pub fn on_player_join(&self, player: &mut dyn Player) -> FlyState {
        let state = self.store.get(player.name());
        player.set_allow_flight(state.allows_flight());
        state
    }
}
