//! Host adapter: maps game-server triggers onto the fly state store.
//!
//! The host owns command dispatch and player entities. It reaches the store
//! only through [`FlyPlugin`], and the plugin reaches back only through the
//! [`CommandSender`] and [`Player`] traits.

pub mod plugin;
pub mod script;

use std::fmt;
use std::str::FromStr;

use crate::state::FlyState;

pub use plugin::{CommandOutcome, FlyPlugin};
pub use script::{ScriptEvent, ScriptHost, ScriptParseError, parse_line};

/// Anything that can issue a command.
pub trait CommandSender {
    fn send_message(&mut self, message: &str);

    /// Returns the interactive player behind this sender, if any.
    fn as_player(&mut self) -> Option<&mut dyn Player> {
        None
    }
}

/// An interactive subject whose flight capability the plugin controls.
pub trait Player: CommandSender {
    fn name(&self) -> &str;

    fn set_allow_flight(&mut self, allow: bool);
}

/// Named command triggers handled by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Fly,
    FlyStop,
}

static TRIGGERS: [(&str, Trigger); 2] = [("fly", Trigger::Fly), ("fly-stop", Trigger::FlyStop)];

impl Trigger {
    pub fn all() -> impl Iterator<Item = Trigger> {
        TRIGGERS.iter().map(|(_, trigger)| *trigger)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fly => "fly",
            Self::FlyStop => "fly-stop",
        }
    }

    /// State written to the store when this trigger succeeds.
    pub fn target_state(self) -> FlyState {
        match self {
            Self::Fly => FlyState::Enabled,
            Self::FlyStop => FlyState::Disabled,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown command: {0}")]
pub struct UnknownTrigger(pub String);

impl FromStr for Trigger {
    type Err = UnknownTrigger;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let label = input.trim().trim_start_matches('/');
        TRIGGERS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(_, trigger)| *trigger)
            .ok_or_else(|| UnknownTrigger(input.to_string()))
    }
}
