use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default on-disk store name, without extension.
pub const DEFAULT_STORE_NAME: &str = "playerFlyState";

/// Extension used for store snapshot files.
pub const STORE_EXTENSION: &str = "bin";

/// Per-player flight state.
///
/// Kept as a closed enum rather than a bool so new variants can be added
/// without changing the shape of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlyState {
    Disabled,
    Enabled,
}

impl FlyState {
    /// Whether the host should allow the player to fly.
    pub fn allows_flight(self) -> bool {
        matches!(self, Self::Enabled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
        }
    }
}

impl Default for FlyState {
    fn default() -> Self {
        Self::Disabled
    }
}

impl fmt::Display for FlyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown fly state: {0}")]
pub struct ParseFlyStateError(String);

impl FromStr for FlyState {
    type Err = ParseFlyStateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "enabled" | "on" => Ok(Self::Enabled),
            "disabled" | "off" => Ok(Self::Disabled),
            other => Err(ParseFlyStateError(other.to_string())),
        }
    }
}

/// A single stored entry, as exposed for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    pub id: String,
    pub state: FlyState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        assert_eq!(FlyState::default(), FlyState::Disabled);
        assert!(!FlyState::default().allows_flight());
    }

    #[test]
    fn test_parse_accepts_aliases() {
        assert_eq!("enabled".parse::<FlyState>().unwrap(), FlyState::Enabled);
        assert_eq!(" ON ".parse::<FlyState>().unwrap(), FlyState::Enabled);
        assert_eq!("off".parse::<FlyState>().unwrap(), FlyState::Disabled);
        assert!("maybe".parse::<FlyState>().is_err());
    }

    #[test]
    fn test_record_json_uses_snake_case_state() {
        let record = FlagRecord {
            id: "alice".to_string(),
            state: FlyState::Enabled,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"alice","state":"enabled"}"#);
    }
}
