//! CLI commands module for flystate.

pub mod app;
pub mod commands;

pub use app::{Cli, Commands, ConfigAction};
