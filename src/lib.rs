pub mod cli;
pub mod config;
pub mod host;
pub mod state;
pub mod telemetry;

#[cfg(test)]
mod test_utils;
