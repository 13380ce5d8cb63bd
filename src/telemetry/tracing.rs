use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub level: Level,
    pub log_file: Option<PathBuf>,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_file: None,
            json_format: false,
        }
    }
}

impl TracingConfig {
    /// Builds from the `[logging]` section; `debug` forces DEBUG level.
    pub fn from_logging(logging: &LoggingConfig, debug: bool) -> Self {
        let level = if debug {
            Level::DEBUG
        } else {
            Level::from_str(&logging.level).unwrap_or(Level::INFO)
        };
        Self {
            level,
            log_file: logging.file.clone(),
            json_format: logging.json,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Failed to open log file {path}: {source}")]
    LogFileOpen { path: PathBuf, source: io::Error },
}

#[derive(Debug)]
pub struct TracingGuard {
    _default_guard: tracing::subscriber::DefaultGuard,
    file: Option<Arc<Mutex<File>>>,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            if let Ok(mut handle) = file.lock() {
                let _ = handle.flush();
            }
        }
    }
}

struct FileWriter {
    file: Arc<Mutex<File>>,
}

impl io::Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file mutex poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file mutex poisoned"))?;
        guard.flush()
    }
}

#[derive(Clone)]
struct FileMakeWriter {
    file: Arc<Mutex<File>>,
}

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

pub fn init_tracing(config: &TracingConfig) -> Result<TracingGuard, TracingError> {
    let env_filter = resolve_env_filter(config);

    let file = match &config.log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| TracingError::LogFileOpen {
                    path: path.clone(),
                    source,
                })?;
            Some(Arc::new(Mutex::new(file)))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let default_guard = match (file.as_ref(), config.json_format) {
        (Some(file_ref), true) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(FileMakeWriter {
                    file: Arc::clone(file_ref),
                })
                .with_target(true)
                .with_level(true);
            registry.with(layer).set_default()
        }
        (Some(file_ref), false) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(FileMakeWriter {
                    file: Arc::clone(file_ref),
                })
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            registry.with(layer).set_default()
        }
        (None, true) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true);
            registry.with(layer).set_default()
        }
        (None, false) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true);
            registry.with(layer).set_default()
        }
    };

    Ok(TracingGuard {
        _default_guard: default_guard,
        file,
    })
}

fn resolve_env_filter(config: &TracingConfig) -> EnvFilter {
    if config.level == Level::DEBUG {
        EnvFilter::new(Level::DEBUG.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()))
    }
}
