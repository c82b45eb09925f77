//! Logging setup
//!
//! Console output goes through a compact or JSON `fmt` layer. Alongside it,
//! each of `error.log`, `warn.log`, `info.log` and `debug.log` in the log
//! directory receives exactly the events of its own level. Files are
//! appended to and never rotated.

use std::io;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::observability::LoggingConfig;

mod logging;

pub use logging::LEVEL_FILES;

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create the log directory.
    #[error("failed to create log directory: {0}")]
    Io(#[from] io::Error),

    /// Failed to open a log file.
    #[error("failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the background file writers alive; dropping it flushes them.
#[derive(Debug)]
#[must_use = "log files stop receiving events once the guards are dropped"]
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns a [`LoggingError`] if the log files cannot be opened or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<LogGuards, LoggingError> {
    let mut layers = vec![logging::console_layer(config.log_format)];
    let mut guards = Vec::new();

    if config.log_files {
        let (file_layers, file_guards) = logging::file_layers(&config.log_dir)?;

        layers.extend(file_layers);
        guards = file_guards;
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(logging::build_env_filter(&config.log_level))
        .try_init()?;

    Ok(LogGuards { _guards: guards })
}
