//! Console and per-level file layers.

use std::{fs, path::Path};

use tracing::Level;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, Registry, filter::filter_fn};

use crate::config::LogFormat;

use super::LoggingError;

pub(super) type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Levels that get their own file, with the file stem each one writes to.
pub const LEVEL_FILES: [(Level, &str); 4] = [
    (Level::ERROR, "error"),
    (Level::WARN, "warn"),
    (Level::INFO, "info"),
    (Level::DEBUG, "debug"),
];

pub(super) fn console_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed(),
    }
}

pub(super) fn file_layers(
    dir: &Path,
) -> Result<(Vec<BoxedLayer>, Vec<WorkerGuard>), LoggingError> {
    fs::create_dir_all(dir)?;

    let mut layers = Vec::with_capacity(LEVEL_FILES.len());
    let mut guards = Vec::with_capacity(LEVEL_FILES.len());

    for (level, stem) in LEVEL_FILES {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(stem)
            .filename_suffix("log")
            .build(dir)?;

        let (writer, guard) = tracing_appender::non_blocking(appender);

        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(filter_fn(move |metadata| *metadata.level() == level))
                .boxed(),
        );
        guards.push(guard);
    }

    Ok((layers, guards))
}

pub(super) fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn,rustls=warn"))
    })
}
