use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::model::config::LogConfig;

/// Environment variable that overrides the configured filter
pub const LOG_ENV: &str = "TASKBOARD_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("could not install logger: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the filter from `TASKBOARD_LOG`, falling back to the configured level
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter, LoggingError> {
    let directive = std::env::var(LOG_ENV).unwrap_or_else(|_| config.level.clone());
    Ok(EnvFilter::try_new(directive)?)
}

fn open_log(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::Open {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// without a log file nothing is installed. Returns whether logging is on.
pub fn init_logging(config: &LogConfig, file_override: Option<&Path>) -> Result<bool, LoggingError> {
    let Some(path) = file_override.or(config.file.as_deref()) else {
        return Ok(false);
    };
    let filter = build_filter(config)?;
    let file = open_log(path)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()?;
    Ok(true)
}
