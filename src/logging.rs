//! Tracing setup.
//!
//! The terminal is in raw mode while the app runs, so events go to a log
//! file only. The filter comes from `TRIPFORM_LOG` (default `info`).

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "TRIPFORM_LOG";

/// Errors that can occur while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file or its directory could not be created.
    #[error("cannot open log file: {0}")]
    Io(#[from] std::io::Error),

    /// A global subscriber is already installed.
    #[error("cannot install log subscriber: {0}")]
    Init(String),
}

/// Builds the filter from `TRIPFORM_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber, appending to `log_file`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(log_file: &Path) -> Result<(), LoggingError> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}
