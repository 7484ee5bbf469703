use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::LinkError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The entry link does not name a page.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The log file could not be set up.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// [`App::run`](super::App::run) was called a second time.
    #[error("event loop already started")]
    AlreadyRunning,
}
