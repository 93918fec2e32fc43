//! Application-wide error types using thiserror.

use uniconfig_common::LoggingError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Logging could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
