//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Caller supplied input that cannot be used.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::Config(_) => 3,
            Self::Io(_) => 4,
            Self::Serialization(_) => 5,
        }
    }

    /// Returns the stable error code used in structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Failures of the underlying reader or writer map to [`AppError::Io`].
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.to_string())
        } else {
            Self::Serialization(err.to_string())
        }
    }
}
