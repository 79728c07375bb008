//! Error types for API key operations.

use thiserror::Error;

/// Errors that can occur while deriving or enumerating API keys.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiKeyError {
    /// A caller-supplied argument can't be used (bad timestamp, non-positive step, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The date format pattern could not be applied
    #[error("Invalid date format: '{format}'")]
    Format { format: String },
}

/// Result type alias for API key operations.
pub type Result<T> = std::result::Result<T, ApiKeyError>;
