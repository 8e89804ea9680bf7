//! Error types for autopilot-core

use thiserror::Error;

/// Main error type for the autopilot-core library
#[derive(Error, Debug)]
pub enum Error {
    /// An input event could not be accepted; the whole run is rejected
    #[error("malformed input at event {index}: {message}")]
    MalformedInput { index: usize, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(index: usize, message: impl Into<String>) -> Self {
        Error::MalformedInput {
            index,
            message: message.into(),
        }
    }
}

/// Result type alias for autopilot-core
pub type Result<T> = std::result::Result<T, Error>;
