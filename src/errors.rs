//! Error types for askbase
//!
//! Storage failures are split into "cannot reach the medium" and "medium
//! holds something we cannot parse" so the caller can pick its own fallback.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for matching and history operations
#[derive(Error, Debug)]
pub enum AskError {
    /// History file exists (or should) but cannot be read or written
    #[error("History storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// History file was read but is not a sequence of entries
    #[error("History storage corrupt at {}: {reason}", path.display())]
    StorageCorrupt { path: PathBuf, reason: String },

    /// Corpus violates its construction invariants
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Blank question handed to the assistant
    #[error("Question is required")]
    EmptyQuestion,

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("askbase error: {0}")]
    Generic(String),
}

/// Result type alias for askbase operations
pub type Result<T> = std::result::Result<T, AskError>;

impl From<anyhow::Error> for AskError {
    fn from(err: anyhow::Error) -> Self {
        AskError::Generic(err.to_string())
    }
}
