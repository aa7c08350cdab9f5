//! Error types for the fold state store.

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced by [`crate::state::FoldTreeStore`] operations
#[derive(Debug, Error)]
pub enum FoldError {
    /// A collaborator required at construction time was not supplied.
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// Path input was not a sequence, or carried a segment that is not allowed
    /// where it appeared.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation was called with a path shape it does not support.
    #[error("Invalid usage: {0}")]
    InvalidUsage(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Fold change subscriber failed: {0}")]
    Subscriber(#[source] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for FoldError {
    fn from(err: config::ConfigError) -> Self {
        FoldError::ConfigError(err.to_string())
    }
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
