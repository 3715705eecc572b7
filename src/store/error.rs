//! Store error types
//!
//! Defines all errors that can occur in the data store layer.

use thiserror::Error;

/// Errors that can occur in the data store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding/decoding of a record stream failed
    #[error("Codec error: {0}")]
    Codec(String),

    /// Writing an empty collection to a file
    #[error("Empty collection: {0}")]
    EmptyCollection(&'static str),

    /// Invalid structural configuration (e.g. zero buckets)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Codec(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
