//! Query error types

use thiserror::Error;

/// Errors that can occur while answering aggregation queries
#[derive(Error, Debug)]
pub enum QueryError {
    /// A query over an empty input collection (the reference signalled this
    /// with a -1 return)
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
}

/// Result type alias for query operations
pub type QueryResult<T> = Result<T, QueryError>;
