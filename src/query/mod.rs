//! Aggregation queries
//!
//! Read-only statistics joining the operation catalog against a snapshot of
//! execution records:
//!
//! - **stats**: per-job min/max completion time, per-operation average runtime
//! - **error**: query error types
//!
//! # Example
//!
//! ```rust
//! use flexshop::index::ExecIndex;
//! use flexshop::query::{average_runtime, min_completion_time};
//! use flexshop::store::{Execution, Operation, OperationList};
//!
//! let mut operations = OperationList::new();
//! operations.insert(Operation::new(1, 1));
//!
//! let mut index = ExecIndex::new();
//! index.insert(Execution::new(1, 1, 4));
//! index.insert(Execution::new(1, 3, 5));
//!
//! let snapshot = index.flatten();
//! let best = min_completion_time(&operations, &snapshot, 1).unwrap();
//! assert_eq!(best.total, 4);
//! assert_eq!(average_runtime(&snapshot, 1).unwrap(), 4.5);
//! ```

mod error;
mod stats;

pub use error::{QueryError, QueryResult};
pub use stats::{average_runtime, max_completion_time, min_completion_time, CompletionTime};
