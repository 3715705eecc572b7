//! # Flexshop
//!
//! Static data store for a flexible job-shop scheduling problem: jobs, their
//! operations, machines, and the (operation, machine, runtime) alternatives
//! ("executions") describing how long each operation takes on each eligible
//! machine.
//!
//! ## Features
//!
//! - **Execution index**: fixed-bucket hash table of singly linked chains
//!   keyed by operation id, with composite-key uniqueness
//! - **Aggregation queries**: per-job min/max completion time and
//!   per-operation average runtime over a flattened snapshot
//! - **Persistence**: flat fixed-width binary record streams per entity,
//!   rebuilt by replaying inserts
//! - **Catalogs**: front-insertion job/machine/operation lists with
//!   duplicate rejection
//!
//! No schedule is computed: there is no sequencing, no machine-conflict
//! resolution and no makespan optimization — the crate stores alternatives
//! and answers aggregate queries over them.
//!
//! ## Modules
//!
//! - [`store`]: Entities, catalogs and the binary record codec
//! - [`index`]: Execution chain and hash index
//! - [`query`]: Aggregation queries
//! - [`seed`]: The demo dataset
//!
//! ## Quick Start
//!
//! ```rust
//! use flexshop::index::ExecIndex;
//! use flexshop::query::min_completion_time;
//! use flexshop::store::{Execution, InsertOutcome, Operation, OperationList};
//!
//! let mut operations = OperationList::new();
//! operations.insert(Operation::new(1, 1));
//! operations.insert(Operation::new(2, 1));
//!
//! let mut index = ExecIndex::new();
//! index.insert(Execution::new(1, 1, 4));
//! index.insert(Execution::new(1, 3, 5));
//! index.insert(Execution::new(2, 2, 6));
//! assert_eq!(
//!     index.insert(Execution::new(1, 1, 9)),
//!     InsertOutcome::DuplicateRejected
//! );
//!
//! let best = min_completion_time(&operations, &index.flatten(), 1).unwrap();
//! assert_eq!(best.total, 10); // 4 + 6
//! ```
//!
//! ## Concurrency
//!
//! The store is a single-threaded, synchronous library. Flatten and
//! persistence restructure bucket chains wholesale, so hosts needing
//! concurrent access should wrap the whole index behind one mutex or a
//! single-owner task rather than lock per bucket.

pub mod config;
pub mod index;
pub mod query;
pub mod seed;
pub mod store;

// Re-export top-level types for convenience
pub use config::{Config, ConfigError, LoggingConfig, StorageConfig};
pub use index::{ExecChain, ExecIndex, DEFAULT_BUCKET_COUNT};
pub use query::{
    average_runtime, max_completion_time, min_completion_time, CompletionTime, QueryError,
    QueryResult,
};
pub use store::{
    ExecKey, Execution, InsertOutcome, Job, JobList, Machine, MachineList, Operation,
    OperationList, StoreError, StoreResult,
};
