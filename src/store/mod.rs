//! Flexshop data store
//!
//! Entities and persistence for the flexible job-shop model:
//!
//! - **types**: Core data structures (Execution, Job, Machine, Operation)
//! - **catalog**: Front-insertion entity lists with duplicate rejection
//! - **codec**: Fixed-width binary record streams
//! - **error**: Error types
//!
//! The execution index lives in [`crate::index`]; aggregation queries over
//! catalogs and executions live in [`crate::query`].

pub mod catalog;
pub mod codec;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use catalog::{JobList, MachineList, OperationList};
pub use error::{StoreError, StoreResult};
pub use types::{ExecKey, Execution, InsertOutcome, Job, Machine, Operation};
