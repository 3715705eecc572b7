//! Execution index structures
//!
//! Open hashing with chaining over execution records:
//!
//! - **chain**: `ExecChain`, an owned singly linked chain with composite-key
//!   uniqueness
//! - **table**: `ExecIndex`, a fixed-bucket hash table of chains keyed by
//!   operation id
//!
//! ```text
//! insert(op=4, machine=6, runtime=4)
//!        ↓
//! bucket_of(4) = 4 % 13 = 4
//!        ↓
//! bucket 4: (4,6,4) → (4,8,9) → (17,1,4) → ∅
//! ```
//!
//! The index is a single-owner, single-threaded structure. Flatten and
//! persistence restructure bucket chains wholesale, so hosts that need
//! concurrent access must wrap the whole index behind one exclusive-access
//! boundary rather than locking per bucket.

mod chain;
mod table;

pub use chain::{ExecChain, Iter};
pub use table::{ExecIndex, DEFAULT_BUCKET_COUNT};
