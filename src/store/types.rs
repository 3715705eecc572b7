//! Core data types for the flexshop data store
//!
//! This module defines the entities of the flexible job-shop model:
//! - `Execution`: one (operation, machine, runtime) alternative
//! - `ExecKey`: the composite key uniquely identifying an execution
//! - `Job`, `Machine`, `Operation`: the catalog entities
//! - `InsertOutcome`: distinguishes a real insert from a duplicate rejection

use serde::{Deserialize, Serialize};

/// One way of running an operation: which machine, and for how long.
///
/// An operation may have any number of alternatives (including none), and a
/// machine may appear in any number of them. Identifiers are soft references:
/// an execution may outlive the operation it points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Execution {
    /// Operation this alternative belongs to
    pub operation_id: u32,
    /// Machine the operation would run on
    pub machine_id: u32,
    /// Time units the operation takes on that machine
    pub runtime: u32,
}

impl Execution {
    pub fn new(operation_id: u32, machine_id: u32, runtime: u32) -> Self {
        Self {
            operation_id,
            machine_id,
            runtime,
        }
    }

    /// Composite key of this record
    pub fn key(&self) -> ExecKey {
        ExecKey {
            operation_id: self.operation_id,
            machine_id: self.machine_id,
        }
    }
}

impl std::fmt::Display for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "operation {} on machine {} takes {}",
            self.operation_id, self.machine_id, self.runtime
        )
    }
}

/// The (operation, machine) pair uniquely identifying an execution.
///
/// No two records in a chain or in the whole index share this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecKey {
    pub operation_id: u32,
    pub machine_id: u32,
}

impl ExecKey {
    pub fn new(operation_id: u32, machine_id: u32) -> Self {
        Self {
            operation_id,
            machine_id,
        }
    }
}

/// Outcome of an insert into a uniqueness-checked collection.
///
/// The reference behavior collapsed "duplicate skipped" and "inserted" into
/// one silent no-op; callers get the distinction here. Failures (I/O and the
/// like) travel through the `Err` branch of the surrounding `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was added to the collection
    Inserted,
    /// A record with the same key already exists; collection unchanged
    DuplicateRejected,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// A job: a unit of work made up of operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub id: u32,
}

impl Job {
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

/// A machine on the shop floor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Machine {
    pub id: u32,
    /// Whether the machine is currently occupied
    pub is_busy: bool,
}

impl Machine {
    pub fn new(id: u32, is_busy: bool) -> Self {
        Self { id, is_busy }
    }
}

/// One operation of a job
///
/// `job_id` is a soft back-reference: the operation may reference a job that
/// no longer exists in the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operation {
    pub id: u32,
    pub job_id: u32,
}

impl Operation {
    pub fn new(id: u32, job_id: u32) -> Self {
        Self { id, job_id }
    }
}
