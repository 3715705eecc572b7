//! Entity catalogs: jobs, machines, operations
//!
//! Plain front-insertion lists with duplicate-id rejection and the shared
//! binary framing convention. These are the collaborators of the execution
//! index: they do no aggregation of their own, and references between them
//! are soft — removing a job does not cascade into operations or executions
//! (callers drive the cascade, as the demo binary does).

use crate::store::codec;
use crate::store::error::{StoreError, StoreResult};
use crate::store::types::{InsertOutcome, Job, Machine, Operation};
use std::path::Path;

/// Catalog of jobs
#[derive(Debug, Clone, Default)]
pub struct JobList {
    jobs: Vec<Job>,
}

impl JobList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, rejecting a duplicate id
    pub fn insert(&mut self, job: Job) -> InsertOutcome {
        if self.contains(job.id) {
            return InsertOutcome::DuplicateRejected;
        }
        self.jobs.insert(0, job);
        InsertOutcome::Inserted
    }

    /// Remove a job by id; false if absent
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|job| job.id != id);
        self.jobs.len() != before
    }

    pub fn contains(&self, id: u32) -> bool {
        self.jobs.iter().any(|job| job.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Write the catalog as a flat record stream
    pub fn to_file(&self, path: &Path) -> StoreResult<()> {
        if self.is_empty() {
            return Err(StoreError::EmptyCollection("job list"));
        }
        codec::write_records(path, self.jobs.iter())?;
        Ok(())
    }

    /// Rebuild from a record stream by replaying front inserts
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let mut list = Self::new();
        for job in codec::read_records::<Job>(path)? {
            list.insert(job);
        }
        Ok(list)
    }
}

impl std::fmt::Display for JobList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for job in &self.jobs {
            writeln!(f, "job {}", job.id)?;
        }
        Ok(())
    }
}

/// Catalog of machines
#[derive(Debug, Clone, Default)]
pub struct MachineList {
    machines: Vec<Machine>,
}

impl MachineList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, rejecting a duplicate id
    pub fn insert(&mut self, machine: Machine) -> InsertOutcome {
        if self.contains(machine.id) {
            return InsertOutcome::DuplicateRejected;
        }
        self.machines.insert(0, machine);
        InsertOutcome::Inserted
    }

    pub fn contains(&self, id: u32) -> bool {
        self.machines.iter().any(|m| m.id == id)
    }

    pub fn get(&self, id: u32) -> Option<&Machine> {
        self.machines.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter()
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Write the catalog as a flat record stream.
    ///
    /// Machine records are 5 bytes each (`u32` id plus one flag byte), not
    /// the 8-byte padded struct of the legacy files; machine files only
    /// round-trip through [`MachineList::from_file`].
    pub fn to_file(&self, path: &Path) -> StoreResult<()> {
        if self.is_empty() {
            return Err(StoreError::EmptyCollection("machine list"));
        }
        codec::write_records(path, self.machines.iter())?;
        Ok(())
    }

    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let mut list = Self::new();
        for machine in codec::read_records::<Machine>(path)? {
            list.insert(machine);
        }
        Ok(list)
    }
}

impl std::fmt::Display for MachineList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for machine in &self.machines {
            writeln!(
                f,
                "machine {} ({})",
                machine.id,
                if machine.is_busy { "busy" } else { "free" }
            )?;
        }
        Ok(())
    }
}

/// Catalog of operations
#[derive(Debug, Clone, Default)]
pub struct OperationList {
    operations: Vec<Operation>,
}

impl OperationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, rejecting a duplicate operation id
    pub fn insert(&mut self, operation: Operation) -> InsertOutcome {
        if self.contains(operation.id) {
            return InsertOutcome::DuplicateRejected;
        }
        self.operations.insert(0, operation);
        InsertOutcome::Inserted
    }

    /// Remove one operation by id; false if absent
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.operations.len();
        self.operations.retain(|op| op.id != id);
        self.operations.len() != before
    }

    /// Remove every operation of a job, returning the removed operation ids
    /// so the caller can purge the execution index.
    pub fn remove_by_job(&mut self, job_id: u32) -> Vec<u32> {
        let removed: Vec<u32> = self
            .operations
            .iter()
            .filter(|op| op.job_id == job_id)
            .map(|op| op.id)
            .collect();
        self.operations.retain(|op| op.job_id != job_id);
        removed
    }

    pub fn contains(&self, id: u32) -> bool {
        self.operations.iter().any(|op| op.id == id)
    }

    pub fn contains_job(&self, job_id: u32) -> bool {
        self.operations.iter().any(|op| op.job_id == job_id)
    }

    pub fn get(&self, id: u32) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }

    /// Operations belonging to a job, in list order
    pub fn operations_of(&self, job_id: u32) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(move |op| op.job_id == job_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn to_file(&self, path: &Path) -> StoreResult<()> {
        if self.is_empty() {
            return Err(StoreError::EmptyCollection("operation list"));
        }
        codec::write_records(path, self.operations.iter())?;
        Ok(())
    }

    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let mut list = Self::new();
        for operation in codec::read_records::<Operation>(path)? {
            list.insert(operation);
        }
        Ok(list)
    }
}

impl std::fmt::Display for OperationList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for op in &self.operations {
            writeln!(f, "operation {} (job {})", op.id, op.job_id)?;
        }
        Ok(())
    }
}
