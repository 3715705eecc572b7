//! Execution chain — owned singly linked chain of execution records
//!
//! The building block of the execution index: each hash bucket owns one
//! chain. A chain enforces composite-key uniqueness on every insert, so a
//! record can be located by (operation, machine) with a single linear scan.
//!
//! A chain is built either newest-first via [`ExecChain::push_front`] or in
//! ascending operation order via [`ExecChain::insert_by_operation`]; the two
//! styles are not mixed during one chain lifetime.

use crate::store::codec;
use crate::store::error::{StoreError, StoreResult};
use crate::store::types::{ExecKey, Execution, InsertOutcome};
use std::path::Path;

#[derive(Debug)]
struct ChainNode {
    exec: Execution,
    next: Option<Box<ChainNode>>,
}

/// Ordered singly linked chain of execution records.
///
/// The stored length is kept in lockstep with the live node count; the two
/// are equal after every operation.
#[derive(Debug, Default)]
pub struct ExecChain {
    head: Option<Box<ChainNode>>,
    len: usize,
}

impl ExecChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record unless its composite key is already present.
    ///
    /// O(n): the duplicate scan visits the whole chain.
    pub fn push_front(&mut self, exec: Execution) -> InsertOutcome {
        if self.find_key(exec.key()).is_some() {
            return InsertOutcome::DuplicateRejected;
        }
        self.prepend(exec);
        InsertOutcome::Inserted
    }

    /// Insert keeping ascending operation order, unless the composite key is
    /// already present. Records with equal operation ids keep arrival order:
    /// the new record goes after the existing run.
    pub fn insert_by_operation(&mut self, exec: Execution) -> InsertOutcome {
        if self.find_key(exec.key()).is_some() {
            return InsertOutcome::DuplicateRejected;
        }

        let mut cursor = &mut self.head;
        while cursor
            .as_ref()
            .is_some_and(|node| node.exec.operation_id <= exec.operation_id)
        {
            cursor = &mut cursor.as_mut().unwrap().next;
        }

        let next = cursor.take();
        *cursor = Some(Box::new(ChainNode { exec, next }));
        self.len += 1;
        InsertOutcome::Inserted
    }

    /// Overwrite the runtime of the unique record with this composite key.
    /// False if the chain is empty or the key is absent.
    pub fn update_runtime(&mut self, operation_id: u32, machine_id: u32, runtime: u32) -> bool {
        let key = ExecKey::new(operation_id, machine_id);
        let mut cursor = self.head.as_deref_mut();

        while let Some(node) = cursor {
            if node.exec.key() == key {
                node.exec.runtime = runtime;
                return true;
            }
            cursor = node.next.as_deref_mut();
        }

        false
    }

    /// Unlink the first record matching the operation id (any machine).
    /// Returns whether a removal occurred; call to exhaustion to strip every
    /// alternative for an operation.
    pub fn remove_first_by_operation(&mut self, operation_id: u32) -> bool {
        let mut cursor = &mut self.head;
        while cursor
            .as_ref()
            .is_some_and(|node| node.exec.operation_id != operation_id)
        {
            cursor = &mut cursor.as_mut().unwrap().next;
        }

        match cursor.take() {
            Some(node) => {
                *cursor = node.next;
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// First record matching the composite key
    pub fn find(&self, operation_id: u32, machine_id: u32) -> Option<&Execution> {
        self.find_key(ExecKey::new(operation_id, machine_id))
    }

    fn find_key(&self, key: ExecKey) -> Option<&Execution> {
        self.iter().find(|exec| exec.key() == key)
    }

    /// Whether any record references the operation
    pub fn contains_operation(&self, operation_id: u32) -> bool {
        self.iter().any(|exec| exec.operation_id == operation_id)
    }

    /// A freshly built copy in ascending operation order; self is untouched.
    pub fn sorted_by_operation(&self) -> ExecChain {
        let mut sorted = ExecChain::new();
        for exec in self.iter() {
            sorted.insert_by_operation(*exec);
        }
        sorted
    }

    /// Tail record, or None if the chain is empty
    pub fn last(&self) -> Option<&Execution> {
        self.iter().last()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Stored length (always equals the live node count)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Write the chain as a flat record stream, in chain order.
    pub fn to_file(&self, path: &Path) -> StoreResult<()> {
        if self.is_empty() {
            return Err(StoreError::EmptyCollection("execution chain"));
        }
        let written = codec::write_records(path, self.iter())?;
        tracing::debug!("wrote {} execution records to {:?}", written, path);
        Ok(())
    }

    /// Rebuild a chain from a record stream by replaying front inserts, so
    /// in-memory order reverses file order. A missing file yields an empty
    /// chain; duplicate records in the stream are skipped.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let mut chain = ExecChain::new();
        let mut duplicates = 0usize;

        for exec in codec::read_records::<Execution>(path)? {
            if chain.push_front(exec) == InsertOutcome::DuplicateRejected {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            tracing::warn!(
                "skipped {} duplicate execution records while loading {:?}",
                duplicates,
                path
            );
        }

        Ok(chain)
    }

    fn prepend(&mut self, exec: Execution) {
        let next = self.head.take();
        self.head = Some(Box::new(ChainNode { exec, next }));
        self.len += 1;
    }
}

impl Clone for ExecChain {
    fn clone(&self) -> Self {
        let records: Vec<Execution> = self.iter().copied().collect();
        let mut chain = ExecChain::new();
        for exec in records.into_iter().rev() {
            chain.prepend(exec);
        }
        chain
    }
}

impl Drop for ExecChain {
    fn drop(&mut self) {
        // unlink iteratively so a long chain cannot overflow the stack
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl std::fmt::Display for ExecChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for exec in self.iter() {
            writeln!(f, "{}", exec)?;
        }
        Ok(())
    }
}

/// Iterator over chain records in chain order
pub struct Iter<'a> {
    next: Option<&'a ChainNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Execution;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.exec)
    }
}

impl<'a> IntoIterator for &'a ExecChain {
    type Item = &'a Execution;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
