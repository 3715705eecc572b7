//! Execution index — fixed-bucket chained hash table
//!
//! Open hashing over execution records: a fixed number of buckets, each
//! owning one [`ExecChain`]. Bucket choice is a pure function of the
//! operation id, so every alternative for an operation lives in the same
//! bucket (alongside records for other operations that collide modulo the
//! bucket count).
//!
//! The bucket count is fixed at construction; there is no rehashing on
//! growth. Capacity is known upfront in this domain, so a resizable table is
//! a non-goal.

use crate::index::chain::ExecChain;
use crate::store::codec;
use crate::store::error::{StoreError, StoreResult};
use crate::store::types::{Execution, InsertOutcome};
use std::path::Path;

/// Reference bucket sizing
pub const DEFAULT_BUCKET_COUNT: usize = 13;

/// Hash table of execution records keyed by operation id
#[derive(Debug, Clone)]
pub struct ExecIndex {
    buckets: Vec<ExecChain>,
}

impl Default for ExecIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecIndex {
    /// Index with the reference bucket count
    pub fn new() -> Self {
        Self {
            buckets: (0..DEFAULT_BUCKET_COUNT).map(|_| ExecChain::new()).collect(),
        }
    }

    /// Index with an explicit bucket count (at least 1)
    pub fn with_buckets(bucket_count: usize) -> StoreResult<Self> {
        if bucket_count == 0 {
            return Err(StoreError::Config(
                "bucket count must be at least 1".into(),
            ));
        }
        Ok(Self {
            buckets: (0..bucket_count).map(|_| ExecChain::new()).collect(),
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket an operation's records live in
    pub fn bucket_of(&self, operation_id: u32) -> usize {
        operation_id as usize % self.buckets.len()
    }

    /// Element count of one bucket
    pub fn bucket_len(&self, bucket: usize) -> usize {
        self.buckets[bucket].len()
    }

    /// Insert a record into its bucket.
    ///
    /// A composite-key collision anywhere in the index leaves it unchanged
    /// and reports [`InsertOutcome::DuplicateRejected`]; the bucket count
    /// only grows on a real insert.
    pub fn insert(&mut self, exec: Execution) -> InsertOutcome {
        let bucket = self.bucket_of(exec.operation_id);
        self.buckets[bucket].push_front(exec)
    }

    /// Overwrite the runtime of the record with this composite key
    pub fn update_runtime(&mut self, operation_id: u32, machine_id: u32, runtime: u32) -> bool {
        let bucket = self.bucket_of(operation_id);
        self.buckets[bucket].update_runtime(operation_id, machine_id, runtime)
    }

    /// Drain every alternative for an operation from its bucket.
    ///
    /// Returns how many records were removed; zero means the operation had
    /// none.
    pub fn remove_operation(&mut self, operation_id: u32) -> usize {
        let bucket = self.bucket_of(operation_id);
        let chain = &mut self.buckets[bucket];

        let mut removed = 0;
        while chain.remove_first_by_operation(operation_id) {
            removed += 1;
        }
        removed
    }

    /// Point lookup by composite key
    pub fn find(&self, operation_id: u32, machine_id: u32) -> Option<&Execution> {
        let bucket = self.bucket_of(operation_id);
        self.buckets[bucket].find(operation_id, machine_id)
    }

    /// Concatenate all bucket chains into one chain, bucket order then chain
    /// order, skipping empty buckets. The index is untouched.
    pub fn flatten(&self) -> ExecChain {
        let records: Vec<Execution> = self.iter().copied().collect();

        let mut flat = ExecChain::new();
        for exec in records.into_iter().rev() {
            // records are already unique across the index
            flat.push_front(exec);
        }
        flat
    }

    /// All records, bucket order then chain order
    pub fn iter(&self) -> impl Iterator<Item = &Execution> {
        self.buckets.iter().flat_map(|chain| chain.iter())
    }

    /// Total record count across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|chain| chain.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|chain| chain.is_empty())
    }

    /// Write the flattened record sequence as a flat binary stream
    pub fn to_file(&self, path: &Path) -> StoreResult<()> {
        if self.is_empty() {
            return Err(StoreError::EmptyCollection("execution index"));
        }
        let written = codec::write_records(path, self.iter())?;
        tracing::info!("wrote {} execution records to {:?}", written, path);
        Ok(())
    }

    /// Full rebuild from a record stream: every record is replayed through
    /// [`ExecIndex::insert`] and rehashes into its bucket. A missing file
    /// yields an empty index; duplicate records in the stream are skipped.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        Self::from_file_with_buckets(path, DEFAULT_BUCKET_COUNT)
    }

    /// Same rebuild into an index with an explicit bucket count. The file
    /// carries no bucket information, so a host that configures the count
    /// must pass the same value it built the index with.
    pub fn from_file_with_buckets(path: &Path, bucket_count: usize) -> StoreResult<Self> {
        let mut index = ExecIndex::with_buckets(bucket_count)?;
        let mut inserted = 0usize;
        let mut duplicates = 0usize;

        for exec in codec::read_records::<Execution>(path)? {
            match index.insert(exec) {
                InsertOutcome::Inserted => inserted += 1,
                InsertOutcome::DuplicateRejected => duplicates += 1,
            }
        }

        if duplicates > 0 {
            tracing::warn!(
                "skipped {} duplicate execution records while loading {:?}",
                duplicates,
                path
            );
        }
        tracing::info!("loaded {} execution records from {:?}", inserted, path);

        Ok(index)
    }
}

impl std::fmt::Display for ExecIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "bucket {} - {} records", i, chain.len())?;
            for exec in chain.iter() {
                writeln!(f, "  {}", exec)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::ExecKey;
    use tempfile::tempdir;

    #[test]
    fn test_insert_then_find() {
        let mut index = ExecIndex::new();
        assert!(index.insert(Execution::new(4, 6, 4)).is_inserted());
        assert!(index.insert(Execution::new(4, 8, 9)).is_inserted());

        assert_eq!(index.find(4, 6).unwrap().runtime, 4);
        assert_eq!(index.find(4, 8).unwrap().runtime, 9);
        assert!(index.find(4, 1).is_none());
        assert!(index.find(5, 6).is_none());
    }

    #[test]
    fn test_duplicate_insert_is_distinguishable() {
        let mut index = ExecIndex::new();
        assert_eq!(index.insert(Execution::new(1, 1, 4)), InsertOutcome::Inserted);
        assert_eq!(
            index.insert(Execution::new(1, 1, 7)),
            InsertOutcome::DuplicateRejected
        );

        // state equals the pre-insert state
        assert_eq!(index.len(), 1);
        assert_eq!(index.find(1, 1).unwrap().runtime, 4);
    }

    #[test]
    fn test_congruent_operations_share_a_bucket() {
        let mut index = ExecIndex::new();
        // 1 and 14 are congruent modulo 13
        assert_eq!(index.bucket_of(1), index.bucket_of(14));

        index.insert(Execution::new(1, 1, 4));
        index.insert(Execution::new(14, 3, 7));
        assert_eq!(index.bucket_len(index.bucket_of(1)), 2);

        // a non-congruent operation lands elsewhere
        index.insert(Execution::new(2, 2, 4));
        assert_eq!(index.bucket_len(index.bucket_of(2)), 1);
    }

    #[test]
    fn test_all_alternatives_share_a_bucket() {
        let mut index = ExecIndex::new();
        for machine in 1..=8 {
            index.insert(Execution::new(4, machine, machine + 1));
        }
        assert_eq!(index.bucket_len(index.bucket_of(4)), 8);
    }

    #[test]
    fn test_update_runtime() {
        let mut index = ExecIndex::new();
        index.insert(Execution::new(4, 4, 5));

        assert!(index.update_runtime(4, 4, 10));
        assert_eq!(index.find(4, 4).unwrap().runtime, 10);
        assert!(!index.update_runtime(4, 9, 10));
    }

    #[test]
    fn test_remove_operation_reports_count() {
        let mut index = ExecIndex::new();
        index.insert(Execution::new(4, 4, 5));
        index.insert(Execution::new(4, 5, 5));
        index.insert(Execution::new(4, 6, 4));
        index.insert(Execution::new(17, 1, 4)); // same bucket as 4

        assert_eq!(index.remove_operation(4), 3);
        assert_eq!(index.remove_operation(4), 0);

        for machine in 4..=6 {
            assert!(index.find(4, machine).is_none());
        }
        assert!(index.find(17, 1).is_some());
    }

    #[test]
    fn test_bucket_count_invariant_after_mixed_operations() {
        let mut index = ExecIndex::new();
        for op in 0..30 {
            index.insert(Execution::new(op, 1, op + 1));
            index.insert(Execution::new(op, 2, op + 2));
        }
        index.insert(Execution::new(7, 1, 99)); // duplicate
        index.update_runtime(8, 2, 99);
        index.remove_operation(9);

        for bucket in 0..index.bucket_count() {
            assert_eq!(
                index.bucket_len(bucket),
                index.iter().filter(|e| index.bucket_of(e.operation_id) == bucket).count()
            );
        }
        assert_eq!(index.len(), 58);
    }

    #[test]
    fn test_flatten_skips_empty_buckets() {
        let mut index = ExecIndex::new();
        // leave most buckets empty, including bucket 0
        index.insert(Execution::new(1, 1, 4));
        index.insert(Execution::new(14, 2, 5));
        index.insert(Execution::new(5, 1, 1));

        let flat = index.flatten();
        assert_eq!(flat.len(), 3);
        let keys: Vec<ExecKey> = flat.iter().map(|e| e.key()).collect();
        // bucket order: bucket 1 holds 1 and 14 (newest first), bucket 5 holds 5
        assert_eq!(
            keys,
            vec![ExecKey::new(14, 2), ExecKey::new(1, 1), ExecKey::new(5, 1)]
        );

        // the index itself is untouched
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_file_roundtrip_preserves_record_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("executions.bin");

        let mut index = ExecIndex::new();
        for op in [1u32, 4, 14, 17, 27] {
            index.insert(Execution::new(op, 1, op));
            index.insert(Execution::new(op, 2, op + 1));
        }
        index.to_file(&path).unwrap();

        let restored = ExecIndex::from_file(&path).unwrap();
        assert_eq!(restored.len(), index.len());
        for exec in index.iter() {
            assert_eq!(
                restored.find(exec.operation_id, exec.machine_id),
                Some(exec)
            );
        }
    }

    #[test]
    fn test_configured_bucket_count_survives_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("executions.bin");

        let mut index = ExecIndex::with_buckets(7).unwrap();
        // 1, 8 and 15 are congruent modulo 7
        for op in [1u32, 8, 15] {
            index.insert(Execution::new(op, 1, op));
        }
        index.to_file(&path).unwrap();

        let restored = ExecIndex::from_file_with_buckets(&path, 7).unwrap();
        assert_eq!(restored.bucket_count(), 7);
        assert_eq!(restored.bucket_len(1), 3);
        for op in [1u32, 8, 15] {
            assert_eq!(restored.find(op, 1).map(|e| e.runtime), Some(op));
        }
    }

    #[test]
    fn test_empty_index_write_fails() {
        let dir = tempdir().unwrap();
        let index = ExecIndex::new();
        assert!(matches!(
            index.to_file(&dir.path().join("executions.bin")),
            Err(StoreError::EmptyCollection(_))
        ));
    }

    #[test]
    fn test_with_buckets_rejects_zero() {
        assert!(ExecIndex::with_buckets(0).is_err());
        assert_eq!(ExecIndex::with_buckets(7).unwrap().bucket_count(), 7);
    }

    #[test]
    fn test_display_lists_buckets_in_order() {
        let mut index = ExecIndex::with_buckets(3).unwrap();
        index.insert(Execution::new(1, 1, 4));
        index.insert(Execution::new(2, 1, 5));

        let out = index.to_string();
        assert!(out.contains("bucket 0 - 0 records"));
        assert!(out.contains("bucket 1 - 1 records"));
        assert!(out.contains("operation 2 on machine 1 takes 5"));
    }
}
