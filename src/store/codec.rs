//! Binary record stream codec
//!
//! All entities persist as a flat sequence of fixed-width records: no header,
//! no count prefix, no checksum — end of file ends the sequence. Records are
//! encoded with bincode's legacy options (fixed-width integers, little
//! endian), so an execution is exactly 12 bytes on disk, an operation 8, a
//! job 4 and a machine 5.
//!
//! Layout (execution stream):
//! ```text
//! ┌──────────────┬──────────────┬──────────────┐
//! │ operation_id │  machine_id  │   runtime    │  × N records
//! │   u32 LE     │    u32 LE    │    u32 LE    │
//! └──────────────┴──────────────┴──────────────┘
//! ```

use crate::store::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Write a sequence of records to a file, replacing any previous content.
///
/// Returns the number of records written. Creates parent directories if
/// needed. Callers guard against empty collections before calling; an empty
/// iterator here produces an empty file.
pub fn write_records<'a, T, I>(path: &Path, records: I) -> StoreResult<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let mut written = 0;

    for record in records {
        bincode::serialize_into(&mut writer, record)?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

/// Read a sequence of records from a file.
///
/// A missing file yields an empty sequence (the legacy contract for every
/// entity file); any other I/O or decode failure is surfaced. The stream is
/// consumed until end of file; a partial trailing record ends it, matching
/// how `fread` treated the legacy files.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut reader = BufReader::new(file);
    let mut records = Vec::new();

    loop {
        match bincode::deserialize_from::<_, T>(&mut reader) {
            Ok(record) => records.push(record),
            Err(err) => match *err {
                bincode::ErrorKind::Io(ref io) if io.kind() == ErrorKind::UnexpectedEof => break,
                _ => return Err(StoreError::from(err)),
            },
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{Execution, Machine, Operation};
    use tempfile::tempdir;

    #[test]
    fn test_execution_record_width() {
        // 3 × u32, fixed-width little endian
        let exec = Execution::new(1, 2, 3);
        let bytes = bincode::serialize(&exec).unwrap();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..4], &1u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &3u32.to_le_bytes());
    }

    #[test]
    fn test_machine_record_width() {
        let machine = Machine::new(7, true);
        let bytes = bincode::serialize(&machine).unwrap();
        assert_eq!(bytes.len(), 5);
    }

    #[test]
    fn test_write_and_read_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("operations.bin");

        let records = vec![Operation::new(1, 1), Operation::new(2, 1), Operation::new(3, 2)];
        let written = write_records(&path, &records).unwrap();
        assert_eq!(written, 3);

        // file is exactly 3 × 8 bytes, no framing
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 24);

        let restored: Vec<Operation> = read_records(&path).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.bin");

        let records: Vec<Execution> = read_records(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_truncated_tail_is_dropped() {
        // A partial trailing record ends the stream, like fread on the
        // legacy files: complete records before it are kept.
        let dir = tempdir().unwrap();
        let path = dir.path().join("executions.bin");

        let records = vec![Execution::new(1, 2, 3), Execution::new(4, 5, 6)];
        write_records(&path, &records).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..19]).unwrap();

        let restored: Vec<Execution> = read_records(&path).unwrap();
        assert_eq!(restored, vec![Execution::new(1, 2, 3)]);
    }
}
