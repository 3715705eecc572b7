//! Demo dataset
//!
//! The reference shop floor: 8 jobs, 8 machines, 38 operations and the
//! execution alternatives for each operation. Used by the demo binary,
//! tests and benches.

use crate::index::ExecIndex;
use crate::store::catalog::{JobList, MachineList, OperationList};
use crate::store::error::StoreResult;
use crate::store::types::{Execution, Job, Machine, Operation};

pub const JOB_COUNT: u32 = 8;
pub const MACHINE_COUNT: u32 = 8;

/// (operation id, job id)
const OPERATIONS: &[(u32, u32)] = &[
    (1, 1), (2, 1), (3, 1), (4, 1),
    (5, 2), (6, 2), (7, 2), (8, 2), (9, 2), (10, 2), (11, 2),
    (12, 3), (13, 3), (14, 3), (15, 3), (16, 3),
    (17, 4), (18, 4), (19, 4), (20, 4),
    (21, 5), (22, 5), (23, 5), (24, 5), (25, 5),
    (26, 6), (27, 6), (28, 6),
    (29, 7), (30, 7), (31, 7), (32, 7), (33, 7),
    (34, 8), (35, 8), (36, 8), (37, 8), (38, 8),
];

/// (operation id, machine id, runtime)
const EXECUTIONS: &[(u32, u32, u32)] = &[
    (1, 1, 4), (1, 3, 5),
    (2, 2, 4), (2, 4, 5),
    (3, 3, 5), (3, 5, 6),
    (4, 4, 5), (4, 5, 5), (4, 6, 4), (4, 7, 5), (4, 8, 9),
    (5, 1, 1), (5, 3, 5), (5, 5, 7),
    (6, 4, 5), (6, 8, 4),
    (7, 4, 1), (7, 6, 6),
    (8, 4, 4), (8, 7, 4), (8, 8, 7),
    (9, 4, 1), (9, 6, 2),
    (10, 1, 5), (10, 6, 6), (10, 8, 4),
    (11, 4, 4),
    (12, 2, 7), (12, 3, 6), (12, 8, 8),
    (13, 4, 7), (13, 8, 7),
    (14, 3, 7), (14, 5, 8), (14, 7, 7),
    (15, 4, 7), (15, 6, 8),
    (16, 1, 1), (16, 2, 4),
    (17, 1, 4), (17, 3, 3), (17, 5, 7),
    (18, 2, 4), (18, 8, 4),
    (19, 3, 4), (19, 4, 5), (19, 6, 6), (19, 7, 7),
    (20, 5, 3), (20, 6, 5), (20, 8, 5),
    (21, 1, 3),
    (22, 2, 4), (22, 4, 5),
    (23, 3, 4), (23, 8, 4),
    (24, 5, 3), (24, 6, 3), (24, 8, 3),
    (25, 4, 5), (25, 6, 4),
    (26, 1, 3), (26, 2, 5), (26, 3, 6),
    (27, 4, 7), (27, 5, 8),
    (28, 3, 9), (28, 6, 8),
    (29, 3, 4), (29, 5, 5), (29, 6, 4),
    (30, 4, 4), (30, 7, 6), (30, 8, 4),
    (31, 1, 3), (31, 3, 3), (31, 4, 4), (31, 5, 5),
    (32, 4, 4), (32, 6, 6), (32, 8, 5),
    (33, 1, 3), (33, 3, 3),
    (34, 1, 3), (34, 2, 4), (34, 6, 4),
    (35, 4, 6), (35, 5, 5), (35, 8, 4),
    (36, 3, 4), (36, 7, 5),
    (37, 4, 4), (37, 6, 6),
    (38, 7, 1), (38, 8, 2),
];

/// The demo job catalog
pub fn jobs() -> JobList {
    let mut list = JobList::new();
    for id in 1..=JOB_COUNT {
        list.insert(Job::new(id));
    }
    list
}

/// The demo machine catalog, all machines idle
pub fn machines() -> MachineList {
    let mut list = MachineList::new();
    for id in 1..=MACHINE_COUNT {
        list.insert(Machine::new(id, false));
    }
    list
}

/// The demo operation catalog
pub fn operations() -> OperationList {
    let mut list = OperationList::new();
    for &(id, job_id) in OPERATIONS {
        list.insert(Operation::new(id, job_id));
    }
    list
}

/// The demo execution index with the default bucket count
pub fn executions() -> ExecIndex {
    fill(ExecIndex::new())
}

/// The demo execution index with an explicit bucket count
pub fn executions_with_buckets(bucket_count: usize) -> StoreResult<ExecIndex> {
    Ok(fill(ExecIndex::with_buckets(bucket_count)?))
}

fn fill(mut index: ExecIndex) -> ExecIndex {
    for &(operation_id, machine_id, runtime) in EXECUTIONS {
        index.insert(Execution::new(operation_id, machine_id, runtime));
    }
    index
}
