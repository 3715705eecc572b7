//! Aggregation queries over operations and executions
//!
//! Read-only joins between the operation catalog and a flattened execution
//! chain (a snapshot, typically [`crate::index::ExecIndex::flatten`]):
//! per-job best/worst-case completion time and per-operation average
//! runtime. Nothing here sequences work or resolves machine conflicts; these
//! are aggregates over stored alternatives only.

use crate::index::ExecChain;
use crate::query::error::{QueryError, QueryResult};
use crate::store::catalog::OperationList;
use crate::store::types::Execution;

/// Completion time of one job under a fixed choice rule
#[derive(Debug, Clone)]
pub struct CompletionTime {
    /// Sum of the winning runtimes across the job's covered operations
    pub total: u32,
    /// The winning alternative per covered operation, front-inserted (so in
    /// reverse catalog traversal order)
    pub choices: ExecChain,
    /// Operations of the job with no recorded alternative; they contribute
    /// nothing to the total
    pub uncovered: Vec<u32>,
}

/// Best-case completion time: per operation of the job, the cheapest
/// alternative.
///
/// Errors on an empty catalog or execution chain. An operation without
/// alternatives is skipped and reported in
/// [`CompletionTime::uncovered`] rather than folded into the sum.
pub fn min_completion_time(
    operations: &OperationList,
    executions: &ExecChain,
    job_id: u32,
) -> QueryResult<CompletionTime> {
    completion_time(operations, executions, job_id, |best, candidate| {
        candidate < best
    })
}

/// Worst-case completion time: per operation of the job, the slowest
/// alternative. Mirror of [`min_completion_time`].
pub fn max_completion_time(
    operations: &OperationList,
    executions: &ExecChain,
    job_id: u32,
) -> QueryResult<CompletionTime> {
    completion_time(operations, executions, job_id, |best, candidate| {
        candidate > best
    })
}

fn completion_time(
    operations: &OperationList,
    executions: &ExecChain,
    job_id: u32,
    better: impl Fn(u32, u32) -> bool,
) -> QueryResult<CompletionTime> {
    if operations.is_empty() {
        return Err(QueryError::EmptyInput("operation list"));
    }
    if executions.is_empty() {
        return Err(QueryError::EmptyInput("execution chain"));
    }

    let mut total = 0u32;
    let mut choices = ExecChain::new();
    let mut uncovered = Vec::new();

    for operation in operations.operations_of(job_id) {
        let mut winner: Option<&Execution> = None;

        // full scan of the execution snapshot; ties keep the first record
        // encountered in chain order
        for exec in executions.iter() {
            if exec.operation_id == operation.id
                && winner.map_or(true, |best| better(best.runtime, exec.runtime))
            {
                winner = Some(exec);
            }
        }

        match winner {
            Some(exec) => {
                total += exec.runtime;
                choices.push_front(*exec);
            }
            None => uncovered.push(operation.id),
        }
    }

    Ok(CompletionTime {
        total,
        choices,
        uncovered,
    })
}

/// Arithmetic mean runtime across every alternative of an operation.
///
/// An empty execution chain is an error; a non-empty chain with no record
/// for the operation yields 0.0. The asymmetry is kept from the reference
/// behavior: an absent operation is an answerable question, an empty
/// snapshot is not.
pub fn average_runtime(executions: &ExecChain, operation_id: u32) -> QueryResult<f64> {
    if executions.is_empty() {
        return Err(QueryError::EmptyInput("execution chain"));
    }

    let mut sum = 0u64;
    let mut count = 0u64;

    for exec in executions.iter() {
        if exec.operation_id == operation_id {
            sum += u64::from(exec.runtime);
            count += 1;
        }
    }

    if count == 0 {
        return Ok(0.0);
    }
    Ok(sum as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{ExecKey, Operation};

    fn scenario() -> (OperationList, ExecChain) {
        // job 1 with operations 1 (alternatives 4, 5) and 2 (alternatives 6, 9)
        let mut operations = OperationList::new();
        operations.insert(Operation::new(1, 1));
        operations.insert(Operation::new(2, 1));

        let mut executions = ExecChain::new();
        executions.push_front(Execution::new(1, 1, 4));
        executions.push_front(Execution::new(1, 3, 5));
        executions.push_front(Execution::new(2, 2, 6));
        executions.push_front(Execution::new(2, 4, 9));

        (operations, executions)
    }

    #[test]
    fn test_min_completion_time() {
        let (operations, executions) = scenario();
        let result = min_completion_time(&operations, &executions, 1).unwrap();

        assert_eq!(result.total, 10); // 4 + 6
        assert!(result.uncovered.is_empty());

        let keys: Vec<ExecKey> = result.choices.iter().map(|e| e.key()).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&ExecKey::new(1, 1)));
        assert!(keys.contains(&ExecKey::new(2, 2)));
    }

    #[test]
    fn test_max_completion_time() {
        let (operations, executions) = scenario();
        let result = max_completion_time(&operations, &executions, 1).unwrap();

        assert_eq!(result.total, 14); // 5 + 9
        let keys: Vec<ExecKey> = result.choices.iter().map(|e| e.key()).collect();
        assert!(keys.contains(&ExecKey::new(1, 3)));
        assert!(keys.contains(&ExecKey::new(2, 4)));
    }

    #[test]
    fn test_choices_are_front_inserted() {
        let (operations, executions) = scenario();
        let result = min_completion_time(&operations, &executions, 1).unwrap();

        // catalog traversal visits operation 2 then 1 (front insertion),
        // winners are prepended, so the output starts with operation 1
        let ops: Vec<u32> = result.choices.iter().map(|e| e.operation_id).collect();
        assert_eq!(ops, vec![1, 2]);
    }

    #[test]
    fn test_uncovered_operation_contributes_nothing() {
        let (mut operations, executions) = scenario();
        operations.insert(Operation::new(3, 1)); // no alternatives recorded

        let result = min_completion_time(&operations, &executions, 1).unwrap();
        assert_eq!(result.total, 10);
        assert_eq!(result.uncovered, vec![3]);
        assert_eq!(result.choices.len(), 2);
    }

    #[test]
    fn test_unknown_job_yields_zero() {
        let (operations, executions) = scenario();
        let result = min_completion_time(&operations, &executions, 42).unwrap();

        assert_eq!(result.total, 0);
        assert!(result.choices.is_empty());
        assert!(result.uncovered.is_empty());
    }

    #[test]
    fn test_empty_inputs_are_errors() {
        let (operations, executions) = scenario();

        assert!(matches!(
            min_completion_time(&OperationList::new(), &executions, 1),
            Err(QueryError::EmptyInput("operation list"))
        ));
        assert!(matches!(
            max_completion_time(&operations, &ExecChain::new(), 1),
            Err(QueryError::EmptyInput("execution chain"))
        ));
    }

    #[test]
    fn test_tie_keeps_first_in_chain_order() {
        let mut operations = OperationList::new();
        operations.insert(Operation::new(1, 1));

        let mut executions = ExecChain::new();
        executions.push_front(Execution::new(1, 1, 4));
        executions.push_front(Execution::new(1, 2, 4));

        // chain order is (1,2) then (1,1); the strict comparison keeps (1,2)
        let result = min_completion_time(&operations, &executions, 1).unwrap();
        assert_eq!(result.choices.last().unwrap().key(), ExecKey::new(1, 2));
    }

    #[test]
    fn test_average_runtime() {
        let mut executions = ExecChain::new();
        executions.push_front(Execution::new(1, 1, 4));
        executions.push_front(Execution::new(1, 3, 5));
        executions.push_front(Execution::new(1, 5, 9));
        executions.push_front(Execution::new(2, 2, 100));

        assert_eq!(average_runtime(&executions, 1).unwrap(), 6.0);
    }

    #[test]
    fn test_average_runtime_asymmetry() {
        // empty chain is an error
        assert!(matches!(
            average_runtime(&ExecChain::new(), 1),
            Err(QueryError::EmptyInput(_))
        ));

        // no matches in a non-empty chain is zero, not an error
        let mut executions = ExecChain::new();
        executions.push_front(Execution::new(2, 2, 5));
        assert_eq!(average_runtime(&executions, 1).unwrap(), 0.0);
    }
}
