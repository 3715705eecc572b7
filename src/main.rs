//! Flexshop demo binary
//!
//! Walks the full workflow against the demo dataset: seed the catalogs and
//! the execution index, persist everything to binary files, reload, mutate
//! (insert, cascade delete, runtime update), and run the aggregation
//! queries.

use anyhow::Context;
use clap::Parser;
use flexshop::config::Config;
use flexshop::index::ExecIndex;
use flexshop::query::{average_runtime, max_completion_time, min_completion_time};
use flexshop::seed;
use flexshop::store::{Execution, Job, JobList, MachineList, Operation, OperationList};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flexshop", version, about = "Flexible job-shop data store demo")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print the execution index after the run
    #[arg(long)]
    show_index: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("flexshop={}", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Flexshop v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.storage.data_dir);

    // 1. seed the in-memory structures
    let mut jobs = seed::jobs();
    let mut machines = seed::machines();
    let mut operations = seed::operations();
    let mut index = seed::executions_with_buckets(config.storage.bucket_count)?;
    tracing::info!(
        "Seeded {} jobs, {} machines, {} operations, {} executions",
        jobs.len(),
        machines.len(),
        operations.len(),
        index.len()
    );

    // 2. persist everything, then reload from the files
    let storage = &config.storage;
    jobs.to_file(&storage.jobs_path()).context("writing jobs")?;
    machines
        .to_file(&storage.machines_path())
        .context("writing machines")?;
    operations
        .to_file(&storage.operations_path())
        .context("writing operations")?;
    index
        .to_file(&storage.executions_path())
        .context("writing executions")?;
    tracing::info!("Exported all entities");

    jobs = JobList::from_file(&storage.jobs_path())?;
    machines = MachineList::from_file(&storage.machines_path())?;
    operations = OperationList::from_file(&storage.operations_path())?;
    index = ExecIndex::from_file_with_buckets(&storage.executions_path(), storage.bucket_count)?;
    tracing::info!(
        "Reloaded {} jobs, {} machines, {} operations, {} executions",
        jobs.len(),
        machines.len(),
        operations.len(),
        index.len()
    );

    // 3. insert a new job
    jobs.insert(Job::new(9));
    jobs.to_file(&storage.jobs_path())?;
    tracing::info!("Inserted job 9");

    // 4. remove a job and cascade into its operations and executions
    jobs.remove(3);
    let removed_ops = operations.remove_by_job(3);
    let mut purged = 0;
    for op in &removed_ops {
        purged += index.remove_operation(*op);
    }
    tracing::info!(
        "Removed job 3 with {} operations and {} executions",
        removed_ops.len(),
        purged
    );

    // 5. update one runtime
    if index.update_runtime(4, 4, 10) {
        tracing::info!("Updated runtime of operation 4 on machine 4 to 10");
    }

    // 6. remove a single operation and its executions
    operations.remove(35);
    let purged = index.remove_operation(35);
    tracing::info!("Removed operation 35 with {} executions", purged);

    // 7. insert a new operation with one execution
    operations.insert(Operation::new(39, 2));
    index.insert(Execution::new(39, 5, 17));
    operations.to_file(&storage.operations_path())?;
    index.to_file(&storage.executions_path())?;
    tracing::info!("Inserted operation 39 for job 2");

    // 8. aggregation queries over a snapshot
    let snapshot = index.flatten();

    let best = min_completion_time(&operations, &snapshot, 1)?;
    tracing::info!(
        "Job 1 best-case completion: {} time units over {} operations",
        best.total,
        best.choices.len()
    );

    let worst = max_completion_time(&operations, &snapshot, 1)?;
    tracing::info!("Job 1 worst-case completion: {} time units", worst.total);

    let avg = average_runtime(&snapshot, 4)?;
    tracing::info!("Operation 4 average runtime: {:.1}", avg);

    if args.show_index {
        println!("{}", index);
    }

    Ok(())
}
