//! # Example: bounded
//!
//! Runs two batches of jobs through a [`Runner`] with concurrency 3 and
//! debug logging enabled.
//!
//! Demonstrates how to:
//! - Mix synchronous ([`sync_job`]) and asynchronous ([`async_job`]) jobs.
//! - Get results back in input order although jobs finish out of order.
//! - See the first failure end a run while in-flight jobs finish in the background.
//!
//! ## Flow
//! ```text
//! batch 1 ──► Runner::run()
//!     ├─► admit #0 #1 #2           (3 in flight)
//!     ├─► #2 settles ─► admit #3
//!     ├─► ...
//!     └─► Ok([..]) in input order
//!
//! batch 2 ──► Runner::run()
//!     ├─► admit #0 #1 #2
//!     ├─► #1 fails ─► Err("disk full"), #0 and #2 detached
//!     └─► Runner::wait_detached()
//! ```
//!
//! ## Run
//! ```bash
//! JOBRUNNER_LOG=trace cargo run --example bounded
//! ```

use std::time::Duration;

use jobrunner::{JobError, JobRef, Runner, RunnerConfig, async_job, sync_job};
use tracing_subscriber::EnvFilter;

fn sleepy(id: u64, ms: u64) -> JobRef<u64, JobError> {
    async_job(move || async move {
        println!("[job {id}] working for {ms}ms");
        tokio::time::sleep(Duration::from_millis(ms)).await;
        println!("[job {id}] done");
        Ok(id)
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logs to stderr, level from JOBRUNNER_LOG (default: debug)
    let filter = EnvFilter::try_from_env("JOBRUNNER_LOG").unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // 2. Runner with three slots
    let runner = Runner::new(RunnerConfig { concurrency: 3 });

    // 3. Successful batch: finishes out of order, collected in order
    let jobs = vec![
        sleepy(0, 300),
        sleepy(1, 100),
        sync_job(|| Ok(2)),
        sleepy(3, 200),
        sleepy(4, 50),
    ];
    let values = runner.run(jobs).await?;
    println!("results: {values:?}");

    // 4. Failing batch: error returned at once, the rest keeps running
    let jobs = vec![
        sleepy(10, 400),
        async_job(|| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Err(JobError::fail("disk full"))
        }),
        sleepy(12, 200),
        sleepy(13, 10),
    ];
    match runner.run(jobs).await {
        Ok(values) => println!("unexpected success: {values:?}"),
        Err(e) => println!("run failed: {e} ({})", e.as_label()),
    }

    runner.wait_detached().await;
    println!("detached jobs finished");
    Ok(())
}
