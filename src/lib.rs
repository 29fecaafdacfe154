//! # jobrunner
//!
//! **jobrunner** runs an ordered batch of jobs with bounded concurrency.
//!
//! Results come back in input order no matter which job finishes first, and
//! the first failure ends the run immediately while scheduling stops.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  JobRef #0   │   │  JobRef #1   │   │  JobRef #N   │
//!     │ (sync/async) │   │ (sync/async) │   │ (sync/async) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Runner::run (one scheduling loop per call)                       │
//! │  - RunState (cursor, in-flight count, result slots, failure)      │
//! │  - invoke() behind an unwind guard                                │
//! │  - FuturesUnordered of pending jobs, tagged by slot               │
//! └──────┬──────────────────────────────────────────────────┬─────────┘
//!        ▼                                                  ▼
//!   Ok(Vec<T>) in slot order                  Err(first failure)
//!                                                           │
//!                                                           ▼
//!                                        TaskTracker (detached in-flight jobs,
//!                                         polled to completion, outcomes dropped)
//! ```
//!
//! ### Lifecycle
//! ```text
//! loop {
//!   ├─► while in_flight < concurrency && cursor < len && !failed:
//!   │       cursor += 1; in_flight += 1; job.invoke()
//!   │           ├─ Outcome::Ready(Ok)   ─► results[slot] = v; in_flight -= 1
//!   │           ├─ Outcome::Ready(Err)  ─► failure = e (first wins)
//!   │           ├─ panic                ─► failure = E::from(JobPanic)
//!   │           └─ Outcome::Pending     ─► push onto pending set
//!   ├─► failure?       ─► detach pending, return Err(e)
//!   ├─► nothing left?  ─► return Ok(results)
//!   └─► await next pending settlement ─► same handling as Ready
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types                              |
//! |-------------------|--------------------------------------------------------------|----------------------------------------|
//! | **Execution**     | Bounded, ordered, fail-fast batch execution.                 | [`Runner`], [`run_all`]                |
//! | **Jobs**          | Sync or async jobs, mixed freely in one batch.               | [`Job`], [`JobFn`], [`Outcome`]        |
//! | **Errors**        | Job errors pass through untouched; panics become errors.     | [`JobError`], [`JobPanic`]             |
//! | **Configuration** | Concurrency limit, default `1`.                              | [`RunnerConfig`]                       |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use jobrunner::{async_job, sync_job, JobError, JobRef, Runner, RunnerConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = Runner::new(RunnerConfig { concurrency: 3 });
//!
//!     let jobs: Vec<JobRef<u64, JobError>> = (0..6u64)
//!         .map(|i| {
//!             async_job(move || async move {
//!                 tokio::time::sleep(Duration::from_millis(10 * (6 - i))).await;
//!                 Ok(i)
//!             })
//!         })
//!         .chain([sync_job(|| Ok(6))])
//!         .collect();
//!
//!     let out = runner.run(jobs).await?;
//!     assert_eq!(out, vec![0, 1, 2, 3, 4, 5, 6]);
//!     Ok(())
//! }
//! ```
mod engine;
mod error;
mod jobs;

// ---- Public re-exports ----

pub use engine::{DEFAULT_CONCURRENCY, Runner, RunnerConfig, run_all};
pub use error::{JobError, JobPanic};
pub use jobs::{BoxJobFuture, Job, JobFn, JobRef, Outcome, async_job, sync_job};
