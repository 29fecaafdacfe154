//! # Runner: bounded-concurrency, ordered, fail-fast job execution.
//!
//! The [`Runner`] takes an ordered batch of jobs and drives them with at most
//! `concurrency` in flight, returning their values in input order.
//!
//! ## Scheduling loop
//! ```text
//! run(jobs)
//!   state = RunState::new(jobs)             (cursor = 0, in_flight = 0)
//!   loop {
//!     ├─► admit while in_flight < limit && cursor < len && !failed
//!     │     └─► invoke(slot, job)
//!     │           ├─ Settled(res)   ─► state.settle(slot, res)   (no suspension)
//!     │           └─ InFlight(fut)  ─► pending.push(fut)
//!     ├─► failure recorded?  ─► detach(pending), return Err(first failure)
//!     ├─► pending empty?     ─► return Ok(results in slot order)
//!     └─► await next settlement ─► state.settle(slot, res)
//!   }
//! ```
//!
//! ## Rules
//! - Admission is **FIFO** over the cursor; completion order is irrelevant
//! - A job is invoked **synchronously** when admitted
//! - The **first** failure wins; later outcomes are dropped
//! - In-flight jobs are **never cancelled** by a failure: they are detached
//!   onto the runner's tracker and polled to completion in the background
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use jobrunner::{async_job, sync_job, JobError, JobRef, Runner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), JobError> {
//!     let runner = Runner::with_concurrency(2);
//!
//!     let jobs: Vec<JobRef<&str, JobError>> = vec![
//!         async_job(|| async {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!             Ok("foo")
//!         }),
//!         sync_job(|| Ok("bar")),
//!     ];
//!
//!     assert_eq!(runner.run(jobs).await?, vec!["foo", "bar"]);
//!     Ok(())
//! }
//! ```

use std::thread;

use futures::StreamExt;
use futures::executor::block_on;
use futures::stream::FuturesUnordered;
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, trace, warn};

use crate::{
    engine::{
        config::RunnerConfig,
        invoke::{Admitted, InFlight, invoke},
        state::RunState,
    },
    error::JobPanic,
    jobs::JobRef,
};

/// Executes batches of jobs under a fixed concurrency limit.
///
/// A `Runner` holds no per-run state, so one instance may serve several
/// concurrent [`run`](Runner::run) calls; each call gets its own cursor and
/// result slots. Clones share the tracker of detached jobs.
#[derive(Clone, Debug)]
pub struct Runner {
    cfg: RunnerConfig,
    detached: TaskTracker,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl Runner {
    /// Creates a runner from `cfg`. The concurrency limit is fixed from here on.
    pub fn new(cfg: RunnerConfig) -> Self {
        Self {
            cfg,
            detached: TaskTracker::new(),
        }
    }

    /// Shorthand for `Runner::new(RunnerConfig::new(concurrency))`.
    pub fn with_concurrency(concurrency: usize) -> Self {
        Self::new(RunnerConfig::new(concurrency))
    }

    /// Effective concurrency limit (never zero).
    pub fn concurrency(&self) -> usize {
        self.cfg.concurrency_limit()
    }

    /// Builds a runner with `concurrency` and runs `jobs` on it.
    ///
    /// Same as [`run_all`](crate::run_all).
    pub async fn run_all<T, E, I>(jobs: I, concurrency: usize) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = JobRef<T, E>>,
        T: Send + 'static,
        E: From<JobPanic> + Send + 'static,
    {
        Runner::with_concurrency(concurrency).run(jobs).await
    }

    /// Runs `jobs`, returning their values in input order.
    ///
    /// Fails with the first job error as soon as it is observed, without
    /// waiting for other in-flight jobs. Those keep running in the background
    /// (see [`wait_detached`](Runner::wait_detached)); their outcomes are
    /// discarded. Jobs not yet admitted at that point are never invoked.
    ///
    /// A job that panics, while being invoked or polled, fails with
    /// `E::from(JobPanic)`.
    ///
    /// Dropping the returned future drops all in-flight jobs with it.
    pub async fn run<T, E, I>(&self, jobs: I) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = JobRef<T, E>>,
        T: Send + 'static,
        E: From<JobPanic> + Send + 'static,
    {
        let jobs: Vec<JobRef<T, E>> = jobs.into_iter().collect();
        let limit = self.concurrency();
        let total = jobs.len();
        debug!(jobs = total, concurrency = limit, "run started");

        let mut state = RunState::new(jobs);
        let mut pending: FuturesUnordered<InFlight<T, E>> = FuturesUnordered::new();

        loop {
            Self::admit(&mut state, &mut pending, limit);

            if let Some(err) = state.take_failure() {
                debug!(
                    admitted = state.admitted(),
                    jobs = total,
                    "run failed; admission stopped"
                );
                self.detach(pending);
                return Err(err);
            }

            let Some((slot, res)) = pending.next().await else {
                break;
            };
            Self::settle(&mut state, slot, res);
        }

        debug_assert!(state.is_complete());
        debug!(jobs = total, "run finished");
        match state.into_results() {
            Some(values) => Ok(values),
            None => unreachable!("run finished with unfilled result slots"),
        }
    }

    /// Waits until every job detached by a failed run on this runner (or its
    /// clones) has finished.
    pub async fn wait_detached(&self) {
        self.detached.close();
        self.detached.wait().await;
        self.detached.reopen();
    }

    /// Number of detached background drains still running.
    pub fn detached_count(&self) -> usize {
        self.detached.len()
    }

    /// Admits jobs until the limit is hit, the queue is drained, or something fails.
    fn admit<T, E>(
        state: &mut RunState<T, E>,
        pending: &mut FuturesUnordered<InFlight<T, E>>,
        limit: usize,
    ) where
        T: Send + 'static,
        E: From<JobPanic> + Send + 'static,
    {
        while let Some((slot, job)) = state.admit(limit) {
            trace!(slot, in_flight = state.in_flight(), "job admitted");
            match invoke(slot, job) {
                Admitted::Settled(res) => Self::settle(state, slot, res),
                Admitted::InFlight(fut) => pending.push(fut),
            }
        }
    }

    fn settle<T, E>(state: &mut RunState<T, E>, slot: usize, res: Result<T, E>) {
        let ok = res.is_ok();
        if state.settle(slot, res) {
            debug!(slot, "first job failure recorded");
        } else {
            trace!(slot, ok, in_flight = state.in_flight(), "job settled");
        }
    }

    /// Hands still-running jobs to a background task that polls them to completion.
    ///
    /// Inside a tokio runtime the drain is spawned onto it; otherwise it runs
    /// on a dedicated thread under `futures::executor::block_on`. Either way
    /// it is counted by the runner's tracker.
    fn detach<T, E>(&self, mut pending: FuturesUnordered<InFlight<T, E>>)
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        if pending.is_empty() {
            return;
        }
        let count = pending.len();
        let drain = self
            .detached
            .track_future(async move { while pending.next().await.is_some() {} });

        match Handle::try_current() {
            Ok(handle) => {
                debug!(in_flight = count, "detaching in-flight jobs");
                handle.spawn(drain);
            }
            Err(_) => {
                debug!(in_flight = count, "detaching in-flight jobs onto a drain thread");
                let spawned = thread::Builder::new()
                    .name("jobrunner-drain".into())
                    .spawn(move || block_on(drain));
                if let Err(e) = spawned {
                    warn!(
                        in_flight = count,
                        error = %e,
                        "failed to spawn drain thread; in-flight jobs dropped"
                    );
                }
            }
        }
    }
}

/// Runs `jobs` with at most `concurrency` in flight.
///
/// Convenience for `Runner::with_concurrency(concurrency).run(jobs)`;
/// `concurrency = 0` falls back to `1`.
pub async fn run_all<T, E, I>(jobs: I, concurrency: usize) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = JobRef<T, E>>,
    T: Send + 'static,
    E: From<JobPanic> + Send + 'static,
{
    Runner::run_all(jobs, concurrency).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use futures::channel::oneshot;

    use super::*;
    use crate::error::JobError;
    use crate::jobs::{async_job, sync_job};

    #[test]
    fn default_runner_is_sequential() {
        assert_eq!(Runner::default().concurrency(), 1);
        assert_eq!(Runner::with_concurrency(0).concurrency(), 1);
        assert_eq!(Runner::with_concurrency(4).concurrency(), 4);
    }

    #[test]
    fn sync_jobs_need_no_runtime() {
        let runner = Runner::with_concurrency(2);
        let jobs: Vec<JobRef<usize, JobError>> =
            (0..5).map(|i| sync_job(move || Ok(i * i))).collect();
        assert_eq!(block_on(runner.run(jobs)), Ok(vec![0, 1, 4, 9, 16]));
    }

    #[test]
    fn sync_failure_stops_admission() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let jobs: Vec<JobRef<(), JobError>> = (0..4)
            .map(|i| {
                let invoked = invoked.clone();
                sync_job(move || {
                    invoked.fetch_add(1, Ordering::SeqCst);
                    if i == 1 {
                        Err(JobError::fail("shoo"))
                    } else {
                        Ok(())
                    }
                })
            })
            .collect();

        let res = block_on(Runner::with_concurrency(3).run(jobs));
        assert_eq!(res, Err(JobError::fail("shoo")));
        assert_eq!(invoked.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn in_flight_jobs_finish_without_runtime() {
        let (tx, rx) = oneshot::channel::<()>();
        let finished = Arc::new(AtomicBool::new(false));
        let f = finished.clone();

        let runner = Runner::with_concurrency(2);
        let jobs: Vec<JobRef<(), JobError>> = vec![
            async_job(move || async move {
                let _ = rx.await;
                f.store(true, Ordering::SeqCst);
                Ok(())
            }),
            async_job(|| async { Err(JobError::fail("boom")) }),
        ];

        assert_eq!(block_on(runner.run(jobs)), Err(JobError::fail("boom")));
        assert!(!finished.load(Ordering::SeqCst));
        assert_eq!(runner.detached_count(), 1);

        // The receiver is still alive, so the job was not dropped.
        assert!(tx.send(()).is_ok());
        block_on(runner.wait_detached());
        assert!(finished.load(Ordering::SeqCst));
        assert_eq!(runner.detached_count(), 0);
    }

    #[test]
    fn empty_batch_resolves_to_empty() {
        let jobs: Vec<JobRef<u8, JobError>> = Vec::new();
        assert_eq!(block_on(Runner::default().run(jobs)), Ok(vec![]));
    }

    #[tokio::test]
    async fn mixed_jobs_produce_uniform_results() {
        let jobs: Vec<JobRef<&str, JobError>> = vec![
            sync_job(|| Ok("foo")),
            async_job(|| async { Ok("bar") }),
        ];
        assert_eq!(Runner::default().run(jobs).await, Ok(vec!["foo", "bar"]));
    }

    #[tokio::test]
    async fn run_all_delegates_to_runner() {
        let jobs: Vec<JobRef<i32, JobError>> = vec![sync_job(|| Ok(1)), sync_job(|| Ok(2))];
        assert_eq!(run_all(jobs, 0).await, Ok(vec![1, 2]));
    }
}
