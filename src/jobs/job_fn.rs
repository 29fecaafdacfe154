//! # Function-backed job (`JobFn`)
//!
//! [`JobFn`] wraps a closure `F: FnOnce() -> Outcome<T, E>`. The closure is
//! called when the job is admitted, never earlier.
//!
//! Most callers reach for the shorthands instead:
//! - [`sync_job`] for closures returning `Result<T, E>` directly;
//! - [`async_job`] for closures returning a future.
//!
//! ## Example
//! ```rust
//! use jobrunner::{async_job, sync_job, JobError, JobRef};
//!
//! let jobs: Vec<JobRef<&str, JobError>> = vec![
//!     sync_job(|| Ok("foo")),
//!     async_job(|| async { Ok("bar") }),
//! ];
//! assert_eq!(jobs.len(), 2);
//! ```

use std::future::Future;

use crate::jobs::job::{Job, JobRef};
use crate::jobs::outcome::Outcome;

/// Closure-backed job implementation.
#[derive(Debug)]
pub struct JobFn<F> {
    f: F,
}

impl<F> JobFn<F> {
    /// Creates a new function-backed job.
    ///
    /// Prefer [`JobFn::boxed`] when you immediately need a [`JobRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the job and boxes it.
    ///
    /// ## Example
    /// ```rust
    /// use jobrunner::{JobError, JobFn, JobRef, Outcome};
    ///
    /// let job: JobRef<i32, JobError> = JobFn::boxed(|| Outcome::ready(7));
    /// assert!(job.invoke().is_ready());
    /// ```
    pub fn boxed(f: F) -> Box<Self> {
        Box::new(Self::new(f))
    }
}

impl<F, T, E> Job<T, E> for JobFn<F>
where
    F: FnOnce() -> Outcome<T, E> + Send + 'static,
{
    fn invoke(self: Box<Self>) -> Outcome<T, E> {
        (self.f)()
    }
}

/// Job whose closure returns its result synchronously.
pub fn sync_job<T, E, F>(f: F) -> JobRef<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: 'static,
    E: 'static,
{
    JobFn::boxed(move || -> Outcome<T, E> { f().into() })
}

/// Job whose closure starts a future; the future is polled by the runner.
pub fn async_job<T, E, F, Fut>(f: F) -> JobRef<T, E>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: 'static,
    E: 'static,
{
    JobFn::boxed(move || Outcome::pending(f()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::JobError;

    #[test]
    fn closure_is_not_called_before_invoke() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let job: JobRef<(), JobError> = sync_job(move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let out = job.invoke();
        assert!(matches!(out, Outcome::Ready(Ok(()))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn async_job_is_pending_until_polled() {
        let job: JobRef<&str, JobError> = async_job(|| async { Ok("bar") });
        match job.invoke() {
            Outcome::Pending(fut) => {
                assert_eq!(futures::executor::block_on(fut), Ok("bar"));
            }
            other => panic!("expected pending, got {other:?}"),
        }
    }

    #[test]
    fn job_fn_can_fail_synchronously() {
        let job: JobRef<u8, JobError> =
            JobFn::boxed(|| -> Outcome<u8, JobError> { Outcome::failed(JobError::fail("nope")) });
        match job.invoke() {
            Outcome::Ready(Err(e)) => assert_eq!(e, JobError::fail("nope")),
            other => panic!("expected synchronous failure, got {other:?}"),
        }
    }

    #[test]
    fn result_converts_into_ready_outcome() {
        let ok: Outcome<u8, JobError> = Ok(3).into();
        let err: Outcome<u8, JobError> = Err(JobError::fail("x")).into();
        assert!(matches!(ok, Outcome::Ready(Ok(3))));
        assert!(matches!(err, Outcome::Ready(Err(JobError::Fail { .. }))));
    }

    #[test]
    fn sync_failure_is_ready_err() {
        let job: JobRef<(), JobError> = sync_job(|| Err(JobError::fail("shoo")));
        assert!(matches!(job.invoke(), Outcome::Ready(Err(JobError::Fail { .. }))));
    }
}
