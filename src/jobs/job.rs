//! # Job abstraction.
//!
//! A [`Job`] is a deferred, zero-argument unit of work. The runner calls
//! [`Job::invoke`] exactly once, at the moment the job is admitted, and the
//! job answers with an [`Outcome`]. The common handle type is [`JobRef`], a
//! boxed trait object so a single run can mix synchronous and asynchronous
//! jobs.

use crate::jobs::outcome::Outcome;

/// # Deferred unit of work.
///
/// `invoke` consumes the job, so a job can never run twice.
///
/// # Example
/// ```
/// use jobrunner::{Job, JobError, JobRef, Outcome};
///
/// struct Answer;
///
/// impl Job<u32, JobError> for Answer {
///     fn invoke(self: Box<Self>) -> Outcome<u32, JobError> {
///         Outcome::ready(42)
///     }
/// }
///
/// let job: JobRef<u32, JobError> = Box::new(Answer);
/// assert!(job.invoke().is_ready());
/// ```
pub trait Job<T, E>: Send + 'static {
    /// Starts the job and reports what it produced.
    ///
    /// Runs on the scheduling loop; heavy work belongs in the returned future.
    fn invoke(self: Box<Self>) -> Outcome<T, E>;
}

/// Owned handle to a job, as accepted by [`Runner::run`](crate::Runner::run).
pub type JobRef<T, E> = Box<dyn Job<T, E>>;
