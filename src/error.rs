//! Error types used by the runner and by jobs.
//!
//! The runner itself never invents errors: [`Runner::run`](crate::Runner::run)
//! fails with whatever error the first failing job produced. This module holds
//! the two types that sit at that boundary:
//!
//! - [`JobPanic`] — a panic caught while invoking or polling a job.
//! - [`JobError`] — a ready-made job error for callers without their own type.
//!
//! Both provide `as_label` / `as_message` helpers for logs.

use std::any::Any;

use thiserror::Error;

/// # A panic captured at a job boundary.
///
/// The runner wraps every job invocation (and every poll of a pending job)
/// in an unwind guard. A caught panic becomes a `JobPanic` and is converted
/// into the run's error type through `From<JobPanic>`, so it travels the same
/// failure path as an ordinary `Err`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("job {slot} panicked: {message}")]
pub struct JobPanic {
    /// Input position of the panicking job.
    pub slot: usize,
    /// Panic payload rendered as text (`"<non-string panic payload>"` otherwise).
    pub message: String,
}

impl JobPanic {
    /// Builds a `JobPanic` from a raw unwind payload.
    pub(crate) fn from_payload(slot: usize, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "<non-string panic payload>".to_string()
        };
        Self { slot, message }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        "job_panicked"
    }

    /// Returns a human-readable message with details about the panic.
    pub fn as_message(&self) -> String {
        format!("panic in slot {}: {}", self.slot, self.message)
    }
}

/// # General-purpose job error.
///
/// Jobs may fail with any error type `E` that implements `From<JobPanic>`;
/// `JobError` is the one shipped with the crate.
///
/// # Example
/// ```
/// use jobrunner::JobError;
///
/// let err = JobError::fail("shoo");
/// assert_eq!(err.to_string(), "job failed: shoo");
/// assert_eq!(err.as_label(), "job_failed");
/// ```
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// Job reported a failure.
    #[error("job failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Job panicked instead of returning.
    #[error(transparent)]
    Panicked(#[from] JobPanic),
}

impl JobError {
    /// Shorthand for [`JobError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        JobError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            JobError::Fail { .. } => "job_failed",
            JobError::Panicked(p) => p.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            JobError::Fail { error } => format!("error: {error}"),
            JobError::Panicked(p) => p.as_message(),
        }
    }
}
