//! # Job abstractions.
//!
//! This module provides the job-related types:
//! - [`Job`] - trait for a deferred unit of work, invoked at most once
//! - [`JobRef`] - owned handle to a job (`Box<dyn Job>`)
//! - [`JobFn`] - closure-backed job, plus the [`sync_job`] / [`async_job`] shorthands
//! - [`Outcome`] - what an invoked job produced (ready result or pending future)

mod job;
mod job_fn;
mod outcome;

pub use job::{Job, JobRef};
pub use job_fn::{JobFn, async_job, sync_job};
pub use outcome::{BoxJobFuture, Outcome};
