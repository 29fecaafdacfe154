//! # Invoke a single job behind an unwind guard.
//!
//! Calls [`Job::invoke`] for one admitted job and normalizes whatever comes
//! back into an [`Admitted`] value the scheduling loop understands.
//!
//! ## Flow
//!
//! ```text
//! Synchronous:
//!   job.invoke() → Outcome::Ready(res)        → Admitted::Settled(res)
//!
//! Asynchronous:
//!   job.invoke() → Outcome::Pending(fut)      → Admitted::InFlight(guarded fut)
//!
//! Panic during invoke:
//!   job.invoke() → unwind                     → Admitted::Settled(Err(JobPanic.into()))
//!
//! Panic while polling:
//!   guarded fut  → unwind                     → (slot, Err(JobPanic.into()))
//! ```
//!
//! ## Rules
//! - The job is invoked **exactly once**, right here, at admission time
//! - A panic never escapes; it becomes the job's error through `From<JobPanic>`
//! - Pending futures are tagged with their slot so settlement can be placed

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;

use futures::FutureExt;

use crate::{
    error::JobPanic,
    jobs::{BoxJobFuture, JobRef, Outcome},
};

/// Pending job future tagged with its slot index.
pub(crate) type InFlight<T, E> = Pin<Box<dyn Future<Output = (usize, Result<T, E>)> + Send>>;

/// What the scheduling loop does with a freshly invoked job.
pub(crate) enum Admitted<T, E> {
    /// Outcome already known; settle immediately.
    Settled(Result<T, E>),
    /// Outcome arrives later through the tagged future.
    InFlight(InFlight<T, E>),
}

/// Invokes the job at `slot`, converting a panic into a failure.
pub(crate) fn invoke<T, E>(slot: usize, job: JobRef<T, E>) -> Admitted<T, E>
where
    T: Send + 'static,
    E: From<JobPanic> + Send + 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(move || job.invoke())) {
        Ok(Outcome::Ready(res)) => Admitted::Settled(res),
        Ok(Outcome::Pending(fut)) => Admitted::InFlight(guard(slot, fut)),
        Err(payload) => Admitted::Settled(Err(JobPanic::from_payload(slot, payload).into())),
    }
}

/// Tags `fut` with `slot` and catches panics raised while polling it.
fn guard<T, E>(slot: usize, fut: BoxJobFuture<T, E>) -> InFlight<T, E>
where
    T: Send + 'static,
    E: From<JobPanic> + Send + 'static,
{
    Box::pin(AssertUnwindSafe(fut).catch_unwind().map(move |res| {
        let res = match res {
            Ok(res) => res,
            Err(payload) => Err(JobPanic::from_payload(slot, payload).into()),
        };
        (slot, res)
    }))
}
