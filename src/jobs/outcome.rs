//! # Result of invoking a job.
//!
//! A job either knows its answer right away or hands back a future that will
//! produce it later. [`Outcome`] carries both shapes so the runner can treat
//! them through one settlement path:
//!
//! ```text
//! job.invoke() ─┬─► Outcome::Ready(Ok/Err)  ─► settle now
//!               └─► Outcome::Pending(fut)   ─► settle when fut resolves
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by an asynchronous job.
pub type BoxJobFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// What a job produced when it was invoked.
pub enum Outcome<T, E> {
    /// The job finished synchronously.
    Ready(Result<T, E>),
    /// The job started asynchronous work that settles later.
    Pending(BoxJobFuture<T, E>),
}

impl<T, E> Outcome<T, E> {
    /// Synchronous success.
    pub fn ready(value: T) -> Self {
        Outcome::Ready(Ok(value))
    }

    /// Synchronous failure.
    pub fn failed(error: E) -> Self {
        Outcome::Ready(Err(error))
    }

    /// Wraps a future that settles later.
    pub fn pending<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Outcome::Pending(Box::pin(fut))
    }

    /// Returns `true` if the outcome is already known.
    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(res: Result<T, E>) -> Self {
        Outcome::Ready(res)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(res) => f.debug_tuple("Ready").field(res).finish(),
            Outcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
