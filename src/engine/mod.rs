//! Execution engine: scheduling and settlement.
//!
//! This module contains the job execution engine. The public API from this
//! module is [`Runner`], its [`RunnerConfig`], and the [`run_all`] shorthand.
//!
//! Internal modules:
//! - [`config`]: runner settings and the concurrency default;
//! - [`invoke`]: invokes one admitted job behind an unwind guard;
//! - [`state`]: per-run cursor, in-flight count, result slots, first failure;
//! - [`runner`]: the admission/settlement loop and detaching of in-flight jobs.

mod config;
mod invoke;
mod runner;
mod state;

pub use config::{DEFAULT_CONCURRENCY, RunnerConfig};
pub use runner::{Runner, run_all};
