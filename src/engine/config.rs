//! # Runner configuration.
//!
//! Provides [`RunnerConfig`], the settings a [`Runner`](crate::Runner) is
//! built from. The configuration is fixed for the runner's lifetime.
//!
//! ## Sentinel values
//! - `concurrency = 0` → invalid, treated as `1` (see [`RunnerConfig::concurrency_limit`])

/// Default number of jobs allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Configuration for a [`Runner`](crate::Runner).
///
/// ## Field semantics
/// - `concurrency`: maximum number of admitted-but-unsettled jobs (`0` = use `1`)
///
/// ## Notes
/// The field is public for struct-literal construction. Read it through
/// [`RunnerConfig::concurrency_limit`] so the `0` sentinel is never observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Maximum number of jobs in flight at once.
    ///
    /// - `0` = invalid, clamped to `1`
    /// - `n > 0` = at most `n` jobs are admitted and unsettled simultaneously
    pub concurrency: usize,
}

impl RunnerConfig {
    /// Creates a configuration with the given concurrency.
    pub fn new(concurrency: usize) -> Self {
        Self { concurrency }
    }

    /// Returns the effective concurrency limit, clamped to a minimum of 1.
    #[inline]
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency.max(DEFAULT_CONCURRENCY)
    }
}

impl Default for RunnerConfig {
    /// Default configuration: `concurrency = 1` (strictly sequential).
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sequential() {
        assert_eq!(RunnerConfig::default().concurrency_limit(), 1);
    }

    #[test]
    fn zero_is_clamped_to_one() {
        assert_eq!(RunnerConfig::new(0).concurrency_limit(), 1);
    }

    #[test]
    fn positive_values_pass_through() {
        for n in [1, 3, 64] {
            assert_eq!(RunnerConfig::new(n).concurrency_limit(), n);
        }
    }
}
