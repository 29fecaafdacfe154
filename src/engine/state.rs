//! # Per-run scheduling state.
//!
//! [`RunState`] is created fresh by every [`Runner::run`](crate::Runner::run)
//! call and dropped when it returns. It is owned by the scheduling loop and
//! never shared, so it needs no synchronization.
//!
//! ## Invariants
//! - `in_flight <= limit` after every [`RunState::admit`]
//! - a value settles into `results[slot]`, never anywhere else
//! - once `failure` is set, `admit` returns `None` forever
//! - the first recorded failure is never overwritten

use std::collections::VecDeque;

use crate::jobs::JobRef;

/// Cursor, in-flight counter, result slots and first failure for one run.
pub(crate) struct RunState<T, E> {
    queue: VecDeque<JobRef<T, E>>,
    cursor: usize,
    in_flight: usize,
    results: Vec<Option<T>>,
    failure: Option<E>,
    failed: bool,
}

impl<T, E> RunState<T, E> {
    /// Fresh state for `jobs`, one empty result slot per job.
    pub(crate) fn new(jobs: Vec<JobRef<T, E>>) -> Self {
        let total = jobs.len();
        let mut results = Vec::with_capacity(total);
        results.resize_with(total, || None);
        Self {
            queue: jobs.into(),
            cursor: 0,
            in_flight: 0,
            results,
            failure: None,
            failed: false,
        }
    }

    /// Admits the job at the cursor if a slot is free and nothing has failed.
    ///
    /// Advances the cursor and counts the job as in flight; the caller must
    /// invoke it and later report back through [`RunState::settle`].
    pub(crate) fn admit(&mut self, limit: usize) -> Option<(usize, JobRef<T, E>)> {
        if self.failed || self.in_flight >= limit {
            return None;
        }
        let job = self.queue.pop_front()?;
        let slot = self.cursor;
        self.cursor += 1;
        self.in_flight += 1;
        Some((slot, job))
    }

    /// Records the outcome of the job at `slot` and frees its concurrency slot.
    ///
    /// Returns `true` if this settlement recorded the run's first failure.
    pub(crate) fn settle(&mut self, slot: usize, res: Result<T, E>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match res {
            Ok(value) if !self.failed => {
                if let Some(cell) = self.results.get_mut(slot) {
                    *cell = Some(value);
                }
                false
            }
            Err(err) if !self.failed => {
                self.failed = true;
                self.failure = Some(err);
                true
            }
            // After the first failure every outcome is dropped.
            _ => false,
        }
    }

    /// Takes the recorded failure, if any. Admission stays closed afterwards.
    pub(crate) fn take_failure(&mut self) -> Option<E> {
        self.failure.take()
    }

    /// Number of admitted jobs that have not settled yet.
    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Number of jobs admitted so far.
    pub(crate) fn admitted(&self) -> usize {
        self.cursor
    }

    /// `true` once every job was admitted and settled without failure.
    pub(crate) fn is_complete(&self) -> bool {
        !self.failed && self.queue.is_empty() && self.in_flight == 0
    }

    /// Consumes the state, returning values in input order.
    ///
    /// `None` if any slot is still empty; a completed run never has one.
    pub(crate) fn into_results(self) -> Option<Vec<T>> {
        self.results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobError;
    use crate::jobs::sync_job;

    fn jobs(n: usize) -> Vec<JobRef<usize, JobError>> {
        (0..n).map(|i| sync_job(move || Ok(i))).collect()
    }

    #[test]
    fn admission_respects_limit() {
        let mut st = RunState::new(jobs(5));
        assert_eq!(st.admit(2).map(|(s, _)| s), Some(0));
        assert_eq!(st.admit(2).map(|(s, _)| s), Some(1));
        assert!(st.admit(2).is_none());
        assert_eq!(st.in_flight(), 2);

        st.settle(1, Ok(10));
        assert_eq!(st.admit(2).map(|(s, _)| s), Some(2));
        assert_eq!(st.admitted(), 3);
    }

    #[test]
    fn values_land_in_their_slots() {
        let mut st = RunState::new(jobs(3));
        while st.admit(3).is_some() {}
        st.settle(2, Ok(20));
        st.settle(0, Ok(0));
        st.settle(1, Ok(10));
        assert!(st.is_complete());
        assert_eq!(st.into_results(), Some(vec![0, 10, 20]));
    }

    #[test]
    fn first_failure_wins_and_closes_admission() {
        let mut st = RunState::new(jobs(4));
        st.admit(2);
        st.admit(2);

        assert!(st.settle(1, Err(JobError::fail("first"))));
        assert!(!st.settle(0, Err(JobError::fail("second"))));
        assert!(st.admit(2).is_none());
        assert!(!st.is_complete());
        assert_eq!(st.take_failure(), Some(JobError::fail("first")));
        assert!(st.admit(2).is_none());
    }

    #[test]
    fn values_after_failure_are_discarded() {
        let mut st = RunState::new(jobs(2));
        st.admit(2);
        st.admit(2);
        st.settle(0, Err(JobError::fail("boom")));
        assert!(!st.settle(1, Ok(1)));
        assert_eq!(st.in_flight(), 0);
        assert!(st.results.iter().all(Option::is_none));
    }

    #[test]
    fn unfilled_slot_yields_no_results() {
        let mut st = RunState::new(jobs(3));
        while st.admit(3).is_some() {}
        st.settle(0, Ok(0));
        st.settle(2, Ok(20));
        assert!(st.into_results().is_none());
    }

    #[test]
    fn empty_run_is_complete_immediately() {
        let mut st: RunState<usize, JobError> = RunState::new(Vec::new());
        assert!(st.admit(1).is_none());
        assert!(st.is_complete());
        assert_eq!(st.into_results(), Some(vec![]));
    }
}
