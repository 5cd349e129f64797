//! # First-failure cell.
//!
//! Many plugin workers may fail concurrently; the runner observes exactly one
//! of them. The winner is whichever worker wins the compare-and-swap, not
//! necessarily the one that failed first on the wall clock. Later reports are
//! dropped without blocking the reporting worker.
//!
//! ```text
//! worker 1 ── report(e1) ──► CAS ok   ──► slot = e1 ──► notify
//! worker 2 ── report(e2) ──► CAS lost ──► dropped
//!                                           runner ◄── wait() = e1
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tokio::sync::Notify;

use crate::error::RunnerError;

/// Single-slot, race-first failure report for one run.
#[derive(Debug, Default)]
pub(crate) struct FirstFailure {
    won: AtomicBool,
    slot: Mutex<Option<RunnerError>>,
    notify: Notify,
}

impl FirstFailure {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Offers a failure; returns `true` if it won the slot.
    pub(crate) fn report(&self, err: RunnerError) -> bool {
        if self
            .won
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(err);
        self.notify.notify_one();
        true
    }

    /// Completes with the winning failure; pending forever if none is reported.
    pub(crate) async fn wait(&self) -> RunnerError {
        loop {
            self.notify.notified().await;
            let taken = self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(err) = taken {
                return err;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    fn failure(msg: &str) -> RunnerError {
        RunnerError::Plugin {
            plugin: msg.to_string(),
            error: msg.into(),
        }
    }

    #[tokio::test]
    async fn only_the_first_report_is_kept() {
        let cell = FirstFailure::new();
        assert!(cell.report(failure("first")));
        assert!(!cell.report(failure("second")));

        let err = cell.wait().await;
        assert_eq!(err.to_string(), "first");
    }

    #[tokio::test]
    async fn report_after_wait_started_wakes_waiter() {
        let cell = Arc::new(FirstFailure::new());
        let reporter = Arc::clone(&cell);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            reporter.report(failure("late"));
        });

        let err = tokio::time::timeout(Duration::from_secs(1), cell.wait())
            .await
            .expect("waiter woken");
        assert_eq!(err.plugin(), Some("late"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reports_have_one_winner() {
        let cell = Arc::new(FirstFailure::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let cell = Arc::clone(&cell);
            handles.push(tokio::spawn(async move {
                cell.report(failure(&format!("p{i}")))
            }));
        }

        let mut winners = 0;
        for h in handles {
            if h.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn no_report_never_completes() {
        let cell = FirstFailure::new();
        let res = tokio::time::timeout(Duration::from_millis(10), cell.wait()).await;
        assert!(res.is_err());
    }
}
