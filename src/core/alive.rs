//! # Per-run tracker of plugins that have not returned yet.
//!
//! Indexed by registration position, so duplicate plugin names are tracked separately.
//!
//! ## Rules
//! - Every slot starts **alive** when the run begins.
//! - A worker marks its slot stopped when the plugin's start operation returns
//!   (successfully, with an error, or by panicking).
//! - [`AliveTracker::snapshot`] lists the names still alive; the runner uses it
//!   to report stuck plugins when the grace period is exceeded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Thread-safe tracker of running plugins for one run.
pub(crate) struct AliveTracker {
    names: Vec<Arc<str>>,
    alive: Vec<AtomicBool>,
}

impl AliveTracker {
    /// Creates a tracker with every plugin marked alive.
    pub(crate) fn new(names: Vec<Arc<str>>) -> Self {
        let alive = names.iter().map(|_| AtomicBool::new(true)).collect();
        Self { names, alive }
    }

    /// Marks the plugin at `index` as returned.
    pub(crate) fn mark_stopped(&self, index: usize) {
        if let Some(flag) = self.alive.get(index) {
            flag.store(false, Ordering::Release);
        }
    }

    /// Returns names of plugins still running, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.names
            .iter()
            .zip(&self.alive)
            .filter(|(_, flag)| flag.load(Ordering::Acquire))
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_tracked_by_position() {
        let tracker = AliveTracker::new(vec!["db".into(), "db".into(), "http".into()]);
        tracker.mark_stopped(0);
        tracker.mark_stopped(7);
        assert_eq!(tracker.snapshot(), vec!["db".to_string(), "http".to_string()]);

        tracker.mark_stopped(1);
        tracker.mark_stopped(2);
        assert!(tracker.snapshot().is_empty());
    }
}
