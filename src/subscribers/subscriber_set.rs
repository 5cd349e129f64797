//! # Synchronous event fan-out to multiple subscribers.
//!
//! Provides [`SubscriberSet`] — delivers each event to every subscriber in
//! registration order, on the caller's task.
//!
//! ## Rules
//! - **Ordering**: every subscriber sees events in emission order.
//! - **Isolation**: a panicking subscriber is skipped for that event; the
//!   others still receive it and the runner is unaffected.
//! - **Empty set**: events are discarded.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Fan-out coordinator for diagnostic sinks.
#[derive(Clone, Default)]
pub(crate) struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a set from the given subscribers.
    #[must_use]
    pub(crate) fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Subscriber names, in delivery order.
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.subs.iter().map(|s| s.name()).collect()
    }

    /// Delivers `event` to every subscriber; panics are swallowed.
    pub(crate) fn emit(&self, event: &Event) {
        for sub in &self.subs {
            let _ = catch_unwind(AssertUnwindSafe(|| sub.on_event(event)));
        }
    }
}
