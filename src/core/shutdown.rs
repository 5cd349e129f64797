//! # Idempotent shutdown trigger.
//!
//! Backs [`Runner::shutdown`](crate::Runner::shutdown). The trigger is a
//! [`CancellationToken`] behind a mutex: requesting shutdown any number of
//! times only cancels the current token, and a finished run re-arms it.
//!
//! ## Lifecycle
//! ```text
//! request() before start  → latched; the next run drains immediately
//! request() while running → run's token cancelled by the watcher
//! run returns             → rearm(): a cancelled token is replaced by a fresh one
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

/// External, repeatable shutdown request.
#[derive(Debug, Default)]
pub(crate) struct ShutdownTrigger {
    token: Mutex<CancellationToken>,
}

impl ShutdownTrigger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown; never blocks, safe to call repeatedly.
    pub(crate) fn request(&self) {
        self.lock().cancel();
    }

    /// Token observed by the current run's watcher.
    pub(crate) fn current(&self) -> CancellationToken {
        self.lock().clone()
    }

    /// Replaces a consumed (cancelled) token so the next run starts clean.
    pub(crate) fn rearm(&self) {
        let mut token = self.lock();
        if token.is_cancelled() {
            *token = CancellationToken::new();
        }
    }

    fn lock(&self) -> MutexGuard<'_, CancellationToken> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
