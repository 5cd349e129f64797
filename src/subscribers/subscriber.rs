//! # Event subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for plugging diagnostic sinks into the runner,
//! and [`SinkFn`] which adapts a plain closure.
//!
//! ## Rules
//! - Events are delivered **synchronously**, on the task that produced them.
//! - Keep `on_event` short; it runs on the runner's hot path.
//! - Panics are caught and dropped; logging is a side channel.

use std::fmt;

use crate::events::Event;

/// Diagnostic sink for runtime events.
///
/// ### Implementation requirements
/// - Do not block; hand heavy work to a channel or a task.
/// - Handle errors internally; a panic is swallowed by the runner.
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    fn on_event(&self, event: &Event);

    /// Returns the subscriber name.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Closure-backed subscriber.
///
/// ## Example
/// ```rust
/// use gracevisor::{Event, SinkFn, Subscribe};
///
/// let sink = SinkFn::new(|ev: &Event| eprintln!("{ev}"));
/// assert_eq!(sink.name(), "sink-fn");
/// ```
pub struct SinkFn<F> {
    f: F,
}

impl<F> SinkFn<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    /// Wraps a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Subscribe for SinkFn<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event) {
        (self.f)(event)
    }

    fn name(&self) -> &'static str {
        "sink-fn"
    }
}

impl<F> fmt::Debug for SinkFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkFn").finish_non_exhaustive()
    }
}
