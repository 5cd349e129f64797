//! # Runtime events emitted by the runner and its plugin workers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Plugin events**: a worker starting, stopping cleanly, or failing
//! - **Termination events**: a signal arriving, or the signal listener failing
//! - **Drain events**: shutdown requested, all plugins stopped, grace exceeded
//!
//! The [`Event`] struct carries additional metadata such as timestamps, plugin name,
//! reasons, and the grace period. Its `Display` impl renders the plain log line.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use gracevisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::PluginFailed)
//!     .with_plugin("db")
//!     .with_reason("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::PluginFailed);
//! assert_eq!(ev.plugin.as_deref(), Some("db"));
//! assert_eq!(ev.to_string(), "plugin error: connection refused");
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::signals::Signal;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Plugin events ===
    /// A worker is about to call the plugin's start operation.
    ///
    /// Sets:
    /// - `plugin`: plugin name
    PluginStarting,

    /// The plugin's start operation returned `Ok(())`.
    ///
    /// Sets:
    /// - `plugin`: plugin name
    PluginStopped,

    /// The plugin failure that won the report race; the run is aborted.
    ///
    /// Sets:
    /// - `plugin`: plugin name
    /// - `reason`: failure message
    PluginFailed,

    // === Termination events ===
    /// The termination source fired.
    ///
    /// Sets:
    /// - `signal`: the received signal
    SignalReceived,

    /// The termination source could not be installed; the run continues without it.
    ///
    /// Sets:
    /// - `reason`: installation error
    SignalListenerFailed,

    // === Drain events ===
    /// The run's token was cancelled; draining begins.
    ///
    /// Sets:
    /// - `grace_ms`: grace period applied to the drain
    ShutdownRequested,

    /// All plugins returned within the grace period.
    AllStopped,

    /// The grace period elapsed before every plugin returned.
    ///
    /// Sets:
    /// - `grace_ms`: the elapsed grace period
    /// - `reason`: comma separated names of the stuck plugins
    GraceExceeded,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the plugin, if applicable.
    pub plugin: Option<Arc<str>>,
    /// Human-readable reason (errors, stuck plugins, etc.).
    pub reason: Option<Arc<str>>,
    /// Received termination signal.
    pub signal: Option<Signal>,
    /// Grace period in milliseconds (compact).
    pub grace_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            plugin: None,
            reason: None,
            signal: None,
            grace_ms: None,
        }
    }

    /// Attaches a plugin name.
    #[inline]
    pub fn with_plugin(mut self, plugin: impl Into<Arc<str>>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the received signal.
    #[inline]
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Attaches a grace period (stored as milliseconds).
    #[inline]
    pub fn with_grace(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.grace_ms = Some(ms);
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plugin = self.plugin.as_deref().unwrap_or("unknown");
        let reason = self.reason.as_deref().unwrap_or("unknown");

        match self.kind {
            EventKind::PluginStarting => write!(f, "starting plugin {plugin}"),
            EventKind::PluginStopped => write!(f, "plugin {plugin} stopped"),
            EventKind::PluginFailed => write!(f, "plugin error: {reason}"),
            EventKind::SignalReceived => match self.signal {
                Some(sig) => write!(f, "received {sig}"),
                None => f.write_str("received termination request"),
            },
            EventKind::SignalListenerFailed => write!(f, "signal listener failed: {reason}"),
            EventKind::ShutdownRequested => f.write_str("received signal, shutting down"),
            EventKind::AllStopped => f.write_str("all plugins have stopped"),
            EventKind::GraceExceeded => f.write_str("timeout waiting for plugins to stop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::AllStopped);
        let b = Event::new(EventKind::AllStopped);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn drain_lines() {
        assert_eq!(
            Event::new(EventKind::ShutdownRequested).to_string(),
            "received signal, shutting down"
        );
        assert_eq!(
            Event::new(EventKind::AllStopped).to_string(),
            "all plugins have stopped"
        );
        assert_eq!(
            Event::new(EventKind::GraceExceeded)
                .with_grace(Duration::from_millis(3))
                .to_string(),
            "timeout waiting for plugins to stop"
        );
    }

    #[test]
    fn grace_is_clamped_to_u32_millis() {
        let ev = Event::new(EventKind::GraceExceeded).with_grace(Duration::from_secs(u64::MAX));
        assert_eq!(ev.grace_ms, Some(u32::MAX));
    }

    #[test]
    fn signal_line() {
        let ev = Event::new(EventKind::SignalReceived).with_signal(Signal::Interrupt);
        assert_eq!(ev.to_string(), "received SIGINT");
    }
}
