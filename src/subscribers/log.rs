//! # LogWriter — forwards events to `tracing`
//!
//! A subscriber that turns every [`Event`] into a `tracing` record with
//! structured fields. Install any `tracing` subscriber to see the output.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO  plugin="http" starting plugin http
//! INFO  signal=SIGTERM received SIGTERM
//! INFO  grace_ms=5000 received signal, shutting down
//! INFO  all plugins have stopped
//! WARN  grace_ms=5000 stuck="db" timeout waiting for plugins to stop
//! ERROR plugin="db" reason="connection refused" plugin error: connection refused
//! ```

use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        let plugin = e.plugin.as_deref();
        match e.kind {
            EventKind::PluginStarting | EventKind::PluginStopped => {
                debug!(seq = e.seq, plugin, "{e}");
            }
            EventKind::PluginFailed => {
                error!(seq = e.seq, plugin, reason = e.reason.as_deref(), "{e}");
            }
            EventKind::SignalReceived => {
                info!(seq = e.seq, signal = e.signal.map(|s| s.as_str()), "{e}");
            }
            EventKind::SignalListenerFailed => {
                warn!(seq = e.seq, reason = e.reason.as_deref(), "{e}");
            }
            EventKind::ShutdownRequested | EventKind::AllStopped => {
                info!(seq = e.seq, grace_ms = e.grace_ms, "{e}");
            }
            EventKind::GraceExceeded => {
                warn!(
                    seq = e.seq,
                    grace_ms = e.grace_ms,
                    stuck = e.reason.as_deref(),
                    "{e}"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
