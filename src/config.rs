//! # Runner configuration.
//!
//! Provides [`Config`] the immutable settings snapshot a [`Runner`](crate::Runner) runs with.
//!
//! Config is used in two ways:
//! 1. **Direct creation**: `Runner::new(config)`
//! 2. **Builder**: `Runner::builder().with_grace(..).with_signals(..)`; later calls
//!    override earlier ones, omitted fields keep their defaults.
//!
//! ## Sentinel values
//! - `signals = []` → the default OS termination source never fires
//! - `grace = 0s` → draining gives up as soon as the timer is polled

use std::time::Duration;

use crate::signals::Signal;

/// Run configuration.
///
/// ## Field semantics
/// - `signals`: process signals that cancel the run (default: interrupt, terminate)
/// - `grace`: maximum wait for all plugins to return once cancellation begins (default: 5s)
///
/// The grace timer starts when draining begins, is never renewed per plugin,
/// and applies to all workers collectively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Signals bound to the run's cancellation token.
    pub signals: Vec<Signal>,

    /// Maximum time to wait for plugins to return after cancellation.
    ///
    /// If exceeded, `start` returns `RunnerError::DrainTimeout` and the
    /// remaining workers are left running in the background.
    pub grace: Duration,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `signals = [Interrupt, Terminate]`
    /// - `grace = 5s`
    fn default() -> Self {
        Self {
            signals: Signal::DEFAULT.to_vec(),
            grace: Duration::from_secs(5),
        }
    }
}
