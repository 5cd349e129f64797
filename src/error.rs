//! Error types used by the runner and by plugins.
//!
//! - [`PluginError`] — what a plugin returns when it fails; any boxed error.
//! - [`RunnerError`] — terminal result of [`Runner::start`](crate::Runner::start).
//!
//! A plugin failure travels through the runner **without being rewrapped**:
//! [`RunnerError::Plugin`] displays exactly the plugin's message and hands the
//! original value back through [`RunnerError::plugin_error`] /
//! [`RunnerError::into_plugin_error`], so callers can still downcast and compare it.

use std::error::Error as StdError;
use std::time::Duration;

use thiserror::Error;

/// Failure returned by [`Plugin::start`](crate::Plugin::start).
pub type PluginError = Box<dyn StdError + Send + Sync + 'static>;

/// # Errors produced by a runner.
///
/// One of these is the terminal result of a failed `start` call.
/// The runner never retries on its own; every recovery decision belongs to the caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunnerError {
    /// `start` was called while a previous call is still running.
    #[error("runner already started")]
    AlreadyStarted,

    /// A plugin's start operation returned an error; fatal for the whole run.
    ///
    /// Displays as the original error message, unchanged.
    #[error("{error}")]
    Plugin {
        /// Display name of the failed plugin.
        plugin: String,
        /// The value returned by the plugin.
        error: PluginError,
    },

    /// A plugin panicked inside its start operation.
    #[error("plugin {plugin:?} panicked: {message}")]
    PluginPanicked {
        /// Display name of the panicked plugin.
        plugin: String,
        /// Panic payload rendered as text.
        message: String,
    },

    /// Not every plugin returned within the grace period after cancellation.
    #[error("timeout waiting for plugins to stop after {grace:?}; stuck: {stuck:?}")]
    DrainTimeout {
        /// The configured grace duration.
        grace: Duration,
        /// Names of plugins still running when the grace timer fired.
        stuck: Vec<String>,
    },
}

impl RunnerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use gracevisor::RunnerError;
    ///
    /// assert_eq!(RunnerError::AlreadyStarted.as_label(), "runner_already_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RunnerError::AlreadyStarted => "runner_already_started",
            RunnerError::Plugin { .. } => "plugin_failed",
            RunnerError::PluginPanicked { .. } => "plugin_panicked",
            RunnerError::DrainTimeout { .. } => "drain_timeout",
        }
    }

    /// Name of the plugin responsible for this error, if any.
    pub fn plugin(&self) -> Option<&str> {
        match self {
            RunnerError::Plugin { plugin, .. } | RunnerError::PluginPanicked { plugin, .. } => {
                Some(plugin)
            }
            _ => None,
        }
    }

    /// Borrows the original plugin error (for `downcast_ref` / comparisons).
    ///
    /// # Example
    /// ```
    /// use gracevisor::RunnerError;
    ///
    /// let err = RunnerError::Plugin {
    ///     plugin: "db".into(),
    ///     error: "connection refused".into(),
    /// };
    /// assert_eq!(err.to_string(), "connection refused");
    /// assert_eq!(err.plugin_error().unwrap().to_string(), "connection refused");
    /// ```
    pub fn plugin_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            RunnerError::Plugin { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }

    /// Takes back the original plugin error, or returns `self` unchanged.
    pub fn into_plugin_error(self) -> Result<PluginError, RunnerError> {
        match self {
            RunnerError::Plugin { error, .. } => Ok(error),
            other => Err(other),
        }
    }

    /// True for [`RunnerError::DrainTimeout`].
    pub fn is_drain_timeout(&self) -> bool {
        matches!(self, RunnerError::DrainTimeout { .. })
    }
}
