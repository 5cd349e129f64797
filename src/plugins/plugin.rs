//! # Plugin capability.
//!
//! A plugin is a named unit of work with one blocking operation, [`Plugin::start`],
//! that honors cancellation. The common handle type is [`PluginRef`], an
//! `Arc<dyn Plugin>` the runner shares with its worker tasks.
//!
//! Startup order across plugins is not specified; plugins must not depend on it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::PluginError;

/// Shared handle to a plugin.
pub type PluginRef = Arc<dyn Plugin>;

/// # Long-running, cancelable unit.
///
/// `start` should block (await) until `ctx` is cancelled, then clean up and return.
///
/// - `Ok(())` — clean stop.
/// - `Err(e)` — fatal failure; the runner cancels every other plugin and
///   returns `e` to its caller.
///
/// Errors hit during teardown are the plugin's own concern: log them, the
/// runner does not observe them once cancellation has started.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use gracevisor::{Plugin, PluginError};
///
/// struct Heartbeat;
///
/// #[async_trait]
/// impl Plugin for Heartbeat {
///     fn name(&self) -> &str { "heartbeat" }
///
///     async fn start(&self, ctx: CancellationToken) -> Result<(), PluginError> {
///         // setup...
///         ctx.cancelled().await;
///         // teardown...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Plugin: Send + Sync + 'static {
    /// Display name, used only for diagnostics. Not required to be unique.
    fn name(&self) -> &str;

    /// Runs the plugin until `ctx` is cancelled.
    async fn start(&self, ctx: CancellationToken) -> Result<(), PluginError>;
}
