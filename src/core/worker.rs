//! # Plugin worker: one start call per run.
//!
//! Runs [`Plugin::start`] once with the run's token and reports the outcome.
//!
//! ## Event flow
//! ```text
//! Success:
//!   publish PluginStarting → plugin.start() → Ok(())  → publish PluginStopped
//!
//! Failure:
//!   publish PluginStarting → plugin.start() → Err(e)  → FirstFailure::report(Plugin { e })
//!
//! Panic:
//!   publish PluginStarting → plugin.start() → panic   → FirstFailure::report(PluginPanicked)
//! ```
//!
//! ## Rules
//! - The slot in [`AliveTracker`] is cleared on **every** return path.
//! - A failure reported after draining began is dropped by the runner unseen.
//! - Panics are caught here; they never reach the runtime's join handle.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::core::{alive::AliveTracker, failure::FirstFailure};
use crate::error::RunnerError;
use crate::events::{Event, EventKind};
use crate::plugins::PluginRef;
use crate::subscribers::SubscriberSet;

/// Everything a worker shares with its run.
#[derive(Clone)]
pub(crate) struct WorkerCtx {
    pub(crate) token: CancellationToken,
    pub(crate) failure: Arc<FirstFailure>,
    pub(crate) alive: Arc<AliveTracker>,
    pub(crate) subs: Arc<SubscriberSet>,
}

/// Executes `plugin` until it returns, reporting the outcome.
pub(crate) async fn run_plugin(plugin: PluginRef, index: usize, ctx: WorkerCtx) {
    let name = plugin.name().to_string();
    ctx.subs
        .emit(&Event::new(EventKind::PluginStarting).with_plugin(name.as_str()));

    let res = AssertUnwindSafe(plugin.start(ctx.token.clone()))
        .catch_unwind()
        .await;
    ctx.alive.mark_stopped(index);

    match res {
        Ok(Ok(())) => {
            ctx.subs
                .emit(&Event::new(EventKind::PluginStopped).with_plugin(name.as_str()));
        }
        Ok(Err(error)) => {
            ctx.failure.report(RunnerError::Plugin {
                plugin: name,
                error,
            });
        }
        Err(panic) => {
            ctx.failure.report(RunnerError::PluginPanicked {
                plugin: name,
                message: panic_message(panic.as_ref()),
            });
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
