//! # gracevisor
//!
//! **Gracevisor** starts a set of long-running plugins together, stops them
//! together, and gives up waiting after a bounded grace period.
//!
//! Every plugin receives the same [`CancellationToken`](tokio_util::sync::CancellationToken).
//! The token is cancelled by the caller, by a process signal, by
//! [`Runner::shutdown`], or because one plugin failed. The crate is designed as the
//! outermost layer of a service binary: HTTP listeners, queue consumers and
//! background jobs each become a [`Plugin`].
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    Plugin    │   │    Plugin    │   │    Plugin    │
//!     │  (http API)  │   │  (consumer)  │   │   (cron)     │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Runner (lifecycle orchestrator)                                  │
//! │  - registry (ordered, frozen once shared)                         │
//! │  - started flag (single run at a time)                            │
//! │  - shutdown trigger (idempotent)                                  │
//! │  - termination source (OS signals by default)                     │
//! │  - SubscriberSet (diagnostic sinks)                               │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   worker     │   │   worker     │   │   worker     │
//!     │ start(token) │   │ start(token) │   │ start(token) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ Err / panic      │                  │
//!            ▼                  ▼                  ▼
//!     ┌───────────────────────────────────────────────────┐
//!     │        FirstFailure (compare-and-swap slot)       │
//!     └───────────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Runner::start(parent)
//!   ├─► AlreadyStarted if another run is in progress
//!   ├─► token = parent.child_token()
//!   ├─► spawn one worker per plugin, a shutdown watcher and a signal watcher
//!   └─► select!
//!         ├─ plugin failed   ─► PluginFailed event, return the failure (no drain)
//!         └─ token cancelled ─► ShutdownRequested event
//!                               └─► timeout(grace, join all workers)
//!                                     ├─ joined  ─► AllStopped,    Ok(())
//!                                     └─ elapsed ─► GraceExceeded, Err(DrainTimeout)
//!
//! On exit: token cancelled, remaining workers detached, started flag reset.
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                      |
//! |-------------------|-------------------------------------------------------------|-----------------------------------------|
//! | **Plugins**       | Long-running units of work, trait or closure based.         | [`Plugin`], [`PluginFn`], [`PluginRef`] |
//! | **Orchestration** | Concurrent start, first-failure shutdown, bounded drain.    | [`Runner`], [`RunnerBuilder`]           |
//! | **Signals**       | Injectable termination source, OS signals by default.       | [`Termination`], [`OsSignals`]          |
//! | **Diagnostics**   | Typed lifecycle events delivered to sinks.                  | [`Event`], [`Subscribe`], [`SinkFn`]    |
//! | **Errors**        | Typed runner errors; plugin errors pass through unchanged.  | [`RunnerError`], [`PluginError`]        |
//! | **Configuration** | Grace period and signal set.                                | [`Config`]                              |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], a subscriber that forwards events to `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use gracevisor::{PluginError, Runner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut runner = Runner::builder()
//!         .with_grace(Duration::from_secs(2))
//!         .with_signals([])
//!         .build();
//!
//!     runner.add_fn("ticker", |ctx: CancellationToken| async move {
//!         while !ctx.is_cancelled() {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!         }
//!         Ok::<(), PluginError>(())
//!     });
//!
//!     let root = CancellationToken::new();
//!     root.cancel(); // stop right away for the example
//!     runner.start(root).await?;
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod plugins;
mod signals;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{Runner, RunnerBuilder};
pub use error::{PluginError, RunnerError};
pub use events::{Event, EventKind};
pub use plugins::{Plugin, PluginFn, PluginRef};
pub use signals::{OsSignals, Signal, Termination};
pub use subscribers::{SinkFn, Subscribe};

// Optional: expose a `tracing`-backed logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
