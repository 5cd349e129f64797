//! Runtime events emitted by the runner.
//!
//! Events are the runner's only diagnostic channel. They are delivered
//! synchronously to the configured [`Subscribe`](crate::Subscribe) sinks; with
//! no sinks configured they are discarded.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publishers**: `Runner::start`, plugin workers, the termination watcher.
//! - **Consumers**: `SubscriberSet` (fans out to user sinks).

mod event;

pub use event::{Event, EventKind};
