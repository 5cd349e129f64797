//! # Diagnostic sinks for the runner.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for handling runtime [`Event`](crate::Event)s.
//!
//! ## Architecture
//! ```text
//! Runner / worker ── emit(&Event) ──► SubscriberSet
//!                                         │
//!                                         ├──► sink1.on_event(&Event)
//!                                         ├──► sink2.on_event(&Event)
//!                                         └──► sinkN.on_event(&Event)
//!                                               └─► panic caught and dropped
//! ```
//!
//! With no subscribers configured every event is discarded.
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use gracevisor::{Event, EventKind, Subscribe};
//!
//! struct Alerts;
//!
//! impl Subscribe for Alerts {
//!     fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::GraceExceeded {
//!             // page someone
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "alerts" }
//! }
//! ```

mod subscriber;
mod subscriber_set;

#[cfg(feature = "logging")]
mod log;

pub use subscriber::{SinkFn, Subscribe};
pub(crate) use subscriber_set::SubscriberSet;

#[cfg(feature = "logging")]
pub use log::LogWriter;
