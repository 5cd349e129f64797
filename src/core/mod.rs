//! Runtime core: orchestration and lifecycle.
//!
//! The public API from this module is [`Runner`] and its [`RunnerBuilder`].
//!
//! Internal modules:
//! - [`runner`]: the state machine, worker fan-out, drain with grace timeout;
//! - [`worker`]: runs one plugin and reports its outcome;
//! - [`failure`]: race-first, single-slot failure report;
//! - [`shutdown`]: idempotent external shutdown trigger;
//! - [`alive`]: tracks which plugins have not returned yet.

mod alive;
mod builder;
mod failure;
mod runner;
mod shutdown;
mod worker;

pub use builder::RunnerBuilder;
pub use runner::Runner;
