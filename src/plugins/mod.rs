//! # Plugin abstractions.
//!
//! This module provides the plugin-related types:
//! - [`Plugin`] - trait for implementing long-running cancelable units of work
//! - [`PluginFn`] - closure-backed plugin implementation
//! - [`PluginRef`] - shared reference to a plugin (`Arc<dyn Plugin>`)

mod plugin;
mod plugin_fn;

pub use plugin::{Plugin, PluginRef};
pub use plugin_fn::PluginFn;
