use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    events::Event,
    plugins::PluginRef,
    signals::{OsSignals, Signal, Termination},
    subscribers::{SinkFn, Subscribe, SubscriberSet},
};

use super::runner::Runner;

/// Builder for constructing a [`Runner`].
///
/// Options are applied in call order; a later call overrides an earlier one
/// for the same field, omitted options keep their defaults.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use gracevisor::{Runner, Signal};
///
/// let runner = Runner::builder()
///     .with_grace(Duration::from_secs(10))
///     .with_signals([Signal::Interrupt])
///     .with_sink(|ev| eprintln!("{ev}"))
///     .build();
///
/// assert_eq!(runner.config().grace, Duration::from_secs(10));
/// ```
pub struct RunnerBuilder {
    cfg: Config,
    plugins: Vec<PluginRef>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    termination: Option<Arc<dyn Termination>>,
}

impl RunnerBuilder {
    /// Creates a new builder with [`Config::default`].
    pub fn new() -> Self {
        Self {
            cfg: Config::default(),
            plugins: Vec::new(),
            subscribers: Vec::new(),
            termination: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the drain grace period (default: 5s).
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.cfg.grace = grace;
        self
    }

    /// Sets the signals that cancel the run (default: interrupt, terminate).
    ///
    /// An empty list disables OS signal handling.
    /// Ignored when a custom source is set with [`Self::with_termination`].
    pub fn with_signals(mut self, signals: impl IntoIterator<Item = Signal>) -> Self {
        self.cfg.signals = signals.into_iter().collect();
        self
    }

    /// Replaces the diagnostic sink with a closure.
    pub fn with_sink<F>(mut self, f: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let sink: Arc<dyn Subscribe> = Arc::new(SinkFn::new(f));
        self.subscribers = vec![sink];
        self
    }

    /// Appends a diagnostic subscriber.
    pub fn with_subscriber(mut self, sub: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(sub);
        self
    }

    /// Replaces all diagnostic subscribers.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Uses a custom termination source instead of OS signals.
    pub fn with_termination(mut self, termination: impl Termination) -> Self {
        self.termination = Some(Arc::new(termination) as Arc<dyn Termination>);
        self
    }

    /// Appends a plugin to the registry.
    pub fn with_plugin(mut self, plugin: PluginRef) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Appends several plugins, keeping their order.
    pub fn with_plugins(mut self, plugins: impl IntoIterator<Item = PluginRef>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// Builds and returns the Runner instance.
    pub fn build(self) -> Runner {
        let termination: Arc<dyn Termination> = match self.termination {
            Some(termination) => termination,
            None => Arc::new(OsSignals::new(self.cfg.signals.clone())),
        };

        Runner::new_internal(
            self.cfg,
            self.plugins,
            SubscriberSet::new(self.subscribers),
            termination,
        )
    }
}

impl Default for RunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_options_override_earlier_ones() {
        let runner = RunnerBuilder::new()
            .with_grace(Duration::from_secs(1))
            .with_signals([Signal::Quit])
            .with_grace(Duration::from_millis(250))
            .build();

        assert_eq!(runner.config().grace, Duration::from_millis(250));
        assert_eq!(runner.config().signals, vec![Signal::Quit]);
    }

    #[test]
    fn omitted_options_keep_defaults() {
        let runner = RunnerBuilder::new().build();
        assert_eq!(runner.config(), &Config::default());
        assert!(runner.plugin_names().is_empty());
    }

    #[test]
    fn with_sink_replaces_previous_sinks() {
        let runner = RunnerBuilder::new()
            .with_sink(|_ev| {})
            .with_sink(|_ev| {})
            .build();
        assert!(format!("{runner:?}").contains("subscribers: [\"sink-fn\"]"));
    }
}
