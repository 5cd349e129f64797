//! # Runner: starts plugins together, drains them together.
//!
//! The [`Runner`] owns the plugin registry, the configuration and an idempotent
//! shutdown trigger. One call to [`Runner::start`] is one run.
//!
//! ## State machine
//! ```text
//! NotStarted ──start()──► Running ──token cancelled──► Draining ──► Stopped
//!                            │                            │
//!                            └──plugin failed──► Stopped  ├─ all joined   → Ok(())
//!                                (no drain)               └─ grace timer  → Err(DrainTimeout)
//!
//! Stopped resets to NotStarted on every exit path.
//! ```
//!
//! ## Run wiring
//! ```text
//! parent token ──► child token ◄── termination source (signals)
//!                      ▲      ◄── shutdown() watcher
//!                      │
//!          ┌───────────┼───────────┐
//!          ▼           ▼           ▼
//!      worker 1    worker 2 ...  worker N      (one tokio task per plugin, JoinSet)
//!          │           │           │
//!          └──── FirstFailure (CAS, race-first) ────► runner select!
//! ```
//!
//! ## Rules
//! - The child token is cancelled unconditionally when `start` returns.
//! - Workers are never aborted: on failure, drain timeout or when the `start`
//!   future itself is dropped, they are detached.
//! - On a plugin failure the runner returns at once without waiting for the
//!   other workers; the embedding process is expected to exit.
//! - When a failure and a cancellation are ready together, either branch may win.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::{
    alive::AliveTracker,
    builder::RunnerBuilder,
    failure::FirstFailure,
    shutdown::ShutdownTrigger,
    worker::{WorkerCtx, run_plugin},
};
use crate::error::{PluginError, RunnerError};
use crate::events::{Event, EventKind};
use crate::plugins::{Plugin, PluginFn, PluginRef};
use crate::signals::{OsSignals, Termination};
use crate::subscribers::SubscriberSet;

/// Orchestrates concurrent start and graceful shutdown of plugins.
///
/// Plugins are registered through `&mut self`; once the runner is shared
/// (e.g. behind an `Arc` to call [`Runner::shutdown`] from elsewhere) the
/// registry is frozen.
pub struct Runner {
    cfg: Config,
    plugins: Vec<PluginRef>,
    subs: Arc<SubscriberSet>,
    termination: Arc<dyn Termination>,
    started: AtomicBool,
    shutdown: ShutdownTrigger,
}

impl Runner {
    /// Creates a runner listening to `cfg.signals`, without diagnostic sinks.
    pub fn new(cfg: Config) -> Self {
        let termination = Arc::new(OsSignals::new(cfg.signals.clone()));
        Self::new_internal(cfg, Vec::new(), SubscriberSet::default(), termination)
    }

    /// Creates a builder with default configuration.
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::new()
    }

    pub(crate) fn new_internal(
        cfg: Config,
        plugins: Vec<PluginRef>,
        subs: SubscriberSet,
        termination: Arc<dyn Termination>,
    ) -> Self {
        Self {
            cfg,
            plugins,
            subs: Arc::new(subs),
            termination,
            started: AtomicBool::new(false),
            shutdown: ShutdownTrigger::new(),
        }
    }

    /// Appends a plugin to the registry. Returns the runner for chaining.
    pub fn add_plugin(&mut self, plugin: PluginRef) -> &mut Self {
        self.plugins.push(plugin);
        self
    }

    /// Appends several plugins, keeping their order.
    pub fn add_plugins(&mut self, plugins: impl IntoIterator<Item = PluginRef>) -> &mut Self {
        self.plugins.extend(plugins);
        self
    }

    /// Registers a closure as a plugin (see [`PluginFn`]).
    pub fn add_fn<F, Fut>(&mut self, name: impl Into<Cow<'static, str>>, f: F) -> &mut Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), PluginError>> + Send + 'static,
    {
        self.add_plugin(PluginFn::arc(name, f))
    }

    /// Configuration snapshot of this runner.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Registered plugin names, in registration order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// True while a `start` call is in progress.
    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Requests cancellation of the current run and returns immediately.
    ///
    /// Safe to call any number of times, before, during or after a run.
    /// A request made while no run is in progress applies to the next `start`,
    /// which then drains right away.
    pub fn shutdown(&self) {
        self.shutdown.request();
    }

    /// Starts every plugin and blocks until the run completes or fails.
    ///
    /// The run is cancelled by `parent`, by a configured termination signal,
    /// or by [`Runner::shutdown`]. Once cancelled, plugins get
    /// [`Config::grace`] to return.
    ///
    /// ### Errors
    /// - [`RunnerError::AlreadyStarted`] if another call is in progress.
    /// - [`RunnerError::Plugin`] / [`RunnerError::PluginPanicked`] for the
    ///   plugin failure that won the report race.
    /// - [`RunnerError::DrainTimeout`] if the grace period elapsed first.
    pub async fn start(&self, parent: CancellationToken) -> Result<(), RunnerError> {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(RunnerError::AlreadyStarted);
        }
        let _reset = ResetOnExit { runner: self };

        let token = parent.child_token();
        let _cancel = token.clone().drop_guard();

        let names = self.plugins.iter().map(|p| Arc::from(p.name())).collect();
        let ctx = WorkerCtx {
            token: token.clone(),
            failure: Arc::new(FirstFailure::new()),
            alive: Arc::new(AliveTracker::new(names)),
            subs: Arc::clone(&self.subs),
        };

        let mut workers = DetachOnDrop(JoinSet::new());
        self.spawn_workers(&mut workers.0, &ctx);
        self.spawn_shutdown_watcher(&token);
        self.spawn_termination_watcher(&token);

        let res = tokio::select! {
            _ = token.cancelled() => self.drain(&mut workers.0, &ctx.alive).await,
            err = ctx.failure.wait() => {
                self.subs.emit(&failure_event(&err));
                Err(err)
            }
        };
        res
    }

    /// Spawns one worker per registered plugin.
    fn spawn_workers(&self, set: &mut JoinSet<()>, ctx: &WorkerCtx) {
        for (index, plugin) in self.plugins.iter().enumerate() {
            set.spawn(run_plugin(Arc::clone(plugin), index, ctx.clone()));
        }
    }

    /// Cancels the run when [`Runner::shutdown`] is requested.
    fn spawn_shutdown_watcher(&self, token: &CancellationToken) {
        let trigger = self.shutdown.current();
        let token = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = trigger.cancelled() => token.cancel(),
                _ = token.cancelled() => {}
            }
        });
    }

    /// Cancels the run when the termination source fires.
    fn spawn_termination_watcher(&self, token: &CancellationToken) {
        let termination = Arc::clone(&self.termination);
        let subs = Arc::clone(&self.subs);
        let token = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                res = termination.wait() => match res {
                    Ok(sig) => {
                        subs.emit(&Event::new(EventKind::SignalReceived).with_signal(sig));
                        token.cancel();
                    }
                    Err(e) => {
                        subs.emit(
                            &Event::new(EventKind::SignalListenerFailed).with_reason(e.to_string()),
                        );
                    }
                },
                _ = token.cancelled() => {}
            }
        });
    }

    /// Waits for all workers within the grace period.
    ///
    /// Publishes [`EventKind::AllStopped`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`RunnerError::DrainTimeout`] with the plugins still running.
    async fn drain(
        &self,
        set: &mut JoinSet<()>,
        alive: &AliveTracker,
    ) -> Result<(), RunnerError> {
        let grace = self.cfg.grace;
        self.subs
            .emit(&Event::new(EventKind::ShutdownRequested).with_grace(grace));

        let done = async { while set.join_next().await.is_some() {} };
        match tokio::time::timeout(grace, done).await {
            Ok(()) => {
                self.subs.emit(&Event::new(EventKind::AllStopped));
                Ok(())
            }
            Err(_elapsed) => {
                let stuck = alive.snapshot();
                self.subs.emit(
                    &Event::new(EventKind::GraceExceeded)
                        .with_grace(grace)
                        .with_reason(stuck.join(", ")),
                );
                Err(RunnerError::DrainTimeout { grace, stuck })
            }
        }
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("cfg", &self.cfg)
            .field("plugins", &self.plugin_names())
            .field("subscribers", &self.subs.names())
            .field("running", &self.is_running())
            .finish()
    }
}

/// A runner can be managed by another runner.
///
/// The inner run shares the outer token; plugin failures surface unchanged,
/// other runner errors are boxed.
#[async_trait]
impl Plugin for Runner {
    fn name(&self) -> &str {
        "runner"
    }

    async fn start(&self, ctx: CancellationToken) -> Result<(), PluginError> {
        Runner::start(self, ctx)
            .await
            .map_err(|e| match e.into_plugin_error() {
                Ok(original) => original,
                Err(other) => Box::new(other) as PluginError,
            })
    }
}

fn failure_event(err: &RunnerError) -> Event {
    let ev = Event::new(EventKind::PluginFailed).with_reason(err.to_string());
    match err.plugin() {
        Some(name) => ev.with_plugin(name),
        None => ev,
    }
}

/// Owns the run's workers; stuck or still-running ones are left to finish
/// on their own, even when the `start` future is dropped mid-run.
struct DetachOnDrop(JoinSet<()>);

impl Drop for DetachOnDrop {
    fn drop(&mut self) {
        self.0.detach_all();
    }
}

/// Resets the started flag and re-arms the shutdown trigger on every exit path.
struct ResetOnExit<'a> {
    runner: &'a Runner,
}

impl Drop for ResetOnExit<'_> {
    fn drop(&mut self) {
        self.runner.shutdown.rearm();
        self.runner.started.store(false, Ordering::Release);
    }
}
