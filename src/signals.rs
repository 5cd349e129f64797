//! # Termination sources.
//!
//! The runner does not listen to the OS directly. It waits on a [`Termination`]
//! source, so the orchestration logic can be driven by anything that resolves
//! once: real process signals ([`OsSignals`], the default) or a test double.
//!
//! ## Signals
//! **Unix platforms:** every configured [`Signal`] gets its own listener.
//!
//! **Windows platforms:** only [`Signal::Interrupt`] is observable (via
//! [`tokio::signal::ctrl_c`]); other configured signals never fire.

use std::fmt;
use std::io;

use async_trait::async_trait;

/// Process signals the runner can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// `SIGINT` (Ctrl-C in terminal).
    Interrupt,
    /// `SIGTERM` (default kill signal, used by systemd/Kubernetes).
    Terminate,
    /// `SIGQUIT`.
    Quit,
    /// `SIGHUP`.
    Hangup,
    /// `SIGUSR1`.
    User1,
    /// `SIGUSR2`.
    User2,
}

impl Signal {
    /// Default set: interrupt and terminate.
    pub const DEFAULT: [Signal; 2] = [Signal::Interrupt, Signal::Terminate];

    /// Conventional POSIX name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Interrupt => "SIGINT",
            Signal::Terminate => "SIGTERM",
            Signal::Quit => "SIGQUIT",
            Signal::Hangup => "SIGHUP",
            Signal::User1 => "SIGUSR1",
            Signal::User2 => "SIGUSR2",
        }
    }

    #[cfg(unix)]
    fn kind(self) -> tokio::signal::unix::SignalKind {
        use tokio::signal::unix::SignalKind;

        match self {
            Signal::Interrupt => SignalKind::interrupt(),
            Signal::Terminate => SignalKind::terminate(),
            Signal::Quit => SignalKind::quit(),
            Signal::Hangup => SignalKind::hangup(),
            Signal::User1 => SignalKind::user_defined1(),
            Signal::User2 => SignalKind::user_defined2(),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that eventually asks the runner to terminate.
///
/// `wait` is polled once per run, concurrently with the plugins.
/// Resolving with `Ok(signal)` cancels the run; resolving with `Err` means
/// the source could not be installed, and the run continues without it.
/// A source that never fires simply never resolves.
#[async_trait]
pub trait Termination: Send + Sync + 'static {
    /// Completes when a termination request arrives.
    async fn wait(&self) -> io::Result<Signal>;
}

/// OS-backed termination source.
///
/// Each call to [`Termination::wait`] installs fresh listeners.
/// An empty signal list never fires.
#[derive(Debug, Clone)]
pub struct OsSignals {
    signals: Vec<Signal>,
}

impl OsSignals {
    /// Listens for the given signals.
    pub fn new(signals: impl Into<Vec<Signal>>) -> Self {
        Self {
            signals: signals.into(),
        }
    }

    /// Signals this source listens for.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }
}

impl Default for OsSignals {
    fn default() -> Self {
        Self::new(Signal::DEFAULT)
    }
}

#[async_trait]
impl Termination for OsSignals {
    #[cfg(unix)]
    async fn wait(&self) -> io::Result<Signal> {
        use futures::future::select_all;
        use tokio::signal::unix::signal;

        if self.signals.is_empty() {
            return std::future::pending().await;
        }

        let mut listeners = Vec::with_capacity(self.signals.len());
        for &sig in &self.signals {
            listeners.push((sig, signal(sig.kind())?));
        }

        let waits = listeners.iter_mut().map(|(sig, stream)| {
            let sig = *sig;
            Box::pin(async move {
                stream.recv().await;
                sig
            })
        });
        let (sig, _, _) = select_all(waits).await;
        Ok(sig)
    }

    #[cfg(not(unix))]
    async fn wait(&self) -> io::Result<Signal> {
        if !self.signals.contains(&Signal::Interrupt) {
            return std::future::pending().await;
        }
        tokio::signal::ctrl_c().await?;
        Ok(Signal::Interrupt)
    }
}
