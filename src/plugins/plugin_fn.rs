//! # Closure-backed plugin (`PluginFn`)
//!
//! [`PluginFn`] pairs a display name with a closure `F: Fn(CancellationToken) -> Fut`,
//! producing a fresh future per start. No state is shared between runs unless the
//! closure captures an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use gracevisor::{Plugin, PluginFn, PluginRef, PluginError};
//!
//! let p: PluginRef = PluginFn::arc("worker", |ctx: CancellationToken| async move {
//!     ctx.cancelled().await;
//!     Ok::<_, PluginError>(())
//! });
//!
//! assert_eq!(p.name(), "worker");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::PluginError;
use crate::plugins::plugin::Plugin;

/// Closure-backed plugin implementation.
#[derive(Debug)]
pub struct PluginFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> PluginFn<F> {
    /// Creates a new closure-backed plugin.
    ///
    /// Prefer [`PluginFn::arc`] when you immediately need a [`PluginRef`](crate::PluginRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the plugin and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Plugin for PluginFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), PluginError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&self, ctx: CancellationToken) -> Result<(), PluginError> {
        (self.f)(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::PluginRef;

    #[tokio::test]
    async fn each_start_gets_a_fresh_future() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let p: PluginRef = PluginFn::arc("counter", move |_ctx: CancellationToken| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        p.start(CancellationToken::new()).await.unwrap();
        p.start(CancellationToken::new()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(p.name(), "counter");
    }

    #[tokio::test]
    async fn error_is_passed_through() {
        let p = PluginFn::new("broken", |_ctx: CancellationToken| async {
            Err::<(), PluginError>("failed to start".into())
        });
        let err = p.start(CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "failed to start");
    }
}
