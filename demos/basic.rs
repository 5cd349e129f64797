//! # Example: basic
//!
//! Two cooperative plugins and one that fails after a while.
//!
//! Demonstrates how to:
//! - Register plugins as closures with [`Runner::add_fn`].
//! - Forward lifecycle events to `tracing` with [`LogWriter`].
//! - Observe the first-failure shutdown path.
//!
//! ## Flow
//! ```text
//! Runner::start()
//!     ├─► worker "ticker"  ─► tick until cancelled
//!     ├─► worker "flusher" ─► wait until cancelled, then flush
//!     └─► worker "flaky"   ─► Err after 3s ─► PluginFailed ─► token cancelled
//! ```
//!
//! Press Ctrl-C before the failure to see the graceful path instead.
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example basic --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use gracevisor::{LogWriter, PluginError, Runner};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut runner = Runner::builder()
        .with_grace(Duration::from_secs(2))
        .with_subscriber(Arc::new(LogWriter::new()))
        .build();

    runner
        .add_fn("ticker", |ctx: CancellationToken| async move {
            let mut interval = tokio::time::interval(Duration::from_millis(500));
            loop {
                tokio::select! {
                    _ = ctx.cancelled() => return Ok::<(), PluginError>(()),
                    _ = interval.tick() => println!("[ticker] tick"),
                }
            }
        })
        .add_fn("flusher", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            println!("[flusher] flushing buffers");
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<(), PluginError>(())
        })
        .add_fn("flaky", |ctx: CancellationToken| async move {
            tokio::select! {
                _ = ctx.cancelled() => Ok(()),
                _ = tokio::time::sleep(Duration::from_secs(3)) => {
                    Err::<(), PluginError>("upstream connection lost".into())
                }
            }
        });

    match runner.start(CancellationToken::new()).await {
        Ok(()) => println!("stopped gracefully"),
        Err(e) => println!("stopped with {}: {e}", e.as_label()),
    }
    Ok(())
}
