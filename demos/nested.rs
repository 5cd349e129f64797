//! # Example: nested
//!
//! A runner is itself a plugin, so a group of plugins can be managed as one unit.
//!
//! ## Flow
//! ```text
//! outer Runner (signals, 3s grace)
//!     ├─► "api"
//!     └─► inner Runner ("runner", no signals of its own)
//!             ├─► "consumer-a"
//!             └─► "consumer-b"
//! ```
//!
//! The outer token is cancelled after one second; the inner runner drains its
//! own plugins within the outer grace period.
//!
//! ## Run
//! ```bash
//! cargo run --example nested
//! ```

use std::sync::Arc;
use std::time::Duration;

use gracevisor::{Event, PluginError, PluginFn, PluginRef, Runner};
use tokio_util::sync::CancellationToken;

fn consumer(name: &'static str) -> PluginRef {
    PluginFn::arc(name, move |ctx: CancellationToken| async move {
        println!("[{name}] consuming");
        ctx.cancelled().await;
        println!("[{name}] committing offsets");
        Ok::<(), PluginError>(())
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let print = |ev: &Event| println!("  event #{}: {ev}", ev.seq);

    let inner = Runner::builder()
        .with_signals([])
        .with_grace(Duration::from_secs(1))
        .with_sink(print)
        .with_plugins([consumer("consumer-a"), consumer("consumer-b")])
        .build();

    let outer = Runner::builder()
        .with_grace(Duration::from_secs(3))
        .with_sink(print)
        .with_plugin(consumer("api"))
        .with_plugin(Arc::new(inner))
        .build();

    let root = CancellationToken::new();
    let stopper = root.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        stopper.cancel();
    });

    outer.start(root).await?;
    println!("all groups stopped");
    Ok(())
}
