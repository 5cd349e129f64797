//! # Example: tcp_listener
//!
//! A line echo server wrapped as a plugin, plus an explicit shutdown from a
//! second task. Connections in flight are tracked so the plugin only returns
//! once they are closed.
//!
//! ## Run
//! ```bash
//! cargo run --example tcp_listener
//! # in another shell
//! nc 127.0.0.1 7878
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gracevisor::{Plugin, PluginError, Runner};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

struct EchoServer {
    addr: &'static str,
}

#[async_trait]
impl Plugin for EchoServer {
    fn name(&self) -> &str {
        "echo"
    }

    async fn start(&self, ctx: CancellationToken) -> Result<(), PluginError> {
        // A bind failure is a startup failure: it shuts the whole runner down.
        let listener = TcpListener::bind(self.addr).await?;
        println!("[echo] listening on {}", self.addr);

        let mut conns = JoinSet::new();
        loop {
            tokio::select! {
                _ = ctx.cancelled() => break,
                accepted = listener.accept() => {
                    let (stream, peer) = accepted?;
                    println!("[echo] {peer} connected");
                    conns.spawn(serve(stream, ctx.clone()));
                }
            }
        }

        drop(listener);
        while conns.join_next().await.is_some() {}
        println!("[echo] all connections closed");
        Ok(())
    }
}

async fn serve(stream: TcpStream, ctx: CancellationToken) {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();
    loop {
        tokio::select! {
            _ = ctx.cancelled() => {
                let _ = write.write_all(b"server shutting down\n").await;
                return;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if write.write_all(format!("{line}\n").as_bytes()).await.is_err() {
                        return;
                    }
                }
                _ => return,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let runner = Arc::new(
        Runner::builder()
            .with_grace(Duration::from_secs(5))
            .with_sink(|ev| println!("[runner] {ev}"))
            .with_plugin(Arc::new(EchoServer {
                addr: "127.0.0.1:7878",
            }))
            .build(),
    );

    let handle = Arc::clone(&runner);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(30)).await;
        println!("[main] 30s elapsed, requesting shutdown");
        handle.shutdown();
    });

    runner.start(CancellationToken::new()).await?;
    Ok(())
}
