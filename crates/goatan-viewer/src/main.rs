//! Goatan board viewer.
//!
//! Reads board snapshots as JSON lines (stdin or `GOATAN_INPUT`), lays
//! them out and writes draw commands as JSON lines to stdout.

use goatan_core::PlacementEngine;
use tokio::io::AsyncRead;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod channel;
mod config;
mod protocol;
mod sink;

use config::ViewerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout carries the protocol
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ViewerConfig::from_env()?;

    let input: Box<dyn AsyncRead + Unpin + Send> = match &config.input {
        Some(path) => {
            info!("Reading snapshots from {}", path.display());
            Box::new(tokio::fs::File::open(path).await?)
        }
        None => {
            info!("Reading snapshots from stdin");
            Box::new(tokio::io::stdin())
        }
    };

    let engine = PlacementEngine::new(config.dimensions);
    channel::run(input, tokio::io::stdout(), engine).await
}
