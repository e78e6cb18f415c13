//! Round-robin HTTP load balancer binary.
//!
//! ```text
//!                    ┌──────────────────────────────────────────┐
//!                    │              LOAD BALANCER                │
//!                    │                                           │
//!   Client Request   │  ┌────────┐   ┌──────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│ listener│──▶│ selector │──▶│forwarder│─┼──▶ Backend
//!                    │  └────────┘   └────┬─────┘   └─────────┘ │
//!                    │                     │ reads               │
//!                    │               ┌─────▼─────┐               │
//!                    │               │ registry  │               │
//!                    │               └─────▲─────┘               │
//!                    │                     │ writes              │
//!                    │               ┌─────┴─────┐               │
//!                    │               │  health   │               │
//!                    │               │  monitor  │               │
//!                    │               └───────────┘               │
//!                    └──────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rr_balancer::config::{load_config, BalancerConfig};
use rr_balancer::http::LbServer;
use rr_balancer::lifecycle::Shutdown;

#[derive(Debug, Parser)]
#[command(name = "rr-balancer", about = "Round-robin HTTP load balancer")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listening port from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => BalancerConfig::default(),
    };

    // RUST_LOG wins; the configured level is the fallback.
    let default_filter = format!(
        "rr_balancer={},tower_http={}",
        config.observability.log_level, config.observability.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(port) = args.port {
        let mut addr: SocketAddr = config.listener.bind_address.parse()?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backends = config.backends.len(),
        health_interval_secs = config.health_check.interval_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = LbServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
