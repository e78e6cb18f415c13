//! Backend stub with flapping health, for exercising the load balancer.
//!
//! `GET /health` alternates between 502 and 200 on successive hits,
//! simulating a backend that keeps flipping in and out of rotation. Every
//! other path returns a static greeting.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "backend-stub", about = "Flapping backend for load balancer testing")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 8081)]
    port: u16,
}

#[derive(Clone)]
struct StubState {
    hits: Arc<AtomicU64>,
    greeting: Arc<str>,
}

async fn health_handler(State(state): State<StubState>) -> StatusCode {
    let hit = state.hits.fetch_add(1, Ordering::Relaxed) + 1;
    // Odd hits simulate a bad backend, even hits a healthy one.
    if hit % 2 == 0 {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    }
}

async fn greeting_handler(State(state): State<StubState>) -> String {
    state.greeting.to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend_stub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let state = StubState {
        hits: Arc::new(AtomicU64::new(0)),
        greeting: format!("Hello from the backend server on port {}!", args.port).into(),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .fallback(greeting_handler)
        .with_state(state);

    tracing::info!(address = %addr, "Backend stub listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
