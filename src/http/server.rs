//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Build the axum router that catches every method and path
//! - Hold the shared state (registry, selector, client)
//! - Spawn the health monitor alongside the listener
//! - Dispatch each inbound request: select a backend, forward, relay

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, Response},
    routing::any,
    Router,
};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::balancer::{Registry, RegistryError, RoundRobin};
use crate::config::BalancerConfig;
use crate::health::HealthMonitor;
use crate::http::forward::{forward, HttpClient};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub selector: Arc<RoundRobin>,
    pub client: HttpClient,
}

/// The load balancer server.
pub struct LbServer {
    router: Router,
    config: BalancerConfig,
    registry: Arc<Registry>,
}

impl LbServer {
    /// Create a new server from configuration.
    ///
    /// Fails if the backend list is empty or any address does not parse;
    /// the process must not start serving with a broken registry.
    pub fn new(config: BalancerConfig) -> Result<Self, RegistryError> {
        let registry = Arc::new(Registry::from_addresses(&config.backends)?);
        let selector = Arc::new(RoundRobin::new());
        let client: HttpClient = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            registry: registry.clone(),
            selector,
            client,
        };

        let router = Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router,
            config,
            registry,
        })
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Load balancer listening");

        let monitor = HealthMonitor::new(self.registry.clone(), self.config.health_check.clone());
        let monitor_shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            monitor.run(monitor_shutdown).await;
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        let mut shutdown = shutdown;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Load balancer stopped");
        Ok(())
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }
}

/// Per-request entry point: log, select a backend, forward.
///
/// Selection waits indefinitely when no backend is healthy, so such a
/// request never completes; there is no request timeout by design.
async fn dispatch_handler(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response<Body> {
    log_request(&request, remote);

    let backend = state.selector.select(&state.registry).await;
    tracing::debug!(backend = %backend.url(), "Selected backend");

    forward(&state.client, &backend, request).await
}

fn log_request(request: &Request<Body>, remote: SocketAddr) {
    let header_str = |name| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    };

    tracing::info!(
        remote = %remote,
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        host = header_str(header::HOST),
        user_agent = header_str(header::USER_AGENT),
        accept = header_str(header::ACCEPT),
        "Received request"
    );
}
