//! Active health checking.
//!
//! # Responsibilities
//! - Periodically probe each backend's health endpoint
//! - Update backend health flags from probe outcomes

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tokio::sync::broadcast;
use tokio::time;

use crate::balancer::{Backend, Registry};
use crate::config::HealthCheckConfig;

/// Periodic health monitor for the backend registry.
pub struct HealthMonitor {
    registry: Arc<Registry>,
    config: HealthCheckConfig,
    client: Client<HttpConnector, Body>,
}

impl HealthMonitor {
    pub fn new(registry: Arc<Registry>, config: HealthCheckConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            registry,
            config,
            client,
        }
    }

    /// Run the monitor loop until shutdown is signalled.
    ///
    /// Each tick spawns one probe task per backend, so a slow or hanging
    /// backend delays only its own probe, never its peers or the tick
    /// cadence.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Active health checks disabled");
            return;
        }

        tracing::info!(
            interval = self.config.interval_secs,
            path = %self.config.path,
            "Health monitor starting"
        );

        let mut ticker = time::interval(Duration::from_secs(self.config.interval_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.spawn_probes();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Health monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    fn spawn_probes(&self) {
        for backend in self.registry.iter() {
            let backend = backend.clone();
            let client = self.client.clone();
            let path = self.config.path.clone();
            tokio::spawn(async move {
                probe(&client, &backend, &path).await;
            });
        }
    }
}

/// Probe one backend and set its health flag from the outcome.
///
/// Exactly HTTP 200 means healthy; any other status or a transport error
/// means unhealthy. No retry and no timeout override, the transport default
/// bounds a hanging probe.
async fn probe(client: &Client<HttpConnector, Body>, backend: &Arc<Backend>, path: &str) {
    let uri = format!(
        "{}://{}{}",
        backend.url().scheme(),
        backend.authority(),
        path
    );

    let request = match Request::builder()
        .method("GET")
        .uri(uri)
        .header("user-agent", "rr-balancer-health-check")
        .body(Body::empty())
    {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build health check request");
            return;
        }
    };

    let healthy = match client.request(request).await {
        Ok(response) => {
            let ok = response.status() == StatusCode::OK;
            if !ok {
                tracing::debug!(
                    url = %backend.url(),
                    status = %response.status(),
                    "Health check failed: non-200 status"
                );
            }
            ok
        }
        Err(e) => {
            tracing::debug!(url = %backend.url(), error = %e, "Health check failed: connection error");
            false
        }
    };

    backend.set_healthy(healthy);
}
