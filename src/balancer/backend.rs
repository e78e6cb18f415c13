//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single backend server
//! - Track health state (healthy/unhealthy)
//!
//! # Design Decisions
//! - The base URL is immutable after construction
//! - The health flag is the only mutable field; a single atomic bool,
//!   written by the health monitor and read by the selector

use std::sync::atomic::{AtomicBool, Ordering};

use url::Url;

/// A single backend server.
#[derive(Debug)]
pub struct Backend {
    /// Base URL of the backend (scheme + host + port).
    url: Url,
    /// Current health state. Backends start healthy, matching the
    /// assumption that configured servers are up until a probe says
    /// otherwise.
    healthy: AtomicBool,
}

impl Backend {
    /// Create a new backend from a parsed base URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            healthy: AtomicBool::new(true),
        }
    }

    /// The backend's base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Authority (host:port) of the backend, for outbound URI rewriting.
    pub fn authority(&self) -> String {
        match self.url.port_or_known_default() {
            Some(port) => format!("{}:{}", self.url.host_str().unwrap_or_default(), port),
            None => self.url.host_str().unwrap_or_default().to_string(),
        }
    }

    /// Whether the backend is currently considered healthy.
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }

    /// Update the health flag. Called only by the health monitor.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }
}
