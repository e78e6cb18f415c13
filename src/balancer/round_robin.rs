//! Round-robin selection over healthy backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::balancer::backend::Backend;
use crate::balancer::registry::Registry;

/// Round-robin selector.
///
/// A shared monotonically increasing cursor rotates through the registry.
/// Each call consumes exactly one cursor value per attempt, so two
/// concurrent selections never observe the same raw value.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursor: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the next healthy backend.
    ///
    /// Unhealthy backends are skipped by taking another cursor step. If no
    /// backend is healthy this never returns: the loop keeps spinning until
    /// a probe flips a flag back. That is the documented behavior of the
    /// design; the `yield_now` keeps the spin from starving the runtime
    /// while it waits.
    pub async fn select(&self, registry: &Registry) -> Arc<Backend> {
        loop {
            // Index on the post-increment value, so the first selection
            // lands on the backend after position 0.
            let step = self.cursor.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
            let backend = registry.get(step % registry.len());
            if backend.is_healthy() {
                return backend.clone();
            }
            tokio::task::yield_now().await;
        }
    }
}
