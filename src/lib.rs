//! Round-robin HTTP load balancer.
//!
//! Accepts client requests, selects one of a fixed set of backends in
//! round-robin order over the healthy ones, forwards the request, and
//! relays the response. A background monitor probes each backend's
//! `/health` endpoint and keeps the per-backend health flags current.

pub mod balancer;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;

pub use config::BalancerConfig;
pub use http::LbServer;
pub use lifecycle::Shutdown;
