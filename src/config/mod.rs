//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file → loader.rs (read + parse)
//!     → validation.rs (semantic checks, all errors collected)
//!     → schema.rs types consumed by the rest of the system
//! ```
//!
//! # Design Decisions
//! - Everything fixed at startup; no runtime reconfiguration
//! - Defaults match the reference deployment (port 8080, two local backends)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BalancerConfig, HealthCheckConfig, ListenerConfig, ObservabilityConfig};
