//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request → round_robin.rs (advance shared cursor)
//!     → registry.rs (candidate at cursor % len)
//!     → backend.rs (health flag check)
//!     → Return healthy backend, or take another cursor step
//! ```
//!
//! # Design Decisions
//! - Registry is fixed at startup; only per-backend health flags mutate
//! - Selector state is a single atomic cursor, no locks
//! - Unhealthy backends excluded from selection

pub mod backend;
pub mod registry;
pub mod round_robin;

pub use backend::Backend;
pub use registry::{Registry, RegistryError};
pub use round_robin::RoundRobin;
