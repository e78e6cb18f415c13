//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Periodic timer (monitor.rs)
//!     → one concurrent probe task per backend
//!     → GET <backend>/health
//!     → set the backend's health flag from the outcome
//! ```
//!
//! # Design Decisions
//! - Single writer per flag (the probe), many concurrent readers (selector)
//! - Eventual consistency: reads stale by at most one interval are fine
//! - No thresholds or hysteresis, the flag mirrors the latest probe

pub mod monitor;

pub use monitor::HealthMonitor;
