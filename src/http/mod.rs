//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Client → server.rs (axum listener, dispatch handler)
//!     → balancer (select healthy backend)
//!     → forward.rs (rebuild request, stream response)
//!     → Client
//! ```

pub mod forward;
pub mod server;

pub use forward::{forward, ForwardError, HttpClient};
pub use server::LbServer;
