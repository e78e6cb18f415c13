//! Process lifecycle: startup wiring and graceful shutdown.

pub mod shutdown;

pub use shutdown::Shutdown;
