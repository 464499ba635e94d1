//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main):
//!     Parse flags → Load config → Validate → Init logging → Bind → Serve
//!
//! Shutdown:
//!     signals.rs (SIGINT/SIGTERM)
//!     → shutdown.rs (broadcast to the server)
//!     → stop accepting, drain in-flight requests, bounded by a grace period
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{wait_for_shutdown, Shutdown, ShutdownReceiver};
pub use signals::wait_for_signal;
