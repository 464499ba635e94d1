//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup):
//!     (path, verb handler, RouteMetadata)
//!     → middleware chain wraps the handler
//!     → merged into one axum Router
//!
//! Incoming request:
//!     → axum path/verb match
//!     → wrapped handler for that route
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Route names are static and only used for observability
//! - Same path with different verbs shares one axum route entry

pub mod router;

pub use router::{todo_routes, RouteMetadata, RouteTable};
