//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request-id middleware
//!     → context.rs (attach request_id to the RequestContext)
//! handlers / access log
//!     → logging.rs (ctx_* macros read the accumulated attributes)
//!     → metrics.rs (per-route counters and latency)
//! ```
//!
//! # Design Decisions
//! - Request context is passed explicitly, never read from a global
//! - Every request-bound log line carries the request id
//! - Metrics are cheap (facade calls, no-op without a recorder)

pub mod context;
pub mod logging;
pub mod metrics;

pub use context::{Attr, RequestContext};
