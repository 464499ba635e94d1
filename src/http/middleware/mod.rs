//! Per-route middleware.
//!
//! A [`Middleware`] takes a route's handler together with the route's static
//! metadata and returns a wrapped handler. The route table applies the same
//! list of middlewares to every route, outermost first.
//!
//! # Data Flow
//! ```text
//! request
//!     → request_id.rs (read or generate id, attach to RequestContext)
//!     → access_log.rs (time the handler, observe status and size)
//!     → handler
//! ```

use std::sync::Arc;

use axum::routing::MethodRouter;

use crate::http::server::AppState;
use crate::routing::RouteMetadata;

pub mod access_log;
pub mod request_id;

pub use access_log::access_log;
pub use request_id::{request_id, REQUEST_ID_HEADER};

/// Handler transform applied at route registration time.
pub type Middleware =
    Arc<dyn Fn(MethodRouter<AppState>, RouteMetadata) -> MethodRouter<AppState> + Send + Sync>;

/// The fixed chain used by the service: request id first, then access logging.
pub fn default_chain() -> Vec<Middleware> {
    vec![
        Arc::new(request_id) as Middleware,
        Arc::new(access_log) as Middleware,
    ]
}

/// Wrap `handler` so that `middlewares[0]` is the outermost layer.
pub fn compose(
    middlewares: &[Middleware],
    handler: MethodRouter<AppState>,
    meta: RouteMetadata,
) -> MethodRouter<AppState> {
    middlewares
        .iter()
        .rev()
        .fold(handler, |inner, middleware| middleware(inner, meta))
}
