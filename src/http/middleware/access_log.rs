//! Access logging.
//!
//! Runs the wrapped handler, then emits exactly one `request` event with the
//! route name, status code, duration and response size. The response passes
//! through untouched.

use std::time::Instant;

use axum::{
    body::HttpBody,
    extract::{Request, State},
    http::StatusCode,
    middleware::{from_fn_with_state, Next},
    response::Response,
    routing::MethodRouter,
};
use tracing::Level;

use crate::http::server::AppState;
use crate::observability::logging::{ctx_info, ctx_warn};
use crate::observability::{metrics, RequestContext};
use crate::routing::RouteMetadata;

const EVENT_TYPE: &str = "middleware.logging";

/// Wrap `next` with access logging labeled by `meta`.
pub fn access_log(next: MethodRouter<AppState>, meta: RouteMetadata) -> MethodRouter<AppState> {
    next.layer(from_fn_with_state(meta, log_access))
}

/// Severity of the access log line for `status`.
pub fn severity(status: StatusCode) -> Level {
    if status.as_u16() >= 400 {
        Level::WARN
    } else {
        Level::INFO
    }
}

async fn log_access(State(meta): State<RouteMetadata>, request: Request, next: Next) -> Response {
    let ctx = RequestContext::from_extensions(request.extensions());
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    let status = response.status();
    let written_bytes = response.body().size_hint().exact().unwrap_or(0);
    let code = status.as_u16();

    metrics::record_request(meta.name, code, elapsed);

    if severity(status) == Level::WARN {
        ctx_warn!(
            ctx,
            event_type = EVENT_TYPE,
            route = meta.name,
            code,
            duration = ?elapsed,
            written_bytes,
            "request"
        );
    } else {
        ctx_info!(
            ctx,
            event_type = EVENT_TYPE,
            route = meta.name,
            code,
            duration = ?elapsed,
            written_bytes,
            "request"
        );
    }

    response
}
