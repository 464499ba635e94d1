//! Request id assignment.
//!
//! Reuses the inbound `request-id` header or generates a UUID v4, echoes it
//! on the response, and attaches it to the [`RequestContext`] so every log
//! line for the request carries it.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::{from_fn, Next},
    response::Response,
    routing::MethodRouter,
};
use uuid::Uuid;

use crate::http::server::AppState;
use crate::observability::{Attr, RequestContext};
use crate::routing::RouteMetadata;

/// Header carrying the request correlation id, inbound and outbound.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("request-id");

/// Log attribute key for the request id.
pub const REQUEST_ID_ATTR: &str = "request_id";

/// Wrap `next` with request id assignment.
pub fn request_id(next: MethodRouter<AppState>, _meta: RouteMetadata) -> MethodRouter<AppState> {
    next.layer(from_fn(assign_request_id))
}

async fn assign_request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .filter(|value| !value.is_empty())
        .cloned()
        .or_else(generate_request_id);

    let attr_value = request_id
        .as_ref()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();
    let ctx = RequestContext::from_extensions(request.extensions())
        .append_attrs([Attr::new(REQUEST_ID_ATTR, attr_value)]);
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).await;

    // inbound bytes are echoed untouched, even when they are not UTF-8
    if let Some(value) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn generate_request_id() -> Option<HeaderValue> {
    HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    use crate::repository::InMemoryTodoRepository;

    async fn echo_request_id(ctx: RequestContext) -> String {
        ctx.get(REQUEST_ID_ATTR).unwrap_or_default().to_string()
    }

    fn app() -> Router {
        let meta = RouteMetadata::new("echo");
        Router::new()
            .route("/echo", request_id(get(echo_request_id), meta))
            .with_state(AppState::new(Arc::new(InMemoryTodoRepository::new())))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_inbound_id_is_echoed_and_attached() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/echo")
                    .header("request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("request-id").unwrap(), "abc-123");
        assert_eq!(body_text(response).await, "abc-123");
    }

    #[tokio::test]
    async fn test_missing_id_is_generated() {
        let response = app()
            .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response
            .headers()
            .get("request-id")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(Uuid::parse_str(&header).is_ok());
        assert_eq!(body_text(response).await, header);
    }

    #[tokio::test]
    async fn test_empty_id_is_replaced() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/echo")
                    .header("request-id", "")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let header = response.headers().get("request-id").unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(header).is_ok());
    }

    #[tokio::test]
    async fn test_non_utf8_id_is_echoed_byte_for_byte() {
        let inbound = HeaderValue::from_bytes(b"caf\xe9-42").unwrap();
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/echo")
                    .header("request-id", inbound.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get("request-id").unwrap(), &inbound);
        assert_eq!(body_text(response).await, "caf\u{fffd}-42");
    }
}
