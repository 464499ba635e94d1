//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use todo_server::{HttpServer, InMemoryTodoRepository, ServerConfig, Shutdown};

/// Router backed by a fresh in-memory repository.
#[allow(dead_code)]
pub fn router() -> Router {
    HttpServer::new(ServerConfig::default(), Arc::new(InMemoryTodoRepository::new())).router()
}

/// Build a request with an optional content type and body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Collect a response body into a string.
#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a server on an ephemeral port.
///
/// Returns the bound address, the shutdown coordinator, and the server task.
#[allow(dead_code)]
pub async fn start_server() -> (SocketAddr, Shutdown, JoinHandle<std::io::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServerConfig::default();
    config.listener.listen_addr = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(InMemoryTodoRepository::new()));
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown, handle)
}
