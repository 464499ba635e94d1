//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the application state shared by every handler
//! - Assemble the route table with the middleware chain
//! - Apply router-wide layers (request timeout)
//! - Serve on a listener until shutdown, draining in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServerConfig;
use crate::http::middleware;
use crate::lifecycle::{wait_for_shutdown, ShutdownReceiver};
use crate::repository::TodoRepository;
use crate::routing::todo_routes;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn TodoRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }
}

/// HTTP server for the todo service.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server backed by `repository`.
    pub fn new(config: ServerConfig, repository: Arc<dyn TodoRepository>) -> Self {
        let state = AppState::new(repository);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        todo_routes(middleware::default_chain())
            .into_router()
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
    }

    /// The assembled router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are allowed to finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownReceiver,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            "HTTP server listen"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let reason = wait_for_shutdown(&mut shutdown).await;
                tracing::info!(reason, "HTTP server shutdown");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
