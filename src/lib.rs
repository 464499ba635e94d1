//! In-memory todo service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod repository;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use repository::{InMemoryTodoRepository, TodoRepository};
