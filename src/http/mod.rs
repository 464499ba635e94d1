//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, timeout layer)
//!     → routing (verb + path → wrapped handler)
//!     → middleware/request_id.rs → middleware/access_log.rs
//!     → handlers.rs (repository call)
//!     → response.rs (JSON body or error envelope)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use middleware::REQUEST_ID_HEADER;
pub use response::{ApiError, ErrorBody};
pub use server::{AppState, HttpServer};
