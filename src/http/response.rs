//! Response shaping.
//!
//! # Responsibilities
//! - Render the uniform `{"code", "description"}` error envelope
//! - Map repository failures to HTTP status codes
//! - Keep internal error details out of responses
//!
//! # Design Decisions
//! - Client errors carry a safe, specific description
//! - Server errors always carry the same opaque description; the cause is logged

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::observability::logging::ctx_warn;
use crate::observability::RequestContext;
use crate::repository::RepositoryError;

pub const CODE_BAD_REQUEST: &str = "bad_request";
pub const CODE_NOT_FOUND: &str = "not_found";
pub const CODE_INTERNAL: &str = "internal";

const INTERNAL_DESCRIPTION: &str = "Internal server error. Try again later.";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub description: String,
}

/// An error that renders as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// Client error with an explicit status and machine-readable code.
    pub fn client(status: StatusCode, code: &str, description: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                description: description.into(),
            },
        }
    }

    pub fn bad_request(description: impl Into<String>) -> Self {
        Self::client(StatusCode::BAD_REQUEST, CODE_BAD_REQUEST, description)
    }

    pub fn unsupported_media_type() -> Self {
        Self::client(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            CODE_BAD_REQUEST,
            "Content-Type must be application/json",
        )
    }

    pub fn unprocessable_body() -> Self {
        Self::client(
            StatusCode::UNPROCESSABLE_ENTITY,
            CODE_BAD_REQUEST,
            "Cannot decode request body",
        )
    }

    pub fn todo_not_found() -> Self {
        Self::client(StatusCode::NOT_FOUND, CODE_NOT_FOUND, "Todo not found")
    }

    /// Log `error` against the request and return an opaque 500.
    pub fn internal(ctx: &RequestContext, error: impl Display) -> Self {
        ctx_warn!(ctx, error = %error, "Server error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                code: CODE_INTERNAL.to_string(),
                description: INTERNAL_DESCRIPTION.to_string(),
            },
        }
    }

    /// Map a repository failure: `NotFound` becomes 404, anything else 500.
    pub fn from_repository(ctx: &RequestContext, operation: &str, error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::todo_not_found(),
            other => Self::internal(ctx, format_args!("{operation}: {other}")),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
