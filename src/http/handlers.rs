//! Todo resource handlers.
//!
//! Each handler translates one repository operation into HTTP: status code,
//! JSON body, or an [`ApiError`] envelope.

use axum::{
    body::Bytes,
    extract::{path::ErrorKind, rejection::PathRejection, FromRequestParts, Path, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::logging::{ctx_debug, ctx_warn};
use crate::observability::RequestContext;
use crate::repository::{Todo, TodoFields};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Wire representation of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoBody {
    pub id: String,
    pub status: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoBody {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            status: todo.status,
            description: todo.description,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Response of `GET /api/todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<TodoBody>,
}

/// Request body of create and update. Missing fields default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodoPayload {
    pub description: String,
    pub status: String,
}

impl From<TodoPayload> for TodoFields {
    fn from(payload: TodoPayload) -> Self {
        TodoFields::new(payload.status, payload.description)
    }
}

/// The `{id}` segment of a single-todo route.
///
/// A segment that does not percent-decode to UTF-8 is kept in its raw,
/// still-encoded form. Stored ids are decimal, so it never matches one and the
/// handler answers as it would for any unknown id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoId(pub String);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(PathRejection::FailedToDeserializePathParams(error))
                if matches!(error.kind(), ErrorKind::InvalidUtf8InPathParam { .. }) =>
            {
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                Ok(Self(raw.to_string()))
            }
            Err(rejection) => {
                let ctx = RequestContext::from_extensions(&parts.extensions);
                Err(ApiError::internal(&ctx, rejection))
            }
        }
    }
}

fn require_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        return Err(ApiError::bad_request("ID must be provided"));
    }
    Ok(())
}

fn require_json(headers: &HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    match content_type {
        Some(JSON_CONTENT_TYPE) => Ok(()),
        _ => Err(ApiError::unsupported_media_type()),
    }
}

/// Decode the first JSON value of `body`; anything after it is ignored.
fn decode_payload(ctx: &RequestContext, body: &[u8]) -> Result<TodoPayload, ApiError> {
    match serde_json::Deserializer::from_slice(body).into_iter::<TodoPayload>().next() {
        Some(Ok(payload)) => Ok(payload),
        Some(Err(error)) => {
            ctx_warn!(ctx, %error, "Decode request body");
            Err(ApiError::unprocessable_body())
        }
        None => {
            ctx_warn!(ctx, "Decode request body: empty");
            Err(ApiError::unprocessable_body())
        }
    }
}

/// `GET /healthcheck`
pub async fn healthcheck() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK!")
}

/// `GET /api/todos`
pub async fn get_all_todos(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<TodoList>, ApiError> {
    let todos = state
        .repository
        .get_all(&ctx)
        .map_err(|error| ApiError::internal(&ctx, format_args!("get todos: {error}")))?;

    Ok(Json(TodoList {
        todos: todos.into_iter().map(TodoBody::from).collect(),
    }))
}

/// `POST /api/todos`
pub async fn create_todo(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    require_json(&headers)?;
    let payload = decode_payload(&ctx, &body)?;

    let id = state
        .repository
        .create(&ctx, payload.into())
        .map_err(|error| ApiError::internal(&ctx, format_args!("create todo: {error}")))?;

    ctx_debug!(ctx, todo_id = %id, "Todo created");
    Ok(StatusCode::CREATED)
}

/// `GET /api/todos/{id}`
pub async fn get_todo(
    State(state): State<AppState>,
    ctx: RequestContext,
    TodoId(id): TodoId,
) -> Result<Json<TodoBody>, ApiError> {
    require_id(&id)?;

    let todo = state
        .repository
        .get(&ctx, &id)
        .map_err(|error| ApiError::from_repository(&ctx, "get todo", error))?;

    Ok(Json(todo.into()))
}

/// `PUT /api/todos/{id}`
pub async fn update_todo(
    State(state): State<AppState>,
    ctx: RequestContext,
    TodoId(id): TodoId,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    require_id(&id)?;
    require_json(&headers)?;
    let payload = decode_payload(&ctx, &body)?;

    state
        .repository
        .update(&ctx, &id, payload.into())
        .map_err(|error| ApiError::from_repository(&ctx, "update todo", error))?;

    Ok(StatusCode::ACCEPTED)
}

/// `DELETE /api/todos/{id}`
pub async fn delete_todo(
    State(state): State<AppState>,
    ctx: RequestContext,
    TodoId(id): TodoId,
) -> Result<StatusCode, ApiError> {
    require_id(&id)?;

    state
        .repository
        .delete(&ctx, &id)
        .map_err(|error| ApiError::internal(&ctx, format_args!("delete todo: {error}")))?;

    Ok(StatusCode::ACCEPTED)
}
