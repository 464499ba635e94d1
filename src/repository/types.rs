//! Todo records and the repository capability set.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::observability::RequestContext;

/// A stored todo record.
///
/// `id` and `created_at` never change after creation; `updated_at` moves
/// forward on every successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub status: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-controlled fields of a todo, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFields {
    pub status: String,
    pub description: String,
}

impl TodoFields {
    pub fn new(status: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            description: description.into(),
        }
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No todo exists with the requested id.
    #[error("todo not found")]
    NotFound,

    /// The backing store cannot serve requests.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage capability set the HTTP handlers depend on.
///
/// Every operation takes the request context. It is not consulted for
/// cancellation yet.
pub trait TodoRepository: Send + Sync {
    /// Store a new todo and return its assigned id.
    fn create(&self, ctx: &RequestContext, fields: TodoFields) -> Result<String, RepositoryError>;

    /// Fetch a single todo.
    fn get(&self, ctx: &RequestContext, id: &str) -> Result<Todo, RepositoryError>;

    /// Fetch every todo. The order of the returned records is unspecified.
    fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Todo>, RepositoryError>;

    /// Replace status and description of an existing todo.
    fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        fields: TodoFields,
    ) -> Result<(), RepositoryError>;

    /// Remove a todo. Deleting an unknown id succeeds.
    fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RepositoryError>;
}
