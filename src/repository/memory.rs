//! In-memory todo store.
//!
//! # Design Decisions
//! - One `RwLock` guards the whole map: readers share, writers exclude
//! - Ids come from a monotonic counter bumped under the write lock
//! - The clock is injectable so timestamps can be driven in tests
//! - A poisoned lock surfaces as `RepositoryError::Unavailable`

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::observability::RequestContext;
use crate::repository::types::{RepositoryError, Todo, TodoFields, TodoRepository};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Concurrency-safe todo repository kept entirely in process memory.
pub struct InMemoryTodoRepository {
    todos: RwLock<HashMap<String, Todo>>,
    counter: AtomicU64,
    clock: Clock,
}

impl InMemoryTodoRepository {
    /// Create an empty repository using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Create an empty repository that reads time from `clock`.
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            todos: RwLock::new(HashMap::new()),
            counter: AtomicU64::new(0),
            clock: Box::new(clock),
        }
    }

    /// Number of stored todos.
    pub fn len(&self) -> usize {
        self.todos.read().map(|todos| todos.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("todo store lock poisoned".to_string())
}

impl TodoRepository for InMemoryTodoRepository {
    fn create(&self, _ctx: &RequestContext, fields: TodoFields) -> Result<String, RepositoryError> {
        let mut todos = self.todos.write().map_err(poisoned)?;

        let id = (self.counter.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        let now = (self.clock)();

        todos.insert(
            id.clone(),
            Todo {
                id: id.clone(),
                status: fields.status,
                description: fields.description,
                created_at: now,
                updated_at: now,
            },
        );

        Ok(id)
    }

    fn get(&self, _ctx: &RequestContext, id: &str) -> Result<Todo, RepositoryError> {
        let todos = self.todos.read().map_err(poisoned)?;
        todos.get(id).cloned().ok_or(RepositoryError::NotFound)
    }

    fn get_all(&self, _ctx: &RequestContext) -> Result<Vec<Todo>, RepositoryError> {
        let todos = self.todos.read().map_err(poisoned)?;
        Ok(todos.values().cloned().collect())
    }

    fn update(
        &self,
        _ctx: &RequestContext,
        id: &str,
        fields: TodoFields,
    ) -> Result<(), RepositoryError> {
        let mut todos = self.todos.write().map_err(poisoned)?;
        let existing = todos.get_mut(id).ok_or(RepositoryError::NotFound)?;

        // updated_at never moves backwards, even if the wall clock does
        let now = (self.clock)().max(existing.updated_at);

        existing.status = fields.status;
        existing.description = fields.description;
        existing.updated_at = now;

        Ok(())
    }

    fn delete(&self, _ctx: &RequestContext, id: &str) -> Result<(), RepositoryError> {
        let mut todos = self.todos.write().map_err(poisoned)?;
        todos.remove(id);
        Ok(())
    }
}
