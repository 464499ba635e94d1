//! Todo storage subsystem.
//!
//! # Data Flow
//! ```text
//! handlers
//!     → TodoRepository (capability trait, shared as Arc<dyn _>)
//!     → memory.rs (RwLock-guarded map + id counter)
//! ```
//!
//! # Design Decisions
//! - Handlers see only the trait, so another backend can be swapped in
//! - Ids and timestamps are assigned by the repository, never the caller
//! - `NotFound` is distinct from other failures so callers can map it to 404

pub mod memory;
pub mod types;

pub use memory::InMemoryTodoRepository;
pub use types::{RepositoryError, Todo, TodoFields, TodoRepository};
