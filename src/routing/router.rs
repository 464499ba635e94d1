//! Route table and dispatch.
//!
//! # Responsibilities
//! - Register (verb, path) pairs with their handler and static name
//! - Wrap every handler in the same middleware chain
//! - Hand the finished table to axum for path matching
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - `{id}` only matches a non-empty segment; `/api/todos/` is not routed
//! - Unmatched requests fall through to axum's default 404/405

use axum::{
    routing::{delete, get, post, put, MethodRouter},
    Router,
};

use crate::http::handlers;
use crate::http::middleware::{self, Middleware};
use crate::http::server::AppState;

/// Static per-route labeling data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMetadata {
    /// Route name used in access logs and metrics.
    pub name: &'static str,
}

impl RouteMetadata {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

/// Builder collecting routes that share one middleware chain.
pub struct RouteTable {
    router: Router<AppState>,
    middlewares: Vec<Middleware>,
    names: Vec<&'static str>,
}

impl RouteTable {
    /// Start an empty table; `middlewares` are listed outermost first.
    pub fn new(middlewares: Vec<Middleware>) -> Self {
        Self {
            router: Router::new(),
            middlewares,
            names: Vec::new(),
        }
    }

    /// Register `handler` under `path`, wrapped in the middleware chain.
    pub fn handle(
        mut self,
        path: &str,
        handler: MethodRouter<AppState>,
        meta: RouteMetadata,
    ) -> Self {
        let wrapped = middleware::compose(&self.middlewares, handler, meta);
        self.router = self.router.route(path, wrapped);
        self.names.push(meta.name);
        self
    }

    /// Names of the registered routes, in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn into_router(self) -> Router<AppState> {
        self.router
    }
}

/// The service's route table.
pub fn todo_routes(middlewares: Vec<Middleware>) -> RouteTable {
    RouteTable::new(middlewares)
        .handle(
            "/healthcheck",
            get(handlers::healthcheck),
            RouteMetadata::new("healthcheck"),
        )
        .handle(
            "/api/todos",
            get(handlers::get_all_todos),
            RouteMetadata::new("getAllTodos"),
        )
        .handle(
            "/api/todos",
            post(handlers::create_todo),
            RouteMetadata::new("createTodo"),
        )
        .handle(
            "/api/todos/{id}",
            get(handlers::get_todo),
            RouteMetadata::new("getTodo"),
        )
        .handle(
            "/api/todos/{id}",
            put(handlers::update_todo),
            RouteMetadata::new("updateTodo"),
        )
        .handle(
            "/api/todos/{id}",
            delete(handlers::delete_todo),
            RouteMetadata::new("deleteTodo"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::Request,
        http::StatusCode,
        middleware::{from_fn, Next},
    };
    use tower::ServiceExt;

    use crate::repository::InMemoryTodoRepository;

    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryTodoRepository::new()))
    }

    /// Middleware that records `label` and the route name when entered.
    fn recording(label: &'static str, seen: Arc<Mutex<Vec<String>>>) -> Middleware {
        Arc::new(move |next: MethodRouter<AppState>, meta: RouteMetadata| {
            let seen = seen.clone();
            next.layer(from_fn(move |request: Request, next: Next| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(format!("{label}:{}", meta.name));
                    next.run(request).await
                }
            }))
        })
    }

    #[test]
    fn test_route_names() {
        let table = todo_routes(Vec::new());
        assert_eq!(
            table.names(),
            &[
                "healthcheck",
                "getAllTodos",
                "createTodo",
                "getTodo",
                "updateTodo",
                "deleteTodo"
            ]
        );
    }

    #[tokio::test]
    async fn test_middlewares_run_outermost_first_with_route_metadata() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = vec![
            recording("outer", seen.clone()),
            recording("inner", seen.clone()),
        ];
        let app = todo_routes(chain).into_router().with_state(state());

        let response = app
            .oneshot(Request::builder().uri("/api/todos").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["outer:getAllTodos".to_string(), "inner:getAllTodos".to_string()]
        );
    }

    #[tokio::test]
    async fn test_same_path_dispatches_by_verb() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = todo_routes(vec![recording("mw", seen.clone())])
            .into_router()
            .with_state(state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/todos/5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(*seen.lock().unwrap(), vec!["mw:deleteTodo".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_id_segment_is_not_routed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = todo_routes(vec![recording("mw", seen.clone())])
            .into_router()
            .with_state(state());

        let response = app
            .oneshot(Request::builder().uri("/api/todos/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(seen.lock().unwrap().is_empty());
    }
}
