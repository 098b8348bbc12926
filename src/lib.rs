use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;

pub mod config;
pub mod error;
pub mod guards;
pub mod handlers;
pub mod middleware;
pub mod store;
pub mod todo;
pub mod user;

use store::Store;

#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/users", post(handlers::create_user))
        .route("/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todos/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .route("/todos/{id}/done", patch(handlers::complete_todo))
        .layer(axum_middleware::from_fn(middleware::cors))
        .layer(axum_middleware::from_fn(middleware::log_request))
        .with_state(state)
}

/// Serves the API on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
