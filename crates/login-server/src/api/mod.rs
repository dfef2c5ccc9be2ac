//! API module - Axum routes

pub mod auth;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use login_core::{SqliteUserStore, UserService};

/// Shared handler state: the auth service over the SQLite store.
pub type AppState = Arc<UserService<SqliteUserStore>>;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", auth::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
