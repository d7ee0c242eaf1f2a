//! HTTP route construction.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Build the service router around shared state.
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        // Upload form and flash messages
        .route("/", get(handlers::index))
        // Pipeline
        .route("/upload", post(handlers::upload))
        .route("/download", get(handlers::download))
        // Health check
        .route("/health", get(handlers::health_check))
        // State
        .with_state(state)
        // Middleware
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}
