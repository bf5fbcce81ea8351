//! Skiff HTTP API server (Axum).
//!
//! Exposes the chat page, the upload fetch route, and the JSON API
//! (`/api/chat`, `/api/clear-history`, `/api/health`). All failures are
//! converted to structured JSON error responses at this layer.

pub mod cookie;
pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use state::AppState;

/// Build the application router over the given state.
pub fn app(state: AppState) -> Router {
    let max_body = state.config.upload.max_bytes;
    Router::new()
        .merge(routes::page_routes())
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
