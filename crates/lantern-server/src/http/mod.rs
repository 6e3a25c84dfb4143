//! Control API router.

pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the control API router over the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/config", get(handlers::get_config))
        .route("/list", get(handlers::list))
        .route("/nodes/:nodeName", get(handlers::get_node))
        .route("/configure", post(handlers::configure))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
