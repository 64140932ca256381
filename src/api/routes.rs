use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_session_id, session_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Pages
        .route("/", get(handlers::home))
        .route("/description/:id", get(handlers::description))
        // Search box
        .route("/search", get(handlers::search_state).post(handlers::search_input))
        // Visitor state
        .route("/viewport", post(handlers::resize_viewport))
        .route("/interactions", get(handlers::get_interactions))
        .route("/status", get(handlers::get_status))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(session_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_session_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
