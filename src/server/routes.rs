//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/isochrone", get(handlers::isochrone))
        .route("/api/pois", get(handlers::pois))
        .route("/api/analysis", get(handlers::analysis))
        .route("/api/directions", get(handlers::directions))
        .route("/api/bulk_directions", get(handlers::bulk_directions))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        // 允許任何來源、方法與標頭
        .layer(CorsLayer::permissive())
        .with_state(state)
}
