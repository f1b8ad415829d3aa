//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Destination catalog (v1)
        .route("/v1/destinations", get(handlers::destinations::list_destinations))
        .route(
            "/v1/destinations/{place_id}",
            get(handlers::destinations::get_destination),
        )
        // Routes (v1)
        .route("/v1/routes/generate", post(handlers::routing::generate_routes))
        .route("/v1/routes/current", get(handlers::routing::current_batch))
        .route("/v1/routes/reconcile", post(handlers::routing::reconcile_routes))
        .route("/v1/routes/geometry", post(handlers::routing::route_geometry))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestIdLayer::new())
        // Attach state
        .with_state(state)
}
