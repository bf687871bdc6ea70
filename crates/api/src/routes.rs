//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router, with every route under `/api`.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/simulate", post(handlers::run_simulation))
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(handlers::openapi_spec));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
