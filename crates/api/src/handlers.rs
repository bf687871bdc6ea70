//! Request handlers.

use crate::error::{ApiError, ErrorResponse};
use crate::models::{HealthResponse, SimulationRequest, SimulationResponse};
use crate::openapi::openapi_json;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::IntoResponse;
use risk_sim_simulation::MonteCarloEngine;
use tracing::debug;

/// Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Runs a Monte Carlo simulation.
///
/// The engine is CPU bound, so it runs on the blocking pool.
#[utoipa::path(
    post,
    path = "/simulate",
    tag = "Simulation",
    request_body = SimulationRequest,
    responses(
        (status = 200, description = "Simulation result", body = SimulationResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    )
)]
pub async fn run_simulation(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let params = request.to_parameters()?;
    debug!(?params, seed = ?request.seed, "Simulation request accepted");

    let engine = MonteCarloEngine::new(request.engine_config(*state.engine.config())?);
    let seed = request.seed;
    let result = tokio::task::spawn_blocking(move || match seed {
        Some(seed) => engine.simulate_seeded(&params, seed),
        None => engine.simulate(&params),
    })
    .await
    .map_err(|e| ApiError::Internal(format!("simulation worker failed: {e}")))??;

    Ok(Json(result.into()))
}

/// Serves the OpenAPI document.
pub async fn openapi_spec() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], openapi_json())
}
