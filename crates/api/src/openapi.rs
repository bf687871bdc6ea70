//! OpenAPI documentation configuration.
//!
//! Provides OpenAPI spec generation using utoipa.

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{HealthResponse, SimulationRequest, SimulationResponse, StatisticsResponse};
use utoipa::OpenApi;

/// OpenAPI documentation structure.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Financial Risk Simulator API",
        version = "0.1.0",
        description = "Monte Carlo price projections under Geometric Brownian Motion, \
                       with percentile bands and Value-at-Risk statistics.",
        license(
            name = "MIT OR Apache-2.0",
            url = "https://github.com/joaquinbejar/risk-simulator"
        ),
        contact(
            name = "Joaquín Béjar García",
            email = "jb@taunais.com"
        )
    ),
    servers(
        (url = "/api", description = "API")
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Simulation", description = "Monte Carlo risk simulation")
    ),
    paths(
        handlers::health_check,
        handlers::run_simulation,
    ),
    components(
        schemas(
            HealthResponse,
            SimulationRequest,
            SimulationResponse,
            StatisticsResponse,
            ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

/// Returns the OpenAPI JSON specification.
#[must_use]
pub fn openapi_json() -> String {
    ApiDoc::openapi().to_json().unwrap_or_default()
}

/// Returns the OpenAPI specification as pretty-printed JSON.
#[must_use]
pub fn openapi_pretty_json() -> String {
    ApiDoc::openapi().to_pretty_json().unwrap_or_default()
}
