//! REST API server and endpoints.
//!
//! This crate exposes the Monte Carlo engine over HTTP:
//! - `POST /api/simulate` runs a simulation
//! - `GET /api/health` reports liveness
//! - `GET /api/openapi.json` serves the OpenAPI document

/// Prelude module for convenient imports.
pub mod prelude;

/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// API request/response models.
pub mod models;
/// OpenAPI documentation.
pub mod openapi;
/// Route definitions.
pub mod routes;
/// Server configuration and startup.
pub mod server;
/// Application state.
pub mod state;

pub use error::ApiError;
pub use openapi::ApiDoc;
pub use routes::create_router;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;
