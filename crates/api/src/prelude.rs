//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use risk_sim_api::prelude::*;
//! ```

pub use crate::error::{ApiError, ErrorResponse};
pub use crate::models::{HealthResponse, SimulationRequest, SimulationResponse, StatisticsResponse};
pub use crate::routes::create_router;
pub use crate::server::{ApiServer, ServerConfig};
pub use crate::state::AppState;
