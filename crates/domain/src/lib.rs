//! Domain types for the risk simulator.
//!
//! This crate holds the value objects shared by the simulation engine and
//! its callers:
//! - Simulation parameters and their preconditions
//! - Simulated price paths
//! - Simulation results and summary statistics
//! - The error taxonomy of the engine
//! - Presentation rounding for risk metrics

/// Error types.
pub mod errors;
/// Risk metric helpers.
pub mod metrics;
/// Value objects.
pub mod value_objects;

pub use errors::SimulationError;
pub use value_objects::parameters::SimulationParameters;
pub use value_objects::price_path::PricePath;
pub use value_objects::simulation_result::{SimulationResult, SummaryStatistics};
