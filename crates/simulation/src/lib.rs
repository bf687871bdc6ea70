//! Monte Carlo price-risk simulation.
//!
//! This crate provides the simulation core:
//! - Standard-normal samplers (Box-Muller, ziggurat, fixed sequences)
//! - Euler discretization of Geometric Brownian Motion
//! - The Monte Carlo engine and its configuration
//! - Reduction of simulated paths into bands and risk statistics

/// Prelude module for convenient imports.
pub mod prelude;

/// Path matrix reduction.
pub mod aggregation;
/// Engine configuration.
pub mod config;
/// Monte Carlo engine.
pub mod monte_carlo;
/// GBM price path generation.
pub mod price_path;
/// Gaussian samplers.
pub mod sampler;

pub use config::EngineConfig;
pub use monte_carlo::{MonteCarloEngine, simulate};
pub use sampler::{NormalSource, SamplerKind};
