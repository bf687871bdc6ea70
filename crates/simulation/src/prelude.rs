//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use risk_sim_simulation::prelude::*;
//! ```

// Aggregation
pub use crate::aggregation::{DailyBands, RunningMoments, daily_bands, percentile_index, summarize};

// Configuration
pub use crate::config::{DEFAULT_MAX_MATRIX_CELLS, EngineConfig};

// Engine
pub use crate::monte_carlo::{MonteCarloEngine, simulate};

// Price path generators
pub use crate::price_path::{EulerGbm, GbmModel, PricePathGenerator};

// Samplers
pub use crate::sampler::{BoxMullerSampler, FixedSequence, NormalSource, SamplerKind, ZigguratSampler};

// Domain types
pub use risk_sim_domain::{
    PricePath, SimulationError, SimulationParameters, SimulationResult, SummaryStatistics,
};
