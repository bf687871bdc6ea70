//! Engine configuration.

use crate::price_path::GbmModel;
use crate::sampler::SamplerKind;
use serde::{Deserialize, Serialize};

/// Default cap on `num_simulations * (days + 1)` (~400 MB of `f64`).
pub const DEFAULT_MAX_MATRIX_CELLS: u64 = 50_000_000;

/// Configuration for [`crate::monte_carlo::MonteCarloEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// GBM constants.
    pub model: GbmModel,
    /// Largest path matrix a single run may allocate.
    pub max_matrix_cells: u64,
    /// Sampler used when the caller does not inject one.
    pub sampler: SamplerKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: GbmModel::default(),
            max_matrix_cells: DEFAULT_MAX_MATRIX_CELLS,
            sampler: SamplerKind::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the GBM constants.
    #[must_use]
    pub fn with_model(mut self, model: GbmModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the path matrix budget.
    #[must_use]
    pub fn with_max_matrix_cells(mut self, cells: u64) -> Self {
        self.max_matrix_cells = cells;
        self
    }

    /// Sets the default sampler.
    #[must_use]
    pub fn with_sampler(mut self, sampler: SamplerKind) -> Self {
        self.sampler = sampler;
        self
    }
}
