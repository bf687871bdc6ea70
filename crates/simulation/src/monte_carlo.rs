//! Monte Carlo engine for GBM price projections.
//!
//! Runs every trial to completion, then reduces the path matrix into
//! day-wise bands and terminal risk statistics. Trials draw from a single
//! sampler stream in trial order, so a seeded sampler reproduces a run
//! exactly.

use crate::aggregation::{daily_bands, summarize};
use crate::config::EngineConfig;
use crate::price_path::{EulerGbm, PricePathGenerator};
use crate::sampler::NormalSource;
use risk_sim_domain::errors::{Result, SimulationError};
use risk_sim_domain::value_objects::parameters::SimulationParameters;
use risk_sim_domain::value_objects::price_path::PricePath;
use risk_sim_domain::value_objects::simulation_result::SimulationResult;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Projects prices under GBM and summarizes the outcome.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    config: EngineConfig,
}

impl MonteCarloEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a simulation with the configured sampler seeded from entropy.
    ///
    /// # Errors
    ///
    /// See [`MonteCarloEngine::simulate_with`].
    pub fn simulate(&self, params: &SimulationParameters) -> Result<SimulationResult> {
        let mut sampler = self.config.sampler.build(None);
        self.simulate_with(params, &mut sampler)
    }

    /// Runs a reproducible simulation with the configured sampler.
    ///
    /// # Errors
    ///
    /// See [`MonteCarloEngine::simulate_with`].
    pub fn simulate_seeded(
        &self,
        params: &SimulationParameters,
        seed: u64,
    ) -> Result<SimulationResult> {
        let mut sampler = self.config.sampler.build(Some(seed));
        self.simulate_with(params, &mut sampler)
    }

    /// Runs a simulation drawing noise from `sampler`.
    ///
    /// Preconditions: `current_price > 0`, `volatility_pct > 0`,
    /// `days > 0`, `num_simulations > 0`, and the path matrix fits in
    /// [`EngineConfig::max_matrix_cells`].
    ///
    /// # Errors
    ///
    /// - [`SimulationError::InvalidParameter`] if a precondition fails
    /// - [`SimulationError::ResourceExhaustion`] if the matrix is too large
    /// - [`SimulationError::NumericAnomaly`] if any value turns non-finite
    pub fn simulate_with<S>(
        &self,
        params: &SimulationParameters,
        sampler: &mut S,
    ) -> Result<SimulationResult>
    where
        S: NormalSource + ?Sized,
    {
        if let Err(e) = self.check_preconditions(params) {
            warn!(error = %e, "Rejected simulation request");
            return Err(e);
        }

        let started = Instant::now();
        info!(
            current_price = params.current_price,
            volatility_pct = params.volatility_pct,
            days = params.days,
            num_simulations = params.num_simulations,
            "Running Monte Carlo simulation"
        );

        let paths = self.generate_paths(params, sampler)?;
        let result = Self::aggregate(params, paths)?;

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            mean_final_price = result.statistics.mean_final_price,
            var_95_price = result.statistics.var_95_price,
            "Simulation complete"
        );
        Ok(result)
    }

    fn check_preconditions(&self, params: &SimulationParameters) -> Result<()> {
        params.validate()?;

        let requested = params.matrix_cells();
        if requested > self.config.max_matrix_cells {
            return Err(SimulationError::ResourceExhaustion {
                requested,
                limit: self.config.max_matrix_cells,
            });
        }
        Ok(())
    }

    fn generate_paths<S>(
        &self,
        params: &SimulationParameters,
        sampler: &mut S,
    ) -> Result<Vec<PricePath>>
    where
        S: NormalSource + ?Sized,
    {
        let mut gbm = EulerGbm::new(&self.config.model, params, sampler);
        (0..params.num_simulations).map(|_| gbm.generate()).collect()
    }

    fn aggregate(params: &SimulationParameters, paths: Vec<PricePath>) -> Result<SimulationResult> {
        let bands = daily_bands(&paths, params.path_len())?;

        let final_prices: Vec<f64> = paths
            .iter()
            .map(|path| {
                path.terminal()
                    .ok_or_else(|| SimulationError::anomaly("empty price path"))
            })
            .collect::<Result<_>>()?;

        let statistics = summarize(params.current_price, &final_prices)?;

        Ok(SimulationResult {
            paths,
            mean_path: bands.mean,
            percentile_5_path: bands.lower,
            percentile_95_path: bands.upper,
            final_prices,
            statistics,
        })
    }
}

/// Runs a simulation with the default engine configuration.
///
/// # Errors
///
/// See [`MonteCarloEngine::simulate_with`].
pub fn simulate(params: &SimulationParameters) -> Result<SimulationResult> {
    MonteCarloEngine::default().simulate(params)
}
