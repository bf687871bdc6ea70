use crate::value_objects::price_path::PricePath;
use serde::{Deserialize, Serialize};

/// Risk figures derived from the terminal price distribution.
///
/// Every field except `initial_price` is rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub initial_price: f64,
    pub mean_final_price: f64,
    /// Population standard deviation of the terminal prices.
    pub std_dev: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// 5th percentile of the terminal prices.
    pub var_95_price: f64,
    /// `initial_price - var_95_price`.
    pub var_95_loss: f64,
    /// `var_95_loss` as a percentage of `initial_price`.
    pub var_95_pct: f64,
    pub expected_return_pct: f64,
}

/// Everything produced by one Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One path per trial, each `days + 1` long.
    pub paths: Vec<PricePath>,
    pub mean_path: Vec<f64>,
    pub percentile_5_path: Vec<f64>,
    pub percentile_95_path: Vec<f64>,
    /// Terminal price of each trial, in trial order.
    pub final_prices: Vec<f64>,
    pub statistics: SummaryStatistics,
}

impl SimulationResult {
    /// Number of trials in the run.
    #[must_use]
    pub fn num_simulations(&self) -> usize {
        self.paths.len()
    }

    /// Number of simulated days (excluding day 0).
    #[must_use]
    pub fn days(&self) -> usize {
        self.mean_path.len().saturating_sub(1)
    }
}
