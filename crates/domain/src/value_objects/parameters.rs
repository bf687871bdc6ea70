use crate::errors::SimulationError;
use serde::{Deserialize, Serialize};

/// Inputs of a single Monte Carlo run.
///
/// Preconditions (checked by [`SimulationParameters::validate`]):
/// - `current_price` is finite and strictly positive
/// - `volatility_pct` is finite and strictly positive
/// - `days` and `num_simulations` are non-zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Spot price at day 0.
    pub current_price: f64,
    /// Annualized volatility in percent (20.0 means 20%).
    pub volatility_pct: f64,
    /// Number of trading-day steps to project.
    pub days: u32,
    /// Number of independent trials.
    pub num_simulations: u32,
}

impl SimulationParameters {
    /// Creates a new parameter set. Does not validate.
    #[must_use]
    pub fn new(current_price: f64, volatility_pct: f64, days: u32, num_simulations: u32) -> Self {
        Self {
            current_price,
            volatility_pct,
            days,
            num_simulations,
        }
    }

    /// Checks the engine preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.current_price.is_finite() || self.current_price <= 0.0 {
            return Err(SimulationError::invalid(
                "current_price",
                format!("must be a positive number, got {}", self.current_price),
            ));
        }
        if !self.volatility_pct.is_finite() || self.volatility_pct <= 0.0 {
            return Err(SimulationError::invalid(
                "volatility",
                format!("must be a positive percentage, got {}", self.volatility_pct),
            ));
        }
        if self.days == 0 {
            return Err(SimulationError::invalid(
                "days",
                "must be greater than zero",
            ));
        }
        if self.num_simulations == 0 {
            return Err(SimulationError::invalid(
                "num_simulations",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Number of prices stored per path (`days + 1`).
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.days as usize + 1
    }

    /// Total number of cells in the path matrix.
    #[must_use]
    pub fn matrix_cells(&self) -> u64 {
        u64::from(self.num_simulations) * (u64::from(self.days) + 1)
    }
}
