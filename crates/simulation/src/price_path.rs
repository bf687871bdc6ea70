use crate::sampler::NormalSource;
use risk_sim_domain::errors::{Result, SimulationError};
use risk_sim_domain::value_objects::parameters::SimulationParameters;
use risk_sim_domain::value_objects::price_path::PricePath;
use serde::{Deserialize, Serialize};

/// Trading days per year used to derive the step size.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;
/// Annual drift applied to every path.
pub const ANNUAL_DRIFT: f64 = 0.05;

/// Fixed constants of the GBM discretization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GbmModel {
    /// Annualized drift (mu), e.g. 0.05 for 5%.
    pub drift: f64,
    /// Steps per year; `dt = 1 / trading_days_per_year`.
    pub trading_days_per_year: u32,
}

impl Default for GbmModel {
    fn default() -> Self {
        Self {
            drift: ANNUAL_DRIFT,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl GbmModel {
    /// Creates a model with custom constants.
    ///
    /// # Errors
    ///
    /// Fails if `drift` is not finite or `trading_days_per_year` is zero.
    pub fn new(drift: f64, trading_days_per_year: u32) -> Result<Self> {
        if !drift.is_finite() {
            return Err(SimulationError::invalid("drift", "must be finite"));
        }
        if trading_days_per_year == 0 {
            return Err(SimulationError::invalid(
                "trading_days_per_year",
                "must be greater than zero",
            ));
        }
        Ok(Self {
            drift,
            trading_days_per_year,
        })
    }

    /// Step size in years.
    #[must_use]
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.trading_days_per_year)
    }
}

/// Trait for producing one price path per call.
pub trait PricePathGenerator {
    /// Generates the next path.
    fn generate(&mut self) -> Result<PricePath>;
}

/// Euler discretization of GBM with additive noise, floored at zero:
///
/// ```text
/// S[t+1] = max(S[t] + mu * S[t] * dt + sigma * S[t] * sqrt(dt) * z, 0)
/// ```
pub struct EulerGbm<'s, S: NormalSource + ?Sized> {
    sampler: &'s mut S,
    initial_price: f64,
    steps: usize,
    drift: f64,
    sigma: f64,
    dt: f64,
    sqrt_dt: f64,
}

impl<'s, S: NormalSource + ?Sized> EulerGbm<'s, S> {
    /// Prepares a generator for `params` drawing noise from `sampler`.
    pub fn new(model: &GbmModel, params: &SimulationParameters, sampler: &'s mut S) -> Self {
        let dt = model.dt();
        Self {
            sampler,
            initial_price: params.current_price,
            steps: params.days as usize,
            drift: model.drift,
            sigma: params.volatility_pct / 100.0,
            dt,
            sqrt_dt: dt.sqrt(),
        }
    }

    /// Advances one step from `current` using the draw `z`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::NumericAnomaly`] if `z` or the resulting
    /// price is not finite.
    pub fn step(&self, current: f64, z: f64) -> Result<f64> {
        if !z.is_finite() {
            return Err(SimulationError::anomaly(format!(
                "gaussian draw returned {z}"
            )));
        }

        let drift_term = self.drift * current * self.dt;
        let vol_term = self.sigma * current * self.sqrt_dt * z;
        let next = current + drift_term + vol_term;

        // f64::max would turn NaN into 0.0
        if !next.is_finite() {
            return Err(SimulationError::anomaly(format!(
                "price step from {current} produced {next}"
            )));
        }
        Ok(next.max(0.0))
    }
}

impl<S: NormalSource + ?Sized> PricePathGenerator for EulerGbm<'_, S> {
    fn generate(&mut self) -> Result<PricePath> {
        let mut prices = Vec::with_capacity(self.steps + 1);
        prices.push(self.initial_price);

        let mut current = self.initial_price;
        for _ in 0..self.steps {
            let z = self.sampler.sample();
            current = self.step(current, z)?;
            prices.push(current);
        }

        Ok(PricePath::new(prices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{BoxMullerSampler, FixedSequence};

    #[test]
    fn test_default_model_constants() {
        let model = GbmModel::default();
        assert_eq!(model.drift, 0.05);
        assert_eq!(model.trading_days_per_year, 252);
        assert_eq!(model.dt(), 1.0 / 252.0);
    }

    #[test]
    fn test_model_rejects_bad_constants() {
        assert!(GbmModel::new(f64::NAN, 252).is_err());
        assert!(GbmModel::new(0.05, 0).is_err());
        assert!(GbmModel::new(0.02, 365).is_ok());
    }

    #[test]
    fn test_gbm_generation() {
        let params = SimulationParameters::new(100.0, 20.0, 10, 1);
        let mut sampler = BoxMullerSampler::seeded(1);
        let mut gbm = EulerGbm::new(&GbmModel::default(), &params, &mut sampler);
        let path = gbm.generate().unwrap();

        assert_eq!(path.len(), 11);
        assert_eq!(path.initial(), Some(100.0));
        assert!(path.as_slice().iter().all(|p| *p >= 0.0));

        let all_same = path.as_slice().iter().all(|p| *p == 100.0);
        assert!(!all_same);
    }

    #[test]
    fn test_single_step_matches_recurrence() {
        let params = SimulationParameters::new(100.0, 20.0, 1, 1);
        let mut sampler = FixedSequence::new(vec![1.0]);
        let mut gbm = EulerGbm::new(&GbmModel::default(), &params, &mut sampler);
        let path = gbm.generate().unwrap();

        let dt: f64 = 1.0 / 252.0;
        let expected = 100.0 + 0.05 * 100.0 * dt + 0.2 * 100.0 * dt.sqrt() * 1.0;
        assert!((path.at(1).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_price_is_floored_at_zero() {
        let params = SimulationParameters::new(100.0, 20.0, 3, 1);
        // sigma * sqrt(dt) ~ 0.0126, so z = -1000 wipes the price out
        let mut sampler = FixedSequence::new(vec![-1000.0, 2.0, 2.0]);
        let mut gbm = EulerGbm::new(&GbmModel::default(), &params, &mut sampler);
        let path = gbm.generate().unwrap();

        assert_eq!(path.as_slice(), &[100.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_non_finite_draw_is_reported() {
        let params = SimulationParameters::new(100.0, 20.0, 2, 1);
        let mut sampler = FixedSequence::new(vec![f64::NAN]);
        let mut gbm = EulerGbm::new(&GbmModel::default(), &params, &mut sampler);

        assert!(matches!(
            gbm.generate(),
            Err(SimulationError::NumericAnomaly { .. })
        ));
    }
}
