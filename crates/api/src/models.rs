//! Request and response bodies.

use risk_sim_domain::{SimulationError, SimulationParameters, SimulationResult, SummaryStatistics};
use risk_sim_simulation::EngineConfig;
use risk_sim_simulation::price_path::GbmModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/simulate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimulationRequest {
    /// Spot price, must be positive.
    pub current_price: f64,
    /// Annualized volatility in percent, must be positive.
    pub volatility: f64,
    /// Trading days to project, must be positive.
    pub days: i64,
    /// Number of Monte Carlo trials, must be positive.
    pub num_simulations: i64,
    /// Optional seed for a reproducible run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Annual drift for this run. Defaults to the server's model drift.
    #[serde(default)]
    pub risk_free_rate: Option<f64>,
}

impl SimulationRequest {
    /// Converts the wire body into engine parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if a count is not a
    /// positive 32-bit integer or any precondition fails.
    pub fn to_parameters(&self) -> Result<SimulationParameters, SimulationError> {
        let days = positive_count("days", self.days)?;
        let num_simulations = positive_count("num_simulations", self.num_simulations)?;
        let params =
            SimulationParameters::new(self.current_price, self.volatility, days, num_simulations);
        params.validate()?;
        Ok(params)
    }

    /// Engine configuration for this request, applying `risk_free_rate`
    /// on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if the rate is not finite.
    pub fn engine_config(&self, base: EngineConfig) -> Result<EngineConfig, SimulationError> {
        let Some(rate) = self.risk_free_rate else {
            return Ok(base);
        };
        let model = GbmModel::new(rate, base.model.trading_days_per_year)
            .map_err(|_| SimulationError::invalid("risk_free_rate", "must be finite"))?;
        Ok(base.with_model(model))
    }
}

fn positive_count(parameter: &'static str, value: i64) -> Result<u32, SimulationError> {
    if value <= 0 {
        return Err(SimulationError::invalid(
            parameter,
            format!("must be a positive integer, got {value}"),
        ));
    }
    u32::try_from(value)
        .map_err(|_| SimulationError::invalid(parameter, format!("{value} is too large")))
}

/// Summary statistics as sent over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatisticsResponse {
    pub initial_price: f64,
    pub mean_final_price: f64,
    pub std_dev: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub var_95_price: f64,
    pub var_95_loss: f64,
    pub var_95_pct: f64,
    /// Expected return in percent.
    pub expected_return: f64,
}

impl From<SummaryStatistics> for StatisticsResponse {
    fn from(stats: SummaryStatistics) -> Self {
        Self {
            initial_price: stats.initial_price,
            mean_final_price: stats.mean_final_price,
            std_dev: stats.std_dev,
            min_price: stats.min_price,
            max_price: stats.max_price,
            var_95_price: stats.var_95_price,
            var_95_loss: stats.var_95_loss,
            var_95_pct: stats.var_95_pct,
            expected_return: stats.expected_return_pct,
        }
    }
}

/// Body returned by `POST /api/simulate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimulationResponse {
    /// One price path per trial.
    pub paths: Vec<Vec<f64>>,
    pub mean_path: Vec<f64>,
    pub percentile_5: Vec<f64>,
    pub percentile_95: Vec<f64>,
    pub final_prices: Vec<f64>,
    pub statistics: StatisticsResponse,
}

impl From<SimulationResult> for SimulationResponse {
    fn from(result: SimulationResult) -> Self {
        Self {
            paths: result.paths.into_iter().map(|p| p.into_inner()).collect(),
            mean_path: result.mean_path,
            percentile_5: result.percentile_5_path,
            percentile_95: result.percentile_95_path,
            final_prices: result.final_prices,
            statistics: result.statistics.into(),
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// Healthy status.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(days: i64, num_simulations: i64) -> SimulationRequest {
        SimulationRequest {
            current_price: 100.0,
            volatility: 20.0,
            days,
            num_simulations,
            seed: None,
            risk_free_rate: None,
        }
    }

    #[test]
    fn test_request_to_parameters() {
        let params = request(30, 1000).to_parameters().unwrap();
        assert_eq!(params, SimulationParameters::new(100.0, 20.0, 30, 1000));
    }

    #[test]
    fn test_request_rejects_bad_counts() {
        assert!(request(0, 10).to_parameters().is_err());
        assert!(request(-3, 10).to_parameters().is_err());
        assert!(request(10, 0).to_parameters().is_err());
        assert!(request(i64::from(u32::MAX) + 1, 10).to_parameters().is_err());
    }

    #[test]
    fn test_request_seed_is_optional() {
        let body = r#"{"current_price": 50.0, "volatility": 10, "days": 5, "num_simulations": 7}"#;
        let req: SimulationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.seed, None);
        assert_eq!(req.volatility, 10.0);
    }

    #[test]
    fn test_risk_free_rate_overrides_drift_only() {
        let base = EngineConfig::default().with_max_matrix_cells(1_000);

        let config = request(5, 5).engine_config(base).unwrap();
        assert_eq!(config, base);

        let mut req = request(5, 5);
        req.risk_free_rate = Some(0.02);
        let config = req.engine_config(base).unwrap();
        assert_eq!(config.model.drift, 0.02);
        assert_eq!(config.model.trading_days_per_year, 252);
        assert_eq!(config.max_matrix_cells, 1_000);

        req.risk_free_rate = Some(f64::NAN);
        assert!(matches!(
            req.engine_config(base),
            Err(SimulationError::InvalidParameter { parameter: "risk_free_rate", .. })
        ));
    }
}
