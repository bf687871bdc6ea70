//! Presentation helpers for risk metrics.

use crate::errors::SimulationError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places reported for summary statistics.
pub const REPORTED_DECIMALS: u32 = 2;

/// Magnitude from which a statistic is reported as is. An `f64` this large
/// has an ulp of at least 0.125, so it carries no meaningful cents, and it
/// may exceed the range of `Decimal`.
pub const ROUNDING_CUTOFF: f64 = 1e15;

/// Rounds a statistic to [`REPORTED_DECIMALS`] places.
///
/// The `f64` is converted with its exact binary value retained, then ties
/// resolve half-to-even. A value stored just below a `.xx5` tie (such as
/// `2.675`) therefore rounds down.
///
/// # Errors
///
/// Returns [`SimulationError::NumericAnomaly`] if `value` is not finite.
pub fn round_statistic(name: &str, value: f64) -> Result<f64, SimulationError> {
    if !value.is_finite() {
        return Err(SimulationError::anomaly(format!(
            "statistic `{name}` is {value}"
        )));
    }
    if value.abs() >= ROUNDING_CUTOFF {
        return Ok(value);
    }

    // Only magnitudes far below a cent fail to convert; they round to zero.
    let decimal = Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO);
    let rounded =
        decimal.round_dp_with_strategy(REPORTED_DECIMALS, RoundingStrategy::MidpointNearestEven);

    // mantissa / 10^scale is a single correctly rounded division, so the
    // result is the f64 closest to the rounded decimal.
    Ok(rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32))
}

/// Percentage change from `base` to `value`, e.g. `5.0` for +5%.
#[must_use]
pub fn pct_change(base: f64, value: f64) -> f64 {
    (value - base) / base * 100.0
}
