//! Reduction of the path matrix into bands and summary statistics.
//!
//! Percentiles are order statistics: the element at index
//! `floor(k / 100 * n)` of the ascending sample, clamped to `n - 1`.
//! No interpolation between neighbours.

use risk_sim_domain::errors::{Result, SimulationError};
use risk_sim_domain::metrics::{pct_change, round_statistic};
use risk_sim_domain::value_objects::price_path::PricePath;
use risk_sim_domain::value_objects::simulation_result::SummaryStatistics;

/// Lower band percentile; also the Value-at-Risk level.
pub const LOWER_PERCENTILE: f64 = 5.0;
/// Upper band percentile.
pub const UPPER_PERCENTILE: f64 = 95.0;

/// Running mean and population variance (Welford).
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningMoments {
    n: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    /// Adds one observation.
    pub fn update(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    /// Observations seen so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.n
    }

    /// Arithmetic mean; `0.0` when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (divides by `n`).
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.m2 / self.n as f64
        }
    }

    /// Population standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl FromIterator<f64> for RunningMoments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut moments = Self::default();
        for x in iter {
            moments.update(x);
        }
        moments
    }
}

/// Index of the `pct` percentile in a sorted sample of length `n`.
///
/// `n` must be non-zero.
#[must_use]
pub fn percentile_index(pct: f64, n: usize) -> usize {
    let raw = ((pct / 100.0) * n as f64).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(n - 1)
    }
}

/// Order-statistic percentile of an ascending slice.
#[must_use]
pub fn order_statistic(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    Some(sorted[percentile_index(pct, sorted.len())])
}

/// Sorts ascending with a total order.
pub fn sort_ascending(values: &mut [f64]) {
    values.sort_unstable_by(f64::total_cmp);
}

/// Day-wise mean and percentile bands across all paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyBands {
    pub mean: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Computes the bands for days `0..path_len`.
///
/// Every path must hold at least `path_len` prices.
///
/// # Errors
///
/// Returns [`SimulationError::NumericAnomaly`] if `paths` is empty or a
/// band value is not finite.
pub fn daily_bands(paths: &[PricePath], path_len: usize) -> Result<DailyBands> {
    if paths.is_empty() {
        return Err(SimulationError::anomaly("daily bands over zero paths"));
    }

    let mut bands = DailyBands {
        mean: Vec::with_capacity(path_len),
        lower: Vec::with_capacity(path_len),
        upper: Vec::with_capacity(path_len),
    };
    let mut column = Vec::with_capacity(paths.len());

    for day in 0..path_len {
        column.clear();
        column.extend(paths.iter().map(|path| path.as_slice()[day]));

        let mean = column.iter().copied().collect::<RunningMoments>().mean();
        if !mean.is_finite() {
            return Err(SimulationError::anomaly(format!("mean price on day {day}")));
        }

        sort_ascending(&mut column);
        bands.mean.push(mean);
        bands.lower.push(column[percentile_index(LOWER_PERCENTILE, column.len())]);
        bands.upper.push(column[percentile_index(UPPER_PERCENTILE, column.len())]);
    }

    Ok(bands)
}

/// Summarizes the terminal distribution against the starting price.
///
/// # Errors
///
/// Returns [`SimulationError::NumericAnomaly`] if `final_prices` is empty
/// or any derived statistic is not finite.
pub fn summarize(initial_price: f64, final_prices: &[f64]) -> Result<SummaryStatistics> {
    if final_prices.is_empty() {
        return Err(SimulationError::anomaly("statistics over zero final prices"));
    }

    let moments: RunningMoments = final_prices.iter().copied().collect();

    let mut sorted = final_prices.to_vec();
    sort_ascending(&mut sorted);
    let min_price = sorted[0];
    let max_price = sorted[sorted.len() - 1];

    let var_95_price = sorted[percentile_index(LOWER_PERCENTILE, sorted.len())];
    let var_95_loss = initial_price - var_95_price;
    let var_95_pct = var_95_loss / initial_price * 100.0;

    Ok(SummaryStatistics {
        initial_price,
        mean_final_price: round_statistic("mean_final_price", moments.mean())?,
        std_dev: round_statistic("std_dev", moments.std_dev())?,
        min_price: round_statistic("min_price", min_price)?,
        max_price: round_statistic("max_price", max_price)?,
        var_95_price: round_statistic("var_95_price", var_95_price)?,
        var_95_loss: round_statistic("var_95_loss", var_95_loss)?,
        var_95_pct: round_statistic("var_95_pct", var_95_pct)?,
        expected_return_pct: round_statistic(
            "expected_return_pct",
            pct_change(initial_price, moments.mean()),
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_index() {
        assert_eq!(percentile_index(5.0, 100), 5);
        assert_eq!(percentile_index(95.0, 100), 95);
        assert_eq!(percentile_index(5.0, 19), 0);
        assert_eq!(percentile_index(5.0, 20), 1);
        assert_eq!(percentile_index(95.0, 1), 0);
        // only k = 100 reaches n; clamped
        assert_eq!(percentile_index(100.0, 10), 9);
        assert_eq!(percentile_index(0.0, 10), 0);
    }

    #[test]
    fn test_order_statistic_does_not_interpolate() {
        let sorted: Vec<f64> = (0..10).map(f64::from).collect();
        // floor(0.95 * 10) = 9, floor(0.05 * 10) = 0
        assert_eq!(order_statistic(&sorted, 95.0), Some(9.0));
        assert_eq!(order_statistic(&sorted, 5.0), Some(0.0));
        assert_eq!(order_statistic(&sorted, 50.0), Some(5.0));
        assert_eq!(order_statistic(&[], 50.0), None);
    }

    #[test]
    fn test_running_moments() {
        let moments: RunningMoments = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .into_iter()
            .collect();
        assert_eq!(moments.count(), 8);
        assert!((moments.mean() - 5.0).abs() < 1e-12);
        // population variance, not sample variance
        assert!((moments.variance() - 4.0).abs() < 1e-12);
        assert!((moments.std_dev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_running_mean_of_constant_column_is_exact() {
        let moments: RunningMoments = std::iter::repeat_n(101.37, 997).collect();
        assert_eq!(moments.mean(), 101.37);
        assert_eq!(moments.std_dev(), 0.0);
    }

    #[test]
    fn test_daily_bands() {
        let paths = vec![
            PricePath::new(vec![10.0, 8.0, 1.0]),
            PricePath::new(vec![10.0, 12.0, 3.0]),
            PricePath::new(vec![10.0, 10.0, 2.0]),
        ];
        let bands = daily_bands(&paths, 3).unwrap();

        assert_eq!(bands.mean[0], 10.0);
        assert!((bands.mean[1] - 10.0).abs() < 1e-12);
        assert!((bands.mean[2] - 2.0).abs() < 1e-12);
        // n = 3: lower index floor(0.15) = 0, upper index floor(2.85) = 2
        assert_eq!(bands.lower, vec![10.0, 8.0, 1.0]);
        assert_eq!(bands.upper, vec![10.0, 12.0, 3.0]);
    }

    #[test]
    fn test_daily_bands_rejects_empty_input() {
        assert!(daily_bands(&[], 3).is_err());
    }

    #[test]
    fn test_summarize() {
        let finals: Vec<f64> = (1..=20).map(|i| 90.0 + f64::from(i)).collect();
        let stats = summarize(100.0, &finals).unwrap();

        assert_eq!(stats.initial_price, 100.0);
        assert_eq!(stats.mean_final_price, 100.5);
        assert_eq!(stats.min_price, 91.0);
        assert_eq!(stats.max_price, 110.0);
        // n = 20 -> index 1 -> second smallest
        assert_eq!(stats.var_95_price, 92.0);
        assert_eq!(stats.var_95_loss, 8.0);
        assert_eq!(stats.var_95_pct, 8.0);
        assert_eq!(stats.expected_return_pct, 0.5);
        // population std of 1..=20 is sqrt(33.25) = 5.766...
        assert!((stats.std_dev - 5.77).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_order_independent() {
        let finals = vec![105.0, 95.0, 100.0, 120.0, 80.0];
        let mut reversed = finals.clone();
        reversed.reverse();
        assert_eq!(
            summarize(100.0, &finals).unwrap(),
            summarize(100.0, &reversed).unwrap()
        );
    }

    #[test]
    fn test_summarize_reports_huge_prices_unrounded() {
        let stats = summarize(1e29, &[1e29, 1.1e29]).unwrap();
        assert_eq!(stats.min_price, 1e29);
        assert_eq!(stats.max_price, 1.1e29);
        assert_eq!(stats.var_95_price, 1e29);
        assert_eq!(stats.var_95_loss, 0.0);
        assert!((stats.mean_final_price / 1.05e29 - 1.0).abs() < 1e-12);
        assert!((stats.expected_return_pct - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_rejects_non_finite() {
        assert!(matches!(
            summarize(100.0, &[f64::NAN, 1.0]),
            Err(SimulationError::NumericAnomaly { .. })
        ));
        assert!(summarize(100.0, &[]).is_err());
    }
}
