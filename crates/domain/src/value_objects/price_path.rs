use serde::{Deserialize, Serialize};

/// Prices of one simulated trial, indexed by trading day.
///
/// Index 0 is the starting price; index `i` is the price after `i` steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricePath(Vec<f64>);

impl PricePath {
    /// Wraps a sequence of prices.
    #[must_use]
    pub fn new(prices: Vec<f64>) -> Self {
        Self(prices)
    }

    /// Number of prices in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the path holds no prices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Price at day 0.
    #[must_use]
    pub fn initial(&self) -> Option<f64> {
        self.0.first().copied()
    }

    /// Price at the last simulated day.
    #[must_use]
    pub fn terminal(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Price at `day`, if the path reaches it.
    #[must_use]
    pub fn at(&self, day: usize) -> Option<f64> {
        self.0.get(day).copied()
    }

    /// Borrows the prices.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the path and returns its prices.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for PricePath {
    fn from(prices: Vec<f64>) -> Self {
        Self(prices)
    }
}
