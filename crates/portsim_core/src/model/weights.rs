//! Target portfolio allocation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::Ticker;
use crate::error::WeightMismatchError;

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Target weights per ticker.
///
/// Weights are non-negative (no shorting) and sum to 1.0 within
/// [`WEIGHT_TOLERANCE`]. Iteration order is by ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Ticker, f64>", into = "BTreeMap<Ticker, f64>")]
pub struct PortfolioWeights {
    weights: BTreeMap<Ticker, f64>,
}

impl PortfolioWeights {
    /// Validate weights expressed as fractions of 1.0.
    pub fn new(
        weights: impl IntoIterator<Item = (Ticker, f64)>,
    ) -> Result<Self, WeightMismatchError> {
        let mut map = BTreeMap::new();
        for (ticker, weight) in weights {
            if !weight.is_finite() {
                return Err(WeightMismatchError::NonFiniteWeight { ticker });
            }
            if weight < 0.0 {
                return Err(WeightMismatchError::NegativeWeight { ticker, weight });
            }
            if map.contains_key(&ticker) {
                return Err(WeightMismatchError::DuplicateTicker(ticker));
            }
            map.insert(ticker, weight);
        }

        if map.is_empty() {
            return Err(WeightMismatchError::EmptyPortfolio);
        }

        let sum: f64 = map.values().sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(WeightMismatchError::SumMismatch {
                sum,
                tolerance: WEIGHT_TOLERANCE,
            });
        }

        Ok(Self { weights: map })
    }

    /// Validate weights expressed as percentages summing to 100.
    pub fn from_percentages(
        weights: impl IntoIterator<Item = (Ticker, f64)>,
    ) -> Result<Self, WeightMismatchError> {
        Self::new(weights.into_iter().map(|(t, pct)| (t, pct / 100.0)))
    }

    /// Single asset holding the whole portfolio
    #[must_use]
    pub fn single(ticker: Ticker) -> Self {
        Self {
            weights: BTreeMap::from([(ticker, 1.0)]),
        }
    }

    #[must_use]
    pub fn get(&self, ticker: &Ticker) -> Option<f64> {
        self.weights.get(ticker).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, f64)> {
        self.weights.iter().map(|(t, w)| (t, *w))
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.weights.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl TryFrom<BTreeMap<Ticker, f64>> for PortfolioWeights {
    type Error = WeightMismatchError;

    fn try_from(map: BTreeMap<Ticker, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<PortfolioWeights> for BTreeMap<Ticker, f64> {
    fn from(w: PortfolioWeights) -> Self {
        w.weights
    }
}
