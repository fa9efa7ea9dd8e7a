//! Report configuration
//!
//! `ReportConfig` is the whole user-facing configuration surface: portfolio
//! name, holdings with percentage weights, risk-free rate, history start date,
//! and simulation size. It deserialises from YAML/JSON with sensible defaults.
//!
//! # Builder DSL
//!
//! ```ignore
//! use portsim_core::config::ReportBuilder;
//!
//! let config = ReportBuilder::new("Balanced")
//!     .holding("SPY", 60.0)
//!     .holding("AGG", 40.0)
//!     .start(2015, 1, 1)
//!     .risk_free_rate(2.0)
//!     .months(120)
//!     .simulations(51)
//!     .seed(42)
//!     .build();
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::WeightMismatchError;
use crate::model::{PortfolioWeights, Ticker};
use crate::portfolio::Rebalance;

pub mod builder;

pub use builder::ReportBuilder;

fn default_months() -> usize {
    120
}

fn default_simulations() -> usize {
    51
}

fn default_init_value() -> f64 {
    1.0
}

/// One portfolio position with its target weight in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: Ticker,
    pub weight_pct: f64,
}

/// Complete report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Portfolio display name
    pub name: String,
    pub holdings: Vec<Holding>,
    /// Annual risk-free rate in percent (used for the Sharpe ratio)
    #[serde(default)]
    pub risk_free_rate_pct: f64,
    /// First date of price history to fetch
    pub start_date: Date,
    /// Number of future months to simulate
    #[serde(default = "default_months")]
    pub months: usize,
    /// Number of simulated paths
    #[serde(default = "default_simulations")]
    pub simulations: usize,
    /// Starting value of every path (growth of $1 by default)
    #[serde(default = "default_init_value")]
    pub init_value: f64,
    /// Seed for the batch generator; a random seed is chosen and reported when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rebalance: Rebalance,
}

impl ReportConfig {
    /// Validated target weights (percentages converted to fractions)
    pub fn weights(&self) -> Result<PortfolioWeights, WeightMismatchError> {
        PortfolioWeights::from_percentages(
            self.holdings
                .iter()
                .map(|h| (h.ticker.clone(), h.weight_pct)),
        )
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.holdings.iter().map(|h| &h.ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let json = r#"{
            "name": "Core",
            "holdings": [{"ticker": "SPY", "weight_pct": 100.0}],
            "start_date": "2015-01-01"
        }"#;
        let config: ReportConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.months, 120);
        assert_eq!(config.simulations, 51);
        assert_eq!(config.init_value, 1.0);
        assert_eq!(config.seed, None);
        assert_eq!(config.rebalance, Rebalance::Monthly);
        assert_eq!(config.start_date, jiff::civil::date(2015, 1, 1));
    }

    #[test]
    fn test_tickers_normalised_from_json() {
        let json = r#"{
            "name": "Core",
            "holdings": [{"ticker": "spy", "weight_pct": 100.0}],
            "start_date": "2015-01-01"
        }"#;
        let config: ReportConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.holdings[0].ticker, Ticker::new("SPY"));
        assert!(config.weights().unwrap().get(&Ticker::new("SPY")).is_some());
    }

    #[test]
    fn test_mixed_case_duplicate_rejected() {
        let json = r#"{
            "name": "Twice",
            "holdings": [
                {"ticker": "spy", "weight_pct": 50.0},
                {"ticker": "SPY", "weight_pct": 50.0}
            ],
            "start_date": "2015-01-01"
        }"#;
        let config: ReportConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.weights(),
            Err(WeightMismatchError::DuplicateTicker(_))
        ));
    }

    #[test]
    fn test_weights_from_percentages() {
        let config = ReportBuilder::new("Split")
            .holding("SPY", 70.0)
            .holding("AGG", 30.0)
            .build();
        let weights = config.weights().unwrap();
        assert_eq!(weights.len(), 2);
    }

    #[test]
    fn test_bad_percentages() {
        let config = ReportBuilder::new("Bad")
            .holding("SPY", 70.0)
            .holding("AGG", 20.0)
            .build();
        assert!(matches!(
            config.weights(),
            Err(WeightMismatchError::SumMismatch { .. })
        ));
    }
}
