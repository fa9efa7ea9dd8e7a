//! Report Builder
//!
//! Fluent construction of a [`ReportConfig`], mostly for tests and for
//! embedding the pipeline in other programs.

use jiff::civil::Date;

use super::{Holding, ReportConfig};
use crate::model::Ticker;
use crate::portfolio::Rebalance;

/// Builder for [`ReportConfig`]
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    /// Start a report with the given portfolio name.
    ///
    /// Defaults: history from 2000-01-01, 120 months, 51 paths, growth of $1,
    /// no risk-free rate, monthly rebalancing, random seed.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: ReportConfig {
                name: name.into(),
                holdings: Vec::new(),
                risk_free_rate_pct: 0.0,
                start_date: jiff::civil::date(2000, 1, 1),
                months: super::default_months(),
                simulations: super::default_simulations(),
                init_value: super::default_init_value(),
                seed: None,
                rebalance: Rebalance::Monthly,
            },
        }
    }

    /// Add a holding with its weight in percent
    #[must_use]
    pub fn holding(mut self, ticker: impl AsRef<str>, weight_pct: f64) -> Self {
        self.config.holdings.push(Holding {
            ticker: Ticker::new(ticker),
            weight_pct,
        });
        self
    }

    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.config.start_date = date;
        self
    }

    /// Set the history start date (convenience method)
    #[must_use]
    pub fn start(self, year: i16, month: i8, day: i8) -> Self {
        self.start_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn risk_free_rate(mut self, pct: f64) -> Self {
        self.config.risk_free_rate_pct = pct;
        self
    }

    #[must_use]
    pub fn months(mut self, months: usize) -> Self {
        self.config.months = months;
        self
    }

    #[must_use]
    pub fn simulations(mut self, simulations: usize) -> Self {
        self.config.simulations = simulations;
        self
    }

    #[must_use]
    pub fn init_value(mut self, value: f64) -> Self {
        self.config.init_value = value;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn rebalance(mut self, rebalance: Rebalance) -> Self {
        self.config.rebalance = rebalance;
        self
    }

    #[must_use]
    pub fn build(self) -> ReportConfig {
        self.config
    }
}
