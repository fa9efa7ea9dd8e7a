//! Risk and return metrics for the report header.
//!
//! All per-period figures assume the periodic returns the distribution was
//! estimated from (monthly by default). The risk-free rate is given as an
//! annual percentage, the way users enter it.

use serde::{Deserialize, Serialize};

use crate::model::{DistributionParams, SimulationPath};

/// Risk-free rate per period from an annual percentage (simple division).
#[inline]
#[must_use]
pub fn periodic_risk_free(annual_pct: f64, periods_per_year: u32) -> f64 {
    annual_pct / 100.0 / f64::from(periods_per_year)
}

/// Per-period Sharpe ratio: mean excess return over the standard deviation.
///
/// Returns `None` when the standard deviation is zero or not finite.
#[must_use]
pub fn sharpe_ratio(
    params: &DistributionParams,
    annual_risk_free_pct: f64,
    periods_per_year: u32,
) -> Option<f64> {
    if !params.std_dev.is_finite() || params.std_dev <= 0.0 {
        return None;
    }
    let excess = params.mean - periodic_risk_free(annual_risk_free_pct, periods_per_year);
    Some(excess / params.std_dev)
}

/// Sharpe ratio scaled to annual terms by `sqrt(periods_per_year)`.
#[must_use]
pub fn annualized_sharpe(
    params: &DistributionParams,
    annual_risk_free_pct: f64,
    periods_per_year: u32,
) -> Option<f64> {
    sharpe_ratio(params, annual_risk_free_pct, periods_per_year)
        .map(|s| s * f64::from(periods_per_year).sqrt())
}

#[inline]
#[must_use]
pub fn annualized_return(mean: f64, periods_per_year: u32) -> f64 {
    mean * f64::from(periods_per_year)
}

#[inline]
#[must_use]
pub fn annualized_volatility(std_dev: f64, periods_per_year: u32) -> f64 {
    std_dev * f64::from(periods_per_year).sqrt()
}

/// Largest peak-to-trough decline along a path, as a fraction of the peak.
#[must_use]
pub fn max_drawdown(path: &SimulationPath) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &v in &path.growth {
        peak = peak.max(v);
        if peak > 0.0 {
            worst = worst.max((peak - v) / peak);
        }
    }
    worst
}

/// Headline figures derived from the estimated distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub periods_per_year: u32,
    pub risk_free_rate_pct: f64,
    pub sharpe: Option<f64>,
    pub annualized_sharpe: Option<f64>,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
}

impl RiskMetrics {
    #[must_use]
    pub fn compute(
        params: &DistributionParams,
        risk_free_rate_pct: f64,
        periods_per_year: u32,
    ) -> Self {
        Self {
            periods_per_year,
            risk_free_rate_pct,
            sharpe: sharpe_ratio(params, risk_free_rate_pct, periods_per_year),
            annualized_sharpe: annualized_sharpe(params, risk_free_rate_pct, periods_per_year),
            annualized_return: annualized_return(params.mean, periods_per_year),
            annualized_volatility: annualized_volatility(params.std_dev, periods_per_year),
        }
    }
}
