//! Weighted portfolio returns with periodic rebalancing.
//!
//! At each rebalance boundary every asset's effective weight resets to its
//! target. With monthly data and monthly rebalancing this is simply the
//! target-weighted sum of the asset returns for every period. For coarser
//! rebalancing, weights drift between boundaries in proportion to each
//! asset's growth over the period.

use std::collections::BTreeMap;

use jiff::civil::Date;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::date_math::Period;
use crate::error::{AggregateError, InsufficientDataError, WeightMismatchError};
use crate::model::{PortfolioReturnSeries, PortfolioWeights, ReturnPoint, ReturnSeries, Ticker};

/// How often weights are reset to their targets
pub type Rebalance = Period;

/// Inner-join the given series on date.
///
/// Returns the common dates in ascending order and, per series, the return
/// at each common date (same order as `series`). A date repeated within one
/// series keeps its last value.
#[must_use]
pub fn align(series: &[&ReturnSeries]) -> (Vec<Date>, Vec<Vec<f64>>) {
    let Some(first) = series.first() else {
        return (Vec::new(), Vec::new());
    };

    let lookups: Vec<FxHashMap<Date, f64>> = series
        .iter()
        .map(|s| s.points.iter().map(|p| (p.date, p.value)).collect())
        .collect();

    let mut seen = FxHashSet::default();
    let dates: Vec<Date> = first
        .points
        .iter()
        .map(|p| p.date)
        .filter(|d| seen.insert(*d) && lookups.iter().all(|m| m.contains_key(d)))
        .collect();

    let columns = lookups
        .iter()
        .map(|m| dates.iter().filter_map(|d| m.get(d).copied()).collect())
        .collect();

    (dates, columns)
}

/// Combine per-asset returns into a single rebalanced portfolio series.
///
/// Series for tickers without a weight are ignored. Every weighted ticker
/// must have a series.
pub fn aggregate(
    returns: &BTreeMap<Ticker, ReturnSeries>,
    weights: &PortfolioWeights,
    rebalance: Rebalance,
) -> Result<PortfolioReturnSeries, AggregateError> {
    let mut selected = Vec::with_capacity(weights.len());
    let mut targets = Vec::with_capacity(weights.len());
    for (ticker, weight) in weights.iter() {
        let series = returns
            .get(ticker)
            .ok_or_else(|| WeightMismatchError::MissingSeries(ticker.clone()))?;
        selected.push(series);
        targets.push(weight);
    }

    let (dates, columns) = align(&selected);
    if dates.is_empty() {
        return Err(InsufficientDataError {
            observations: 0,
            required: 1,
        }
        .into());
    }

    let mut effective = targets.clone();
    let mut points = Vec::with_capacity(dates.len());

    for (t, date) in dates.iter().enumerate() {
        if t == 0 || rebalance.crosses_boundary(dates[t - 1], *date) {
            effective.copy_from_slice(&targets);
        }

        let value = effective
            .iter()
            .zip(&columns)
            .fold(0.0, |acc, (w, col)| acc + w * col[t]);
        points.push(ReturnPoint { date: *date, value });

        drift(&mut effective, columns.iter().map(|col| col[t]));
    }

    tracing::debug!(
        assets = selected.len(),
        periods = points.len(),
        ?rebalance,
        "aggregated portfolio returns"
    );

    Ok(PortfolioReturnSeries { points })
}

/// Let weights drift with each asset's growth over one period.
fn drift(weights: &mut [f64], log_returns: impl Iterator<Item = f64>) {
    for (w, r) in weights.iter_mut().zip(log_returns) {
        *w *= r.exp();
    }
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    }
}
