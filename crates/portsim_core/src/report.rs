//! End-to-end report pipeline.
//!
//! prices → monthly log returns → rebalanced portfolio returns →
//! (mean, std dev) → simulated batch → max/median/min summary.
//!
//! Any failure aborts the run; a partial report is never produced.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::date_math::Period;
use crate::distribution::estimate;
use crate::error::{InvalidParameterError, ReportError};
use crate::metrics::{RiskMetrics, max_drawdown};
use crate::model::{
    DistributionParams, PortfolioReturnSeries, PortfolioWeights, SimulationBatch,
    SimulationSummary,
};
use crate::portfolio::aggregate;
use crate::returns::log_returns;
use crate::simulation::{GrowthParams, run_batch_seeded};
use crate::source::PriceSource;
use crate::summary::{highlight, summarize};

/// Percentiles reported as fan-chart bands
pub const BAND_PERCENTILES: [f64; 3] = [0.05, 0.50, 0.95];

/// Per-month percentile of the simulated values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub percentile: f64,
    pub values: Vec<f64>,
}

/// Everything a renderer needs to draw the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    /// Seed the batch was generated from (re-run with it to reproduce)
    pub seed: u64,
    pub weights: PortfolioWeights,
    pub distribution: DistributionParams,
    pub metrics: RiskMetrics,
    pub portfolio_returns: PortfolioReturnSeries,
    /// Realised growth of `init_value` over the historical period
    pub historical_growth: Vec<f64>,
    pub batch: SimulationBatch,
    pub summary: SimulationSummary,
    /// Max, median, and min paths for comparison charts
    pub highlighted: SimulationBatch,
    /// Max drawdown of each highlighted path, in the same order
    pub highlighted_drawdowns: Vec<f64>,
    pub bands: Vec<PercentileBand>,
}

/// Fetch history for every holding and run the full pipeline.
pub fn run_report(config: &ReportConfig, source: &dyn PriceSource) -> Result<Report, ReportError> {
    let weights = config.weights()?;

    // Reject caller errors before touching the data source
    if config.simulations == 0 {
        return Err(InvalidParameterError {
            parameter: "simulations",
            value: 0.0,
            reason: "must be positive",
        }
        .into());
    }
    GrowthParams {
        init_value: config.init_value,
        months: config.months,
        mean: 0.0,
        std_dev: 0.0,
    }
    .validate()?;

    let mut returns = BTreeMap::new();
    for ticker in weights.tickers() {
        tracing::info!(%ticker, start = %config.start_date, "fetching price history");
        let prices = source.fetch(ticker, config.start_date)?;
        returns.insert(ticker.clone(), log_returns(&prices, Period::Monthly)?);
    }

    let portfolio_returns = aggregate(&returns, &weights, config.rebalance)?;
    let distribution = estimate(&portfolio_returns)?;
    let periods_per_year = Period::Monthly.periods_per_year();
    let metrics = RiskMetrics::compute(&distribution, config.risk_free_rate_pct, periods_per_year);

    tracing::info!(
        portfolio = %config.name,
        observations = distribution.observations,
        mean = distribution.mean,
        std_dev = distribution.std_dev,
        sharpe = ?metrics.sharpe,
        "estimated return distribution"
    );

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let params = GrowthParams {
        init_value: config.init_value,
        months: config.months,
        mean: distribution.mean,
        std_dev: distribution.std_dev,
    };
    let batch = run_batch_seeded(seed, config.simulations, &params)?;
    let summary = summarize(&batch)?;
    let highlighted = highlight(&batch, &summary);
    let highlighted_drawdowns = highlighted.paths.iter().map(max_drawdown).collect();
    let bands = BAND_PERCENTILES
        .iter()
        .map(|&p| PercentileBand {
            percentile: p,
            values: batch.percentile_band(p),
        })
        .collect();

    tracing::info!(
        seed,
        simulations = batch.len(),
        max = summary.max.terminal,
        median = summary.median_value,
        min = summary.min.terminal,
        "simulation summary"
    );

    Ok(Report {
        name: config.name.clone(),
        seed,
        weights,
        distribution,
        metrics,
        historical_growth: portfolio_returns.cumulative_growth(config.init_value),
        portfolio_returns,
        batch,
        summary,
        highlighted,
        highlighted_drawdowns,
        bands,
    })
}
