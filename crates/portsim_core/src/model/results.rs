//! Simulation outputs
//!
//! Paths, batches, and terminal-value summaries produced by the growth
//! simulator. All of these are immutable once produced.

use serde::{Deserialize, Serialize};

use super::ids::SimulationId;

/// Sample statistics of a periodic return series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    /// Arithmetic mean of the periodic returns
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    /// Number of observations the estimate is based on
    pub observations: usize,
}

/// One simulated trajectory of compounded growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPath {
    pub id: SimulationId,
    /// Cumulative value per month; `growth[0]` is the initial value
    pub growth: Vec<f64>,
}

impl SimulationPath {
    /// Value after the final simulated month
    #[must_use]
    pub fn terminal(&self) -> f64 {
        self.growth.last().copied().unwrap_or(f64::NAN)
    }

    /// Number of simulated months (path length minus one)
    #[must_use]
    pub fn months(&self) -> usize {
        self.growth.len().saturating_sub(1)
    }
}

/// K equally long simulated paths on a shared month axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationBatch {
    /// Month index axis `0..=N`
    pub months: Vec<u32>,
    /// Paths in simulation-id order
    pub paths: Vec<SimulationPath>,
}

impl SimulationBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: SimulationId) -> Option<&SimulationPath> {
        self.paths.iter().find(|p| p.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = SimulationId> + '_ {
        self.paths.iter().map(|p| p.id)
    }

    /// Terminal value of every path, paired with its id, in id order
    #[must_use]
    pub fn terminal_values(&self) -> Vec<(SimulationId, f64)> {
        self.paths.iter().map(|p| (p.id, p.terminal())).collect()
    }

    /// Sub-batch containing only the requested ids, in the requested order.
    ///
    /// Unknown ids are skipped.
    #[must_use]
    pub fn select(&self, ids: &[SimulationId]) -> SimulationBatch {
        SimulationBatch {
            months: self.months.clone(),
            paths: ids.iter().filter_map(|id| self.get(*id)).cloned().collect(),
        }
    }

    /// Per-month percentile across all paths (linear interpolation between
    /// order statistics). `p` is in `[0, 1]`.
    #[must_use]
    pub fn percentile_band(&self, p: f64) -> Vec<f64> {
        let p = p.clamp(0.0, 1.0);
        let mut column: Vec<f64> = Vec::with_capacity(self.paths.len());
        (0..self.months.len())
            .map(|m| {
                column.clear();
                column.extend(self.paths.iter().filter_map(|path| path.growth.get(m)));
                column.sort_by(f64::total_cmp);
                interpolate_sorted(&column, p)
            })
            .collect()
    }
}

fn interpolate_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = p * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// A terminal value together with the path that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub id: SimulationId,
    pub terminal: f64,
}

/// Extreme and central terminal outcomes of a batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub max: SummaryEntry,
    /// Representative median path (lower-middle path for even batch sizes)
    pub median: SummaryEntry,
    pub min: SummaryEntry,
    /// Statistical median of the terminal values (mean of the two middle
    /// values for even batch sizes)
    pub median_value: f64,
}

impl SimulationSummary {
    /// Ids of the max, median, and min paths, in that order
    #[must_use]
    pub fn ids(&self) -> [SimulationId; 3] {
        [self.max.id, self.median.id, self.min.id]
    }
}
