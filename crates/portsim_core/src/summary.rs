//! Terminal-value summary of a simulation batch.
//!
//! Ties on an extreme value resolve to the lowest simulation id. For an even
//! number of paths the statistical median is the mean of the two middle
//! terminal values; the representative median *path* is the lower-middle one
//! in (terminal value, id) order, since a chart needs an actual path.

use std::cmp::Ordering;

use crate::error::InsufficientDataError;
use crate::model::{SimulationBatch, SimulationId, SimulationSummary, SummaryEntry};

fn by_value_then_id(a: &SummaryEntry, b: &SummaryEntry) -> Ordering {
    a.terminal.total_cmp(&b.terminal).then(a.id.cmp(&b.id))
}

/// Reduce a batch to its max, median, and min terminal outcomes.
pub fn summarize(batch: &SimulationBatch) -> Result<SimulationSummary, InsufficientDataError> {
    let mut entries: Vec<SummaryEntry> = batch
        .terminal_values()
        .into_iter()
        .map(|(id, terminal)| SummaryEntry { id, terminal })
        .collect();

    if entries.is_empty() {
        return Err(InsufficientDataError {
            observations: 0,
            required: 1,
        });
    }

    entries.sort_by(by_value_then_id);

    let n = entries.len();
    let min = entries[0];
    // Lowest id among the paths sharing the largest terminal value
    let max_value = entries[n - 1].terminal;
    let max = entries
        .iter()
        .find(|e| e.terminal.total_cmp(&max_value) == Ordering::Equal)
        .copied()
        .unwrap_or(entries[n - 1]);

    let median = entries[(n - 1) / 2];
    let median_value = if n % 2 == 1 {
        median.terminal
    } else {
        (entries[n / 2 - 1].terminal + entries[n / 2].terminal) / 2.0
    };

    Ok(SimulationSummary {
        max,
        median,
        min,
        median_value,
    })
}

/// Filter the batch down to the max, median, and min paths (in that order).
#[must_use]
pub fn highlight(batch: &SimulationBatch, summary: &SimulationSummary) -> SimulationBatch {
    batch.select(&dedup_ids(summary.ids()))
}

/// A batch of one or two paths can map several summary roles to the same id.
fn dedup_ids(ids: [SimulationId; 3]) -> Vec<SimulationId> {
    let mut out = Vec::with_capacity(3);
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
