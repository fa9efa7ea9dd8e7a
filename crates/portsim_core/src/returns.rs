//! Periodic log returns from raw price history.
//!
//! Prices are first resampled to the last observation of each period, then
//! differenced in log space: `r_t = ln(p_t) - ln(p_{t-1})`. The first period
//! has no prior price and is dropped rather than zero-filled.

use crate::date_math::Period;
use crate::error::DataFetchError;
use crate::model::{PricePoint, PriceSeries, ReturnPoint, ReturnSeries};

/// Keep the last observation of each period.
///
/// The returned points are labelled with the period end date so that series
/// with different final trading days still align on the same key.
#[must_use]
pub fn resample(series: &PriceSeries, period: Period) -> Vec<PricePoint> {
    let mut out: Vec<PricePoint> = Vec::new();
    let mut last_key = None;

    for point in series.points() {
        let key = period.key(point.date);
        let labelled = PricePoint {
            date: period.period_end(point.date),
            price: point.price,
        };
        if last_key == Some(key) {
            // Later observation within the same period wins
            if let Some(last) = out.last_mut() {
                *last = labelled;
            }
        } else {
            out.push(labelled);
            last_key = Some(key);
        }
    }

    out
}

/// Resample `series` and compute log returns between consecutive periods.
pub fn log_returns(series: &PriceSeries, period: Period) -> Result<ReturnSeries, DataFetchError> {
    if series.is_empty() {
        return Err(DataFetchError::EmptyHistory(series.ticker.clone()));
    }

    let sampled = resample(series, period);
    if sampled.len() < 2 {
        return Err(DataFetchError::InsufficientHistory {
            ticker: series.ticker.clone(),
            periods: sampled.len(),
        });
    }

    let points = sampled
        .windows(2)
        .map(|w| ReturnPoint {
            date: w[1].date,
            value: w[1].price.ln() - w[0].price.ln(),
        })
        .collect();

    tracing::debug!(
        ticker = %series.ticker,
        observations = series.len(),
        periods = sampled.len(),
        "computed log returns"
    );

    Ok(ReturnSeries {
        ticker: series.ticker.clone(),
        points,
    })
}
