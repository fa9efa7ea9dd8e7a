//! Market-data collaborator.
//!
//! The pipeline only needs "give me the price history of this ticker since
//! this date". Implementations must fail with [`DataFetchError`] for unknown
//! or delisted symbols rather than substituting defaults.

use std::collections::HashMap;

use jiff::civil::Date;

use crate::error::DataFetchError;
use crate::model::{PriceSeries, Ticker};

/// Source of historical closing prices
pub trait PriceSource {
    /// Price history for `ticker` over `[start, now]`.
    fn fetch(&self, ticker: &Ticker, start: Date) -> Result<PriceSeries, DataFetchError>;
}

/// Price source backed by series held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    series: HashMap<Ticker, PriceSeries>,
}

impl InMemoryPriceSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.ticker.clone(), series);
    }
}

impl PriceSource for InMemoryPriceSource {
    fn fetch(&self, ticker: &Ticker, start: Date) -> Result<PriceSeries, DataFetchError> {
        self.series
            .get(ticker)
            .cloned()
            .map(|s| s.since(start))
            .ok_or_else(|| DataFetchError::UnknownSymbol(ticker.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_unknown_symbol() {
        let source = InMemoryPriceSource::new();
        let err = source
            .fetch(&Ticker::new("NOPE"), date(2020, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DataFetchError::UnknownSymbol(_)));
    }

    #[test]
    fn test_fetch_filters_start_date() {
        let series = PriceSeries::from_unsorted(
            Ticker::new("SPY"),
            vec![(date(2019, 12, 31), 1.0), (date(2020, 1, 31), 2.0)],
        )
        .unwrap();
        let source = InMemoryPriceSource::new().with_series(series);
        let fetched = source.fetch(&Ticker::new("spy"), date(2020, 1, 1)).unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched.points()[0].price, 2.0);
    }
}
