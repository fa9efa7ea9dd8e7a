//! Dated price and return series

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::Ticker;
use crate::error::DataFetchError;

/// A single closing price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: Date,
    pub price: f64,
}

/// Ordered price history for one asset.
///
/// Dates are strictly increasing and every price is positive and finite.
/// Deserialised series go through the same checks as [`PriceSeries::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    pub ticker: Ticker,
    points: Vec<PricePoint>,
}

/// Unvalidated wire form of [`PriceSeries`]
#[derive(Deserialize)]
struct RawPriceSeries {
    ticker: Ticker,
    points: Vec<PricePoint>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = DataFetchError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        Self::new(raw.ticker, raw.points)
    }
}

impl PriceSeries {
    /// Validate and wrap a price history.
    pub fn new(ticker: Ticker, points: Vec<PricePoint>) -> Result<Self, DataFetchError> {
        for (i, p) in points.iter().enumerate() {
            if !p.price.is_finite() || p.price <= 0.0 {
                return Err(DataFetchError::InvalidPrice {
                    ticker,
                    date: p.date,
                    price: p.price,
                });
            }
            if i > 0 && points[i - 1].date >= p.date {
                return Err(DataFetchError::UnorderedDates {
                    ticker,
                    date: p.date,
                });
            }
        }
        Ok(Self { ticker, points })
    }

    /// Build from unsorted `(date, price)` pairs, sorting by date first.
    pub fn from_unsorted(
        ticker: Ticker,
        mut pairs: Vec<(Date, f64)>,
    ) -> Result<Self, DataFetchError> {
        pairs.sort_by_key(|(d, _)| *d);
        let points = pairs
            .into_iter()
            .map(|(date, price)| PricePoint { date, price })
            .collect();
        Self::new(ticker, points)
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop observations before `start`.
    #[must_use]
    pub fn since(mut self, start: Date) -> Self {
        self.points.retain(|p| p.date >= start);
        self
    }
}

/// A dated periodic return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: Date,
    pub value: f64,
}

/// Periodic log returns for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    pub ticker: Ticker,
    pub points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// Weighted, rebalanced portfolio returns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReturnSeries {
    pub points: Vec<ReturnPoint>,
}

impl PortfolioReturnSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Growth of `init_value` under the realised log returns, starting at the
    /// first observation (length `len() + 1`).
    #[must_use]
    pub fn cumulative_growth(&self, init_value: f64) -> Vec<f64> {
        std::iter::once(init_value)
            .chain(self.values().scan(init_value, |acc, r| {
                *acc *= r.exp();
                Some(*acc)
            }))
            .collect()
    }
}
