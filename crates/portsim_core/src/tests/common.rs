//! Shared fixtures

use jiff::ToSpan;
use jiff::civil::{Date, date};

use crate::model::{PriceSeries, Ticker};

/// Daily-ish prices: three observations per month, drifting by a fixed
/// monthly factor with a small within-month wobble.
pub fn synthetic_prices(ticker: &str, start: Date, months: i64, monthly: f64) -> PriceSeries {
    let mut pairs = Vec::new();
    let mut price = 100.0;
    for m in 0..months {
        let month_start = start.checked_add(m.months()).unwrap();
        let wobble = if m % 2 == 0 { 1.01 } else { 0.99 };
        pairs.push((month_start, price * wobble));
        pairs.push((month_start.checked_add(10.days()).unwrap(), price / wobble));
        price *= monthly * wobble;
        pairs.push((month_start.checked_add(20.days()).unwrap(), price));
    }
    PriceSeries::from_unsorted(Ticker::new(ticker), pairs).unwrap()
}

pub fn default_start() -> Date {
    date(2015, 1, 1)
}
