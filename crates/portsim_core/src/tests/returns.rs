//! Tests for return series construction
//!
//! These tests verify that:
//! - n month-end prices produce exactly n - 1 log returns
//! - each return equals ln(p_t / p_{t-1})
//! - intra-month observations do not leak into monthly returns

use jiff::civil::date;

use super::common::{default_start, synthetic_prices};
use crate::date_math::Period;
use crate::error::DataFetchError;
use crate::model::{PriceSeries, Ticker};
use crate::returns::{log_returns, resample};

#[test]
fn test_n_prices_give_n_minus_one_returns() {
    let prices = [100.0, 102.5, 99.0, 101.0, 110.0, 108.25];
    let pairs = prices
        .iter()
        .enumerate()
        .map(|(i, p)| (date(2020, i as i8 + 1, 28), *p))
        .collect();
    let series = PriceSeries::from_unsorted(Ticker::new("SPY"), pairs).unwrap();

    let returns = log_returns(&series, Period::Monthly).unwrap();
    assert_eq!(returns.len(), prices.len() - 1);

    for (i, r) in returns.points.iter().enumerate() {
        let expected = (prices[i + 1] / prices[i]).ln();
        assert!(
            (r.value - expected).abs() < 1e-14,
            "return {i}: expected {expected}, got {}",
            r.value
        );
    }
}

#[test]
fn test_daily_prices_resampled_to_month_end() {
    let series = synthetic_prices("SPY", default_start(), 24, 1.01);
    let sampled = resample(&series, Period::Monthly);
    assert_eq!(sampled.len(), 24);

    let returns = log_returns(&series, Period::Monthly).unwrap();
    assert_eq!(returns.len(), 23);
    // Month m's close is 100 * prod(1.01 * wobble_k); the log return is ln(1.01 * wobble_m)
    for (i, r) in returns.points.iter().enumerate() {
        let m = i + 1;
        let wobble = if m % 2 == 0 { 1.01 } else { 0.99 };
        let expected = (1.01_f64 * wobble).ln();
        assert!((r.value - expected).abs() < 1e-12);
    }
}

#[test]
fn test_single_period_is_insufficient() {
    let series = PriceSeries::from_unsorted(
        Ticker::new("SPY"),
        vec![(date(2020, 1, 2), 1.0), (date(2020, 1, 30), 1.1)],
    )
    .unwrap();
    let err = log_returns(&series, Period::Monthly).unwrap_err();
    assert!(matches!(
        err,
        DataFetchError::InsufficientHistory { periods: 1, .. }
    ));
}

#[test]
fn test_annual_returns() {
    let series = synthetic_prices("SPY", default_start(), 36, 1.0);
    let returns = log_returns(&series, Period::Annually).unwrap();
    assert_eq!(returns.len(), 2);
    assert_eq!(returns.points[0].date, date(2016, 12, 31));
}
