//! Price sources backed by files and HTTP endpoints.
//!
//! Both sources consume the same CSV layout as the common Yahoo/Stooq
//! downloads: a `Date` column plus a `Close` or `Adj Close` column.
//! Adjusted closes are preferred when both are present.

use std::io::Read;

use jiff::civil::Date;
use portsim_core::error::DataFetchError;
use portsim_core::model::{PriceSeries, Ticker};

pub mod csv_dir;
pub mod http;

pub use csv_dir::CsvDirSource;
pub use http::HttpPriceSource;

const DATE_COLUMN: &str = "date";
const CLOSE_COLUMNS: [&str; 2] = ["adj close", "close"];

fn parse_error(ticker: &Ticker, message: impl Into<String>) -> DataFetchError {
    DataFetchError::Parse {
        ticker: ticker.clone(),
        message: message.into(),
    }
}

/// Parse a price CSV and keep the observations on or after `start`.
///
/// Rows with an empty or `null` close are skipped (Yahoo emits these for
/// non-trading days); any other unparsable cell fails the whole series.
pub fn parse_price_csv<R: Read>(
    ticker: &Ticker,
    reader: R,
    start: Date,
) -> Result<PriceSeries, DataFetchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| parse_error(ticker, e.to_string()))?
        .clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };
    let date_idx = find(DATE_COLUMN).ok_or_else(|| parse_error(ticker, "no 'Date' column"))?;
    let close_idx = CLOSE_COLUMNS
        .iter()
        .find_map(|&name| find(name))
        .ok_or_else(|| parse_error(ticker, "no 'Close' or 'Adj Close' column"))?;

    let mut pairs = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let row = record.map_err(|e| parse_error(ticker, e.to_string()))?;
        let (Some(date_cell), Some(close_cell)) = (row.get(date_idx), row.get(close_idx)) else {
            return Err(parse_error(ticker, format!("row {} is short", line + 1)));
        };
        if close_cell.is_empty() || close_cell.eq_ignore_ascii_case("null") {
            tracing::trace!(%ticker, date = date_cell, "skipping row without a close");
            continue;
        }

        let date: Date = date_cell
            .parse()
            .map_err(|e| parse_error(ticker, format!("bad date '{date_cell}': {e}")))?;
        let close: f64 = close_cell
            .parse()
            .map_err(|e| parse_error(ticker, format!("bad close '{close_cell}': {e}")))?;
        pairs.push((date, close));
    }

    tracing::debug!(%ticker, rows = pairs.len(), "parsed price csv");
    Ok(PriceSeries::from_unsorted(ticker.clone(), pairs)?.since(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    const YAHOO: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-31,100,101,99,100.5,98.0,1000
2024-02-29,101,102,100,101.5,99.0,1000
2024-03-28,null,null,null,null,null,null
2024-04-30,102,103,101,102.5,100.0,1000
";

    #[test]
    fn test_prefers_adjusted_close() {
        let series = parse_price_csv(&Ticker::new("SPY"), YAHOO.as_bytes(), date(2000, 1, 1))
            .unwrap();
        let prices: Vec<f64> = series.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![98.0, 99.0, 100.0]);
    }

    #[test]
    fn test_plain_close_and_unsorted_rows() {
        let csv = "date,close\n2024-02-01,11\n2024-01-02,10\n";
        let series =
            parse_price_csv(&Ticker::new("AGG"), csv.as_bytes(), date(2000, 1, 1)).unwrap();
        assert_eq!(series.points()[0].date, date(2024, 1, 2));
        assert_eq!(series.points()[1].price, 11.0);
    }

    #[test]
    fn test_start_date_filter() {
        let series = parse_price_csv(&Ticker::new("SPY"), YAHOO.as_bytes(), date(2024, 2, 1))
            .unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_missing_close_column() {
        let csv = "Date,Open\n2024-01-02,10\n";
        let err = parse_price_csv(&Ticker::new("SPY"), csv.as_bytes(), date(2000, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DataFetchError::Parse { .. }));
    }

    #[test]
    fn test_bad_price_rejected() {
        let csv = "Date,Close\n2024-01-02,abc\n";
        let err = parse_price_csv(&Ticker::new("SPY"), csv.as_bytes(), date(2000, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DataFetchError::Parse { .. }));

        let csv = "Date,Close\n2024-01-02,-5\n";
        let err = parse_price_csv(&Ticker::new("SPY"), csv.as_bytes(), date(2000, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DataFetchError::InvalidPrice { .. }));
    }
}
