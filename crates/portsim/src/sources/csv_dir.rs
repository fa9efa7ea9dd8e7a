//! Directory of downloaded price files

use std::fs::File;
use std::path::PathBuf;

use jiff::civil::Date;
use portsim_core::error::DataFetchError;
use portsim_core::model::{PriceSeries, Ticker};
use portsim_core::source::PriceSource;

use super::parse_price_csv;

/// Reads `<dir>/<TICKER>.csv` for every requested ticker
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, ticker: &Ticker) -> PathBuf {
        self.dir.join(format!("{ticker}.csv"))
    }
}

impl PriceSource for CsvDirSource {
    fn fetch(&self, ticker: &Ticker, start: Date) -> Result<PriceSeries, DataFetchError> {
        let path = self.path_for(ticker);
        if !path.is_file() {
            tracing::warn!(%ticker, path = %path.display(), "no price file");
            return Err(DataFetchError::UnknownSymbol(ticker.clone()));
        }

        let file = File::open(&path).map_err(|e| DataFetchError::Parse {
            ticker: ticker.clone(),
            message: format!("reading {}: {e}", path.display()),
        })?;
        parse_price_csv(ticker, file, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reads_ticker_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("SPY.csv"),
            "Date,Close\n2024-01-31,480.0\n2024-02-29,505.5\n",
        )
        .unwrap();

        let source = CsvDirSource::new(dir.path());
        let series = source.fetch(&Ticker::new("spy"), date(2024, 1, 1)).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].price, 505.5);
    }

    #[test]
    fn test_missing_file_is_unknown_symbol() {
        let dir = tempdir().unwrap();
        let source = CsvDirSource::new(dir.path());
        let err = source
            .fetch(&Ticker::new("NOPE"), date(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DataFetchError::UnknownSymbol(_)));
    }
}
