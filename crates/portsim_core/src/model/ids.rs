//! Identifiers for portfolio and simulation entities
//!
//! Each identifier has its own type so tickers and simulation ids cannot be
//! mixed up with plain strings or indices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Asset symbol as understood by the market-data source (e.g. `SPY`)
///
/// Symbols are trimmed and upper-cased on every construction path, including
/// deserialisation, so `spy` and `SPY` are the same ticker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Ticker(pub String);

impl Ticker {
    /// Create a ticker, normalising to upper case
    #[must_use]
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_ascii_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

/// Stable 1-based identifier of a simulated path within a batch.
///
/// Ids double as series/column names in rendered charts and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationId(pub u32);

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sim_{}", self.0)
    }
}
