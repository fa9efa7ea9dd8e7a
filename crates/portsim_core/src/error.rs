use std::fmt;

use crate::model::Ticker;

/// Errors raised while acquiring or validating price history
#[derive(Debug, Clone)]
pub enum DataFetchError {
    /// The price history contains no observations
    EmptyHistory(Ticker),
    /// Fewer than two periods remain after resampling
    InsufficientHistory { ticker: Ticker, periods: usize },
    /// The data source does not know the symbol (missing or delisted)
    UnknownSymbol(Ticker),
    /// A price was zero, negative, or not finite
    InvalidPrice {
        ticker: Ticker,
        date: jiff::civil::Date,
        price: f64,
    },
    /// Observation dates are not strictly increasing
    UnorderedDates {
        ticker: Ticker,
        date: jiff::civil::Date,
    },
    /// Transport failure talking to the data source
    Network { ticker: Ticker, message: String },
    /// The payload could not be parsed into prices
    Parse { ticker: Ticker, message: String },
}

impl fmt::Display for DataFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFetchError::EmptyHistory(ticker) => {
                write!(f, "price history for {ticker} is empty")
            }
            DataFetchError::InsufficientHistory { ticker, periods } => write!(
                f,
                "price history for {ticker} spans {periods} period(s), at least 2 required"
            ),
            DataFetchError::UnknownSymbol(ticker) => write!(f, "unknown symbol {ticker}"),
            DataFetchError::InvalidPrice {
                ticker,
                date,
                price,
            } => write!(f, "invalid price {price} for {ticker} on {date}"),
            DataFetchError::UnorderedDates { ticker, date } => {
                write!(f, "dates for {ticker} are not strictly increasing at {date}")
            }
            DataFetchError::Network { ticker, message } => {
                write!(f, "failed to fetch {ticker}: {message}")
            }
            DataFetchError::Parse { ticker, message } => {
                write!(f, "failed to parse prices for {ticker}: {message}")
            }
        }
    }
}

impl std::error::Error for DataFetchError {}

/// Errors related to invalid portfolio weights
#[derive(Debug, Clone)]
pub enum WeightMismatchError {
    EmptyPortfolio,
    NegativeWeight { ticker: Ticker, weight: f64 },
    NonFiniteWeight { ticker: Ticker },
    /// Weights do not sum to 1.0 within tolerance
    SumMismatch { sum: f64, tolerance: f64 },
    /// A weighted ticker has no return series
    MissingSeries(Ticker),
    DuplicateTicker(Ticker),
}

impl fmt::Display for WeightMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightMismatchError::EmptyPortfolio => write!(f, "portfolio has no holdings"),
            WeightMismatchError::NegativeWeight { ticker, weight } => {
                write!(f, "weight for {ticker} is negative ({weight})")
            }
            WeightMismatchError::NonFiniteWeight { ticker } => {
                write!(f, "weight for {ticker} is not finite")
            }
            WeightMismatchError::SumMismatch { sum, tolerance } => {
                write!(f, "weights sum to {sum}, expected 1.0 (tolerance {tolerance})")
            }
            WeightMismatchError::MissingSeries(ticker) => {
                write!(f, "no return series for weighted ticker {ticker}")
            }
            WeightMismatchError::DuplicateTicker(ticker) => {
                write!(f, "ticker {ticker} appears more than once")
            }
        }
    }
}

impl std::error::Error for WeightMismatchError {}

/// Too few observations to estimate a statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientDataError {
    pub observations: usize,
    pub required: usize,
}

impl fmt::Display for InsufficientDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient data: {} observation(s), at least {} required",
            self.observations, self.required
        )
    }
}

impl std::error::Error for InsufficientDataError {}

/// A simulation parameter is out of range
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidParameterError {
    pub parameter: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

impl fmt::Display for InvalidParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} ({}): {}",
            self.parameter, self.value, self.reason
        )
    }
}

impl std::error::Error for InvalidParameterError {}

/// Errors from combining asset returns into a portfolio
#[derive(Debug, Clone)]
pub enum AggregateError {
    Weights(WeightMismatchError),
    InsufficientData(InsufficientDataError),
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::Weights(e) => write!(f, "{e}"),
            AggregateError::InsufficientData(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AggregateError::Weights(e) => Some(e),
            AggregateError::InsufficientData(e) => Some(e),
        }
    }
}

impl From<WeightMismatchError> for AggregateError {
    fn from(e: WeightMismatchError) -> Self {
        AggregateError::Weights(e)
    }
}

impl From<InsufficientDataError> for AggregateError {
    fn from(e: InsufficientDataError) -> Self {
        AggregateError::InsufficientData(e)
    }
}

/// Errors from the growth simulator and batch runner
#[derive(Debug, Clone)]
pub enum SimulationError {
    InvalidParameter(InvalidParameterError),
    /// The normal distribution rejected the parameters
    Distribution { mean: f64, std_dev: f64 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParameter(e) => write!(f, "{e}"),
            SimulationError::Distribution { mean, std_dev } => write!(
                f,
                "invalid normal distribution parameters (mean={mean}, std_dev={std_dev})"
            ),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::InvalidParameter(e) => Some(e),
            SimulationError::Distribution { .. } => None,
        }
    }
}

impl From<InvalidParameterError> for SimulationError {
    fn from(e: InvalidParameterError) -> Self {
        SimulationError::InvalidParameter(e)
    }
}

/// Top-level error for a full report run. Every variant is fatal.
#[derive(Debug, Clone)]
pub enum ReportError {
    DataFetch(DataFetchError),
    Weights(WeightMismatchError),
    InsufficientData(InsufficientDataError),
    Simulation(SimulationError),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::DataFetch(e) => write!(f, "{e}"),
            ReportError::Weights(e) => write!(f, "{e}"),
            ReportError::InsufficientData(e) => write!(f, "{e}"),
            ReportError::Simulation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::DataFetch(e) => Some(e),
            ReportError::Weights(e) => Some(e),
            ReportError::InsufficientData(e) => Some(e),
            ReportError::Simulation(e) => Some(e),
        }
    }
}

impl From<DataFetchError> for ReportError {
    fn from(e: DataFetchError) -> Self {
        ReportError::DataFetch(e)
    }
}

impl From<WeightMismatchError> for ReportError {
    fn from(e: WeightMismatchError) -> Self {
        ReportError::Weights(e)
    }
}

impl From<InsufficientDataError> for ReportError {
    fn from(e: InsufficientDataError) -> Self {
        ReportError::InsufficientData(e)
    }
}

impl From<AggregateError> for ReportError {
    fn from(e: AggregateError) -> Self {
        match e {
            AggregateError::Weights(e) => ReportError::Weights(e),
            AggregateError::InsufficientData(e) => ReportError::InsufficientData(e),
        }
    }
}

impl From<SimulationError> for ReportError {
    fn from(e: SimulationError) -> Self {
        ReportError::Simulation(e)
    }
}

impl From<InvalidParameterError> for ReportError {
    fn from(e: InvalidParameterError) -> Self {
        ReportError::Simulation(SimulationError::InvalidParameter(e))
    }
}
