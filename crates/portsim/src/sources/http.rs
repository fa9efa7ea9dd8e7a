//! Price history over HTTP
//!
//! The endpoint is described by a URL template; `{ticker}` is replaced with
//! the symbol and `{start}` with the ISO start date. The response body must
//! be a price CSV (see [`parse_price_csv`]).

use std::time::Duration;

use jiff::civil::Date;
use portsim_core::error::DataFetchError;
use portsim_core::model::{PriceSeries, Ticker};
use portsim_core::source::PriceSource;
use reqwest::StatusCode;
use reqwest::blocking::Client;

use super::parse_price_csv;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given (zero-based) failed attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let delay_ms = base_ms.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(delay_ms as u64)
    }
}

/// Outcome of a single request that did not produce a body
enum AttemptError {
    /// Worth retrying (transport failure, 5xx, 429)
    Transient(String),
    /// Retrying cannot help
    Fatal(DataFetchError),
}

/// Fetches price CSVs from a templated URL with a blocking client
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    client: Client,
    url_template: String,
    retry: RetryPolicy,
}

impl HttpPriceSource {
    pub fn new(url_template: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(concat!("portsim/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url_template: url_template.into(),
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn url_for(&self, ticker: &Ticker, start: Date) -> String {
        self.url_template
            .replace("{ticker}", ticker.as_str())
            .replace("{start}", &start.to_string())
    }

    fn attempt(&self, ticker: &Ticker, url: &str) -> Result<String, AttemptError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AttemptError::Transient(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AttemptError::Fatal(DataFetchError::UnknownSymbol(
                ticker.clone(),
            )));
        }
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AttemptError::Transient(format!("server returned {status}")));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(DataFetchError::Network {
                ticker: ticker.clone(),
                message: format!("server returned {status}"),
            }));
        }

        response
            .text()
            .map_err(|e| AttemptError::Transient(e.to_string()))
    }
}

impl PriceSource for HttpPriceSource {
    fn fetch(&self, ticker: &Ticker, start: Date) -> Result<PriceSeries, DataFetchError> {
        let url = self.url_for(ticker, start);
        let attempts = self.retry.max_attempts.max(1);

        let mut last_error = String::new();
        for attempt in 0..attempts {
            tracing::debug!(%ticker, %url, attempt, "requesting prices");
            match self.attempt(ticker, &url) {
                Ok(body) => return parse_price_csv(ticker, body.as_bytes(), start),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Transient(message)) => {
                    last_error = message;
                    if attempt + 1 < attempts {
                        let delay = self.retry.delay_for_attempt(attempt);
                        tracing::warn!(
                            %ticker,
                            attempt = attempt + 1,
                            max_attempts = attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %last_error,
                            "price request failed, retrying"
                        );
                        std::thread::sleep(delay);
                    }
                }
            }
        }

        tracing::warn!(
            %ticker,
            max_attempts = attempts,
            error = %last_error,
            "all retry attempts exhausted"
        );
        Err(DataFetchError::Network {
            ticker: ticker.clone(),
            message: format!("{last_error} (after {attempts} attempts)"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_url_template() {
        let source =
            HttpPriceSource::new("https://prices.example/{ticker}.csv?from={start}").unwrap();
        assert_eq!(
            source.url_for(&Ticker::new("spy"), date(2015, 1, 1)),
            "https://prices.example/SPY.csv?from=2015-01-01"
        );
    }

    #[test]
    fn test_retry_delay() {
        let policy = RetryPolicy {
            initial_delay: Duration::from_millis(100),
            ..Default::default()
        };
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));

        let capped = RetryPolicy {
            initial_delay: Duration::from_secs(8),
            ..Default::default()
        };
        assert_eq!(capped.delay_for_attempt(3), Duration::from_secs(10));
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        // Nothing listens on port 9 locally; connection is refused immediately
        let source = HttpPriceSource::new("http://127.0.0.1:9/{ticker}.csv")
            .unwrap()
            .with_retry(RetryPolicy {
                max_attempts: 2,
                initial_delay: Duration::ZERO,
                ..Default::default()
            });
        let err = source
            .fetch(&Ticker::new("SPY"), date(2020, 1, 1))
            .unwrap_err();
        match err {
            DataFetchError::Network { message, .. } => assert!(message.contains("2 attempts")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
