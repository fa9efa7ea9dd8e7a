//! Sample mean and standard deviation of portfolio returns

use crate::error::InsufficientDataError;
use crate::model::{DistributionParams, PortfolioReturnSeries};

/// Estimate the return distribution.
///
/// Uses the arithmetic mean and the sample standard deviation (n - 1
/// denominator). At least two observations are required.
pub fn estimate(
    series: &PortfolioReturnSeries,
) -> Result<DistributionParams, InsufficientDataError> {
    estimate_values(&series.values().collect::<Vec<_>>())
}

/// Estimate from raw periodic returns.
pub fn estimate_values(values: &[f64]) -> Result<DistributionParams, InsufficientDataError> {
    let n = values.len();
    if n < 2 {
        return Err(InsufficientDataError {
            observations: n,
            required: 2,
        });
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    Ok(DistributionParams {
        mean,
        std_dev: variance.sqrt(),
        observations: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_std_dev() {
        let params = estimate_values(&[0.01, 0.03, -0.01, 0.05]).unwrap();
        assert!((params.mean - 0.02).abs() < 1e-15);
        // Deviations: -0.01, 0.01, -0.03, 0.03 -> sum sq = 0.002, / 3
        let expected = (0.002_f64 / 3.0).sqrt();
        assert!((params.std_dev - expected).abs() < 1e-12);
        assert_eq!(params.observations, 4);
    }

    #[test]
    fn test_constant_series_has_zero_std_dev() {
        let params = estimate_values(&[0.01, 0.01, 0.01]).unwrap();
        assert!(params.std_dev < 1e-15);
    }

    #[test]
    fn test_single_observation_fails() {
        let err = estimate_values(&[0.01]).unwrap_err();
        assert_eq!(
            err,
            InsufficientDataError {
                observations: 1,
                required: 2
            }
        );
    }

    #[test]
    fn test_empty_series_fails() {
        assert!(estimate(&PortfolioReturnSeries::default()).is_err());
    }
}
