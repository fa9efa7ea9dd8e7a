//! Monte Carlo growth simulation.
//!
//! A single path draws `months` returns from `Normal(mean, std_dev)` and
//! compounds them into a growth-of-`init_value` series. A batch repeats this
//! K times; each path gets its own generator seeded from the caller's random
//! source, so a batch is reproducible from one seed and produces identical
//! results whether or not the paths run in parallel.
//!
//! The reference generator is [`PathRng`] (PCG 128/64, XSL-RR output). It is
//! a named algorithm with a fixed output stream, so a seed reproduces the
//! same paths across releases.

use rand::distr::Distribution;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::error::{InvalidParameterError, SimulationError};
use crate::model::{SimulationBatch, SimulationId, SimulationPath};

/// Generator used for the root seed stream and for every path
pub type PathRng = Pcg64;

/// Inputs shared by every simulated path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Starting value, `growth[0]` (must be positive)
    pub init_value: f64,
    /// Number of future periods to simulate (must be positive)
    pub months: usize,
    pub mean: f64,
    /// Must be non-negative; zero gives a deterministic path
    pub std_dev: f64,
}

impl GrowthParams {
    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        if self.months == 0 {
            return Err(InvalidParameterError {
                parameter: "months",
                value: 0.0,
                reason: "must be positive",
            });
        }
        if !self.init_value.is_finite() || self.init_value <= 0.0 {
            return Err(InvalidParameterError {
                parameter: "init_value",
                value: self.init_value,
                reason: "must be positive and finite",
            });
        }
        if !self.mean.is_finite() {
            return Err(InvalidParameterError {
                parameter: "mean",
                value: self.mean,
                reason: "must be finite",
            });
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(InvalidParameterError {
                parameter: "std_dev",
                value: self.std_dev,
                reason: "must be non-negative and finite",
            });
        }
        Ok(())
    }
}

/// Compound a return sequence into cumulative growth, `init_value` first.
#[must_use]
pub fn compound(init_value: f64, returns: &[f64]) -> Vec<f64> {
    std::iter::once(init_value)
        .chain(returns.iter().scan(init_value, |acc, r| {
            *acc *= 1.0 + r;
            Some(*acc)
        }))
        .collect()
}

fn sample_returns<R: Rng + ?Sized>(
    rng: &mut R,
    params: &GrowthParams,
) -> Result<Vec<f64>, SimulationError> {
    if params.std_dev == 0.0 {
        return Ok(vec![params.mean; params.months]);
    }
    let normal = rand_distr::Normal::new(params.mean, params.std_dev).map_err(|_| {
        SimulationError::Distribution {
            mean: params.mean,
            std_dev: params.std_dev,
        }
    })?;
    Ok((0..params.months).map(|_| normal.sample(rng)).collect())
}

/// Simulate one path of length `months + 1`.
pub fn simulate_path<R: Rng + ?Sized>(
    rng: &mut R,
    id: SimulationId,
    params: &GrowthParams,
) -> Result<SimulationPath, SimulationError> {
    params.validate()?;
    let returns = sample_returns(rng, params)?;
    Ok(SimulationPath {
        id,
        growth: compound(params.init_value, &returns),
    })
}

/// Run `simulations` independent paths with ids `1..=simulations`.
///
/// One seed per path is drawn from `rng` up front; path `i` then runs on its
/// own [`PathRng`] seeded with seed `i`.
pub fn run_batch<R: Rng + ?Sized>(
    rng: &mut R,
    simulations: usize,
    params: &GrowthParams,
) -> Result<SimulationBatch, SimulationError> {
    if simulations == 0 {
        return Err(InvalidParameterError {
            parameter: "simulations",
            value: 0.0,
            reason: "must be positive",
        }
        .into());
    }
    params.validate()?;

    let seeds: Vec<u64> = (0..simulations).map(|_| rng.random()).collect();
    let run = |(i, seed): (usize, u64)| {
        let mut path_rng = PathRng::seed_from_u64(seed);
        simulate_path(&mut path_rng, SimulationId(i as u32 + 1), params)
    };

    #[cfg(feature = "parallel")]
    let paths = seeds
        .into_par_iter()
        .enumerate()
        .map(run)
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let paths = seeds
        .into_iter()
        .enumerate()
        .map(run)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        simulations,
        months = params.months,
        mean = params.mean,
        std_dev = params.std_dev,
        "simulation batch complete"
    );

    Ok(SimulationBatch {
        months: (0..=params.months as u32).collect(),
        paths,
    })
}

/// Run a batch from a single `u64` seed using [`PathRng`].
pub fn run_batch_seeded(
    seed: u64,
    simulations: usize,
    params: &GrowthParams,
) -> Result<SimulationBatch, SimulationError> {
    let mut rng = PathRng::seed_from_u64(seed);
    run_batch(&mut rng, simulations, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GrowthParams {
        GrowthParams {
            init_value: 1.0,
            months: 12,
            mean: 0.01,
            std_dev: 0.04,
        }
    }

    #[test]
    fn test_compound() {
        assert_eq!(compound(2.0, &[0.5, -0.5]), vec![2.0, 3.0, 1.5]);
        assert_eq!(compound(1.0, &[]), vec![1.0]);
    }

    #[test]
    fn test_zero_months_rejected() {
        let mut rng = PathRng::seed_from_u64(1);
        let p = GrowthParams {
            months: 0,
            ..params()
        };
        let err = simulate_path(&mut rng, SimulationId(1), &p).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidParameter(InvalidParameterError {
                parameter: "months",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_init_value_rejected() {
        let mut rng = PathRng::seed_from_u64(1);
        for init_value in [0.0, -1.0, f64::NAN] {
            let p = GrowthParams {
                init_value,
                ..params()
            };
            assert!(simulate_path(&mut rng, SimulationId(1), &p).is_err());
        }
    }

    #[test]
    fn test_negative_std_dev_rejected() {
        let mut rng = PathRng::seed_from_u64(1);
        let p = GrowthParams {
            std_dev: -0.1,
            ..params()
        };
        assert!(simulate_path(&mut rng, SimulationId(1), &p).is_err());
    }

    #[test]
    fn test_zero_simulations_rejected() {
        assert!(run_batch_seeded(1, 0, &params()).is_err());
    }

    #[test]
    fn test_path_length() {
        let mut rng = PathRng::seed_from_u64(42);
        let path = simulate_path(&mut rng, SimulationId(1), &params()).unwrap();
        assert_eq!(path.growth.len(), 13);
        assert_eq!(path.growth[0], 1.0);
        assert_eq!(path.months(), 12);
    }
}
