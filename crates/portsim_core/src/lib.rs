//! Portfolio Monte Carlo simulation library
//!
//! This crate turns historical prices for a weighted portfolio into a Monte
//! Carlo projection of portfolio growth:
//! - Monthly log returns from raw price history
//! - Weighted portfolio returns with periodic rebalancing
//! - Sample mean / standard deviation estimation
//! - Seeded, reproducible growth-of-$1 simulation (optionally parallel)
//! - Max / median / min summary of simulated terminal values
//! - Sharpe ratio and annualised risk figures
//!
//! # Example
//!
//! ```ignore
//! use portsim_core::config::ReportBuilder;
//! use portsim_core::report::run_report;
//!
//! let config = ReportBuilder::new("S&P only")
//!     .holding("SPY", 100.0)
//!     .start(2015, 1, 1)
//!     .months(120)
//!     .simulations(51)
//!     .seed(42)
//!     .build();
//! let report = run_report(&config, &source)?;
//! println!("median terminal value: {}", report.summary.median_value);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod date_math;
pub mod distribution;
pub mod error;
pub mod metrics;
pub mod portfolio;
pub mod report;
pub mod returns;
pub mod simulation;
pub mod source;
pub mod summary;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ReportBuilder, ReportConfig};
pub use report::{Report, run_report};
pub use source::{InMemoryPriceSource, PriceSource};
