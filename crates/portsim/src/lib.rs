//! Command-line front end for portsim
//!
//! Loads a YAML report configuration, pulls price history from a directory
//! of CSV files or an HTTP endpoint, runs the simulation pipeline from
//! `portsim_core`, and writes the JSON report (plus an optional per-path
//! CSV table).

pub mod cli;
pub mod logging;
pub mod output;
pub mod sources;

pub use cli::{Args, run};
pub use logging::init_logging;
