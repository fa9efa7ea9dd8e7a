//! Integration tests for the portsim pipeline
//!
//! Tests are organized by topic:
//! - `returns` - Return series construction from prices
//! - `portfolio` - Weighting, alignment, and rebalancing
//! - `simulation` - Growth simulator and batch runner properties
//! - `report` - Full pipeline against an in-memory price source

mod common;
mod returns;
