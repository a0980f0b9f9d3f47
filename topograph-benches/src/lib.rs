//! Benchmark support crate for topograph.
//!
//! Provides parameter types and seeded fixtures used by the Criterion
//! benchmarks for topology generation and CSV export.

pub mod error;
pub mod fixtures;
pub mod params;
