//! Shared test utilities used across topograph crates.

pub mod csv;
pub mod tracing;
