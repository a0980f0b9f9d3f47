//! Benchmark parameter types.
//!
//! Each struct renders as the Criterion parameter label of one benchmark.

use std::fmt;

use topograph_core::{ExportFormat, Topology};

/// Parameters for a generator benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorBenchParams {
    /// Topology being generated.
    pub topology: Topology,
    /// Requested node count before per-topology sizing.
    pub node_count: usize,
}

impl fmt::Display for GeneratorBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.topology, self.node_count)
    }
}

/// Parameters for an export benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ExportBenchParams {
    /// Export being rendered.
    pub format: ExportFormat,
    /// Number of nodes in the exported graph.
    pub node_count: usize,
}

impl fmt::Display for ExportBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.format, self.node_count)
    }
}
