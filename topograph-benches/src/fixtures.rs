//! Seeded graphs sized for benchmarking.

use std::num::NonZeroUsize;

use rand::{SeedableRng, rngs::SmallRng};
use topograph_core::{GenerationRequest, GraphStore, Topology, TopologyParams, generate};

use crate::error::BenchSetupError;

/// Derives a parameter bag whose graphs land near `node_count` nodes for
/// every topology.
///
/// Grids use the integer square root as their side, hypercubes and binary
/// trees use `⌊log2 n⌋`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `node_count` is zero.
pub fn sized_params(node_count: usize) -> Result<TopologyParams, BenchSetupError> {
    let nodes = NonZeroUsize::new(node_count).ok_or(BenchSetupError::ZeroValue {
        context: "node_count",
    })?;
    let side = nodes.get().isqrt();
    let log2 = usize::try_from(nodes.ilog2()).unwrap_or(0);
    Ok(TopologyParams::new()
        .with_node_count(nodes.get())
        .with_rows(side)
        .with_cols(side)
        .with_dimensions(log2)
        .with_branching_factor(2)
        .with_height(log2.saturating_sub(1))
        .with_edges_to_attach(3)
        .with_nearest_neighbors(4)
        .with_degree(4))
}

/// Generates `topology` with `params` from a fresh generator seeded with
/// `seed`.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when generation rejects `params`.
pub fn generated_store(
    topology: Topology,
    params: TopologyParams,
    seed: u64,
) -> Result<GraphStore, BenchSetupError> {
    let mut store = GraphStore::new();
    let mut rng = SmallRng::seed_from_u64(seed);
    generate(&mut store, &mut rng, &GenerationRequest::new(topology, params))?;
    Ok(store)
}
