//! Named graphs with a fixed or recursively defined structure.

use crate::{Result, error::GraphError, random::RandomSource, store::GraphStore};

use super::{
    Topology,
    builders::{add_random_node, add_random_nodes, connect, connect_indexed},
};

/// Deepest Dorogovtsev–Goltsev–Mendes generation a request may reach.
pub const MAX_DGM_GENERATION: u32 = 10;

const PETERSEN_EDGES: [(usize, usize); 15] = [
    // Outer pentagon.
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 0),
    // Spokes.
    (0, 5),
    (1, 6),
    (2, 7),
    (3, 8),
    (4, 9),
    // Inner pentagram.
    (5, 7),
    (7, 9),
    (9, 6),
    (6, 8),
    (8, 5),
];

const KRACKHARDT_KITE_EDGES: [(usize, usize); 18] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 5),
    (1, 3),
    (1, 4),
    (1, 6),
    (2, 3),
    (2, 5),
    (3, 4),
    (3, 5),
    (3, 6),
    (4, 6),
    (5, 6),
    (5, 7),
    (6, 7),
    (7, 8),
    (8, 9),
];

/// Builds the Petersen graph: 10 nodes, 15 edges, 3-regular.
///
/// # Errors
/// Only fails if the store rejects an edge, which cannot happen for an empty
/// store.
pub fn petersen_graph<R: RandomSource>(store: &mut GraphStore, rng: &mut R) -> Result<()> {
    let nodes = add_random_nodes(store, rng, 10);
    connect_indexed(store, &nodes, &PETERSEN_EDGES)
}

/// Builds Krackhardt's kite: 10 nodes and 18 edges, a dense seven-node core
/// trailing a three-node tail.
///
/// # Errors
/// Only fails if the store rejects an edge, which cannot happen for an empty
/// store.
pub fn krackhardt_kite_graph<R: RandomSource>(store: &mut GraphStore, rng: &mut R) -> Result<()> {
    let nodes = add_random_nodes(store, rng, 10);
    connect_indexed(store, &nodes, &KRACKHARDT_KITE_EDGES)
}

/// Node count of Dorogovtsev–Goltsev–Mendes generation `generation`:
/// `(3^g + 3) / 2`.
fn dgm_node_count(generation: u32) -> usize {
    (3_usize.pow(generation) + 3) / 2
}

/// Deepest generation whose node count fits within `node_count`, or `None`
/// when even generation 0 (two nodes) does not fit.
///
/// # Examples
/// ```
/// use topograph_core::dgm_generation_for;
///
/// assert_eq!(dgm_generation_for(1), None);
/// assert_eq!(dgm_generation_for(2), Some(0));
/// assert_eq!(dgm_generation_for(14), Some(2));
/// assert_eq!(dgm_generation_for(15), Some(3));
/// ```
#[must_use]
pub fn dgm_generation_for(node_count: usize) -> Option<u32> {
    (0..=MAX_DGM_GENERATION)
        .take_while(|&generation| dgm_node_count(generation) <= node_count)
        .last()
}

/// Builds generation `generation` of the Dorogovtsev–Goltsev–Mendes graph.
///
/// Generation 0 is a single edge. Each further generation adds, for every
/// edge `(u, v)` present at its start, a new node joined to both `u` and `v`,
/// so the graph holds `(3^g + 3) / 2` nodes and `3^g` edges.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `generation` exceeds
/// [`MAX_DGM_GENERATION`].
pub fn dorogovtsev_goltsev_mendes_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    generation: u32,
) -> Result<()> {
    if generation > MAX_DGM_GENERATION {
        return Err(GraphError::invalid(
            Topology::DorogovtsevGoltsevMendesGraph,
            "nodeCount",
            format!("generation {generation} exceeds {MAX_DGM_GENERATION}"),
        ));
    }

    let seed = add_random_nodes(store, rng, 2);
    connect(store, seed[0], seed[1])?;
    for _ in 0..generation {
        let existing: Vec<_> = store
            .edges()
            .iter()
            .map(|edge| (edge.source(), edge.target()))
            .collect();
        for (u, v) in existing {
            let w = add_random_node(store, rng);
            connect(store, u, w)?;
            connect(store, v, w)?;
        }
    }
    Ok(())
}
