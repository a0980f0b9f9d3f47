//! Deterministic topology families.
//!
//! Structure is fully determined by the parameters; only node placement
//! draws from the random source.

use crate::{
    Result,
    error::GraphError,
    random::RandomSource,
    store::{GraphStore, NodeId, Position},
};

use super::{
    Topology,
    builders::{
        add_node_at, add_random_node, add_random_nodes, connect, connect_clique, connect_cycle,
        connect_path, pair_count, require_edge_limit, require_node_count, require_size_limit,
    },
};

/// Largest hypercube dimension a request may ask for.
pub const MAX_HYPERCUBE_DIMENSIONS: usize = 16;

const GRID_SPACING: f64 = 50.0;
const GRID_JITTER: f64 = 10.0;

/// Builds the complete graph `K_n`: one edge per unordered pair, `n(n-1)/2`
/// edges in total.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is zero or
/// the graph would exceed [`super::MAX_GENERATED_NODES`] or
/// [`super::MAX_GENERATED_EDGES`].
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topograph_core::{GraphStore, complete_graph};
///
/// let mut store = GraphStore::new();
/// complete_graph(&mut store, &mut SmallRng::seed_from_u64(0), 5)?;
/// assert_eq!(store.edge_count(), 10);
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
pub fn complete_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    build_clique(store, rng, Topology::CompleteGraph, node_count).map(|_| ())
}

/// Alias of [`complete_graph`].
///
/// # Errors
/// Same as [`complete_graph`].
pub fn clique_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    build_clique(store, rng, Topology::CliqueGraph, node_count).map(|_| ())
}

fn build_clique<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    topology: Topology,
    node_count: usize,
) -> Result<Vec<NodeId>> {
    require_node_count(topology, node_count, 1)?;
    require_edge_limit(topology, "nodeCount", pair_count(node_count))?;
    let nodes = add_random_nodes(store, rng, node_count);
    connect_clique(store, &nodes)?;
    Ok(nodes)
}

/// Builds the cycle `C_n`: node `i` joined to node `i + 1 mod n`.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count < 3`; smaller
/// rings would need a self-loop or a doubled edge.
pub fn cycle_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    build_cycle(store, rng, Topology::CycleGraph, node_count).map(|_| ())
}

fn build_cycle<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    topology: Topology,
    node_count: usize,
) -> Result<Vec<NodeId>> {
    require_node_count(topology, node_count, 3)?;
    let nodes = add_random_nodes(store, rng, node_count);
    connect_cycle(store, &nodes)?;
    Ok(nodes)
}

/// Builds the path `P_n` with `n - 1` edges.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is zero.
pub fn path_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    build_path(store, rng, Topology::PathGraph, node_count).map(|_| ())
}

fn build_path<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    topology: Topology,
    node_count: usize,
) -> Result<Vec<NodeId>> {
    require_node_count(topology, node_count, 1)?;
    let nodes = add_random_nodes(store, rng, node_count);
    connect_path(store, &nodes)?;
    Ok(nodes)
}

/// Builds the star `S_n`: the first node is the hub, joined to every other
/// node.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is zero.
pub fn star_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    require_node_count(Topology::StarGraph, node_count, 1)?;
    let nodes = add_random_nodes(store, rng, node_count);
    let (&hub, leaves) = nodes
        .split_first()
        .ok_or_else(|| GraphError::invalid(Topology::StarGraph, "nodeCount", "empty"))?;
    for &leaf in leaves {
        connect(store, hub, leaf)?;
    }
    Ok(())
}

/// Builds the wheel `W_n`: a cycle on `n - 1` nodes followed by a hub (the
/// last node) joined to every cycle node.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count < 4`.
pub fn wheel_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    require_node_count(Topology::WheelGraph, node_count, 4)?;
    let rim = build_cycle(store, rng, Topology::WheelGraph, node_count - 1)?;
    let hub = add_random_node(store, rng);
    for &node in &rim {
        connect(store, hub, node)?;
    }
    Ok(())
}

/// Builds the ladder `L_{n/2}`: two rails of `n/2` nodes (ids `1..=n/2` and
/// `n/2+1..=n`) with a rung between corresponding nodes.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is odd or
/// zero.
pub fn ladder_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    build_ladder(store, rng, Topology::LadderGraph, node_count, 2).map(|_| ())
}

/// Builds the circular ladder `CL_{n/2}`: a ladder whose two rails are each
/// closed into a cycle.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is odd or
/// below 6 (shorter rails cannot close without doubling an edge).
pub fn circular_ladder_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    let (left, right) = build_ladder(store, rng, Topology::CircularLadderGraph, node_count, 6)?;
    for rail in [left, right] {
        if let (Some(&first), Some(&last)) = (rail.first(), rail.last()) {
            connect(store, first, last)?;
        }
    }
    Ok(())
}

fn build_ladder<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    topology: Topology,
    node_count: usize,
    minimum: usize,
) -> Result<(Vec<NodeId>, Vec<NodeId>)> {
    require_node_count(topology, node_count, minimum)?;
    if node_count % 2 != 0 {
        return Err(GraphError::invalid(
            topology,
            "nodeCount",
            format!("must be even (got {node_count})"),
        ));
    }

    let mut nodes = add_random_nodes(store, rng, node_count);
    let right = nodes.split_off(node_count / 2);
    let left = nodes;
    for (index, (&l, &r)) in left.iter().zip(&right).enumerate() {
        if let (Some(&l_next), Some(&r_next)) = (left.get(index + 1), right.get(index + 1)) {
            connect(store, l, l_next)?;
            connect(store, r, r_next)?;
        }
        connect(store, l, r)?;
    }
    Ok((left, right))
}

/// Builds a lollipop: a clique on `⌊n/2⌋` nodes, then a path on `⌈n/2⌉`
/// nodes, then an edge from the clique's last node to every path node.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count < 2`.
pub fn lollipop_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
) -> Result<()> {
    require_node_count(Topology::LollipopGraph, node_count, 2)?;
    let clique_size = node_count / 2;
    let clique = build_clique(store, rng, Topology::LollipopGraph, clique_size)?;
    let path = build_path(store, rng, Topology::LollipopGraph, node_count - clique_size)?;
    if let Some(&joint) = clique.last() {
        for &node in &path {
            connect(store, joint, node)?;
        }
    }
    Ok(())
}

/// Builds a `rows × cols` lattice in row-major id order. Each node is joined
/// to the node above it and then to the node on its left.
///
/// Node `(r, c)` sits near `(c·50, r·50)` with up to 10 units of jitter.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when either side is zero or the
/// grid exceeds [`super::MAX_GENERATED_NODES`].
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topograph_core::{GraphStore, grid_graph};
///
/// let mut store = GraphStore::new();
/// grid_graph(&mut store, &mut SmallRng::seed_from_u64(0), 3, 4)?;
/// assert_eq!(store.node_count(), 12);
/// assert_eq!(store.edge_count(), 3 * 3 + 2 * 4);
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
pub fn grid_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    rows: usize,
    cols: usize,
) -> Result<()> {
    for (parameter, value) in [("rows", rows), ("cols", cols)] {
        if value == 0 {
            return Err(GraphError::invalid(
                Topology::GridGraph,
                parameter,
                "must be at least 1",
            ));
        }
    }
    let total = rows.checked_mul(cols).unwrap_or(usize::MAX);
    require_size_limit(Topology::GridGraph, "rows", total)?;

    let mut nodes: Vec<NodeId> = Vec::with_capacity(total);
    for row in 0..rows {
        for col in 0..cols {
            let x = col as f64 * GRID_SPACING;
            let y = row as f64 * GRID_SPACING;
            let position = Position::new(
                rng.next_range(x, x + GRID_JITTER),
                rng.next_range(y, y + GRID_JITTER),
            );
            let current = add_node_at(store, position);
            if row > 0 {
                connect(store, nodes[(row - 1) * cols + col], current)?;
            }
            if col > 0 {
                connect(store, nodes[row * cols + col - 1], current)?;
            }
            nodes.push(current);
        }
    }
    Ok(())
}

/// Builds the complete `branching_factor`-ary tree of the given height. The
/// root is node 1 at depth 0 and ids follow pre-order.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `branching_factor` is zero
/// or the tree would exceed [`super::MAX_GENERATED_NODES`].
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topograph_core::{GraphStore, NodeId, balanced_tree};
///
/// let mut store = GraphStore::new();
/// balanced_tree(&mut store, &mut SmallRng::seed_from_u64(0), 2, 2)?;
/// assert_eq!(store.node_count(), 7);
/// // Pre-order: 1 -> 2 -> {3, 4}, 1 -> 5 -> {6, 7}.
/// assert_eq!(
///     store.neighbors(NodeId::new(1)),
///     vec![NodeId::new(2), NodeId::new(5)],
/// );
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
pub fn balanced_tree<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    branching_factor: usize,
    height: usize,
) -> Result<()> {
    if branching_factor == 0 {
        return Err(GraphError::invalid(
            Topology::BalancedTree,
            "branchingFactor",
            "must be at least 1",
        ));
    }
    let total = balanced_tree_size(branching_factor, height).unwrap_or(usize::MAX);
    require_size_limit(Topology::BalancedTree, "height", total)?;

    let root = add_random_node(store, rng);
    // Each entry is a child still to be created: (parent, depth of child).
    let mut pending: Vec<(NodeId, usize)> = Vec::new();
    if height > 0 {
        pending.extend(std::iter::repeat_n((root, 1), branching_factor));
    }
    while let Some((parent, depth)) = pending.pop() {
        let child = add_random_node(store, rng);
        connect(store, parent, child)?;
        if depth < height {
            pending.extend(std::iter::repeat_n((child, depth + 1), branching_factor));
        }
    }
    Ok(())
}

/// Number of nodes in a complete tree, or `None` on overflow.
fn balanced_tree_size(branching_factor: usize, height: usize) -> Option<usize> {
    let mut level = 1_usize;
    let mut total = 1_usize;
    for _ in 0..height {
        level = level.checked_mul(branching_factor)?;
        total = total.checked_add(level)?;
        if total > super::MAX_GENERATED_NODES {
            return Some(total);
        }
    }
    Some(total)
}

/// Builds the `d`-dimensional hypercube `Q_d`: node `i + 1` carries label
/// `i`, and labels at Hamming distance one are joined once.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `dimensions` exceeds
/// [`MAX_HYPERCUBE_DIMENSIONS`].
pub fn hypercube_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    dimensions: usize,
) -> Result<()> {
    if dimensions > MAX_HYPERCUBE_DIMENSIONS {
        return Err(GraphError::invalid(
            Topology::HypercubeGraph,
            "dimensions",
            format!("must not exceed {MAX_HYPERCUBE_DIMENSIONS} (got {dimensions})"),
        ));
    }

    let nodes = add_random_nodes(store, rng, 1_usize << dimensions);
    for (label, &node) in nodes.iter().enumerate() {
        for bit in 0..dimensions {
            let neighbour = label ^ (1 << bit);
            if neighbour > label {
                connect(store, node, nodes[neighbour])?;
            }
        }
    }
    Ok(())
}
