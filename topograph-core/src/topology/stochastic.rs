//! Randomised topology families.
//!
//! Every generator here draws structure as well as placement from the
//! supplied [`RandomSource`], so a seeded source reproduces the same graph.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::{
    Result,
    error::GraphError,
    random::RandomSource,
    store::{CANVAS_SIZE, GraphStore},
};

use super::{
    Topology,
    builders::{
        add_random_node, add_random_nodes, connect, connect_clique, connect_indexed, pair_count,
        pair_key, require_edge_limit, require_expected_edge_limit, require_node_count,
        require_unit_interval, weighted_choice,
    },
};

/// Number of fresh pairings a random regular construction tries before
/// giving up.
pub const MAX_REGULAR_ATTEMPTS: usize = 64;

/// Repair passes over leftover stubs allowed within one pairing attempt.
const MAX_PAIRING_PASSES: usize = 256;

/// Builds `G(n, p)`: every unordered pair is joined independently with
/// probability `probability`.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is zero,
/// `probability` lies outside `[0, 1]`, or the expected edge count exceeds
/// [`super::MAX_GENERATED_EDGES`].
pub fn erdos_renyi_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
    probability: f64,
) -> Result<()> {
    let topology = Topology::ErdosRenyiGraph;
    require_node_count(topology, node_count, 1)?;
    require_unit_interval(topology, "probability", probability)?;
    require_expected_edge_limit(
        topology,
        "probability",
        probability * pair_count(node_count) as f64,
    )?;

    let nodes = add_random_nodes(store, rng, node_count);
    for (offset, &left) in nodes.iter().enumerate() {
        for &right in &nodes[offset + 1..] {
            if rng.next_bool(probability) {
                connect(store, left, right)?;
            }
        }
    }
    Ok(())
}

/// Grows a Barabási–Albert graph.
///
/// The first `edges_to_attach` nodes form a clique. Every later node joins
/// `edges_to_attach` distinct existing nodes, each drawn with weight equal to
/// its current degree (isolated nodes weigh 1).
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is zero or
/// `edges_to_attach` is outside `1..=node_count`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topograph_core::{GraphStore, barabasi_albert_graph};
///
/// let mut store = GraphStore::new();
/// barabasi_albert_graph(&mut store, &mut SmallRng::seed_from_u64(5), 10, 2)?;
/// // One seed edge, then two edges for each of the eight later nodes.
/// assert_eq!(store.edge_count(), 1 + 8 * 2);
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
pub fn barabasi_albert_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
    edges_to_attach: usize,
) -> Result<()> {
    let topology = Topology::BarabasiAlbertGraph;
    require_node_count(topology, node_count, 1)?;
    if edges_to_attach == 0 || edges_to_attach > node_count {
        return Err(GraphError::invalid(
            topology,
            "edgesToAttach",
            format!("must lie within 1..={node_count} (got {edges_to_attach})"),
        ));
    }
    let total_edges =
        pair_count(edges_to_attach) + (node_count - edges_to_attach) * edges_to_attach;
    require_edge_limit(topology, "edgesToAttach", total_edges)?;

    let mut nodes = add_random_nodes(store, rng, edges_to_attach);
    connect_clique(store, &nodes)?;
    let mut degrees = vec![edges_to_attach - 1; edges_to_attach];

    while nodes.len() < node_count {
        let newcomer = add_random_node(store, rng);
        let mut weights: Vec<f64> = degrees.iter().map(|&d| d.max(1) as f64).collect();
        let mut attached = 0;
        while attached < edges_to_attach {
            let Some(target) = weighted_choice(rng, &weights) else {
                break;
            };
            connect(store, newcomer, nodes[target])?;
            // A chosen target is never drawn twice for the same newcomer.
            weights[target] = 0.0;
            degrees[target] += 1;
            attached += 1;
        }
        nodes.push(newcomer);
        degrees.push(attached);
    }
    Ok(())
}

/// Builds a Watts–Strogatz small-world graph.
///
/// Node `i` is first joined to its `⌊k/2⌋` successors on the ring. Each
/// lattice edge `(i, j)` is then, with probability `rewiring_probability`,
/// moved to `(i, w)` where `w` is drawn uniformly from the nodes that are
/// neither `i` nor already adjacent to `i`. An edge with no such `w` stays
/// put, so the graph never gains self-loops or duplicate edges and always
/// keeps `n·⌊k/2⌋` edges.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `k < 2`, `k ≥ n` or the
/// probability lies outside `[0, 1]`.
pub fn watts_strogatz_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
    nearest_neighbors: usize,
    rewiring_probability: f64,
) -> Result<()> {
    let topology = Topology::WattsStrogatzGraph;
    require_node_count(topology, node_count, 1)?;
    if nearest_neighbors < 2 || nearest_neighbors >= node_count {
        return Err(GraphError::invalid(
            topology,
            "nearestNeighbors",
            format!("must lie within 2..{node_count} (got {nearest_neighbors})"),
        ));
    }
    require_unit_interval(topology, "rewiringProbability", rewiring_probability)?;
    let per_side = nearest_neighbors / 2;
    require_edge_limit(topology, "nearestNeighbors", node_count * per_side)?;

    let nodes = add_random_nodes(store, rng, node_count);
    let mut pairs: Vec<(usize, usize)> = (0..node_count)
        .flat_map(|i| (1..=per_side).map(move |offset| (i, (i + offset) % node_count)))
        .collect();
    let mut present: HashSet<(usize, usize)> = pairs.iter().map(|&(a, b)| pair_key(a, b)).collect();

    let mut rewired = 0_usize;
    for pair in &mut pairs {
        if !rng.next_bool(rewiring_probability) {
            continue;
        }
        let (origin, current) = *pair;
        let candidates: Vec<usize> = (0..node_count)
            .filter(|&w| w != origin && !present.contains(&pair_key(origin, w)))
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let replacement = candidates[rng.next_index(candidates.len())];
        present.remove(&pair_key(origin, current));
        present.insert(pair_key(origin, replacement));
        *pair = (origin, replacement);
        rewired += 1;
    }
    debug!(rewired, lattice_edges = pairs.len(), "ring lattice rewired");

    connect_indexed(store, &nodes, &pairs)
}

/// Builds a uniformly random `degree`-regular graph by stub pairing.
///
/// Each node contributes `degree` stubs. Shuffled stubs are paired off,
/// rejecting self-loops and duplicates; rejected stubs are reshuffled and
/// paired again while a valid pairing among them still exists. A stuck
/// attempt restarts from scratch, up to [`MAX_REGULAR_ATTEMPTS`] times.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `degree ≥ node_count` or
/// `node_count · degree` is odd, and [`GraphError::ConstructionExhausted`]
/// when every attempt gets stuck.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topograph_core::{GraphStore, random_regular_graph};
///
/// let mut store = GraphStore::new();
/// random_regular_graph(&mut store, &mut SmallRng::seed_from_u64(9), 8, 3)?;
/// assert_eq!(store.edge_count(), 12);
/// assert!(store.nodes().iter().all(|n| store.incident_edge_count(n.id()) == 3));
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
pub fn random_regular_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
    degree: usize,
) -> Result<()> {
    let topology = Topology::RandomRegularGraph;
    require_node_count(topology, node_count, 1)?;
    if degree >= node_count {
        return Err(GraphError::invalid(
            topology,
            "degree",
            format!("must be below the node count {node_count} (got {degree})"),
        ));
    }
    if (node_count * degree) % 2 != 0 {
        return Err(GraphError::invalid(
            topology,
            "degree",
            format!("node count times degree must be even ({node_count} x {degree})"),
        ));
    }
    require_edge_limit(topology, "degree", node_count * degree / 2)?;

    // The complete graph is the only (n - 1)-regular graph; pairing would
    // mostly dead-end trying to find it.
    let pairs: Option<Vec<(usize, usize)>> = if degree + 1 == node_count {
        Some(
            (0..node_count)
                .flat_map(|a| (a + 1..node_count).map(move |b| (a, b)))
                .collect(),
        )
    } else {
        (1..=MAX_REGULAR_ATTEMPTS).find_map(|attempt| {
            let pairs = try_regular_pairing(rng, node_count, degree);
            if pairs.is_none() {
                debug!(attempt, "regular pairing stuck; restarting");
            }
            pairs
        })
    };
    let pairs = pairs.ok_or(GraphError::ConstructionExhausted {
        topology,
        attempts: MAX_REGULAR_ATTEMPTS,
    })?;

    let nodes = add_random_nodes(store, rng, node_count);
    connect_indexed(store, &nodes, &pairs)
}

fn try_regular_pairing<R: RandomSource>(
    rng: &mut R,
    node_count: usize,
    degree: usize,
) -> Option<Vec<(usize, usize)>> {
    let mut pairs = Vec::with_capacity(node_count * degree / 2);
    let mut present: HashSet<(usize, usize)> = HashSet::with_capacity(pairs.capacity());
    let mut stubs: Vec<usize> = (0..node_count)
        .flat_map(|node| std::iter::repeat_n(node, degree))
        .collect();

    for _ in 0..MAX_PAIRING_PASSES {
        if stubs.is_empty() {
            return Some(pairs);
        }
        rng.shuffle(&mut stubs);
        let mut leftover: BTreeMap<usize, usize> = BTreeMap::new();
        for chunk in stubs.chunks_exact(2) {
            let key = pair_key(chunk[0], chunk[1]);
            if key.0 != key.1 && present.insert(key) {
                pairs.push(key);
            } else {
                *leftover.entry(chunk[0]).or_default() += 1;
                *leftover.entry(chunk[1]).or_default() += 1;
            }
        }
        if !pairing_possible(&leftover, &present) {
            return None;
        }
        stubs = leftover
            .iter()
            .flat_map(|(&node, &count)| std::iter::repeat_n(node, count))
            .collect();
    }
    stubs.is_empty().then_some(pairs)
}

/// Reports whether some pair of distinct leftover nodes is not yet joined.
fn pairing_possible(leftover: &BTreeMap<usize, usize>, present: &HashSet<(usize, usize)>) -> bool {
    if leftover.is_empty() {
        return true;
    }
    let nodes: Vec<usize> = leftover.keys().copied().collect();
    nodes.iter().enumerate().any(|(offset, &a)| {
        nodes[offset + 1..]
            .iter()
            .any(|&b| !present.contains(&(a, b)))
    })
}

/// Builds a random geometric graph: nodes are placed uniformly on the
/// canvas and every pair within `radius · CANVAS_SIZE` of each other is
/// joined.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is zero,
/// `radius` lies outside `[0, 1]`, or the expected edge count exceeds
/// [`super::MAX_GENERATED_EDGES`].
pub fn random_geometric_graph<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
    radius: f64,
) -> Result<()> {
    let topology = Topology::RandomGeometricGraph;
    require_node_count(topology, node_count, 1)?;
    require_unit_interval(topology, "radius", radius)?;
    // Fraction of pairs within reach, ignoring the canvas edges.
    let covered = (std::f64::consts::PI * radius * radius).min(1.0);
    require_expected_edge_limit(topology, "radius", covered * pair_count(node_count) as f64)?;

    let reach = radius * CANVAS_SIZE;
    let placed: Vec<_> = (0..node_count)
        .map(|_| store.add_node(rng.next_position()))
        .collect();
    for (offset, left) in placed.iter().enumerate() {
        for right in &placed[offset + 1..] {
            if left.position().distance(right.position()) <= reach {
                connect(store, left.id(), right.id())?;
            }
        }
    }
    Ok(())
}

/// Grows a tree with power-law degree tail `P(k) ~ k^-γ`.
///
/// Node 2 attaches to node 1. Every later node attaches to one existing
/// node drawn with weight `degree + (γ - 3)`, the shifted linear
/// preferential attachment rule whose stationary degree exponent is `γ`.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `node_count` is zero or
/// `exponent` is not a finite value above 2.
pub fn power_law_tree<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    node_count: usize,
    exponent: f64,
) -> Result<()> {
    let topology = Topology::PowerLawTree;
    require_node_count(topology, node_count, 1)?;
    if !exponent.is_finite() || exponent <= 2.0 {
        return Err(GraphError::invalid(
            topology,
            "exponent",
            format!("must be a finite value above 2 (got {exponent})"),
        ));
    }

    let shift = exponent - 3.0;
    let mut nodes = vec![add_random_node(store, rng)];
    let mut degrees = vec![0_usize];
    while nodes.len() < node_count {
        let weights: Vec<f64> = degrees.iter().map(|&d| d as f64 + shift).collect();
        // Only the lone root can carry a non-positive weight.
        let parent = weighted_choice(rng, &weights).unwrap_or(0);
        let child = add_random_node(store, rng);
        connect(store, nodes[parent], child)?;
        degrees[parent] += 1;
        nodes.push(child);
        degrees.push(1);
    }
    Ok(())
}
