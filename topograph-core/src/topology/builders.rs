//! Shared construction helpers for the topology generators.
//!
//! Parameter validation, node placement and the common wiring patterns
//! (path, cycle, clique, explicit index pairs) live here so the generators
//! themselves read as their graph-theoretic definitions.

use crate::{
    Result,
    error::GraphError,
    random::RandomSource,
    store::{GraphStore, NodeId, Position},
};

use super::Topology;

/// Upper bound on the number of nodes a single request may create.
pub const MAX_GENERATED_NODES: usize = 1 << 16;

/// Upper bound on the number of edges a single request may create.
///
/// Dense families reach this long before [`MAX_GENERATED_NODES`]: a complete
/// graph tops out at 2 896 nodes.
pub const MAX_GENERATED_EDGES: usize = 1 << 22;

/// Rejects node counts below `minimum` or above [`MAX_GENERATED_NODES`].
pub(super) fn require_node_count(
    topology: Topology,
    node_count: usize,
    minimum: usize,
) -> Result<()> {
    if node_count < minimum {
        return Err(GraphError::invalid(
            topology,
            "nodeCount",
            format!("must be at least {minimum} (got {node_count})"),
        ));
    }
    require_size_limit(topology, "nodeCount", node_count)
}

/// Rejects derived graph sizes above [`MAX_GENERATED_NODES`].
pub(super) fn require_size_limit(
    topology: Topology,
    parameter: &'static str,
    node_count: usize,
) -> Result<()> {
    if node_count > MAX_GENERATED_NODES {
        return Err(GraphError::invalid(
            topology,
            parameter,
            format!("would create {node_count} nodes; the limit is {MAX_GENERATED_NODES}"),
        ));
    }
    Ok(())
}

/// Rejects closed-form edge counts above [`MAX_GENERATED_EDGES`].
pub(super) fn require_edge_limit(
    topology: Topology,
    parameter: &'static str,
    edge_count: usize,
) -> Result<()> {
    if edge_count > MAX_GENERATED_EDGES {
        return Err(GraphError::invalid(
            topology,
            parameter,
            format!("would create {edge_count} edges; the limit is {MAX_GENERATED_EDGES}"),
        ));
    }
    Ok(())
}

/// Rejects expected edge counts of randomised families above
/// [`MAX_GENERATED_EDGES`].
pub(super) fn require_expected_edge_limit(
    topology: Topology,
    parameter: &'static str,
    expected: f64,
) -> Result<()> {
    if expected > MAX_GENERATED_EDGES as f64 {
        return Err(GraphError::invalid(
            topology,
            parameter,
            format!("would create about {expected:.0} edges; the limit is {MAX_GENERATED_EDGES}"),
        ));
    }
    Ok(())
}

/// Number of unordered pairs among `node_count` nodes.
pub(super) fn pair_count(node_count: usize) -> usize {
    node_count.saturating_mul(node_count.saturating_sub(1)) / 2
}

/// Rejects values outside the closed unit interval, including NaN.
pub(super) fn require_unit_interval(
    topology: Topology,
    parameter: &'static str,
    value: f64,
) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    Err(GraphError::invalid(
        topology,
        parameter,
        format!("must lie within [0, 1] (got {value})"),
    ))
}

/// Appends `count` nodes at uniformly random canvas positions.
pub(super) fn add_random_nodes<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    count: usize,
) -> Vec<NodeId> {
    (0..count)
        .map(|_| store.add_node(rng.next_position()).id())
        .collect()
}

/// Appends one node at a uniformly random canvas position.
pub(super) fn add_random_node<R: RandomSource>(store: &mut GraphStore, rng: &mut R) -> NodeId {
    store.add_node(rng.next_position()).id()
}

/// Appends one node at an explicit position.
pub(super) fn add_node_at(store: &mut GraphStore, position: Position) -> NodeId {
    store.add_node(position).id()
}

pub(super) fn connect(store: &mut GraphStore, source: NodeId, target: NodeId) -> Result<()> {
    store.add_edge(source, target).map(|_| ())
}

/// Joins consecutive nodes: `n0 - n1 - ... - nk`.
pub(super) fn connect_path(store: &mut GraphStore, nodes: &[NodeId]) -> Result<()> {
    for pair in nodes.windows(2) {
        connect(store, pair[0], pair[1])?;
    }
    Ok(())
}

/// Joins `node[i]` to `node[(i + 1) mod len]` for every `i`.
pub(super) fn connect_cycle(store: &mut GraphStore, nodes: &[NodeId]) -> Result<()> {
    for (index, &node) in nodes.iter().enumerate() {
        let next = nodes[(index + 1) % nodes.len()];
        connect(store, node, next)?;
    }
    Ok(())
}

/// Joins every unordered pair once, in lexicographic index order.
pub(super) fn connect_clique(store: &mut GraphStore, nodes: &[NodeId]) -> Result<()> {
    for (offset, &left) in nodes.iter().enumerate() {
        for &right in &nodes[offset + 1..] {
            connect(store, left, right)?;
        }
    }
    Ok(())
}

/// Joins `nodes[a]` to `nodes[b]` for every `(a, b)` in `pairs`.
pub(super) fn connect_indexed(
    store: &mut GraphStore,
    nodes: &[NodeId],
    pairs: &[(usize, usize)],
) -> Result<()> {
    for &(a, b) in pairs {
        connect(store, nodes[a], nodes[b])?;
    }
    Ok(())
}

/// Orders an index pair so that `(a, b)` and `(b, a)` share one key.
pub(super) fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Picks an index with probability proportional to its weight.
///
/// Non-positive weights are never chosen. Returns `None` when no weight is
/// positive.
pub(super) fn weighted_choice<R: RandomSource>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let threshold = rng.next_float() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(index);
        if cumulative > threshold {
            return Some(index);
        }
    }
    // Rounding can leave `cumulative` a hair under `threshold`.
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::scripted::ScriptedSource;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Some(1))]
    #[case(0.3, Some(1))]
    #[case(0.5, Some(3))]
    #[case(0.999, Some(3))]
    fn weighted_choice_skips_zero_weights(#[case] draw: f64, #[case] expected: Option<usize>) {
        let mut rng = ScriptedSource::new(vec![draw]);
        assert_eq!(weighted_choice(&mut rng, &[0.0, 1.0, 0.0, 1.0]), expected);
    }

    #[rstest]
    fn weighted_choice_without_candidates() {
        let mut rng = ScriptedSource::new(vec![0.5]);
        assert_eq!(weighted_choice(&mut rng, &[0.0, -1.0]), None);
        assert_eq!(weighted_choice(&mut rng, &[]), None);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(-0.1)]
    #[case(1.5)]
    fn unit_interval_rejects_out_of_range(#[case] value: f64) {
        let err = require_unit_interval(Topology::ErdosRenyiGraph, "probability", value)
            .expect_err("value must be rejected");
        assert!(matches!(
            err,
            GraphError::InvalidParameter {
                parameter: "probability",
                ..
            }
        ));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(4, 6)]
    #[case(2_897, 4_194_856)]
    fn pair_count_matches_closed_form(#[case] nodes: usize, #[case] pairs: usize) {
        assert_eq!(pair_count(nodes), pairs);
    }

    #[rstest]
    fn edge_limits_are_enforced() {
        let topology = Topology::CompleteGraph;
        assert!(require_edge_limit(topology, "nodeCount", MAX_GENERATED_EDGES).is_ok());
        let err = require_edge_limit(topology, "nodeCount", MAX_GENERATED_EDGES + 1)
            .expect_err("one edge over the limit must be rejected");
        assert!(matches!(
            err,
            GraphError::InvalidParameter {
                parameter: "nodeCount",
                ..
            }
        ));
        let random = Topology::ErdosRenyiGraph;
        assert!(require_expected_edge_limit(random, "probability", 1.0e7).is_err());
        assert!(require_expected_edge_limit(random, "probability", 10.0).is_ok());
    }

    #[rstest]
    fn node_count_limits_are_enforced() {
        assert!(require_node_count(Topology::PathGraph, 1, 1).is_ok());
        assert!(require_node_count(Topology::PathGraph, 0, 1).is_err());
        assert!(require_node_count(Topology::PathGraph, MAX_GENERATED_NODES + 1, 1).is_err());
    }
}
