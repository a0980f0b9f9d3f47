//! Degree and connectivity analysis over a [`GraphStore`].
//!
//! Everything here is computed directly from the store on each call, so a
//! result always reflects the graph as it is at that moment.
//!
//! A node's degree is the number of edge endpoints that refer to it: every
//! incident edge contributes one, except a self-loop, which contributes two.
//! The degrees of all nodes therefore always sum to twice the edge count.

mod union_find;

use std::collections::{BTreeMap, HashMap};

use tracing::{Span, field, instrument};

use crate::{
    Result,
    error::GraphError,
    store::{GraphStore, NodeId},
};

use self::union_find::DisjointSet;

/// Degree of every node, in storage order.
#[must_use]
pub fn degrees(store: &GraphStore) -> Vec<(NodeId, usize)> {
    let mut counts: HashMap<NodeId, usize> = HashMap::with_capacity(store.node_count());
    for edge in store.edges() {
        *counts.entry(edge.source()).or_default() += 1;
        *counts.entry(edge.target()).or_default() += 1;
    }
    store
        .nodes()
        .iter()
        .map(|node| (node.id(), counts.get(&node.id()).copied().unwrap_or(0)))
        .collect()
}

/// Degree of a single node.
///
/// # Errors
/// Returns [`GraphError::UnknownNode`] when `id` is not in the store.
pub fn degree_of(store: &GraphStore, id: NodeId) -> Result<usize> {
    if !store.contains_node(id) {
        return Err(GraphError::UnknownNode { id });
    }
    Ok(store
        .edges()
        .iter()
        .map(|edge| usize::from(edge.source() == id) + usize::from(edge.target() == id))
        .sum())
}

/// Maps each degree present in the graph to the number of nodes with it.
///
/// Degrees with no nodes are absent. The counts always sum to the node
/// count, and the map iterates in ascending degree order.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topograph_core::{GraphStore, degree_histogram, star_graph};
///
/// let mut store = GraphStore::new();
/// star_graph(&mut store, &mut SmallRng::seed_from_u64(0), 5)?;
/// let histogram = degree_histogram(&store);
/// assert_eq!(histogram.get(&4), Some(&1));
/// assert_eq!(histogram.get(&1), Some(&4));
/// assert_eq!(histogram.len(), 2);
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
#[instrument(
    name = "core.histogram",
    skip(store),
    fields(nodes = store.node_count(), buckets = field::Empty),
)]
#[must_use]
pub fn degree_histogram(store: &GraphStore) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    for (_, degree) in degrees(store) {
        *histogram.entry(degree).or_insert(0) += 1;
    }
    Span::current().record("buckets", histogram.len());
    histogram
}

/// Number of connected components; isolated nodes count as their own
/// component and the empty graph has none.
#[must_use]
pub fn component_count(store: &GraphStore) -> usize {
    let mut set = DisjointSet::new(store.node_count());
    for edge in store.edges() {
        if let (Some(a), Some(b)) = (store.slot_of(edge.source()), store.slot_of(edge.target())) {
            set.union(a, b);
        }
    }
    set.components()
}

/// Summary statistics for a graph snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Smallest degree, or 0 for an empty graph.
    pub min_degree: usize,
    /// Largest degree, or 0 for an empty graph.
    pub max_degree: usize,
    /// Mean degree, or 0 for an empty graph.
    pub mean_degree: f64,
    /// Number of connected components.
    pub components: usize,
}

impl GraphStats {
    /// Computes the statistics for the current contents of `store`.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use topograph_core::{GraphStats, GraphStore, cycle_graph};
    ///
    /// let mut store = GraphStore::new();
    /// cycle_graph(&mut store, &mut SmallRng::seed_from_u64(0), 6)?;
    /// let stats = GraphStats::of(&store);
    /// assert_eq!((stats.min_degree, stats.max_degree), (2, 2));
    /// assert_eq!(stats.mean_degree, 2.0);
    /// assert_eq!(stats.components, 1);
    /// # Ok::<(), topograph_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn of(store: &GraphStore) -> Self {
        let values: Vec<usize> = degrees(store).into_iter().map(|(_, d)| d).collect();
        let mean_degree = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<usize>() as f64 / values.len() as f64
        };
        Self {
            node_count: store.node_count(),
            edge_count: store.edge_count(),
            min_degree: values.iter().copied().min().unwrap_or(0),
            max_degree: values.iter().copied().max().unwrap_or(0),
            mean_degree,
            components: component_count(store),
        }
    }
}
