//! Canonical in-memory graph representation.
//!
//! [`GraphStore`] owns every [`Node`] and [`Edge`] record. Generators and the
//! edit session are the only writers; analysis and export read through the
//! accessors. Node and edge identifiers come from monotonic counters scoped
//! to the current graph, so an identifier is never reused until
//! [`GraphStore::clear`] starts a new graph.

use std::{collections::HashMap, fmt};

use tracing::debug;

use crate::{Result, error::GraphError};

/// Side length of the square drawing surface node positions are placed on.
pub const CANVAS_SIZE: f64 = 600.0;

/// Identifier assigned to a node, starting at 1 in construction order.
///
/// # Examples
/// ```
/// use topograph_core::NodeId;
///
/// let id = NodeId::new(4);
/// assert_eq!(id.get(), 4);
/// assert_eq!(id.to_string(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a node identifier from its raw value.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier assigned to an edge, rendered as `e<n>`.
///
/// # Examples
/// ```
/// use topograph_core::EdgeId;
///
/// let id = EdgeId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "e7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates an edge identifier from its raw value.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Placement hint for a node on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    ///
    /// # Examples
    /// ```
    /// use topograph_core::Position;
    ///
    /// let origin = Position::new(0.0, 0.0);
    /// assert_eq!(origin.distance(Position::new(3.0, 4.0)), 5.0);
    /// ```
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A vertex of the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    id: NodeId,
    position: Position,
}

impl Node {
    /// Returns the node identifier.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the placement hint.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// An undirected connection between two nodes.
///
/// `source` and `target` record construction order only; `(a, b)` and
/// `(b, a)` describe the same relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
}

impl Edge {
    /// Returns the edge identifier.
    #[must_use]
    pub const fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns the endpoint recorded first.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the endpoint recorded second.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// Reports whether `node` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// Returns the endpoint opposite `node`, or `None` when the edge does not
    /// touch it. A self-loop yields `node` itself.
    #[must_use]
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    /// Reports whether both endpoints are the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Endpoints ordered so that `(a, b)` and `(b, a)` compare equal.
    #[must_use]
    pub fn key(&self) -> (NodeId, NodeId) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

/// Owner of the node and edge sets.
///
/// # Examples
/// ```
/// use topograph_core::{GraphStore, Position};
///
/// let mut store = GraphStore::new();
/// let a = store.add_node(Position::new(10.0, 10.0)).id();
/// let b = store.add_node(Position::new(20.0, 20.0)).id();
/// let edge = store.add_edge(a, b)?;
/// assert_eq!(edge.id().to_string(), "e1");
///
/// assert!(store.remove_node(a));
/// assert_eq!(store.node_count(), 1);
/// assert_eq!(store.edge_count(), 0);
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    slots: HashMap<NodeId, usize>,
    next_node: u64,
    next_edge: u64,
    revision: u64,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            slots: HashMap::new(),
            next_node: 1,
            next_edge: 1,
            revision: 0,
        }
    }
}

impl GraphStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties both sets and resets the identifier counters.
    ///
    /// The revision keeps counting so observers still see the change.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.slots.clear();
        self.next_node = 1;
        self.next_edge = 1;
        self.touch();
    }

    /// Inserts a node at `position` under the next sequential identifier.
    pub fn add_node(&mut self, position: Position) -> Node {
        let node = Node {
            id: NodeId(self.next_node),
            position,
        };
        self.next_node += 1;
        self.slots.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        self.touch();
        node
    }

    /// Removes the node with `id` together with every incident edge.
    ///
    /// Returns `false` without mutating anything when the node is absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slots.remove(&id) else {
            return false;
        };
        self.nodes.remove(slot);
        for node in &self.nodes[slot..] {
            if let Some(entry) = self.slots.get_mut(&node.id) {
                *entry -= 1;
            }
        }
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(id));
        debug!(
            node = %id,
            removed_edges = before - self.edges.len(),
            "node removed"
        );
        self.touch();
        true
    }

    /// Inserts an edge between two existing nodes under the next edge
    /// identifier.
    ///
    /// Duplicate edges and self-loops are not rejected here; callers own that
    /// policy.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when either endpoint is absent. The
    /// store is left unchanged in that case.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<Edge> {
        for id in [source, target] {
            if !self.contains_node(id) {
                return Err(GraphError::UnknownNode { id });
            }
        }
        let edge = Edge {
            id: EdgeId(self.next_edge),
            source,
            target,
        };
        self.next_edge += 1;
        self.edges.push(edge);
        self.touch();
        Ok(edge)
    }

    /// Removes the edge with `id`. Returns `false` when it is absent.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let Some(index) = self.edges.iter().position(|edge| edge.id == id) else {
            return false;
        };
        self.edges.remove(index);
        self.touch();
        true
    }

    /// Swaps in a fully built graph as a single mutation.
    pub fn replace_with(&mut self, other: Self) {
        let revision = self.revision;
        *self = other;
        self.revision = revision;
        self.touch();
    }

    /// Nodes in storage order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up a node by identifier.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).and_then(|&slot| self.nodes.get(slot))
    }

    /// Storage index of the node with `id`.
    #[must_use]
    pub fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    /// Reports whether a node with `id` is present.
    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Looks up an edge by identifier.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Number of nodes currently stored.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges currently stored.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Reports whether the store holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Neighbours of `id` in edge-insertion order. A self-loop contributes
    /// the node once.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter_map(|edge| edge.opposite(id))
            .collect()
    }

    /// Number of edges touching `id`.
    #[must_use]
    pub fn incident_edge_count(&self, id: NodeId) -> usize {
        self.edges.iter().filter(|edge| edge.touches(id)).count()
    }

    /// Monotonic counter bumped by every structural mutation.
    ///
    /// Renderers and caches poll this to detect that the graph changed.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
