//! Interactive editing on top of a [`GraphStore`].
//!
//! [`EditSession`] owns the store together with the pending node selection
//! used by click-to-connect editing: the first click on a node arms the
//! selection, a click on a different node creates the edge and clears it.

use tracing::{debug, instrument};

use crate::{
    Result,
    error::GraphError,
    random::RandomSource,
    store::{Edge, EdgeId, GraphStore, NodeId, Position},
    topology::{GenerationRequest, GenerationSummary, generate},
};

/// Outcome of [`EditSession::click_select_node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The node is now the pending first endpoint.
    Pending(NodeId),
    /// The pending node was clicked again; nothing changed and it stays
    /// pending.
    Ignored(NodeId),
    /// A second, distinct node completed the selection.
    EdgeCreated(Edge),
}

/// A graph under interactive construction.
///
/// # Examples
/// ```
/// use topograph_core::{EditSession, Position, Selection};
///
/// let mut session = EditSession::new();
/// let a = session.click_add_node(Position::new(10.0, 10.0));
/// let b = session.click_add_node(Position::new(90.0, 40.0));
///
/// assert_eq!(session.click_select_node(a)?, Selection::Pending(a));
/// let Selection::EdgeCreated(edge) = session.click_select_node(b)? else {
///     panic!("second distinct click must connect");
/// };
/// assert_eq!((edge.source(), edge.target()), (a, b));
/// assert_eq!(session.pending(), None);
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    store: GraphStore,
    pending: Option<NodeId>,
}

impl EditSession {
    /// Starts a session over an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session over an existing graph.
    #[must_use]
    pub fn with_store(store: GraphStore) -> Self {
        Self {
            store,
            pending: None,
        }
    }

    /// Read access for renderers and analysis.
    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Ends the session, handing back the graph.
    #[must_use]
    pub fn into_store(self) -> GraphStore {
        self.store
    }

    /// Node currently waiting for a second click, if any.
    #[must_use]
    pub fn pending(&self) -> Option<NodeId> {
        self.pending
    }

    /// Adds a node at `position`. Always succeeds.
    pub fn click_add_node(&mut self, position: Position) -> NodeId {
        self.store.add_node(position).id()
    }

    /// Feeds a node click into the two-click edge selection.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when `id` is not in the graph; the
    /// pending selection is left as it was.
    #[instrument(name = "core.select_node", err, skip(self), fields(node = %id))]
    pub fn click_select_node(&mut self, id: NodeId) -> Result<Selection> {
        if !self.store.contains_node(id) {
            return Err(GraphError::UnknownNode { id });
        }
        match self.pending {
            None => {
                self.pending = Some(id);
                Ok(Selection::Pending(id))
            }
            Some(first) if first == id => {
                debug!(node = %id, "repeat click on pending node ignored");
                Ok(Selection::Ignored(id))
            }
            Some(first) => {
                let edge = self.store.add_edge(first, id)?;
                self.pending = None;
                Ok(Selection::EdgeCreated(edge))
            }
        }
    }

    /// Drops the pending selection without creating an edge.
    pub fn cancel_selection(&mut self) {
        self.pending = None;
    }

    /// Removes a node and its incident edges. Unknown ids are a no-op.
    ///
    /// Removing the pending node clears the pending selection.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let removed = self.store.remove_node(id);
        if removed && self.pending == Some(id) {
            self.pending = None;
        }
        removed
    }

    /// Removes an edge. Unknown ids are a no-op.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        self.store.remove_edge(id)
    }

    /// Replaces the graph with a generated topology and clears the pending
    /// selection. A rejected request leaves graph and selection untouched.
    ///
    /// # Errors
    /// Propagates the errors of [`generate`].
    pub fn generate<R: RandomSource>(
        &mut self,
        rng: &mut R,
        request: &GenerationRequest,
    ) -> Result<GenerationSummary> {
        let summary = generate(&mut self.store, rng, request)?;
        self.pending = None;
        Ok(summary)
    }

    /// Empties the graph and clears the pending selection.
    pub fn clear(&mut self) {
        self.store.clear();
        self.pending = None;
    }
}
