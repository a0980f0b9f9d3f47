//! Parameter bag accepted by topology generation requests.
//!
//! Every key is optional. Absent keys fall back to the defaults below and
//! keys a topology does not use are ignored, so one bag can be reused while
//! switching between topologies.

use serde::Deserialize;

const DEFAULT_NODE_COUNT: usize = 50;
const DEFAULT_GRID_SIDE: usize = 5;
const DEFAULT_PROBABILITY: f64 = 0.5;
const DEFAULT_EDGES_TO_ATTACH: usize = 3;
const DEFAULT_NEAREST_NEIGHBORS: usize = 4;
const DEFAULT_REWIRING_PROBABILITY: f64 = 0.1;
const DEFAULT_DEGREE: usize = 3;
const DEFAULT_BRANCHING_FACTOR: usize = 2;
const DEFAULT_HEIGHT: usize = 3;
const DEFAULT_DIMENSIONS: usize = 3;
const DEFAULT_RADIUS: f64 = 0.5;
const DEFAULT_EXPONENT: f64 = 2.5;

/// Numeric and probabilistic parameters for a generation request.
///
/// Deserialises from a JSON object with camelCase keys; unknown keys are
/// ignored.
///
/// # Examples
/// ```
/// use topograph_core::TopologyParams;
///
/// let params = TopologyParams::new().with_node_count(12).with_probability(0.2);
/// assert_eq!(params.node_count(), 12);
/// assert_eq!(params.probability(), 0.2);
/// assert_eq!(params.rows(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopologyParams {
    node_count: usize,
    rows: usize,
    cols: usize,
    probability: f64,
    edges_to_attach: usize,
    nearest_neighbors: usize,
    rewiring_probability: f64,
    degree: usize,
    branching_factor: usize,
    height: usize,
    dimensions: usize,
    radius: f64,
    exponent: f64,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            rows: DEFAULT_GRID_SIDE,
            cols: DEFAULT_GRID_SIDE,
            probability: DEFAULT_PROBABILITY,
            edges_to_attach: DEFAULT_EDGES_TO_ATTACH,
            nearest_neighbors: DEFAULT_NEAREST_NEIGHBORS,
            rewiring_probability: DEFAULT_REWIRING_PROBABILITY,
            degree: DEFAULT_DEGREE,
            branching_factor: DEFAULT_BRANCHING_FACTOR,
            height: DEFAULT_HEIGHT,
            dimensions: DEFAULT_DIMENSIONS,
            radius: DEFAULT_RADIUS,
            exponent: DEFAULT_EXPONENT,
        }
    }
}

impl TopologyParams {
    /// Creates a bag populated with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the node count used by most topologies.
    #[must_use]
    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Overrides the grid row count.
    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Returns the grid row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Overrides the grid column count.
    #[must_use]
    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = cols;
        self
    }

    /// Returns the grid column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Overrides the Erdős–Rényi edge probability.
    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Returns the Erdős–Rényi edge probability.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Overrides the number of edges each Barabási–Albert node attaches.
    #[must_use]
    pub fn with_edges_to_attach(mut self, edges_to_attach: usize) -> Self {
        self.edges_to_attach = edges_to_attach;
        self
    }

    /// Returns the number of edges each Barabási–Albert node attaches.
    #[must_use]
    pub fn edges_to_attach(&self) -> usize {
        self.edges_to_attach
    }

    /// Overrides the Watts–Strogatz ring neighbourhood size `k`.
    #[must_use]
    pub fn with_nearest_neighbors(mut self, nearest_neighbors: usize) -> Self {
        self.nearest_neighbors = nearest_neighbors;
        self
    }

    /// Returns the Watts–Strogatz ring neighbourhood size `k`.
    #[must_use]
    pub fn nearest_neighbors(&self) -> usize {
        self.nearest_neighbors
    }

    /// Overrides the Watts–Strogatz rewiring probability `β`.
    #[must_use]
    pub fn with_rewiring_probability(mut self, rewiring_probability: f64) -> Self {
        self.rewiring_probability = rewiring_probability;
        self
    }

    /// Returns the Watts–Strogatz rewiring probability `β`.
    #[must_use]
    pub fn rewiring_probability(&self) -> f64 {
        self.rewiring_probability
    }

    /// Overrides the random regular graph degree.
    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Returns the random regular graph degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Overrides the balanced tree branching factor.
    #[must_use]
    pub fn with_branching_factor(mut self, branching_factor: usize) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    /// Returns the balanced tree branching factor.
    #[must_use]
    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }

    /// Overrides the balanced tree height.
    #[must_use]
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Returns the balanced tree height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Overrides the hypercube dimension count.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Returns the hypercube dimension count.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Overrides the random geometric connection radius, as a fraction of
    /// the canvas side.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Returns the random geometric connection radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Overrides the power-law tree degree exponent `γ`.
    #[must_use]
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    /// Returns the power-law tree degree exponent `γ`.
    #[must_use]
    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}
