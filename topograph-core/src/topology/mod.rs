//! Topology generators and the generation request entry point.
//!
//! Each generator appends one named graph family to a [`GraphStore`] that is
//! assumed to be empty. Node identifiers follow construction order starting
//! at 1, including across composed constructions such as the lollipop
//! (clique then path) or the wheel (cycle then hub). [`generate`] validates a
//! request, builds the graph into a scratch store and swaps it in only when
//! construction succeeds, so a rejected request never leaves a partial graph
//! behind.

mod builders;
mod classic;
mod named;
mod params;
mod stochastic;


use std::{fmt, str::FromStr};

use tracing::{Span, field, info, instrument};

use crate::{Result, error::GraphError, random::RandomSource, store::GraphStore};

pub use self::{
    builders::{MAX_GENERATED_EDGES, MAX_GENERATED_NODES},
    classic::{
        MAX_HYPERCUBE_DIMENSIONS, balanced_tree, circular_ladder_graph, clique_graph,
        complete_graph, cycle_graph, grid_graph, hypercube_graph, ladder_graph, lollipop_graph,
        path_graph, star_graph, wheel_graph,
    },
    named::{
        MAX_DGM_GENERATION, dgm_generation_for, dorogovtsev_goltsev_mendes_graph,
        krackhardt_kite_graph, petersen_graph,
    },
    params::TopologyParams,
    stochastic::{
        MAX_REGULAR_ATTEMPTS, barabasi_albert_graph, erdos_renyi_graph, power_law_tree,
        random_geometric_graph, random_regular_graph, watts_strogatz_graph,
    },
};

macro_rules! define_topologies {
    (
        $(
            $(#[$variant_meta:meta])*
            $Variant:ident => $name:literal
        ),+ $(,)?
    ) => {
        /// Named graph families the generator engine can build.
        ///
        /// # Examples
        /// ```
        /// use topograph_core::Topology;
        ///
        /// let topology: Topology = "watts_strogatz_graph".parse()?;
        /// assert_eq!(topology, Topology::WattsStrogatzGraph);
        /// assert_eq!(topology.to_string(), "watts_strogatz_graph");
        /// # Ok::<(), topograph_core::GraphError>(())
        /// ```
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Topology {
            $(
                $(#[$variant_meta])*
                $Variant,
            )+
        }

        impl Topology {
            /// Every topology, in presentation order.
            pub const ALL: &'static [Self] = &[$(Self::$Variant,)+];

            /// Stable snake_case identifier used by generation requests.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$Variant => $name,)+
                }
            }
        }

        impl FromStr for Topology {
            type Err = GraphError;

            fn from_str(raw: &str) -> Result<Self> {
                match raw.trim() {
                    $($name => Ok(Self::$Variant),)+
                    other => Err(GraphError::UnknownTopology {
                        name: other.to_owned(),
                    }),
                }
            }
        }
    };
}

define_topologies! {
    /// Edge between every pair of nodes.
    CompleteGraph => "complete_graph",
    /// Single ring through every node.
    CycleGraph => "cycle_graph",
    /// Single chain through every node.
    PathGraph => "path_graph",
    /// Hub joined to every other node.
    StarGraph => "star_graph",
    /// Cycle plus a hub joined to every cycle node.
    WheelGraph => "wheel_graph",
    /// Two parallel paths joined by rungs.
    LadderGraph => "ladder_graph",
    /// Alias of the complete graph.
    CliqueGraph => "clique_graph",
    /// Ladder whose rails are closed into cycles.
    CircularLadderGraph => "circular_ladder_graph",
    /// Fixed 10-node Krackhardt kite.
    KrackhardtKiteGraph => "krackhardt_kite_graph",
    /// Clique fused to a path.
    LollipopGraph => "lollipop_graph",
    /// Fixed 10-node Petersen graph.
    PetersenGraph => "petersen_graph",
    /// Rectangular lattice.
    GridGraph => "grid_graph",
    /// Independent edges with fixed probability.
    ErdosRenyiGraph => "erdos_renyi_graph",
    /// Preferential attachment growth.
    BarabasiAlbertGraph => "barabasi_albert_graph",
    /// Rewired ring lattice.
    WattsStrogatzGraph => "watts_strogatz_graph",
    /// Uniform degree graph.
    RandomRegularGraph => "random_regular_graph",
    /// Complete tree of fixed branching factor and height.
    BalancedTree => "balanced_tree",
    /// Nodes labelled by bit strings, joined at Hamming distance one.
    HypercubeGraph => "hypercube_graph",
    /// Nodes joined when placed within a radius of each other.
    RandomGeometricGraph => "random_geometric_graph",
    /// Recursive Dorogovtsev–Goltsev–Mendes fractal.
    DorogovtsevGoltsevMendesGraph => "dorogovtsev_goltsev_mendes_graph",
    /// Tree grown with power-law attachment.
    PowerLawTree => "power_law_tree",
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A topology selection together with its parameter bag.
///
/// # Examples
/// ```
/// use topograph_core::{GenerationRequest, Topology, TopologyParams};
///
/// let request = GenerationRequest::new(
///     Topology::GridGraph,
///     TopologyParams::new().with_rows(3).with_cols(4),
/// );
/// assert_eq!(request.topology(), Topology::GridGraph);
/// assert_eq!(request.params().cols(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationRequest {
    topology: Topology,
    params: TopologyParams,
}

impl GenerationRequest {
    /// Pairs `topology` with `params`.
    #[must_use]
    pub const fn new(topology: Topology, params: TopologyParams) -> Self {
        Self { topology, params }
    }

    /// Returns the requested topology.
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Returns the parameter bag.
    #[must_use]
    pub const fn params(&self) -> &TopologyParams {
        &self.params
    }
}

/// Outcome of a successful [`generate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Topology that was built.
    pub topology: Topology,
    /// Number of nodes in the new graph.
    pub node_count: usize,
    /// Number of edges in the new graph.
    pub edge_count: usize,
}

/// Replaces the contents of `store` with the topology described by
/// `request`.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when the parameters are out of
/// range for the requested topology and
/// [`GraphError::ConstructionExhausted`] when a rejection-based construction
/// gives up. `store` is untouched on error.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topograph_core::{GenerationRequest, GraphStore, Topology, TopologyParams, generate};
///
/// let mut store = GraphStore::new();
/// let mut rng = SmallRng::seed_from_u64(1);
/// let request = GenerationRequest::new(
///     Topology::CompleteGraph,
///     TopologyParams::new().with_node_count(4),
/// );
/// let summary = generate(&mut store, &mut rng, &request)?;
/// assert_eq!(summary.node_count, 4);
/// assert_eq!(summary.edge_count, 6);
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
#[instrument(
    name = "core.generate",
    err,
    skip(store, rng, request),
    fields(topology = %request.topology(), nodes = field::Empty, edges = field::Empty),
)]
pub fn generate<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    request: &GenerationRequest,
) -> Result<GenerationSummary> {
    let mut scratch = GraphStore::new();
    build(&mut scratch, rng, request)?;

    let summary = GenerationSummary {
        topology: request.topology(),
        node_count: scratch.node_count(),
        edge_count: scratch.edge_count(),
    };
    store.replace_with(scratch);

    let span = Span::current();
    span.record("nodes", summary.node_count);
    span.record("edges", summary.edge_count);
    info!(
        topology = %summary.topology,
        nodes = summary.node_count,
        edges = summary.edge_count,
        revision = store.revision(),
        "graph generated"
    );
    Ok(summary)
}

fn build<R: RandomSource>(
    store: &mut GraphStore,
    rng: &mut R,
    request: &GenerationRequest,
) -> Result<()> {
    let params = request.params();
    let nodes = params.node_count();
    match request.topology() {
        Topology::CompleteGraph => complete_graph(store, rng, nodes),
        Topology::CycleGraph => cycle_graph(store, rng, nodes),
        Topology::PathGraph => path_graph(store, rng, nodes),
        Topology::StarGraph => star_graph(store, rng, nodes),
        Topology::WheelGraph => wheel_graph(store, rng, nodes),
        Topology::LadderGraph => ladder_graph(store, rng, nodes),
        Topology::CliqueGraph => clique_graph(store, rng, nodes),
        Topology::CircularLadderGraph => circular_ladder_graph(store, rng, nodes),
        Topology::KrackhardtKiteGraph => krackhardt_kite_graph(store, rng),
        Topology::LollipopGraph => lollipop_graph(store, rng, nodes),
        Topology::PetersenGraph => petersen_graph(store, rng),
        Topology::GridGraph => grid_graph(store, rng, params.rows(), params.cols()),
        Topology::ErdosRenyiGraph => erdos_renyi_graph(store, rng, nodes, params.probability()),
        Topology::BarabasiAlbertGraph => {
            barabasi_albert_graph(store, rng, nodes, params.edges_to_attach())
        }
        Topology::WattsStrogatzGraph => watts_strogatz_graph(
            store,
            rng,
            nodes,
            params.nearest_neighbors(),
            params.rewiring_probability(),
        ),
        Topology::RandomRegularGraph => random_regular_graph(store, rng, nodes, params.degree()),
        Topology::BalancedTree => {
            balanced_tree(store, rng, params.branching_factor(), params.height())
        }
        Topology::HypercubeGraph => hypercube_graph(store, rng, params.dimensions()),
        Topology::RandomGeometricGraph => {
            random_geometric_graph(store, rng, nodes, params.radius())
        }
        Topology::DorogovtsevGoltsevMendesGraph => {
            let generation = dgm_generation_for(nodes).ok_or_else(|| {
                GraphError::invalid(
                    Topology::DorogovtsevGoltsevMendesGraph,
                    "nodeCount",
                    format!("must allow at least the 2-node first generation (got {nodes})"),
                )
            })?;
            dorogovtsev_goltsev_mendes_graph(store, rng, generation)
        }
        Topology::PowerLawTree => power_law_tree(store, rng, nodes, params.exponent()),
    }
}
