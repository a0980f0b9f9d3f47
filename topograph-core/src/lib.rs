//! Topograph core library.
//!
//! Holds the graph store, the topology generators, degree analysis, CSV
//! export and the interactive edit session. Everything is synchronous and
//! single-threaded; randomised generators draw from an injected
//! [`RandomSource`] so seeded runs are reproducible.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analysis;
mod error;
mod export;
mod random;
mod session;
mod store;
mod topology;

pub use crate::{
    analysis::{GraphStats, component_count, degree_histogram, degree_of, degrees},
    error::{GraphError, GraphErrorCode, Result},
    export::{
        CSV_DATA_URI_PREFIX, CsvLines, ExportFormat, UnknownExportFormat, adjacency_list_csv,
        adjacency_matrix_csv, csv_data_uri,
    },
    random::RandomSource,
    session::{EditSession, Selection},
    store::{CANVAS_SIZE, Edge, EdgeId, GraphStore, Node, NodeId, Position},
    topology::{
        GenerationRequest, GenerationSummary, MAX_DGM_GENERATION, MAX_GENERATED_EDGES,
        MAX_GENERATED_NODES, MAX_HYPERCUBE_DIMENSIONS, MAX_REGULAR_ATTEMPTS, Topology,
        TopologyParams, balanced_tree, barabasi_albert_graph, circular_ladder_graph, clique_graph,
        complete_graph, cycle_graph, dgm_generation_for, dorogovtsev_goltsev_mendes_graph, erdos_renyi_graph, generate,
        grid_graph, hypercube_graph, krackhardt_kite_graph, ladder_graph, lollipop_graph,
        path_graph, petersen_graph, power_law_tree, random_geometric_graph, random_regular_graph,
        star_graph, watts_strogatz_graph, wheel_graph,
    },
};
