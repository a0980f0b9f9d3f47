//! Command implementations and argument parsing for the topograph CLI.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use topograph_core::{
    ExportFormat, GenerationRequest, GraphError, GraphStats, GraphStore, Topology,
    TopologyParams, csv_data_uri, degree_histogram, generate,
};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "topograph",
    about = "Generate canonical network topologies and export them as CSV."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build one topology and print or save it.
    Generate(GenerateCommand),
    /// List the topology identifiers accepted by `generate`.
    Topologies,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Topology identifier, for example `watts_strogatz_graph`.
    #[arg(value_parser = parse_topology)]
    pub topology: Topology,

    /// Individual parameter overrides.
    #[command(flatten)]
    pub overrides: ParamOverrides,

    /// Base parameter bag as inline JSON, e.g. `{"nodeCount": 20}`.
    #[arg(long = "params", conflicts_with = "params_file")]
    pub params: Option<String>,

    /// Base parameter bag read from a JSON file.
    #[arg(long = "params-file")]
    pub params_file: Option<PathBuf>,

    /// Seed for reproducible generation; drawn from entropy when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// What to print or write.
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Write the output to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Wrap CSV output in a `data:text/csv` URI.
    #[arg(long = "data-uri")]
    pub data_uri: bool,
}

/// Per-key overrides applied on top of the base parameter bag.
#[derive(Debug, Args, Clone, Default)]
pub struct ParamOverrides {
    /// Number of nodes.
    #[arg(long = "nodes", alias = "node-count")]
    pub node_count: Option<usize>,
    /// Grid rows.
    #[arg(long)]
    pub rows: Option<usize>,
    /// Grid columns.
    #[arg(long)]
    pub cols: Option<usize>,
    /// Erdős–Rényi edge probability.
    #[arg(long)]
    pub probability: Option<f64>,
    /// Edges each Barabási–Albert node attaches.
    #[arg(long)]
    pub edges_to_attach: Option<usize>,
    /// Watts–Strogatz ring neighbourhood size.
    #[arg(long)]
    pub nearest_neighbors: Option<usize>,
    /// Watts–Strogatz rewiring probability.
    #[arg(long)]
    pub rewiring_probability: Option<f64>,
    /// Random regular graph degree.
    #[arg(long)]
    pub degree: Option<usize>,
    /// Balanced tree branching factor.
    #[arg(long)]
    pub branching_factor: Option<usize>,
    /// Balanced tree height.
    #[arg(long)]
    pub height: Option<usize>,
    /// Hypercube dimensions.
    #[arg(long)]
    pub dimensions: Option<usize>,
    /// Random geometric connection radius as a fraction of the canvas.
    #[arg(long)]
    pub radius: Option<f64>,
    /// Power-law tree degree exponent.
    #[arg(long)]
    pub exponent: Option<f64>,
}

impl ParamOverrides {
    /// Applies every present override to `base`.
    #[must_use]
    pub fn apply(&self, base: TopologyParams) -> TopologyParams {
        let mut params = base;
        if let Some(value) = self.node_count {
            params = params.with_node_count(value);
        }
        if let Some(value) = self.rows {
            params = params.with_rows(value);
        }
        if let Some(value) = self.cols {
            params = params.with_cols(value);
        }
        if let Some(value) = self.probability {
            params = params.with_probability(value);
        }
        if let Some(value) = self.edges_to_attach {
            params = params.with_edges_to_attach(value);
        }
        if let Some(value) = self.nearest_neighbors {
            params = params.with_nearest_neighbors(value);
        }
        if let Some(value) = self.rewiring_probability {
            params = params.with_rewiring_probability(value);
        }
        if let Some(value) = self.degree {
            params = params.with_degree(value);
        }
        if let Some(value) = self.branching_factor {
            params = params.with_branching_factor(value);
        }
        if let Some(value) = self.height {
            params = params.with_height(value);
        }
        if let Some(value) = self.dimensions {
            params = params.with_dimensions(value);
        }
        if let Some(value) = self.radius {
            params = params.with_radius(value);
        }
        if let Some(value) = self.exponent {
            params = params.with_exponent(value);
        }
        params
    }
}

/// Output selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Node, edge, degree and component counts.
    Summary,
    /// `Node,Connected Nodes` CSV.
    AdjacencyList,
    /// Adjacency matrix CSV.
    AdjacencyMatrix,
    /// `degree,count` CSV of the degree distribution.
    Histogram,
}

impl OutputFormat {
    fn export(self) -> Option<ExportFormat> {
        match self {
            Self::AdjacencyList => Some(ExportFormat::AdjacencyList),
            Self::AdjacencyMatrix => Some(ExportFormat::AdjacencyMatrix),
            Self::Summary | Self::Histogram => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::AdjacencyList => "adjacency-list",
            Self::AdjacencyMatrix => "adjacency-matrix",
            Self::Histogram => "histogram",
        }
    }
}

fn parse_topology(raw: &str) -> Result<Topology, GraphError> {
    raw.parse()
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading parameters or writing output.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The JSON parameter bag could not be parsed.
    #[error("invalid parameter bag: {0}")]
    Params(#[from] serde_json::Error),
    /// `--data-uri` was combined with a non-CSV format.
    #[error("--data-uri only applies to CSV formats, not `{format}`")]
    DataUriRequiresCsv {
        /// Format that was requested.
        format: &'static str,
    },
    /// Graph generation failed.
    #[error(transparent)]
    Core(#[from] GraphError),
}

/// Result of a `generate` run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Topology that was built.
    pub topology: Topology,
    /// Seed the random source was created from.
    pub seed: u64,
    /// Shape of the generated graph.
    pub stats: GraphStats,
    /// Degree distribution of the generated graph.
    pub histogram: BTreeMap<usize, usize>,
    /// Selected output.
    pub format: OutputFormat,
    /// Rendered CSV or data URI, present for the CSV formats.
    pub body: Option<String>,
    /// File the output was written to, if any.
    pub written_to: Option<PathBuf>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// A graph was generated.
    Generated(GenerationReport),
    /// The known topology identifiers.
    Topologies(&'static [Topology]),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when parameters are malformed, generation fails or
/// output cannot be written.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use topograph_cli::cli::{Cli, ExecutionSummary, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli::try_parse_from([
///     "topograph", "generate", "complete_graph", "--nodes", "4", "--seed", "7",
/// ])?;
/// let ExecutionSummary::Generated(report) = run_cli(cli)? else {
///     return Err("generate must report a graph".into());
/// };
/// assert_eq!(report.stats.edge_count, 6);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(command) => {
            Span::current().record("command", field::display("generate"));
            run_generate(command).map(ExecutionSummary::Generated)
        }
        Command::Topologies => {
            Span::current().record("command", field::display("topologies"));
            Ok(ExecutionSummary::Topologies(Topology::ALL))
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(topology = %command.topology, seed = field::Empty, format = command.format.label()),
)]
fn run_generate(command: GenerateCommand) -> Result<GenerationReport, CliError> {
    let export = command.format.export();
    if command.data_uri && export.is_none() {
        return Err(CliError::DataUriRequiresCsv {
            format: command.format.label(),
        });
    }

    let params = resolve_params(&command)?;
    let seed = command.seed.unwrap_or_else(rand::random);
    Span::current().record("seed", seed);

    let mut store = GraphStore::new();
    let mut rng = SmallRng::seed_from_u64(seed);
    generate(
        &mut store,
        &mut rng,
        &GenerationRequest::new(command.topology, params),
    )?;

    let body = export.map(|format| {
        let csv = format.render(&store);
        if command.data_uri { csv_data_uri(&csv) } else { csv }
    });
    let report = GenerationReport {
        topology: command.topology,
        seed,
        stats: GraphStats::of(&store),
        histogram: degree_histogram(&store),
        format: command.format,
        body,
        written_to: None,
    };

    let Some(path) = command.output else {
        return Ok(report);
    };
    let mut contents = Vec::new();
    render_graph_output(&report, &mut contents).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    write_output(&path, &contents)?;
    info!(path = %path.display(), bytes = contents.len(), "output written");
    Ok(GenerationReport {
        written_to: Some(path),
        ..report
    })
}

pub(super) fn resolve_params(command: &GenerateCommand) -> Result<TopologyParams, CliError> {
    let base = match (&command.params, &command.params_file) {
        (Some(raw), _) => serde_json::from_str(raw)?,
        (None, Some(path)) => {
            let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw)?
        }
        (None, None) => TopologyParams::default(),
    };
    Ok(command.overrides.apply(base))
}

#[instrument(name = "cli.write_output", err, skip(contents), fields(path = %path.display()))]
fn write_output(path: &Path, contents: &[u8]) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders `summary` to `writer`.
///
/// Generated graphs print their selected output, or a one-line note when
/// the output went to a file.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Topologies(topologies) => {
            for topology in *topologies {
                writeln!(writer, "{topology}")?;
            }
            Ok(())
        }
        ExecutionSummary::Generated(report) => match &report.written_to {
            Some(path) => writeln!(
                writer,
                "wrote {} of {} ({} nodes, {} edges) to {}",
                report.format.label(),
                report.topology,
                report.stats.node_count,
                report.stats.edge_count,
                path.display()
            ),
            None => {
                render_graph_output(report, &mut writer)?;
                // A data URI has no line break of its own; end the terminal line.
                match &report.body {
                    Some(body) if !body.ends_with('\n') => writeln!(writer),
                    _ => Ok(()),
                }
            }
        },
    }
}

/// Writes the selected output exactly as it should land in a file.
fn render_graph_output(report: &GenerationReport, mut writer: impl Write) -> io::Result<()> {
    if let Some(body) = &report.body {
        return writer.write_all(body.as_bytes());
    }
    match report.format {
        OutputFormat::Histogram => {
            writeln!(writer, "degree,count")?;
            for (degree, count) in &report.histogram {
                writeln!(writer, "{degree},{count}")?;
            }
        }
        _ => {
            let stats = &report.stats;
            writeln!(writer, "topology: {}", report.topology)?;
            writeln!(writer, "seed: {}", report.seed)?;
            writeln!(writer, "nodes: {}", stats.node_count)?;
            writeln!(writer, "edges: {}", stats.edge_count)?;
            writeln!(
                writer,
                "degree: min {} / mean {:.2} / max {}",
                stats.min_degree, stats.mean_degree, stats.max_degree
            )?;
            writeln!(writer, "components: {}", stats.components)?;
        }
    }
    Ok(())
}
