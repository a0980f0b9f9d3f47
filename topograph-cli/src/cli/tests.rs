//! Unit tests for argument parsing, generation and rendering.

use super::commands::resolve_params;
use super::test_helpers::{
    create_text_file, generate_report, parse, rendered, run_cli_expecting_error, temp_dir,
};
use super::{CliError, Command, ExecutionSummary, OutputFormat, run_cli};

use std::fs;

use clap::Parser;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use topograph_core::{
    CSV_DATA_URI_PREFIX, GenerationRequest, GraphErrorCode, GraphStore, Topology,
    TopologyParams, adjacency_list_csv, generate,
};
use topograph_test_support::tracing::capture;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case(&["generate", "complete_graph", "--nodes", "5"], 5, 10)]
#[case(&["generate", "cycle_graph", "--nodes", "8"], 8, 8)]
#[case(&["generate", "grid_graph", "--rows", "2", "--cols", "3"], 6, 7)]
#[case(&["generate", "hypercube_graph", "--dimensions", "3"], 8, 12)]
#[case(&["generate", "petersen_graph"], 10, 15)]
fn generate_builds_requested_topology(
    #[case] args: &[&str],
    #[case] nodes: usize,
    #[case] edges: usize,
) {
    let report = generate_report(args);
    assert_eq!(report.stats.node_count, nodes);
    assert_eq!(report.stats.edge_count, edges);
    assert_eq!(report.format, OutputFormat::Summary);
    assert!(report.body.is_none());
}

#[rstest]
fn unknown_topology_is_rejected_by_the_parser() {
    let parsed = super::Cli::try_parse_from(["topograph", "generate", "moebius_graph"]);
    assert!(parsed.is_err());
}

#[rstest]
fn overrides_replace_json_base_values() -> TestResult {
    let cli = parse(&[
        "generate",
        "cycle_graph",
        "--params",
        r#"{"nodeCount": 12, "probability": 0.5}"#,
        "--nodes",
        "6",
    ]);
    let Command::Generate(command) = cli.command else {
        panic!("expected the generate command");
    };
    let params = resolve_params(&command)?;
    assert_eq!(params.node_count(), 6);
    assert!((params.probability() - 0.5).abs() < f64::EPSILON);
    assert_eq!(params.rows(), TopologyParams::default().rows());
    Ok(())
}

#[rstest]
fn params_file_supplies_the_base_bag() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "params.json", r#"{"nodeCount": 9}"#)?;
    let raw_path = path.to_string_lossy().into_owned();
    let report = generate_report(&["generate", "star_graph", "--params-file", &raw_path]);
    assert_eq!(report.stats.node_count, 9);
    assert_eq!(report.stats.max_degree, 8);
    Ok(())
}

#[rstest]
fn missing_params_file_reports_path() {
    let dir = temp_dir();
    let path = dir.path().join("absent.json");
    let raw_path = path.to_string_lossy().into_owned();
    let err = run_cli_expecting_error(
        parse(&["generate", "path_graph", "--params-file", &raw_path]),
        "missing params file must fail",
    );
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case(r#"{"nodeCount": -3}"#)]
#[case(r#"{"nodeCount": "ten"}"#)]
#[case("not json")]
fn malformed_params_are_rejected(#[case] raw: &str) {
    let err = run_cli_expecting_error(
        parse(&["generate", "path_graph", "--params", raw]),
        "malformed params must fail",
    );
    assert!(matches!(err, CliError::Params(_)), "unexpected error: {err:?}");
}

#[rstest]
#[case(&["generate", "ladder_graph", "--nodes", "7"], GraphErrorCode::InvalidParameter)]
#[case(&["generate", "barabasi_albert_graph", "--nodes", "5", "--edges-to-attach", "9"], GraphErrorCode::InvalidParameter)]
#[case(&["generate", "random_regular_graph", "--nodes", "7", "--degree", "3"], GraphErrorCode::InvalidParameter)]
fn invalid_parameters_surface_core_codes(#[case] args: &[&str], #[case] code: GraphErrorCode) {
    let err = run_cli_expecting_error(parse(args), "invalid parameters must fail");
    match err {
        CliError::Core(core) => assert_eq!(core.code(), code),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case("summary")]
#[case("histogram")]
fn data_uri_requires_a_csv_format(#[case] format: &str) {
    let err = run_cli_expecting_error(
        parse(&["generate", "path_graph", "--format", format, "--data-uri"]),
        "data URI must be rejected",
    );
    match err {
        CliError::DataUriRequiresCsv { format: reported } => assert_eq!(reported, format),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn same_seed_reproduces_the_export() {
    let args = [
        "generate",
        "erdos_renyi_graph",
        "--nodes",
        "20",
        "--probability",
        "0.3",
        "--seed",
        "42",
        "--format",
        "adjacency-list",
    ];
    let first = generate_report(&args);
    let second = generate_report(&args);
    assert_eq!(first.seed, 42);
    assert_eq!(first.body, second.body);
}

#[rstest]
fn adjacency_list_matches_core_export() {
    let report = generate_report(&[
        "generate",
        "watts_strogatz_graph",
        "--nodes",
        "12",
        "--seed",
        "5",
        "--format",
        "adjacency-list",
    ]);

    let mut store = GraphStore::new();
    let mut rng = SmallRng::seed_from_u64(5);
    let request = GenerationRequest::new(
        Topology::WattsStrogatzGraph,
        TopologyParams::new().with_node_count(12),
    );
    generate(&mut store, &mut rng, &request).expect("core generation must succeed");

    assert_eq!(report.body.as_deref(), Some(adjacency_list_csv(&store).as_str()));
}

#[rstest]
fn data_uri_wraps_the_matrix() {
    let report = generate_report(&[
        "generate",
        "path_graph",
        "--nodes",
        "3",
        "--format",
        "adjacency-matrix",
        "--data-uri",
    ]);
    let body = report.body.expect("CSV formats carry a body");
    assert!(body.starts_with(CSV_DATA_URI_PREFIX));
    assert!(body.ends_with("%0A"));
}

#[rstest]
fn summary_renders_graph_shape() {
    let report = generate_report(&["generate", "path_graph", "--nodes", "3", "--seed", "11"]);
    let text = rendered(&ExecutionSummary::Generated(report));
    assert_eq!(
        text,
        "topology: path_graph\nseed: 11\nnodes: 3\nedges: 2\n\
         degree: min 1 / mean 1.33 / max 2\ncomponents: 1\n"
    );
}

#[rstest]
fn histogram_renders_degree_counts() {
    let report = generate_report(&[
        "generate",
        "star_graph",
        "--nodes",
        "4",
        "--format",
        "histogram",
    ]);
    let text = rendered(&ExecutionSummary::Generated(report));
    assert_eq!(text, "degree,count\n1,3\n3,1\n");
}

#[rstest]
fn csv_output_is_written_to_file() -> TestResult {
    let dir = temp_dir();
    let path = dir.path().join("graph.csv");
    let raw_path = path.to_string_lossy().into_owned();
    let report = generate_report(&[
        "generate",
        "complete_graph",
        "--nodes",
        "3",
        "--format",
        "adjacency-list",
        "--output",
        &raw_path,
    ]);

    assert_eq!(report.written_to.as_deref(), Some(path.as_path()));
    let written = fs::read_to_string(&path)?;
    assert_eq!(written, "Node,Connected Nodes\n1,2;3\n2,1;3\n3,1;2\n");

    let text = rendered(&ExecutionSummary::Generated(report));
    assert!(text.starts_with("wrote adjacency-list of complete_graph (3 nodes, 3 edges) to "));
    Ok(())
}

#[rstest]
#[case("adjacency-list")]
#[case("adjacency-matrix")]
fn data_uri_file_holds_the_uri_alone(#[case] format: &str) -> TestResult {
    let dir = temp_dir();
    let path = dir.path().join("graph.uri");
    let raw_path = path.to_string_lossy().into_owned();
    let report = generate_report(&[
        "generate",
        "path_graph",
        "--nodes",
        "3",
        "--format",
        format,
        "--data-uri",
        "--output",
        &raw_path,
    ]);

    let written = fs::read_to_string(&path)?;
    assert!(written.starts_with(CSV_DATA_URI_PREFIX));
    assert!(written.ends_with("%0A"), "unexpected tail in {written:?}");
    assert_eq!(report.body.as_deref(), Some(written.as_str()));
    Ok(())
}

#[rstest]
fn data_uri_on_stdout_ends_the_line() {
    let report = generate_report(&[
        "generate",
        "path_graph",
        "--nodes",
        "2",
        "--format",
        "adjacency-list",
        "--data-uri",
    ]);
    let body = report.body.clone().expect("CSV formats carry a body");
    let text = rendered(&ExecutionSummary::Generated(report));
    assert_eq!(text, format!("{body}\n"));
}

#[rstest]
fn unwritable_output_reports_path() {
    let dir = temp_dir();
    let path = dir.path().join("missing").join("graph.csv");
    let raw_path = path.to_string_lossy().into_owned();
    let err = run_cli_expecting_error(
        parse(&["generate", "path_graph", "--output", &raw_path]),
        "writing into a missing directory must fail",
    );
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn topologies_lists_every_identifier() -> TestResult {
    let summary = run_cli(parse(&["topologies"]))?;
    let text = rendered(&summary);
    let names: Vec<&str> = text.lines().collect();
    assert_eq!(names.len(), Topology::ALL.len());
    assert!(names.contains(&"dorogovtsev_goltsev_mendes_graph"));
    for name in names {
        assert!(name.parse::<Topology>().is_ok(), "{name} must round-trip");
    }
    Ok(())
}

#[rstest]
fn generate_records_cli_spans() {
    let (result, layer) = capture(|| {
        run_cli(parse(&["generate", "wheel_graph", "--nodes", "6", "--seed", "9"]))
    });
    assert!(result.is_ok());

    let run = layer.span_named("cli.run").expect("cli.run span must exist");
    assert_eq!(run.field("command"), Some("generate"));
    let span = layer
        .span_named("cli.generate")
        .expect("cli.generate span must exist");
    assert_eq!(span.field("topology"), Some("wheel_graph"));
    assert_eq!(span.field("seed"), Some("9"));
    assert_eq!(span.field("format"), Some("summary"));
    assert!(layer.span_named("core.generate").is_some());
}
