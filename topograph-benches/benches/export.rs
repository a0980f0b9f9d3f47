//! CSV export and degree analysis benchmarks.
//!
//! Renders both CSV exports and the degree histogram for Erdős–Rényi graphs
//! of increasing size. The matrix export is quadratic in the node count, so
//! the sizes stay modest.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use topograph_benches::{
    error::BenchSetupError,
    fixtures::{generated_store, sized_params},
    params::ExportBenchParams,
};
use topograph_core::{ExportFormat, Topology, degree_histogram};

/// Seed used for the exported graphs.
const SEED: u64 = 7;

/// Node counts of the exported graphs.
const NODE_COUNTS: &[usize] = &[100, 250, 500];

/// Edge probability of the exported graphs.
const PROBABILITY: f64 = 0.05;

fn export_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("export");
    group.sample_size(30);

    for &node_count in NODE_COUNTS {
        let params = sized_params(node_count)?.with_probability(PROBABILITY);
        let store = generated_store(Topology::ErdosRenyiGraph, params, SEED)?;

        for &format in ExportFormat::ALL {
            let bench_params = ExportBenchParams { format, node_count };
            group.bench_with_input(
                BenchmarkId::from_parameter(bench_params),
                &store,
                |b, store| {
                    b.iter(|| black_box(format.render(store)));
                },
            );
        }

        group.bench_with_input(
            BenchmarkId::new("degree-histogram", node_count),
            &store,
            |b, store| {
                b.iter(|| black_box(degree_histogram(store)));
            },
        );
    }

    group.finish();
    Ok(())
}

fn export(c: &mut Criterion) {
    if let Err(err) = export_impl(c) {
        panic!("export benchmark setup failed: {err}");
    }
}

criterion_group!(benches, export);
criterion_main!(benches);
