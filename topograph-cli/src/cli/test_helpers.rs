//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, ExecutionSummary, GenerationReport, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Parses `args` as if they followed the binary name.
pub(super) fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("topograph").chain(args.iter().copied());
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

pub(super) fn generate_report(args: &[&str]) -> GenerationReport {
    match run_cli(parse(args)) {
        Ok(ExecutionSummary::Generated(report)) => report,
        Ok(other) => panic!("expected a generated graph, got {other:?}"),
        Err(err) => panic!("generation must succeed: {err}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn rendered(summary: &ExecutionSummary) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = super::render_summary(summary, &mut buffer) {
        panic!("rendering into memory must succeed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("rendered output must be UTF-8: {err}"),
    }
}
