//! Command-line interface orchestration for topograph.
//!
//! `generate` builds one topology from a parameter bag and prints a summary,
//! a degree histogram, or one of the CSV exports. `topologies` lists the
//! identifiers `generate` accepts.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, GenerationReport, OutputFormat,
    ParamOverrides, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
