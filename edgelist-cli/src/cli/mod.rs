//! Command-line interface orchestration for edgelist.
//!
//! The CLI offers a `generate` command for a single edge list and a `presets`
//! command that writes the standard fixture sizes.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, PresetName, PresetsCommand,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
