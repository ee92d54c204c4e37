//! Small helpers shared across CLI tests.

use std::path::Path;

use tempfile::TempDir;

use super::commands::GenerateCommand;
use super::{Cli, CliError, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn generate_command(
    output: &Path,
    node_count: usize,
    edge_count: usize,
) -> GenerateCommand {
    GenerateCommand {
        node_count,
        edge_count,
        output: output.to_path_buf(),
        seed: Some(7),
        prefix: "Node_".to_owned(),
        no_progress: true,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
