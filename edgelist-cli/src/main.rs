//! `edgelist` binary: writes synthetic directed edge-list CSV fixtures.
//!
//! `edgelist generate` writes one file and `edgelist presets` writes the
//! standard small/medium/large/xlarge set. Each written file gets a summary
//! block on stdout (path, sizes, seed, timing) so runs without `--seed` can be
//! replayed. Diagnostics go to stderr through `tracing`; failures are logged
//! with their stable `EDGELIST_*` code and exit non-zero.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use edgelist_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use edgelist_core::EdgeListErrorCode;
use tracing::{error, field};

/// Generate the requested edge lists and print one summary block per file.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("edge-list generation failed")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to print generation summary")?;
    writer.flush().context("failed to flush generation summary")?;
    Ok(())
}

/// Stable code of the generation failure behind `err`, if there is one.
fn failure_code(err: &anyhow::Error) -> Option<EdgeListErrorCode> {
    match err.downcast_ref::<CliError>()? {
        CliError::Core(core) => Some(core.code()),
    }
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = failure_code(&err).map(|code| field::display(code.as_str()));
            let message = format!("{err:#}");
            error!(error = %message, code, "edgelist command failed");
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not installed when logging setup itself fails"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("edgelist: failed to initialise logging: {err}");
}
