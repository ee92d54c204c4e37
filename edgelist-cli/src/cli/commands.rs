//! Command implementations and argument parsing for the edgelist CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use edgelist_core::{
    DEFAULT_EDGE_COUNT, DEFAULT_NODE_COUNT, DEFAULT_NODE_PREFIX, DEFAULT_OUTPUT_PATH,
    EdgeListError, GenerationConfig, GenerationReport, Preset, TracingProgress,
    generate_edge_list, generate_presets,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "edgelist",
    about = "Generate synthetic directed edge lists as CSV test fixtures."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a single edge list.
    Generate(GenerateCommand),
    /// Generate the standard small/medium/large/xlarge fixtures.
    Presets(PresetsCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of distinct nodes.
    #[arg(long = "nodes", default_value_t = DEFAULT_NODE_COUNT)]
    pub node_count: usize,

    /// Number of unique directed edges.
    #[arg(long = "edges", default_value_t = DEFAULT_EDGE_COUNT)]
    pub edge_count: usize,

    /// Destination CSV file; overwritten if it exists.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// RNG seed for reproducible output (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Prefix for node identifiers.
    #[arg(long, default_value = DEFAULT_NODE_PREFIX)]
    pub prefix: String,

    /// Suppress progress events.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// Options accepted by the `presets` command.
#[derive(Debug, Args, Clone)]
pub struct PresetsCommand {
    /// Directory receiving the preset files; must already exist.
    #[arg(long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Restrict the batch to these presets (repeatable; all when omitted).
    #[arg(long = "only", value_enum)]
    pub only: Vec<PresetName>,

    /// Base RNG seed; preset `i` uses `seed + i`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress progress events.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// Preset names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetName {
    /// 100 nodes, 300 edges.
    Small,
    /// 1,000 nodes, 3,000 edges.
    Medium,
    /// 10,000 nodes, 30,000 edges.
    Large,
    /// 100,000 nodes, 300,000 edges.
    #[value(name = "xlarge")]
    XLarge,
}

impl From<PresetName> for Preset {
    fn from(name: PresetName) -> Self {
        match name {
            PresetName::Small => Self::Small,
            PresetName::Medium => Self::Medium,
            PresetName::Large => Self::Large,
            PresetName::XLarge => Self::XLarge,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Generation or writing failed.
    #[error(transparent)]
    Core(#[from] EdgeListError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// One report per generated file, in generation order.
    pub reports: Vec<GenerationReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when validation, sampling or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use edgelist_cli::cli::{Cli, Command, GenerateCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         node_count: 3,
///         edge_count: 4,
///         output: dir.path().join("test.csv"),
///         seed: Some(1),
///         prefix: "Node_".into(),
///         no_progress: true,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.reports.len(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(command)
        }
        Command::Presets(command) => {
            span.record("command", field::display("presets"));
            run_presets(command)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(
        node_count = command.node_count,
        edge_count = command.edge_count,
        output = %command.output.display(),
        seeded = command.seed.is_some(),
    ),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let GenerateCommand {
        node_count,
        edge_count,
        output,
        seed,
        prefix,
        no_progress,
    } = command;
    let config = GenerationConfig::builder()
        .with_node_count(node_count)
        .with_edge_count(edge_count)
        .with_output_path(output)
        .with_optional_seed(seed)
        .with_node_prefix(prefix)
        .with_show_progress(!no_progress)
        .build()?;

    let report = generate_edge_list(&config, &mut TracingProgress)?;
    info!(
        output = %report.output_path.display(),
        seed = report.seed,
        "command completed"
    );
    Ok(ExecutionSummary {
        reports: vec![report],
    })
}

#[instrument(
    name = "cli.presets",
    err,
    skip(command),
    fields(output_dir = %command.output_dir.display(), presets = field::Empty),
)]
pub(super) fn run_presets(command: PresetsCommand) -> Result<ExecutionSummary, CliError> {
    let presets = selected_presets(&command.only);
    let labels: Vec<&str> = presets.iter().map(|preset| preset.as_str()).collect();
    Span::current().record("presets", field::display(labels.join(",")));

    let reports = generate_presets(
        &command.output_dir,
        &presets,
        command.seed,
        !command.no_progress,
        &mut TracingProgress,
    )?;
    info!(files = reports.len(), "command completed");
    Ok(ExecutionSummary { reports })
}

/// Resolves `--only` values to presets in canonical order without repeats;
/// an empty selection means every preset.
pub(super) fn selected_presets(only: &[PresetName]) -> Vec<Preset> {
    if only.is_empty() {
        return Preset::ALL.to_vec();
    }
    Preset::ALL
        .into_iter()
        .filter(|preset| only.iter().any(|name| Preset::from(*name) == *preset))
        .collect()
}

/// Renders `summary` to `writer` in a human-readable text format, one block
/// per generated file.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    for (index, report) in summary.reports.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "output: {}", report.output_path.display())?;
        writeln!(writer, "nodes: {}", report.node_count)?;
        writeln!(writer, "edges: {}", report.edge_count)?;
        writeln!(writer, "seed: {}", report.seed)?;
        writeln!(writer, "elapsed: {:.2}s", report.elapsed.as_secs_f64())?;
        writeln!(
            writer,
            "size: {} bytes ({:.2} MiB)",
            report.bytes_written,
            report.size_mib()
        )?;
    }
    Ok(())
}
