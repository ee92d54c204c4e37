//! End-to-end generation: sample edges, write the CSV, report the outcome.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{Span, field, info, instrument};

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::progress::{NoProgress, ProgressObserver};
use crate::sampler::{SamplingStrategy, sample_edges};
use crate::writer::write_edge_list;

const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Outcome of a successful generation.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    /// Number of nodes the edges were drawn from.
    pub node_count: usize,
    /// Number of edges written.
    pub edge_count: usize,
    /// Seed that reproduces this output.
    pub seed: u64,
    /// Strategy used to sample the edges.
    pub strategy: SamplingStrategy,
    /// File the edges were written to.
    pub output_path: PathBuf,
    /// Size of the written file.
    pub bytes_written: u64,
    /// Wall-clock time spent sampling and writing.
    pub elapsed: Duration,
}

impl GenerationReport {
    /// Returns the file size in mebibytes.
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "file sizes are reported approximately for humans"
    )]
    #[must_use]
    pub fn size_mib(&self) -> f64 {
        self.bytes_written as f64 / BYTES_PER_MIB
    }
}

/// Generates the edge list described by `config` and writes it to
/// [`GenerationConfig::output_path`].
///
/// When no seed is configured one is drawn from OS entropy and returned in
/// the report so the run can be repeated. Progress notifications go to
/// `observer` only when [`GenerationConfig::show_progress`] is set.
///
/// # Errors
/// Propagates sampling and write failures from [`sample_edges`] and
/// [`write_edge_list`].
///
/// # Examples
/// ```
/// # use std::error::Error;
/// use edgelist_core::{GenerationConfig, NoProgress, generate_edge_list};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let config = GenerationConfig::builder()
///     .with_node_count(3)
///     .with_edge_count(4)
///     .with_output_path(dir.path().join("test.csv"))
///     .build()?;
/// let report = generate_edge_list(&config, &mut NoProgress)?;
/// let contents = std::fs::read_to_string(&report.output_path)?;
/// assert_eq!(contents.lines().count(), 5);
/// assert_eq!(contents.lines().next(), Some("source,target"));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "edgelist.generate",
    err,
    skip(config, observer),
    fields(
        node_count = config.node_count(),
        edge_count = config.edge_count(),
        path = %config.output_path().display(),
        seed = field::Empty,
    ),
)]
pub fn generate_edge_list<O>(config: &GenerationConfig, observer: &mut O) -> Result<GenerationReport>
where
    O: ProgressObserver,
{
    let started = Instant::now();
    let seed = config.seed().unwrap_or_else(rand::random);
    Span::current().record("seed", seed);

    let mut silent = NoProgress;
    let observer: &mut dyn ProgressObserver = if config.show_progress() {
        observer
    } else {
        &mut silent
    };

    let node_count = config.node_count();
    let edge_count = config.edge_count();
    let path: &Path = config.output_path();

    observer.on_sampling_started(node_count, edge_count);
    let mut rng = SmallRng::seed_from_u64(seed);
    let edges = sample_edges(node_count, edge_count, &mut rng, &mut *observer)?;

    observer.on_write_started(path);
    let bytes_written = write_edge_list(path, config.labels(), &edges)?;

    let report = GenerationReport {
        node_count,
        edge_count,
        seed,
        strategy: SamplingStrategy::for_request(edge_count, config.max_edges()),
        output_path: path.to_path_buf(),
        bytes_written,
        elapsed: started.elapsed(),
    };
    info!(
        node_count,
        edge_count,
        seed,
        bytes = bytes_written,
        elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
        path = %path.display(),
        "network generation completed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use edgelist_test_support::tracing::RecordingLayer;
    use rstest::rstest;
    use tempfile::TempDir;
    use tracing_subscriber::layer::SubscriberExt;

    use crate::error::EdgeListError;

    #[derive(Default)]
    struct RecordingObserver {
        started: Option<(usize, usize)>,
        updates: usize,
        written: Option<PathBuf>,
    }

    impl ProgressObserver for RecordingObserver {
        fn on_sampling_started(&mut self, node_count: usize, edge_count: usize) {
            self.started = Some((node_count, edge_count));
        }

        fn on_edges_accepted(&mut self, _accepted: usize, _requested: usize) {
            self.updates += 1;
        }

        fn on_write_started(&mut self, path: &Path) {
            self.written = Some(path.to_path_buf());
        }
    }

    fn temp_dir() -> TempDir {
        match TempDir::new() {
            Ok(dir) => dir,
            Err(err) => panic!("failed to create temp dir: {err}"),
        }
    }

    fn config(dir: &TempDir, seed: Option<u64>, show_progress: bool) -> GenerationConfig {
        GenerationConfig::builder()
            .with_node_count(20)
            .with_edge_count(50)
            .with_output_path(dir.path().join("graph.csv"))
            .with_optional_seed(seed)
            .with_show_progress(show_progress)
            .build()
            .expect("configuration is valid")
    }

    #[test]
    fn fixed_seed_reproduces_file_bytes() {
        let dir = temp_dir();
        let first_config = config(&dir, Some(17), false);
        generate_edge_list(&first_config, &mut NoProgress).expect("generation must succeed");
        let first = fs::read(first_config.output_path()).expect("output must exist");

        generate_edge_list(&first_config, &mut NoProgress).expect("generation must succeed");
        let second = fs::read(first_config.output_path()).expect("output must exist");
        assert_eq!(first, second);
    }

    #[test]
    fn report_describes_written_file() {
        let dir = temp_dir();
        let config = config(&dir, Some(3), false);
        let report = generate_edge_list(&config, &mut NoProgress).expect("generation must succeed");
        let metadata = fs::metadata(config.output_path()).expect("output must exist");
        assert_eq!(report.bytes_written, metadata.len());
        assert_eq!(report.seed, 3);
        assert_eq!(report.node_count, 20);
        assert_eq!(report.edge_count, 50);
        assert_eq!(report.strategy, SamplingStrategy::Rejection);
        assert_eq!(report.output_path, config.output_path());
    }

    #[test]
    fn missing_seed_is_reported_and_reproducible() {
        let dir = temp_dir();
        let unseeded = config(&dir, None, false);
        let report = generate_edge_list(&unseeded, &mut NoProgress).expect("generation must succeed");
        let original = fs::read(unseeded.output_path()).expect("output must exist");

        let replay = config(&dir, Some(report.seed), false);
        generate_edge_list(&replay, &mut NoProgress).expect("generation must succeed");
        let replayed = fs::read(replay.output_path()).expect("output must exist");
        assert_eq!(original, replayed);
    }

    #[rstest]
    #[case::enabled(true)]
    #[case::disabled(false)]
    fn show_progress_gates_observer(#[case] show_progress: bool) {
        let dir = temp_dir();
        let config = config(&dir, Some(1), show_progress);
        let mut observer = RecordingObserver::default();
        generate_edge_list(&config, &mut observer).expect("generation must succeed");

        if show_progress {
            assert_eq!(observer.started, Some((20, 50)));
            assert_eq!(observer.updates, 1);
            assert_eq!(observer.written.as_deref(), Some(config.output_path()));
        } else {
            assert_eq!(observer.started, None);
            assert_eq!(observer.updates, 0);
            assert_eq!(observer.written, None);
        }
    }

    #[test]
    fn write_failure_propagates() {
        let dir = temp_dir();
        let config = GenerationConfig::builder()
            .with_node_count(4)
            .with_edge_count(3)
            .with_output_path(dir.path().join("absent").join("graph.csv"))
            .with_seed(9)
            .build()
            .expect("configuration is valid");
        let err = generate_edge_list(&config, &mut NoProgress).expect_err("directory is missing");
        assert!(matches!(err, EdgeListError::Io { .. }));
    }

    #[test]
    fn generation_records_seed_on_span() {
        let dir = temp_dir();
        let config = config(&dir, Some(23), false);
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());

        tracing::subscriber::with_default(subscriber, || {
            generate_edge_list(&config, &mut NoProgress)
        })
        .expect("generation must succeed");

        let span = layer
            .span("edgelist.generate")
            .expect("edgelist.generate span must exist");
        assert_eq!(span.fields.get("seed"), Some(&"23".to_owned()));
        assert_eq!(span.fields.get("edge_count"), Some(&"50".to_owned()));

        let sample = layer
            .span("edgelist.sample")
            .expect("edgelist.sample span must exist");
        assert_eq!(sample.fields.get("strategy"), Some(&"rejection".to_owned()));

        let closed: Vec<String> = layer.spans().into_iter().map(|span| span.name).collect();
        assert_eq!(
            closed,
            vec!["edgelist.sample", "edgelist.write", "edgelist.generate"]
        );

        let completed = layer
            .events()
            .into_iter()
            .find(|event| event.message() == Some("network generation completed"))
            .expect("completion event must be emitted");
        assert_eq!(completed.target, "edgelist_core::generate");
        assert_eq!(completed.fields.get("seed"), Some(&"23".to_owned()));
    }

    #[test]
    fn size_mib_scales_bytes() {
        let report = GenerationReport {
            node_count: 2,
            edge_count: 2,
            seed: 0,
            strategy: SamplingStrategy::Dense,
            output_path: PathBuf::from("x.csv"),
            bytes_written: 3 * 1_048_576,
            elapsed: Duration::ZERO,
        };
        assert!((report.size_mib() - 3.0).abs() < f64::EPSILON);
    }
}
