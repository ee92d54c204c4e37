//! Standard fixture sizes generated as a batch.

use std::fmt;
use std::path::Path;

use tracing::{info, instrument};

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::generate::{GenerationReport, generate_edge_list};
use crate::progress::ProgressObserver;

/// One of the four standard fixture sizes.
///
/// # Examples
/// ```
/// use edgelist_core::Preset;
///
/// assert_eq!(Preset::Medium.node_count(), 1_000);
/// assert_eq!(Preset::Medium.edge_count(), 3_000);
/// assert_eq!(Preset::Medium.file_name(), "test_medium.csv");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// 100 nodes, 300 edges. Good for initial testing.
    Small,
    /// 1,000 nodes, 3,000 edges.
    Medium,
    /// 10,000 nodes, 30,000 edges. Exercises chunked readers.
    Large,
    /// 100,000 nodes, 300,000 edges. For performance runs.
    XLarge,
}

impl Preset {
    /// Every preset, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::XLarge];

    /// Number of nodes for this preset.
    #[must_use]
    pub const fn node_count(self) -> usize {
        match self {
            Self::Small => 100,
            Self::Medium => 1_000,
            Self::Large => 10_000,
            Self::XLarge => 100_000,
        }
    }

    /// Number of edges for this preset.
    #[must_use]
    pub const fn edge_count(self) -> usize {
        match self {
            Self::Small => 300,
            Self::Medium => 3_000,
            Self::Large => 30_000,
            Self::XLarge => 300_000,
        }
    }

    /// Fixed output file name for this preset.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Small => "test_small.csv",
            Self::Medium => "test_medium.csv",
            Self::Large => "test_large.csv",
            Self::XLarge => "test_xlarge.csv",
        }
    }

    /// Returns a stable lowercase identifier for logs and CLI values.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::XLarge => "xlarge",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates each of `presets` in order into `output_dir`.
///
/// With a `seed`, preset `i` is generated from `seed + i` (wrapping) so each
/// file differs yet the whole batch is reproducible. Generation stops at the
/// first failure; files already written are kept.
///
/// # Errors
/// Propagates the first error returned by [`generate_edge_list`].
///
/// # Examples
/// ```
/// # use std::error::Error;
/// use edgelist_core::{NoProgress, Preset, generate_presets};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let reports = generate_presets(dir.path(), &[Preset::Small], Some(1), false, &mut NoProgress)?;
/// assert_eq!(reports.len(), 1);
/// assert!(dir.path().join("test_small.csv").exists());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "edgelist.presets",
    err,
    skip(output_dir, presets, observer),
    fields(output_dir = %output_dir.display(), presets = presets.len()),
)]
pub fn generate_presets<O>(
    output_dir: &Path,
    presets: &[Preset],
    seed: Option<u64>,
    show_progress: bool,
    observer: &mut O,
) -> Result<Vec<GenerationReport>>
where
    O: ProgressObserver,
{
    let mut reports = Vec::with_capacity(presets.len());
    for (preset, offset) in presets.iter().copied().zip(0_u64..) {
        let config = GenerationConfig::builder()
            .with_node_count(preset.node_count())
            .with_edge_count(preset.edge_count())
            .with_output_path(output_dir.join(preset.file_name()))
            .with_optional_seed(seed.map(|base| base.wrapping_add(offset)))
            .with_show_progress(show_progress)
            .build()?;
        info!(preset = preset.as_str(), "generating preset");
        reports.push(generate_edge_list(&config, &mut *observer)?);
    }
    Ok(reports)
}
