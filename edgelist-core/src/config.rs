//! Generation parameters and their builder.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::node::{DEFAULT_NODE_PREFIX, NodeLabels};
use crate::sampler::check_feasible;

/// Default number of nodes.
pub const DEFAULT_NODE_COUNT: usize = 1_000;
/// Default number of edges.
pub const DEFAULT_EDGE_COUNT: usize = 3_000;
/// Default output file.
pub const DEFAULT_OUTPUT_PATH: &str = "test.csv";

/// Validated parameters for a single edge-list generation.
///
/// Construct through [`GenerationConfigBuilder`], which checks the prefix and
/// edge-count feasibility before any work starts.
///
/// # Examples
/// ```
/// use edgelist_core::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .with_node_count(3)
///     .with_edge_count(4)
///     .with_output_path("fixture.csv")
///     .with_seed(11)
///     .build()
///     .expect("4 edges fit among 3 nodes");
/// assert_eq!(config.max_edges(), 6);
/// assert_eq!(config.seed(), Some(11));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    labels: NodeLabels,
    edge_count: usize,
    max_edges: usize,
    output_path: PathBuf,
    show_progress: bool,
    seed: Option<u64>,
}

impl GenerationConfig {
    /// Returns a builder populated with the defaults.
    #[must_use]
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges to generate.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of distinct non-self-loop pairs among the configured nodes,
    /// saturated at `usize::MAX`.
    #[must_use]
    pub const fn max_edges(&self) -> usize {
        self.max_edges
    }

    /// Destination file.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Whether progress notifications are forwarded to the observer.
    #[must_use]
    pub const fn show_progress(&self) -> bool {
        self.show_progress
    }

    /// Fixed RNG seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Node identifier formatter.
    #[must_use]
    pub const fn labels(&self) -> &NodeLabels {
        &self.labels
    }
}

/// Configures and validates [`GenerationConfig`] values.
#[derive(Clone, Debug)]
pub struct GenerationConfigBuilder {
    node_count: usize,
    edge_count: usize,
    output_path: PathBuf,
    show_progress: bool,
    seed: Option<u64>,
    node_prefix: String,
}

impl Default for GenerationConfigBuilder {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            edge_count: DEFAULT_EDGE_COUNT,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            show_progress: true,
            seed: None,
            node_prefix: DEFAULT_NODE_PREFIX.to_owned(),
        }
    }
}

impl GenerationConfigBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use edgelist_core::GenerationConfigBuilder;
    ///
    /// let builder = GenerationConfigBuilder::new();
    /// assert_eq!(builder.node_count(), 1_000);
    /// assert_eq!(builder.edge_count(), 3_000);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the node count.
    #[must_use]
    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Overrides the edge count.
    #[must_use]
    pub fn with_edge_count(mut self, edge_count: usize) -> Self {
        self.edge_count = edge_count;
        self
    }

    /// Returns the configured edge count.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Overrides the destination file.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Enables or disables progress notifications.
    #[must_use]
    pub fn with_show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Fixes the RNG seed so output is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the RNG seed.
    #[must_use]
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the node identifier prefix.
    #[must_use]
    pub fn with_node_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.node_prefix = prefix.into();
        self
    }

    /// Validates the configuration and constructs a [`GenerationConfig`].
    ///
    /// # Errors
    /// Returns [`crate::EdgeListError::InvalidPrefix`] for an unusable prefix,
    /// or [`crate::EdgeListError::InfeasibleEdgeCount`] when the edge count
    /// exceeds `node_count * (node_count - 1)`.
    pub fn build(self) -> Result<GenerationConfig> {
        let labels = NodeLabels::new(self.node_prefix, self.node_count)?;
        let max_edges = check_feasible(self.node_count, self.edge_count)?;
        Ok(GenerationConfig {
            labels,
            edge_count: self.edge_count,
            max_edges,
            output_path: self.output_path,
            show_progress: self.show_progress,
            seed: self.seed,
        })
    }
}
