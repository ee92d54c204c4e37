//! Synthetic directed edge lists for test fixtures.
//!
//! Samples a set of unique directed edges without self-loops over
//! `<prefix><index>` node identifiers and writes it as a `source,target` CSV.
//! Requests that exceed `node_count * (node_count - 1)` edges are rejected up
//! front with [`EdgeListError::InfeasibleEdgeCount`] instead of sampling
//! forever.
//!
//! ```
//! # use std::error::Error;
//! use edgelist_core::{GenerationConfig, TracingProgress, generate_edge_list};
//! # use tempfile::TempDir;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! # let dir = TempDir::new()?;
//! let config = GenerationConfig::builder()
//!     .with_node_count(100)
//!     .with_edge_count(300)
//!     .with_output_path(dir.path().join("test_small.csv"))
//!     .with_seed(42)
//!     .build()?;
//! let report = generate_edge_list(&config, &mut TracingProgress)?;
//! assert_eq!(report.edge_count, 300);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod generate;
mod node;
mod preset;
mod progress;
mod sampler;
mod writer;

pub use crate::{
    config::{
        DEFAULT_EDGE_COUNT, DEFAULT_NODE_COUNT, DEFAULT_OUTPUT_PATH, GenerationConfig,
        GenerationConfigBuilder,
    },
    error::{EdgeListError, EdgeListErrorCode, Result},
    generate::{GenerationReport, generate_edge_list},
    node::{DEFAULT_NODE_PREFIX, NodeLabels, max_edge_count},
    preset::{Preset, generate_presets},
    progress::{NoProgress, PROGRESS_INTERVAL, ProgressObserver, TracingProgress},
    sampler::{
        ATTEMPTS_PER_EDGE, Edge, MIN_ATTEMPTS, SamplingStrategy, attempt_budget, check_feasible,
        sample_edges,
    },
    writer::{CSV_HEADER, write_edge_list},
};
