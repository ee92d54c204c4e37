//! Uniqueness-constrained random edge sampling.
//!
//! Sparse requests use rejection sampling: draw a source and a target with
//! replacement, drop self-loops, and keep the first occurrence of each pair.
//! Requests above half the available pairs would spend most draws on
//! duplicates, so they switch to drawing distinct pair indices without
//! replacement. Both strategies return edges in acceptance order.

use std::collections::HashSet;
use std::fmt;

use rand::{Rng, seq::index};
use tracing::{Span, field, instrument};

use crate::error::{EdgeListError, Result};
use crate::node::max_edge_count;
use crate::progress::{PROGRESS_INTERVAL, ProgressObserver};

/// Draws allowed per requested edge before rejection sampling gives up.
pub const ATTEMPTS_PER_EDGE: usize = 64;

/// Minimum attempt budget for rejection sampling.
pub const MIN_ATTEMPTS: usize = 1_024;

/// A directed edge between two distinct node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    /// Index of the source node.
    pub source: usize,
    /// Index of the target node.
    pub target: usize,
}

impl Edge {
    /// Maps `pair_index` in `0..node_count * (node_count - 1)` onto the
    /// matching ordered pair, skipping the diagonal.
    ///
    /// Each source owns `node_count - 1` consecutive indices; targets at or
    /// past the source are shifted up by one.
    ///
    /// # Examples
    /// ```
    /// use edgelist_core::Edge;
    ///
    /// assert_eq!(Edge::from_pair_index(0, 3), Edge { source: 0, target: 1 });
    /// assert_eq!(Edge::from_pair_index(2, 3), Edge { source: 1, target: 0 });
    /// assert_eq!(Edge::from_pair_index(5, 3), Edge { source: 2, target: 1 });
    /// ```
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "pair indices decompose into row and column by truncating division"
    )]
    #[must_use]
    pub const fn from_pair_index(pair_index: usize, node_count: usize) -> Self {
        let row_width = node_count.saturating_sub(1);
        if row_width == 0 {
            return Self {
                source: 0,
                target: 0,
            };
        }
        let source = pair_index / row_width;
        let column = pair_index % row_width;
        let target = if column >= source { column + 1 } else { column };
        Self { source, target }
    }

    /// Returns `true` when both endpoints are the same node.
    #[must_use]
    pub const fn is_self_loop(self) -> bool {
        self.source == self.target
    }
}

/// Sampling strategy selected for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// Draw endpoints with replacement and reject self-loops and duplicates.
    Rejection,
    /// Draw distinct pair indices without replacement.
    Dense,
}

impl SamplingStrategy {
    /// Picks [`SamplingStrategy::Dense`] when more than half of the
    /// `max_edges` available pairs are requested.
    #[must_use]
    pub const fn for_request(edge_count: usize, max_edges: usize) -> Self {
        if edge_count > max_edges / 2 {
            Self::Dense
        } else {
            Self::Rejection
        }
    }

    /// Returns a stable lowercase identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rejection => "rejection",
            Self::Dense => "dense",
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the attempt cap applied to rejection sampling for `edge_count`
/// edges.
#[must_use]
pub const fn attempt_budget(edge_count: usize) -> usize {
    let budget = edge_count.saturating_mul(ATTEMPTS_PER_EDGE);
    if budget < MIN_ATTEMPTS {
        MIN_ATTEMPTS
    } else {
        budget
    }
}

/// Checks that `edge_count` distinct non-self-loop edges exist among
/// `node_count` nodes and returns the number of available pairs.
///
/// A pair count too large for `usize` saturates to `usize::MAX`: every
/// representable edge count fits, and the dense strategy stays out of reach.
///
/// # Errors
/// Returns [`EdgeListError::InfeasibleEdgeCount`] when too many edges are
/// requested.
///
/// # Examples
/// ```
/// use edgelist_core::check_feasible;
///
/// assert_eq!(check_feasible(3, 6).expect("every pair fits"), 6);
/// assert!(check_feasible(3, 7).is_err());
/// assert_eq!(check_feasible(usize::MAX, 3).expect("saturates"), usize::MAX);
/// ```
pub fn check_feasible(node_count: usize, edge_count: usize) -> Result<usize> {
    let max_edges = max_edge_count(node_count).unwrap_or(usize::MAX);
    if edge_count > max_edges {
        return Err(EdgeListError::InfeasibleEdgeCount {
            node_count,
            edge_count,
            max_edges,
        });
    }
    Ok(max_edges)
}

/// Samples `edge_count` unique directed edges without self-loops over
/// `node_count` nodes.
///
/// Edges are returned in the order they were accepted, so a seeded `rng`
/// reproduces the same sequence.
///
/// # Errors
/// Returns [`EdgeListError::InfeasibleEdgeCount`] before drawing anything when
/// the request cannot be satisfied, and
/// [`EdgeListError::SamplingBudgetExhausted`] if rejection sampling exceeds
/// [`attempt_budget`].
///
/// # Examples
/// ```
/// use edgelist_core::{NoProgress, sample_edges};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let edges = sample_edges(3, 4, &mut rng, &mut NoProgress).expect("4 of 6 pairs is feasible");
/// assert_eq!(edges.len(), 4);
/// assert!(edges.iter().all(|edge| !edge.is_self_loop()));
/// ```
#[instrument(
    name = "edgelist.sample",
    err,
    skip(rng, observer),
    fields(strategy = field::Empty, attempts = field::Empty),
)]
pub fn sample_edges<R, O>(
    node_count: usize,
    edge_count: usize,
    rng: &mut R,
    observer: &mut O,
) -> Result<Vec<Edge>>
where
    R: Rng + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let max_edges = check_feasible(node_count, edge_count)?;
    let strategy = SamplingStrategy::for_request(edge_count, max_edges);
    let span = Span::current();
    span.record("strategy", field::display(strategy));

    let edges = match strategy {
        SamplingStrategy::Rejection => {
            let (edges, attempts) = sample_rejection(node_count, edge_count, rng, observer)?;
            span.record("attempts", attempts);
            edges
        }
        SamplingStrategy::Dense => {
            span.record("attempts", edge_count);
            sample_dense(node_count, edge_count, max_edges, rng)
        }
    };
    observer.on_edges_accepted(edges.len(), edge_count);
    Ok(edges)
}

fn sample_rejection<R, O>(
    node_count: usize,
    edge_count: usize,
    rng: &mut R,
    observer: &mut O,
) -> Result<(Vec<Edge>, usize)>
where
    R: Rng + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let budget = attempt_budget(edge_count);
    let mut seen = HashSet::with_capacity(edge_count);
    let mut edges = Vec::with_capacity(edge_count);
    let mut attempts = 0_usize;

    while edges.len() < edge_count {
        if attempts == budget {
            return Err(EdgeListError::SamplingBudgetExhausted {
                attempts,
                accepted: edges.len(),
                requested: edge_count,
            });
        }
        attempts += 1;

        let edge = Edge {
            source: rng.gen_range(0..node_count),
            target: rng.gen_range(0..node_count),
        };
        if edge.is_self_loop() || !seen.insert(edge) {
            continue;
        }
        edges.push(edge);

        let accepted = edges.len();
        if accepted < edge_count && accepted.is_multiple_of(PROGRESS_INTERVAL) {
            observer.on_edges_accepted(accepted, edge_count);
        }
    }

    Ok((edges, attempts))
}

fn sample_dense<R>(node_count: usize, edge_count: usize, max_edges: usize, rng: &mut R) -> Vec<Edge>
where
    R: Rng + ?Sized,
{
    index::sample(rng, max_edges, edge_count)
        .into_iter()
        .map(|pair_index| Edge::from_pair_index(pair_index, node_count))
        .collect()
}
