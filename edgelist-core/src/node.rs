//! Node identifiers and edge capacity.
//!
//! Nodes are never materialised as strings up front; a [`NodeLabels`] value
//! formats `<prefix><index>` on demand when rows are serialised.

use std::fmt::Write as _;

use crate::error::{EdgeListError, Result};

/// Prefix used for node identifiers unless the caller overrides it.
pub const DEFAULT_NODE_PREFIX: &str = "Node_";

/// Returns how many distinct directed edges without self-loops exist among
/// `node_count` nodes, i.e. `node_count * (node_count - 1)`.
///
/// # Errors
/// Returns [`EdgeListError::Overflow`] when the product does not fit in
/// `usize`.
///
/// # Examples
/// ```
/// use edgelist_core::max_edge_count;
///
/// assert_eq!(max_edge_count(0).expect("no overflow"), 0);
/// assert_eq!(max_edge_count(1).expect("no overflow"), 0);
/// assert_eq!(max_edge_count(3).expect("no overflow"), 6);
/// ```
pub fn max_edge_count(node_count: usize) -> Result<usize> {
    node_count
        .checked_mul(node_count.saturating_sub(1))
        .ok_or(EdgeListError::Overflow {
            context: "max_edges",
        })
}

/// Formats node identifiers as `<prefix><index>`.
///
/// # Examples
/// ```
/// use edgelist_core::NodeLabels;
///
/// let labels = NodeLabels::new("Node_", 3).expect("prefix is valid");
/// assert_eq!(labels.label(2), "Node_2");
/// assert_eq!(labels.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeLabels {
    prefix: String,
    node_count: usize,
}

impl NodeLabels {
    /// Validates `prefix` and creates labels for `node_count` nodes.
    ///
    /// # Errors
    /// Returns [`EdgeListError::InvalidPrefix`] when the prefix is empty or
    /// contains a character that would force CSV quoting.
    pub fn new(prefix: impl Into<String>, node_count: usize) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { prefix, node_count })
    }

    /// Returns the configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the number of labelled nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.node_count
    }

    /// Returns `true` when no nodes are labelled.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Returns the identifier for `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        let mut out = String::with_capacity(self.prefix.len() + 6);
        self.write_label(index, &mut out);
        out
    }

    /// Replaces the contents of `out` with the identifier for `index`,
    /// reusing its allocation.
    pub fn write_label(&self, index: usize, out: &mut String) {
        out.clear();
        out.push_str(&self.prefix);
        // Writing into a `String` cannot fail.
        let _ = write!(out, "{index}");
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    let reason = if prefix.is_empty() {
        Some("prefix must not be empty")
    } else if prefix.contains([',', '"', '\r', '\n']) {
        Some("prefix must not contain commas, quotes or line breaks")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(EdgeListError::InvalidPrefix {
            prefix: prefix.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}
