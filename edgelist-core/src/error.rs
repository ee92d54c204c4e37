//! Error types for edge-list generation.
//!
//! Every variant of [`EdgeListError`] maps to a stable machine-readable
//! [`EdgeListErrorCode`] so callers can log or match on failures without
//! parsing messages.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors produced while generating or writing an edge list.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// More edges were requested than distinct non-self-loop pairs exist.
    #[error(
        "infeasible edge count for given node count: {edge_count} edges requested but \
         {node_count} nodes allow at most {max_edges}"
    )]
    InfeasibleEdgeCount {
        /// Number of nodes configured.
        node_count: usize,
        /// Number of edges requested.
        edge_count: usize,
        /// Largest edge count the node count supports.
        max_edges: usize,
    },
    /// Capacity arithmetic overflowed `usize`.
    #[error("arithmetic overflow while computing {context}")]
    Overflow {
        /// Quantity being computed when the overflow occurred.
        context: &'static str,
    },
    /// The node identifier prefix cannot be written as an unquoted CSV field.
    #[error("invalid node prefix `{prefix}`: {reason}")]
    InvalidPrefix {
        /// Prefix supplied by the caller.
        prefix: String,
        /// Why the prefix was rejected.
        reason: &'static str,
    },
    /// Rejection sampling used its whole attempt budget without finishing.
    #[error(
        "edge sampling gave up after {attempts} draws with {accepted} of {requested} edges accepted"
    )]
    SamplingBudgetExhausted {
        /// Draws performed before giving up.
        attempts: usize,
        /// Unique edges accepted so far.
        accepted: usize,
        /// Edges requested.
        requested: usize,
    },
    /// Filesystem access for the output file failed.
    #[error("I/O failure for `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The CSV writer failed while emitting rows.
    #[error("failed to write CSV rows to `{path}`: {source}")]
    Csv {
        /// Path being written.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`EdgeListError`] variants.
    enum EdgeListErrorCode for EdgeListError {
        /// More edges were requested than distinct non-self-loop pairs exist.
        InfeasibleEdgeCount => InfeasibleEdgeCount { .. } => "EDGELIST_INFEASIBLE_EDGE_COUNT",
        /// Capacity arithmetic overflowed `usize`.
        Overflow => Overflow { .. } => "EDGELIST_OVERFLOW",
        /// The node identifier prefix was rejected.
        InvalidPrefix => InvalidPrefix { .. } => "EDGELIST_INVALID_PREFIX",
        /// Rejection sampling used its whole attempt budget.
        SamplingBudgetExhausted => SamplingBudgetExhausted { .. } => "EDGELIST_SAMPLING_BUDGET_EXHAUSTED",
        /// Filesystem access failed.
        Io => Io { .. } => "EDGELIST_IO",
        /// The CSV writer failed.
        Csv => Csv { .. } => "EDGELIST_CSV",
    }
}

impl EdgeListError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenient alias for results returned by the edge-list API.
pub type Result<T> = core::result::Result<T, EdgeListError>;
