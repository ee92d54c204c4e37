//! Reading and checking generated edge-list CSV files.
//!
//! Tests across the workspace assert the same handful of properties on every
//! generated file: exact header, one row per edge, no duplicate rows, no
//! self-loops and identifiers drawn from `<prefix>0..<prefix>{n-1}`.
//! [`EdgeListCsv::violations`] checks all of them in one pass.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading an edge-list file.
#[derive(Debug, Error)]
pub enum EdgeListCsvError {
    /// The file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The contents were not valid CSV.
    #[error("malformed CSV in `{path}`: {source}")]
    Csv {
        /// File being read.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: csv::Error,
    },
}

/// A property of the generated file that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The first line was not `source,target`.
    Header {
        /// Header actually found.
        found: String,
    },
    /// The file did not end with a newline.
    MissingTrailingNewline,
    /// A row did not have exactly two fields.
    FieldCount {
        /// One-based line number.
        line: usize,
        /// Fields found on the line.
        fields: usize,
    },
    /// A row repeated an earlier `(source, target)` pair.
    Duplicate {
        /// One-based line number of the repeat.
        line: usize,
    },
    /// A row had the same source and target.
    SelfLoop {
        /// One-based line number.
        line: usize,
    },
    /// A field was not `<prefix><i>` with `i < node_count`.
    UnknownNode {
        /// One-based line number.
        line: usize,
        /// Offending field value.
        value: String,
    },
}

/// The raw contents of an edge-list file split into header and rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeListCsv {
    raw: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl EdgeListCsv {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    /// Returns [`EdgeListCsvError`] when the file is unreadable or not CSV.
    pub fn read(path: &Path) -> Result<Self, EdgeListCsvError> {
        let raw = fs::read_to_string(path).map_err(|source| EdgeListCsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(raw).map_err(|source| EdgeListCsvError::Csv {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses in-memory CSV text.
    ///
    /// # Errors
    /// Returns [`csv::Error`] when `raw` is not CSV.
    ///
    /// # Examples
    /// ```
    /// use edgelist_test_support::edge_list::EdgeListCsv;
    ///
    /// let csv = EdgeListCsv::parse("source,target\nNode_0,Node_1\n".to_owned())
    ///     .expect("valid CSV");
    /// assert_eq!(csv.line_count(), 2);
    /// assert!(csv.violations("Node_", 2).is_empty());
    /// ```
    pub fn parse(raw: String) -> Result<Self, csv::Error> {
        let (header, rows) = {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_reader(raw.as_bytes());
            let header: Vec<String> = reader.headers()?.iter().map(ToOwned::to_owned).collect();
            let rows = reader
                .records()
                .map(|record| record.map(|fields| fields.iter().map(ToOwned::to_owned).collect()))
                .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
            (header, rows)
        };
        Ok(Self { raw, header, rows })
    }

    /// Number of physical lines, header included.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.raw.lines().count()
    }

    /// Header fields.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows as `(source, target)` pairs; rows with the wrong field count
    /// are skipped.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.rows
            .iter()
            .filter_map(|row| match row.as_slice() {
                [source, target] => Some((source.as_str(), target.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Checks every edge-list property against `prefix` and `node_count`.
    #[must_use]
    pub fn violations(&self, prefix: &str, node_count: usize) -> Vec<Violation> {
        let mut found = Vec::new();
        let expected_header = self.raw.lines().next().unwrap_or_default();
        if expected_header != "source,target" {
            found.push(Violation::Header {
                found: expected_header.to_owned(),
            });
        }
        if !self.raw.ends_with('\n') {
            found.push(Violation::MissingTrailingNewline);
        }

        let mut seen = HashSet::new();
        for (row, line) in self.rows.iter().zip(2_usize..) {
            let [source, target] = row.as_slice() else {
                found.push(Violation::FieldCount {
                    line,
                    fields: row.len(),
                });
                continue;
            };
            for value in [source, target] {
                if node_index(value, prefix).is_none_or(|index| index >= node_count) {
                    found.push(Violation::UnknownNode {
                        line,
                        value: value.clone(),
                    });
                }
            }
            if source == target {
                found.push(Violation::SelfLoop { line });
            }
            if !seen.insert((source, target)) {
                found.push(Violation::Duplicate { line });
            }
        }
        found
    }
}

/// Parses the numeric index from `<prefix><i>`, rejecting leading zeros and
/// signs so each index has exactly one spelling.
#[must_use]
pub fn node_index(value: &str, prefix: &str) -> Option<usize> {
    let digits = value.strip_prefix(prefix)?;
    let canonical = !digits.is_empty()
        && digits.bytes().all(|byte| byte.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if canonical { digits.parse().ok() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn parse(raw: &str) -> EdgeListCsv {
        EdgeListCsv::parse(raw.to_owned()).expect("test input is valid CSV")
    }

    #[rstest]
    #[case("Node_0", Some(0))]
    #[case("Node_42", Some(42))]
    #[case("Node_", None)]
    #[case("Node_07", None)]
    #[case("Node_+1", None)]
    #[case("node_1", None)]
    fn node_index_requires_canonical_form(#[case] value: &str, #[case] expected: Option<usize>) {
        assert_eq!(node_index(value, "Node_"), expected);
    }

    #[test]
    fn valid_file_has_no_violations() {
        let csv = parse("source,target\nNode_0,Node_1\nNode_1,Node_0\nNode_2,Node_0\n");
        assert!(csv.violations("Node_", 3).is_empty());
        assert_eq!(csv.edges().len(), 3);
        assert_eq!(csv.line_count(), 4);
    }

    #[test]
    fn every_violation_is_reported() {
        let csv = parse("src,dst\nNode_0,Node_0\nNode_1,Node_2\nNode_1,Node_2\nNode_9,Node_1\nNode_1");
        let violations = csv.violations("Node_", 3);
        assert_eq!(
            violations,
            vec![
                Violation::Header {
                    found: "src,dst".to_owned()
                },
                Violation::MissingTrailingNewline,
                Violation::SelfLoop { line: 2 },
                Violation::Duplicate { line: 4 },
                Violation::UnknownNode {
                    line: 5,
                    value: "Node_9".to_owned()
                },
                Violation::FieldCount { line: 6, fields: 1 },
            ]
        );
    }

    #[test]
    fn read_reports_missing_file() {
        let dir = tempfile::TempDir::new().expect("temp dir must be created");
        let err = EdgeListCsv::read(&dir.path().join("absent.csv")).expect_err("file is missing");
        assert!(matches!(err, EdgeListCsvError::Io { .. }));
    }
}
