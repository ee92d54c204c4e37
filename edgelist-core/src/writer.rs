//! CSV serialization of sampled edges.
//!
//! Rows are streamed into a uniquely named `.<file name>.<random>.part` file
//! next to the destination and renamed into place once flushed and synced, so
//! readers only ever observe a complete file. The temporary file is removed
//! when any step fails, and an existing destination is left untouched.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{Span, field, instrument};

use crate::error::{EdgeListError, Result};
use crate::node::NodeLabels;
use crate::sampler::Edge;

/// Header row written at the top of every edge list.
pub const CSV_HEADER: [&str; 2] = ["source", "target"];

const PART_SUFFIX: &str = ".part";

/// Writes `edges` as `source,target` rows beneath a header and returns the
/// size of the finished file in bytes.
///
/// Parent directories are not created.
///
/// # Errors
/// Returns [`EdgeListError::Io`] when the file cannot be created, synced,
/// renamed or inspected, and [`EdgeListError::Csv`] when a row cannot be
/// written.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// use edgelist_core::{Edge, NodeLabels, write_edge_list};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let path = dir.path().join("edges.csv");
/// let labels = NodeLabels::new("Node_", 2)?;
/// let edges = [Edge { source: 0, target: 1 }, Edge { source: 1, target: 0 }];
/// let bytes = write_edge_list(&path, &labels, &edges)?;
/// let contents = std::fs::read_to_string(&path)?;
/// assert_eq!(contents, "source,target\nNode_0,Node_1\nNode_1,Node_0\n");
/// assert_eq!(bytes, 42);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "edgelist.write",
    err,
    skip(path, labels, edges),
    fields(path = %path.display(), rows = edges.len(), bytes = field::Empty),
)]
pub fn write_edge_list(path: &Path, labels: &NodeLabels, edges: &[Edge]) -> Result<u64> {
    let staged = create_part_file(path)?;
    let written = write_rows(staged, labels, edges)?;
    // A failed rename drops the temporary file, which deletes it.
    written
        .persist(path)
        .map_err(|err| EdgeListError::io(path, err.error))?;

    let bytes = fs::metadata(path)
        .map_err(|source| EdgeListError::io(path, source))?
        .len();
    Span::current().record("bytes", bytes);
    Ok(bytes)
}

fn create_part_file(path: &Path) -> Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut prefix = OsString::from(".");
    prefix.push(path.file_name().unwrap_or_else(|| OsStr::new("edges")));
    prefix.push(".");

    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(PART_SUFFIX);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Match `File::create`: 0o666 narrowed by the process umask.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
        .tempfile_in(dir)
        .map_err(|source| EdgeListError::io(dir, source))
}

fn write_rows(
    staged: NamedTempFile,
    labels: &NodeLabels,
    edges: &[Edge],
) -> Result<NamedTempFile> {
    let part_path = staged.path().to_path_buf();
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(staged);
    let csv_error = |source| EdgeListError::Csv {
        path: part_path.clone(),
        source,
    };

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    let mut source = String::new();
    let mut target = String::new();
    for edge in edges {
        labels.write_label(edge.source, &mut source);
        labels.write_label(edge.target, &mut target);
        writer
            .write_record([source.as_str(), target.as_str()])
            .map_err(csv_error)?;
    }

    let part = writer
        .into_inner()
        .map_err(|err| EdgeListError::io(&part_path, err.into_error()))?;
    part.as_file()
        .sync_all()
        .map_err(|source| EdgeListError::io(&part_path, source))?;
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn temp_dir() -> TempDir {
        match TempDir::new() {
            Ok(dir) => dir,
            Err(err) => panic!("failed to create temp dir: {err}"),
        }
    }

    fn labels(node_count: usize) -> NodeLabels {
        NodeLabels::new("Node_", node_count).expect("default prefix is valid")
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("directory must be readable")
            .map(|entry| {
                entry
                    .expect("entry must be readable")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn empty_edge_list_writes_header_only() {
        let dir = temp_dir();
        let path = dir.path().join("empty.csv");
        let bytes = write_edge_list(&path, &labels(4), &[]).expect("write must succeed");
        let contents = fs::read_to_string(&path).expect("output must be readable");
        assert_eq!(contents, "source,target\n");
        assert_eq!(bytes, 14);
        assert_eq!(entries(dir.path()), vec!["empty.csv"]);
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = temp_dir();
        let path = dir.path().join("edges.csv");
        fs::write(&path, "stale\ncontent\nthat is longer than the new file\n")
            .expect("seed file must be written");

        let edges = [Edge {
            source: 2,
            target: 0,
        }];
        write_edge_list(&path, &labels(3), &edges).expect("write must succeed");

        let contents = fs::read_to_string(&path).expect("output must be readable");
        assert_eq!(contents, "source,target\nNode_2,Node_0\n");
        assert_eq!(entries(dir.path()), vec!["edges.csv"]);
    }

    #[test]
    fn neighbouring_part_file_is_left_alone() {
        let dir = temp_dir();
        let path = dir.path().join("edges.csv");
        let neighbour = dir.path().join("edges.csv.part");
        fs::write(&neighbour, "user data\n").expect("neighbour must be written");

        let edges = [Edge {
            source: 0,
            target: 1,
        }];
        write_edge_list(&path, &labels(2), &edges).expect("write must succeed");

        let kept = fs::read_to_string(&neighbour).expect("neighbour must survive");
        assert_eq!(kept, "user data\n");
        assert_eq!(entries(dir.path()), vec!["edges.csv", "edges.csv.part"]);
    }

    #[test]
    fn missing_directory_fails_without_leftovers() {
        let dir = temp_dir();
        let path = dir.path().join("missing").join("edges.csv");
        let err = write_edge_list(&path, &labels(2), &[]).expect_err("directory is missing");
        assert!(matches!(err, EdgeListError::Io { .. }));
        assert!(!path.exists());
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn failed_rename_keeps_destination_and_removes_partial() {
        let dir = temp_dir();
        let path = dir.path().join("occupied.csv");
        fs::create_dir(&path).expect("blocking directory must be created");

        let edges = [Edge {
            source: 0,
            target: 1,
        }];
        let err = write_edge_list(&path, &labels(2), &edges).expect_err("rename must fail");
        match err {
            EdgeListError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(path.is_dir());
        assert_eq!(entries(dir.path()), vec!["occupied.csv"]);
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_not_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir();
        let path = dir.path().join("shared.csv");
        write_edge_list(&path, &labels(2), &[]).expect("write must succeed");
        let mode = fs::metadata(&path).expect("output must exist").permissions().mode();
        let reference = dir.path().join("reference.csv");
        fs::File::create(&reference).expect("reference must be created");
        let expected = fs::metadata(&reference)
            .expect("reference must exist")
            .permissions()
            .mode();
        assert_eq!(mode, expected);
    }
}
