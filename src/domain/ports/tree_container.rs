//! TreeContainer port - read-only view over a hierarchical store
//!
//! Resolution runs against this trait only, so the same adapters produce the
//! same components from a real directory, an in-memory tree or a zip archive.

use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_objects::source_path::{is_metadata_xml, parse_metadata_xml};

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Tree operation errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Archive(String),
}

/// Which half of a component `find` looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Payload files (`Foo.cls`, a bundle directory, ...)
    Content,
    /// `*-meta.xml` documents
    MetadataXml,
}

/// Abstract read-only tree
///
/// Implementations:
/// - `LocalTree` - the real file system
/// - `VirtualTree` - in-memory map, for tests and not-yet-written results
/// - `ZipTree` - read-through view of a zip archive
pub trait TreeContainer: Send + Sync + fmt::Debug {
    /// Whether `path` is a directory
    fn is_directory(&self, path: &Path) -> bool;

    /// Whether `path` exists as a file or directory
    fn exists(&self, path: &Path) -> bool;

    /// Names of the entries directly under `path`, sorted
    fn read_directory(&self, path: &Path) -> TreeResult<Vec<String>>;

    /// Read a whole file
    fn read_file(&self, path: &Path) -> TreeResult<Vec<u8>>;

    /// Open a file for streaming reads
    fn stream(&self, path: &Path) -> TreeResult<Box<dyn Read + Send + '_>> {
        Ok(Box::new(Cursor::new(self.read_file(path)?)))
    }

    /// Locate a file of `kind` named `full_name` directly inside `dir`
    fn find(&self, kind: FileKind, full_name: &str, dir: &Path) -> Option<PathBuf> {
        let entries = self.read_directory(dir).ok()?;
        entries
            .into_iter()
            .map(|entry| dir.join(entry))
            .find(|path| match kind {
                FileKind::MetadataXml => {
                    parse_metadata_xml(path).is_some_and(|parsed| parsed.full_name == full_name)
                }
                FileKind::Content => {
                    !is_metadata_xml(path)
                        && path.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
                            name == full_name
                                || name
                                    .strip_prefix(full_name)
                                    .is_some_and(|rest| rest.starts_with('.'))
                        })
                }
            })
    }

    /// All files below `dir`, depth first, in sorted order
    fn walk(&self, dir: &Path) -> TreeResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in self.read_directory(dir)? {
            let path = dir.join(entry);
            if self.is_directory(&path) {
                files.extend(self.walk(&path)?);
            } else {
                files.push(path);
            }
        }
        Ok(files)
    }
}
