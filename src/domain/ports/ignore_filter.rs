//! IgnoreFilter port - accept/deny predicate over paths
//!
//! Consulted by the resolver before adapter dispatch and by transformers
//! before emitting a write. `ForceIgnore` is the file-backed implementation.

use std::fmt;
use std::path::Path;

pub trait IgnoreFilter: Send + Sync + fmt::Debug {
    /// Whether a file path is excluded
    fn denies(&self, path: &Path) -> bool;

    /// Whether a directory path is excluded
    fn denies_dir(&self, path: &Path) -> bool {
        self.denies(path)
    }

    fn accepts(&self, path: &Path) -> bool {
        !self.denies(path)
    }
}

/// Filter that accepts every path
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl IgnoreFilter for AcceptAll {
    fn denies(&self, _path: &Path) -> bool {
        false
    }
}
