//! In-memory tree
//!
//! Explicit directory → children and file → bytes maps. Used for tests and
//! for holding converted output that has not been written anywhere yet.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::normalize;
use crate::domain::ports::{TreeContainer, TreeError, TreeResult};

#[derive(Debug, Clone, Default)]
pub struct VirtualTree {
    directories: BTreeMap<PathBuf, BTreeSet<String>>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl VirtualTree {
    pub fn new() -> Self {
        let mut tree = Self::default();
        tree.directories.insert(PathBuf::new(), BTreeSet::new());
        tree
    }

    /// Build from `(path, bytes)` pairs
    pub fn from_files<P: AsRef<Path>>(files: impl IntoIterator<Item = (P, Vec<u8>)>) -> Self {
        let mut tree = Self::new();
        for (path, bytes) in files {
            tree.add_file(path, bytes);
        }
        tree
    }

    /// Add a file, creating its parent directories
    pub fn add_file(&mut self, path: impl AsRef<Path>, bytes: Vec<u8>) {
        let path = normalize(path.as_ref());
        if let Some(parent) = path.parent() {
            self.add_directory(parent);
            if let Some(name) = path.file_name() {
                self.link(parent, name.to_string_lossy().into_owned());
            }
        }
        self.files.insert(path, bytes);
    }

    /// Add a (possibly empty) directory and its ancestors
    pub fn add_directory(&mut self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        if self.directories.contains_key(&path) {
            return;
        }
        self.directories.insert(path.clone(), BTreeSet::new());
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            let name = name.to_string_lossy().into_owned();
            self.add_directory(parent);
            self.link(parent, name);
        }
    }

    fn link(&mut self, parent: &Path, name: String) {
        self.directories
            .entry(parent.to_path_buf())
            .or_default()
            .insert(name);
    }

    /// Every file path, sorted
    pub fn file_paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl TreeContainer for VirtualTree {
    fn is_directory(&self, path: &Path) -> bool {
        self.directories.contains_key(&normalize(path))
    }

    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.files.contains_key(&path) || self.directories.contains_key(&path)
    }

    fn read_directory(&self, path: &Path) -> TreeResult<Vec<String>> {
        self.directories
            .get(&normalize(path))
            .map(|names| names.iter().cloned().collect())
            .ok_or_else(|| TreeError::NotFound(path.to_path_buf()))
    }

    fn read_file(&self, path: &Path) -> TreeResult<Vec<u8>> {
        self.files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| TreeError::NotFound(path.to_path_buf()))
    }
}
