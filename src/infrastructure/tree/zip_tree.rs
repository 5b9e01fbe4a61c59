//! Zip archive tree
//!
//! The entry index is built when the archive is opened; file bytes are
//! decompressed on read.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use zip::ZipArchive;

use super::normalize;
use crate::domain::ports::{TreeContainer, TreeError, TreeResult};

pub struct ZipTree {
    archive: Mutex<ZipArchive<Cursor<Vec<u8>>>>,
    index: EntryIndex,
}

#[derive(Default)]
struct EntryIndex {
    directories: BTreeMap<PathBuf, BTreeSet<String>>,
    /// Normalized path → entry name inside the archive
    entries: BTreeMap<PathBuf, String>,
}

impl ZipTree {
    /// Open an archive held in memory
    pub fn from_bytes(bytes: Vec<u8>) -> TreeResult<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(archive_error)?;
        let mut index = EntryIndex::default();
        index.directories.insert(PathBuf::new(), BTreeSet::new());

        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(archive_error)?;
            let name = entry.name().to_string();
            let path = normalize(Path::new(&name));
            if entry.is_dir() {
                index.add_directory(&path);
            } else {
                if let Some(parent) = path.parent() {
                    index.add_directory(parent);
                    index.link(parent, &path);
                }
                index.entries.insert(path, name);
            }
        }

        Ok(ZipTree {
            archive: Mutex::new(archive),
            index,
        })
    }

    /// Open an archive file from disk
    pub fn open(path: &Path) -> TreeResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }
}

impl EntryIndex {
    fn add_directory(&mut self, path: &Path) {
        if self.directories.contains_key(path) {
            return;
        }
        self.directories.insert(path.to_path_buf(), BTreeSet::new());
        if let Some(parent) = path.parent() {
            self.add_directory(parent);
            self.link(parent, path);
        }
    }

    fn link(&mut self, parent: &Path, child: &Path) {
        if let Some(name) = child.file_name() {
            self.directories
                .entry(parent.to_path_buf())
                .or_default()
                .insert(name.to_string_lossy().into_owned());
        }
    }
}

impl fmt::Debug for ZipTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipTree")
            .field("entries", &self.index.entries.len())
            .finish()
    }
}

impl TreeContainer for ZipTree {
    fn is_directory(&self, path: &Path) -> bool {
        self.index.directories.contains_key(&normalize(path))
    }

    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.index.entries.contains_key(&path) || self.index.directories.contains_key(&path)
    }

    fn read_directory(&self, path: &Path) -> TreeResult<Vec<String>> {
        self.index
            .directories
            .get(&normalize(path))
            .map(|names| names.iter().cloned().collect())
            .ok_or_else(|| TreeError::NotFound(path.to_path_buf()))
    }

    fn read_file(&self, path: &Path) -> TreeResult<Vec<u8>> {
        let name = self
            .index
            .entries
            .get(&normalize(path))
            .ok_or_else(|| TreeError::NotFound(path.to_path_buf()))?;
        let mut archive = self
            .archive
            .lock()
            .map_err(|_| TreeError::Archive("archive lock poisoned".to_string()))?;
        let mut entry = archive.by_name(name).map_err(archive_error)?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

fn archive_error(err: zip::result::ZipError) -> TreeError {
    TreeError::Archive(err.to_string())
}
