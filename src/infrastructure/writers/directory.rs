//! Directory destination
//!
//! Each file is written through a temp file in its target directory and
//! renamed into place. A failing commit restores whatever the earlier files
//! of the same commit replaced.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::ports::{DestinationOutput, StagedFile, WriteDestination};
use crate::error::MetaformResult;

/// Write `content` to `path` via a temp file in the same directory
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// A file as it was before this commit touched it
struct Replaced {
    path: PathBuf,
    previous: Option<Vec<u8>>,
}

#[derive(Debug)]
pub struct DirectoryWriter {
    root: PathBuf,
}

impl DirectoryWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative paths land under the root; absolute paths are kept
    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    fn rollback(replaced: Vec<Replaced>) {
        for entry in replaced.into_iter().rev() {
            let result = match &entry.previous {
                Some(bytes) => atomic_write(&entry.path, bytes),
                None => std::fs::remove_file(&entry.path),
            };
            if let Err(e) = result {
                warn!(path = %entry.path.display(), error = %e, "rollback failed");
            }
        }
    }
}

impl WriteDestination for DirectoryWriter {
    fn display_name(&self) -> String {
        self.root.display().to_string()
    }

    fn commit(&mut self, files: &[StagedFile]) -> MetaformResult<Vec<PathBuf>> {
        let mut replaced = Vec::with_capacity(files.len());
        let mut written = Vec::with_capacity(files.len());

        for file in files {
            let target = self.resolve(&file.path);
            let previous = if target.is_file() {
                match std::fs::read(&target) {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        Self::rollback(replaced);
                        return Err(e.into());
                    }
                }
            } else {
                None
            };

            if let Err(e) = atomic_write(&target, &file.bytes) {
                Self::rollback(replaced);
                return Err(e.into());
            }
            debug!(path = %target.display(), bytes = file.bytes.len(), "written");
            replaced.push(Replaced {
                path: target.clone(),
                previous,
            });
            written.push(target);
        }
        Ok(written)
    }

    fn finish(&mut self) -> MetaformResult<DestinationOutput> {
        Ok(DestinationOutput {
            root: Some(self.root.clone()),
            ..Default::default()
        })
    }
}
