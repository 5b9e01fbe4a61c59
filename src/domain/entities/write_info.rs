//! WriteInfo entity - one write instruction produced by a transformer

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::TreeContainer;
use crate::error::MetaformResult;

/// Where the bytes of a write come from
#[derive(Debug, Clone)]
pub enum WriteSource {
    /// Bytes produced in memory (composed or decomposed XML)
    Bytes(Vec<u8>),
    /// A file copied unchanged from the component's tree
    TreeFile {
        tree: Arc<dyn TreeContainer>,
        path: PathBuf,
    },
}

/// Destination path paired with a byte source
#[derive(Debug, Clone)]
pub struct WriteInfo {
    /// Relative to the output root, or absolute when merging into local files
    pub output: PathBuf,
    pub source: WriteSource,
}

impl WriteInfo {
    pub fn bytes(output: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            output: output.into(),
            source: WriteSource::Bytes(bytes),
        }
    }

    pub fn copy(output: impl Into<PathBuf>, tree: Arc<dyn TreeContainer>, path: &Path) -> Self {
        Self {
            output: output.into(),
            source: WriteSource::TreeFile {
                tree,
                path: path.to_path_buf(),
            },
        }
    }

    /// Materialize the bytes
    pub fn read(&self) -> MetaformResult<Vec<u8>> {
        match &self.source {
            WriteSource::Bytes(bytes) => Ok(bytes.clone()),
            WriteSource::TreeFile { tree, path } => Ok(tree.read_file(path)?),
        }
    }
}
