//! Local file system tree

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::ports::{TreeContainer, TreeError, TreeResult};

/// Tree over the real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTree;

impl LocalTree {
    pub fn new() -> Self {
        Self
    }
}

impl TreeContainer for LocalTree {
    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_directory(&self, path: &Path) -> TreeResult<Vec<String>> {
        if !path.is_dir() {
            return Err(TreeError::NotFound(path.to_path_buf()));
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn read_file(&self, path: &Path) -> TreeResult<Vec<u8>> {
        if !path.is_file() {
            return Err(TreeError::NotFound(path.to_path_buf()));
        }
        Ok(std::fs::read(path)?)
    }

    fn stream(&self, path: &Path) -> TreeResult<Box<dyn Read + Send + '_>> {
        if !path.is_file() {
            return Err(TreeError::NotFound(path.to_path_buf()));
        }
        Ok(Box::new(File::open(path)?))
    }
}
