//! Convert Options
//!
//! Configuration types for convert operations.

use std::path::PathBuf;

use crate::domain::entities::{ComponentSet, DEFAULT_API_VERSION};
use crate::domain::value_objects::TargetFormat;

/// Default number of staged components buffered between transform and write
pub const DEFAULT_BUFFER_SIZE: usize = 16;

/// Where converted files land
#[derive(Debug, Clone)]
pub enum OutputConfig {
    /// Files under `root`, or `root/<package_name>` when a package name is set
    Directory {
        root: PathBuf,
        package_name: Option<String>,
    },
    /// An in-memory archive, also written to `path` when one is given
    Zip { path: Option<PathBuf> },
    /// An existing source-format project
    ///
    /// `merge_with` holds the project's resolved components; their paths must
    /// be absolute, because outputs landing on them are written in place.
    /// Components with no local counterpart go under `default_directory`.
    Merge {
        merge_with: ComponentSet,
        default_directory: PathBuf,
    },
}

impl OutputConfig {
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        OutputConfig::Directory {
            root: root.into(),
            package_name: None,
        }
    }

    pub fn zip() -> Self {
        OutputConfig::Zip { path: None }
    }

    pub fn merge(merge_with: ComponentSet, default_directory: impl Into<PathBuf>) -> Self {
        OutputConfig::Merge {
            merge_with,
            default_directory: default_directory.into(),
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, OutputConfig::Merge { .. })
    }
}

/// Options for the convert use case
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Format to produce
    pub target: TargetFormat,
    pub output: OutputConfig,
    /// API version written into the generated manifest
    pub api_version: String,
    /// Staged components held between the transform and write stages
    pub buffer_size: usize,
}

impl ConvertOptions {
    pub fn new(target: TargetFormat, output: OutputConfig) -> Self {
        Self {
            target,
            output,
            api_version: DEFAULT_API_VERSION.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Whether a `package.xml` is written next to the converted files
    pub fn writes_manifest(&self) -> bool {
        !self.target.is_source() && !self.output.is_merge()
    }
}
