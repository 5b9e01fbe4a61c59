//! Configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::DEFAULT_API_VERSION;
use crate::domain::value_objects::{ConfigWarning, FORCE_IGNORE_FILE};
use crate::error::MetaformResult;

/// Project configuration file name
pub const CONFIG_FILE: &str = "metaform.toml";

/// Project layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Where new source-format components are written
    pub default_directory: PathBuf,
    /// Directories resolved when no path is given
    pub package_directories: Vec<PathBuf>,
    pub api_version: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            default_directory: PathBuf::from("force-app"),
            package_directories: Vec::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ProjectConfig {
    /// Package directories, falling back to the default directory
    pub fn packages(&self) -> Vec<PathBuf> {
        if self.package_directories.is_empty() {
            vec![self.default_directory.clone()]
        } else {
            self.package_directories.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry JSON replacing the embedded one
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Staged components buffered between transform and write
    pub buffer_size: usize,
    /// Package directory created under the output directory
    pub package_name: Option<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            buffer_size: crate::application::convert::DEFAULT_BUFFER_SIZE,
            package_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Ignore file, relative to the project root
    pub file: String,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            file: FORCE_IGNORE_FILE.to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub registry: RegistryConfig,
    pub convert: ConvertConfig,
    pub ignore: IgnoreConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> MetaformResult<Self> {
        Ok(super::loader::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect unknown keys as warnings
    pub fn load_with_warnings(path: &Path) -> MetaformResult<(Self, Vec<ConfigWarning>)> {
        super::loader::load_with_warnings(path)
    }

    /// Load `metaform.toml` under `project_root`, or defaults, then apply env overrides
    pub fn load_or_default(project_root: &Path) -> MetaformResult<(Self, Vec<ConfigWarning>)> {
        super::loader::load_or_default(project_root)
    }

    pub fn with_env_overrides(self) -> Self {
        super::loader::with_env_overrides(self)
    }

    /// Registry file, resolved against the project root
    pub fn registry_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.registry
            .path
            .as_ref()
            .map(|path| project_root.join(path))
    }
}
