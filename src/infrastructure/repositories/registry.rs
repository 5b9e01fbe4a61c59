//! JSON Registry Repository
//!
//! The type registry ships embedded in the binary; a project may point at a
//! JSON file of its own instead.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::domain::entities::{MetadataRegistry, RegistryData};
use crate::domain::ports::RegistryRepository;
use crate::error::{MetaformError, MetaformResult};

const EMBEDDED_REGISTRY: &str = include_str!("../../../data/registry.json");

/// Where registry JSON is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    Embedded,
    File(PathBuf),
}

pub struct JsonRegistryRepository {
    source: RegistrySource,
}

impl JsonRegistryRepository {
    pub fn embedded() -> Self {
        Self {
            source: RegistrySource::Embedded,
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            source: RegistrySource::File(path),
        }
    }

    pub fn source(&self) -> &RegistrySource {
        &self.source
    }
}

impl RegistryRepository for JsonRegistryRepository {
    fn load(&self) -> MetaformResult<MetadataRegistry> {
        let content = match &self.source {
            RegistrySource::Embedded => EMBEDDED_REGISTRY.to_string(),
            RegistrySource::File(path) => {
                fs::read_to_string(path).map_err(|e| MetaformError::Registry {
                    message: format!("cannot read {}: {}", path.display(), e),
                })?
            }
        };
        parse_registry(&content)
    }
}

/// Parse and validate registry JSON
pub fn parse_registry(content: &str) -> MetaformResult<MetadataRegistry> {
    let data: RegistryData =
        serde_json::from_str(content).map_err(|e| MetaformError::Registry {
            message: e.to_string(),
        })?;
    MetadataRegistry::from_data(data)
}

/// The embedded registry, loaded once per process
pub fn default_registry() -> Arc<MetadataRegistry> {
    static REGISTRY: OnceLock<Arc<MetadataRegistry>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| {
            let registry = JsonRegistryRepository::embedded()
                .load()
                .expect("embedded registry should always load");
            Arc::new(registry)
        })
        .clone()
}
