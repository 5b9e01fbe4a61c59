//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use crate::application::{CancellationToken, ConvertUseCase, MetadataResolver};
use crate::config::Config;
use crate::domain::entities::MetadataRegistry;
use crate::domain::ports::{ConvertEventSink, IgnoreFilter, NoopEventSink, RegistryRepository};
use crate::domain::value_objects::ForceIgnore;
use crate::error::{MetaformError, MetaformResult};
use crate::infrastructure::{default_registry, JsonEventSink, JsonRegistryRepository, LocalTree};

/// Registry named by the config, or the embedded one
pub fn load_registry(config: &Config, project_root: &Path) -> MetaformResult<Arc<MetadataRegistry>> {
    match config.registry_path(project_root) {
        Some(path) => Ok(Arc::new(JsonRegistryRepository::with_path(path).load()?)),
        None => Ok(default_registry()),
    }
}

/// Ignore file named by the config, rooted at the project root
pub fn load_ignore(config: &Config, project_root: &Path) -> MetaformResult<Arc<dyn IgnoreFilter>> {
    let ignore = ForceIgnore::load(project_root, &config.ignore.file).map_err(|e| {
        MetaformError::Config {
            file: project_root.join(&config.ignore.file),
            message: e.to_string(),
        }
    })?;
    Ok(Arc::new(ignore))
}

/// Create a resolver over the local filesystem
pub fn create_resolver(
    registry: Arc<MetadataRegistry>,
    ignore: Arc<dyn IgnoreFilter>,
) -> MetadataResolver {
    MetadataResolver::new(registry, Arc::new(LocalTree::new())).with_ignore(ignore)
}

/// Create a convert use case reporting to stdout as NDJSON when `json` is set
pub fn create_convert_use_case(json: bool, cancellation: CancellationToken) -> ConvertUseCase {
    let sink: Arc<dyn ConvertEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(NoopEventSink)
    };
    ConvertUseCase::new()
        .with_event_sink(sink)
        .with_cancellation(cancellation)
}
