//! Metaform - metadata source-format / metadata-format resolver and converter
//!
//! Metaform reads trees of platform metadata (a project on disk, a zip
//! archive, or an in-memory file set), groups their files into typed
//! components using a metadata type registry, and converts those components
//! between the many-small-files source format and the composed metadata
//! format with its `package.xml` manifest.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    CancellationToken, ConvertOptions, ConvertResult, ConvertUseCase, MetadataResolver,
    OutputConfig,
};
pub use config::Config;
pub use domain::entities::{
    ComponentFilter, ComponentSet, Manifest, MetadataRegistry, MetadataType, SourceComponent,
};
pub use domain::value_objects::{ComponentKey, ForceIgnore, TargetFormat};
pub use error::{MetaformError, MetaformResult};
pub use infrastructure::{default_registry, LocalTree, VirtualTree, ZipTree};
