//! RegistryRepository port
//!
//! Loads the metadata type registry. The embedded default registry and a
//! user-supplied JSON file both go through this.

use crate::domain::entities::MetadataRegistry;
use crate::error::MetaformResult;

pub trait RegistryRepository: Send + Sync {
    fn load(&self) -> MetaformResult<MetadataRegistry>;
}
