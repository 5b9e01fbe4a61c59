//! Domain Entities
//!
//! - `MetadataType` / `MetadataRegistry` - the static type catalog
//! - `SourceComponent` - a resolved metadata element
//! - `ComponentSet` - components keyed by identity
//! - `WriteInfo` - a write instruction produced by a transformer
//! - `ConvertContext` - per-conversion transaction state
//! - `Manifest` - `package.xml`

mod component;
mod component_set;
mod convert_context;
mod manifest;
pub(crate) mod metadata_type;
mod registry;
mod write_info;

pub use component::{ParentRef, SourceComponent};
pub use component_set::{ComponentFilter, ComponentSet};
pub use convert_context::{ConvertContext, DeferredWrite, MergedDocument, RecompositionState};
pub use manifest::{Manifest, DEFAULT_API_VERSION, MANIFEST_FILE};
pub use metadata_type::{
    AdapterKind, ChildrenIndex, DecompositionStrategy, MetadataType, Strategies, TransformerKind,
};
pub use registry::{MetadataRegistry, RegistryData};
pub use write_info::{WriteInfo, WriteSource};
