//! Domain Layer
//!
//! The type catalog, the component model and the ports the rest of the
//! crate plugs into.
//!
//! ## Structure
//!
//! - `entities/` - MetadataType, registry, SourceComponent, ComponentSet
//! - `value_objects/` - ComponentKey, TargetFormat, ForceIgnore, path naming
//! - `services/` - XML model
//! - `ports/` - TreeContainer, SourceAdapter, Transformer, WriteDestination
//!
//! ## Design Principles
//!
//! 1. **Trees, not disks** - resolution reads only through `TreeContainer`
//! 2. **Immutable components** - nothing changes after an adapter builds it
//! 3. **Ports & Adapters** - every strategy and backend is a trait impl

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
