//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `tree/` - Tree containers (local disk, zip archive, in-memory)
//! - `adapters/` - Source adapters, one per layout strategy
//! - `transformers/` - Format transformers
//! - `writers/` - Write destinations (directory, zip)
//! - `repositories/` - Registry loading
//! - `events/` - Event sinks

pub mod adapters;
pub mod events;
pub mod repositories;
pub mod transformers;
pub mod tree;
pub mod writers;

// Re-export for convenience
pub use adapters::adapter_for;
pub use events::JsonEventSink;
pub use repositories::{default_registry, JsonRegistryRepository};
pub use transformers::{finalize, transformer_for};
pub use tree::{LocalTree, VirtualTree, ZipTree};
pub use writers::{DirectoryWriter, ZipArchiveWriter};
