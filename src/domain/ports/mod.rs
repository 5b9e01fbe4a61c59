//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod convert_events;
pub mod ignore_filter;
pub mod registry_repository;
pub mod source_adapter;
pub mod transformer;
pub mod tree_container;
pub mod write_destination;

pub use convert_events::{ConvertEvent, ConvertEventSink, NoopEventSink};
pub use ignore_filter::{AcceptAll, IgnoreFilter};
pub use registry_repository::RegistryRepository;
pub use source_adapter::{AdapterContext, SourceAdapter};
pub use transformer::Transformer;
pub use tree_container::{FileKind, TreeContainer, TreeError, TreeResult};
pub use write_destination::{DestinationOutput, StagedFile, WriteDestination};
