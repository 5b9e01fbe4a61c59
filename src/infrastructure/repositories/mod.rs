//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod registry;

pub use registry::{default_registry, parse_registry, JsonRegistryRepository, RegistrySource};
