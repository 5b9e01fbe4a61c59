//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `MetadataResolver` - Resolves paths in a tree into typed components
//! - `ConvertUseCase` - Converts a component set between source and metadata format

pub mod convert;
pub mod resolve;

pub use convert::{
    CancellationToken, ComponentFailure, ConvertOptions, ConvertResult, ConvertUseCase,
    OutputConfig,
};
pub use resolve::{MetadataResolver, TypeInference};
