//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Command-line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering abstractions
//!
//! ## Usage
//!
//! ```ignore
//! use metaform::presentation::factory;
//!
//! let registry = factory::load_registry(&config, root)?;
//! let resolver = factory::create_resolver(registry, factory::load_ignore(&config, root)?);
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands, MetadataMember};
pub use factory::{create_convert_use_case, create_resolver, load_ignore, load_registry};
