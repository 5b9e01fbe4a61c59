//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod component_key;
mod config_warning;
mod force_ignore;
mod format;
pub mod source_path;

pub use component_key::ComponentKey;
pub use config_warning::ConfigWarning;
pub use force_ignore::{ForceIgnore, IgnoreError, FORCE_IGNORE_FILE};
pub use format::TargetFormat;
pub use source_path::{ParsedMetadataXml, DEFAULT_PACKAGE_ROOT, META_XML_SUFFIX};
