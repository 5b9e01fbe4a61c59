//! Configuration module
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (METAFORM_*)
//! 3. Project config (`metaform.toml`), else user config (`<config dir>/metaform/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{apply_overrides, load_layered, user_config_path};
pub use types::{
    Config, ConvertConfig, IgnoreConfig, ProjectConfig, RegistryConfig, CONFIG_FILE,
};
