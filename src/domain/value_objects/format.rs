//! Target format value object - which physical representation to produce

use serde::{Deserialize, Serialize};

/// Representation a conversion writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TargetFormat {
    /// Many small files, one per logical element (`*-meta.xml`)
    Source,
    /// One composed document per top-level object plus `package.xml`
    Metadata,
}

impl TargetFormat {
    pub fn is_source(&self) -> bool {
        matches!(self, TargetFormat::Source)
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetFormat::Source => "source",
            TargetFormat::Metadata => "metadata",
        }
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
