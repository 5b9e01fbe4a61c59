//! Convert Result
//!
//! Result types for convert operations.

use std::path::PathBuf;

use crate::domain::ports::DestinationOutput;

/// A component whose writes were not committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFailure {
    pub component: String,
    pub error: String,
}

/// Result of a convert operation
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Components whose writes were committed
    pub converted: Vec<String>,
    pub failed: Vec<ComponentFailure>,
    /// Paths written, in commit order
    pub files: Vec<PathBuf>,
    /// Cancellation was requested before every component was written
    pub cancelled: bool,
    pub output: DestinationOutput,
}

impl ConvertResult {
    pub fn new() -> Self {
        Self {
            converted: Vec::new(),
            failed: Vec::new(),
            files: Vec::new(),
            cancelled: false,
            output: DestinationOutput::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.cancelled
    }

    /// Archive bytes, for zip outputs
    pub fn zip_buffer(&self) -> Option<&[u8]> {
        self.output.zip_buffer.as_deref()
    }
}

impl Default for ConvertResult {
    fn default() -> Self {
        Self::new()
    }
}
