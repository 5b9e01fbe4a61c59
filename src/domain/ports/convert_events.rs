//! Convert Event Port
//!
//! Observable progress of a conversion, for terminal output and NDJSON
//! event streams.

use std::path::PathBuf;

use crate::domain::value_objects::TargetFormat;

/// Event emitted during a conversion
#[derive(Debug, Clone)]
pub enum ConvertEvent {
    Started {
        target: TargetFormat,
        destination: String,
        component_count: usize,
    },

    /// A component's writes were committed
    ComponentConverted { component: String, file_count: usize },

    FileWritten { path: PathBuf },

    /// A component's writes failed and were rolled back
    ComponentFailed { component: String, error: String },

    Completed {
        converted_count: usize,
        failed_count: usize,
        file_count: usize,
        cancelled: bool,
    },
}

/// Trait for receiving convert events
///
/// Implementations:
/// - `JsonEventSink`: NDJSON stream on stdout
/// - `NoopEventSink`: silent operation
pub trait ConvertEventSink: Send + Sync {
    fn on_event(&self, event: ConvertEvent);

    /// Whether per-file events should be sent
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ConvertEventSink for NoopEventSink {
    fn on_event(&self, _event: ConvertEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
