//! JSON Event Sink
//!
//! Outputs convert events as NDJSON for CI/automation consumption.

use crate::domain::ports::{ConvertEvent, ConvertEventSink};
use chrono::{SecondsFormat, Utc};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(fields) = event.as_object_mut() {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            fields.insert("timestamp".to_string(), serde_json::Value::String(now));
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl ConvertEventSink for JsonEventSink {
    fn on_event(&self, event: ConvertEvent) {
        let json = match event {
            ConvertEvent::Started {
                target,
                destination,
                component_count,
            } => {
                serde_json::json!({
                    "event": "start",
                    "command": "convert",
                    "target": target,
                    "destination": destination,
                    "component_count": component_count,
                })
            }

            ConvertEvent::ComponentConverted {
                component,
                file_count,
            } => {
                serde_json::json!({
                    "event": "component_converted",
                    "command": "convert",
                    "component": component,
                    "files": file_count,
                })
            }

            ConvertEvent::FileWritten { path } => {
                serde_json::json!({
                    "event": "item_written",
                    "command": "convert",
                    "path": path.display().to_string(),
                })
            }

            ConvertEvent::ComponentFailed { component, error } => {
                serde_json::json!({
                    "event": "component_error",
                    "command": "convert",
                    "component": component,
                    "error": error,
                })
            }

            ConvertEvent::Completed {
                converted_count,
                failed_count,
                file_count,
                cancelled,
            } => {
                let status = if cancelled {
                    "cancelled"
                } else if failed_count == 0 {
                    "success"
                } else {
                    "partial"
                };
                serde_json::json!({
                    "event": "complete",
                    "command": "convert",
                    "status": status,
                    "converted": converted_count,
                    "errors": failed_count,
                    "files": file_count,
                })
            }
        };

        self.write_event(json);
    }
}
