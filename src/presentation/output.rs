//! Output Rendering
//!
//! Renders resolve listings and convert summaries as text or JSON.

use std::fmt::Write as _;

use crate::application::ConvertResult;
use crate::domain::entities::ComponentSet;
use crate::domain::value_objects::TargetFormat;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
    skip: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
            skip: "○",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
            skip: "[ ]",
        }
    }
}

/// Listing of resolved components
pub fn render_components(set: &ComponentSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let components: Vec<_> = set
                .values()
                .map(|component| {
                    serde_json::json!({
                        "type": component.type_().name,
                        "fullName": component.full_name(),
                        "xml": component.xml().map(|p| p.display().to_string()),
                        "content": component.content().map(|p| p.display().to_string()),
                        "parent": component.parent().map(|p| p.full_name.clone()),
                    })
                })
                .collect();
            let json = serde_json::json!({ "components": components, "count": set.len() });
            serde_json::to_string_pretty(&json).unwrap_or_default()
        }
        OutputFormat::Text => {
            let width = set
                .values()
                .map(|c| c.type_().name.len())
                .max()
                .unwrap_or(0);
            let mut out = String::new();
            let _ = writeln!(out, "Resolved {} component(s)", set.len());
            for component in set {
                let location = component
                    .xml()
                    .or(component.content())
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "  {:<width$}  {}  {}",
                    component.type_().name,
                    component.full_name(),
                    location,
                    width = width
                );
            }
            out
        }
    }
}

/// Text renderer for convert results
pub struct ConvertSummary {
    pub unicode: bool,
    pub verbose: u8,
}

impl Default for ConvertSummary {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl ConvertSummary {
    pub fn render(&self, result: &ConvertResult, target: TargetFormat) -> String {
        let icons = if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        };
        let mut out = String::new();

        let headline = if result.cancelled {
            format!("{} Convert Cancelled", icons.skip)
        } else if result.is_success() {
            format!("{} Convert Complete", icons.check)
        } else {
            format!("{} Convert Failed", icons.cross)
        };
        let _ = writeln!(out, "{}", headline);
        let _ = writeln!(out);
        let _ = writeln!(out, "  Target: {} format", target);
        let _ = writeln!(
            out,
            "  {} components {} {} files",
            result.converted.len(),
            icons.write,
            result.files.len()
        );
        if let Some(root) = &result.output.root {
            let _ = writeln!(out, "  Output: {}", root.display());
        }
        if let Some(path) = &result.output.zip_path {
            let _ = writeln!(out, "  Archive: {}", path.display());
        } else if let Some(buffer) = &result.output.zip_buffer {
            let _ = writeln!(out, "  Archive: {} bytes in memory", buffer.len());
        }

        if self.verbose > 0 && !result.files.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Written ({}):", result.files.len());
            for path in &result.files {
                let _ = writeln!(out, "    {} {}", icons.write, path.display());
            }
        }

        if !result.failed.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Errors ({}):", result.failed.len());
            for failure in &result.failed {
                let _ = writeln!(out, "    {} {}: {}", icons.cross, failure.component, failure.error);
            }
        }
        out
    }
}
