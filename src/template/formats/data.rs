//! Data formats
//!
//! JSON and YAML renderings of the tree through serde, plus the two editor-facing listings
//! (diagnostics and highlights). The serde output is the node structs as they are: segments are
//! tagged by `type`, property names by `kind`, and spans are `{start, end}` byte offsets.

use super::registry::{FormatError, Formatter};
use crate::template::ast::{DiagnosticOptions, Template};
use serde::Serialize;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    serde_json::to_string_pretty(value).map_err(|err| FormatError::Serialization(err.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, template: &Template) -> Result<String, FormatError> {
        to_json(template)
    }

    fn description(&self) -> &str {
        "Tree as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, template: &Template) -> Result<String, FormatError> {
        serde_yaml::to_string(template).map_err(|err| FormatError::Serialization(err.to_string()))
    }

    fn description(&self) -> &str {
        "Tree as YAML"
    }
}

/// One diagnostic per line, in the `Display` form of [`Diagnostic`](crate::template::ast::Diagnostic).
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsFormatter {
    options: DiagnosticOptions,
}

impl DiagnosticsFormatter {
    pub fn new(options: DiagnosticOptions) -> Self {
        Self { options }
    }
}

impl Formatter for DiagnosticsFormatter {
    fn name(&self) -> &str {
        "diagnostics"
    }

    fn serialize(&self, template: &Template) -> Result<String, FormatError> {
        Ok(template
            .diagnostics_with(&self.options)
            .iter()
            .map(|diagnostic| format!("{}\n", diagnostic))
            .collect())
    }

    fn description(&self) -> &str {
        "Validation diagnostics, one per line"
    }
}

#[derive(Serialize)]
struct HighlightEntry<'a> {
    start: usize,
    end: usize,
    kind: &'static str,
    text: &'a str,
}

pub struct HighlightsFormatter;

impl Formatter for HighlightsFormatter {
    fn name(&self) -> &str {
        "highlights"
    }

    fn serialize(&self, template: &Template) -> Result<String, FormatError> {
        let entries: Vec<HighlightEntry> = template
            .highlights()
            .into_iter()
            .map(|highlight| HighlightEntry {
                start: highlight.span.start,
                end: highlight.span.end,
                kind: highlight.kind.as_str(),
                text: &template.source()[highlight.span],
            })
            .collect();
        to_json(&entries)
    }

    fn description(&self) -> &str {
        "Highlight spans with editor token types, as JSON"
    }
}
