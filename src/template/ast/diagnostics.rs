//! Strict validation over a parsed template
//!
//! Parsing itself never fails: malformed placeholders come back as nodes with missing children
//! or `closed == false`. Callers that want to reject such templates run this pass over the tree.
//!
//! ## Checks
//!
//! 1. **empty-placeholder** (warning): a placeholder without a property name, e.g. `{}`
//! 2. **unclosed-placeholder** (error): a placeholder reduced before its closing delimiter
//! 3. **empty-format** (hint): `{Name:}`
//! 4. **mixed-positional** (warning): numeric and named properties in one template
//!
//! Each check can be switched off through [`DiagnosticOptions`], which is also the
//! `[diagnostics]` table of the configuration file.

use super::nodes::{PropertyName, Segment};
use super::range::Range;
use super::tree::Template;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity levels matching LSP protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub code: Option<String>,
    pub source: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: String) -> Self {
        Self {
            range,
            severity,
            message,
            code: None,
            source: "mtlog-template".to_string(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at {}",
            self.severity, self.source, self.message, self.range.start
        )?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        Ok(())
    }
}

/// Toggles for the individual checks. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticOptions {
    pub empty_placeholder: bool,
    pub unclosed_placeholder: bool,
    pub empty_format: bool,
    pub mixed_positional: bool,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            empty_placeholder: true,
            unclosed_placeholder: true,
            empty_format: true,
            mixed_positional: true,
        }
    }
}

impl Template {
    /// All diagnostics with every check enabled.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics_with(&DiagnosticOptions::default())
    }

    /// Diagnostics for the enabled checks, in source order.
    pub fn diagnostics_with(&self, options: &DiagnosticOptions) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if options.unclosed_placeholder {
            diagnostics.extend(validate_closed(self));
        }
        if options.empty_placeholder {
            diagnostics.extend(validate_names(self));
        }
        if options.empty_format {
            diagnostics.extend(validate_formats(self));
        }
        if options.mixed_positional {
            diagnostics.extend(validate_positional(self));
        }

        diagnostics.sort_by_key(|diag| (diag.range.span.start, diag.severity));
        diagnostics
    }
}

pub fn validate_closed(template: &Template) -> Vec<Diagnostic> {
    template
        .properties()
        .filter(|segment| !segment.is_closed())
        .map(|segment| {
            let kind = segment.kind();
            Diagnostic::new(
                template.location(&segment.span()),
                DiagnosticSeverity::Error,
                format!(
                    "Unclosed {}: expected '{}'",
                    kind,
                    kind.closer().unwrap_or("}")
                ),
            )
            .with_code("unclosed-placeholder")
        })
        .collect()
}

pub fn validate_names(template: &Template) -> Vec<Diagnostic> {
    template
        .properties()
        .filter(|segment| segment.name().is_none())
        .map(|segment| {
            Diagnostic::new(
                template.location(&segment.span()),
                DiagnosticSeverity::Warning,
                format!("Empty placeholder '{}' has no property name", template.raw_text(segment)),
            )
            .with_code("empty-placeholder")
        })
        .collect()
}

pub fn validate_formats(template: &Template) -> Vec<Diagnostic> {
    template
        .properties()
        .filter_map(|segment| segment.format().filter(|format| format.is_empty()))
        .map(|format| {
            Diagnostic::new(
                template.location(&format.span),
                DiagnosticSeverity::Hint,
                "Empty format specifier after ':'".to_string(),
            )
            .with_code("empty-format")
        })
        .collect()
}

/// Flags every numeric property when the template also uses named ones.
pub fn validate_positional(template: &Template) -> Vec<Diagnostic> {
    let names: Vec<&PropertyName> = template.properties().filter_map(Segment::name).collect();
    let has_named = names.iter().any(|name| !name.is_numeric());
    if !has_named {
        return Vec::new();
    }

    names
        .into_iter()
        .filter(|name| name.is_numeric())
        .map(|name| {
            Diagnostic::new(
                template.location(&name.span()),
                DiagnosticSeverity::Warning,
                format!("Positional property '{}' mixed with named properties", name),
            )
            .with_code("mixed-positional")
        })
        .collect()
}
