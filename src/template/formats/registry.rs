//! Format registry for template serialization
//!
//! Each tree format implements [`Formatter`] and is registered by name with
//! [`FormatRegistry`]. The processor looks formats up here for every `ast-*` format string.

use crate::template::ast::Template;
use crate::template::config::MtlogConfig;
use std::collections::HashMap;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Serializes a whole template to a string
pub trait Formatter: Send + Sync {
    /// Name used in format strings, e.g. "treeviz" in `ast-treeviz`
    fn name(&self) -> &str;

    fn serialize(&self, template: &Template) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, template: &Template, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(template)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and description pairs, sorted by name
    pub fn describe(&self) -> Vec<(String, String)> {
        self.list_formats()
            .into_iter()
            .map(|name| {
                let description = self
                    .get(&name)
                    .map(|f| f.description().to_string())
                    .unwrap_or_default();
                (name, description)
            })
            .collect()
    }

    /// Registry with every built-in formatter, using default settings
    pub fn with_defaults() -> Self {
        Self::with_config(&MtlogConfig::default())
    }

    /// Registry with every built-in formatter, configured from `config`
    pub fn with_config(config: &MtlogConfig) -> Self {
        let mut registry = Self::new();

        registry.register(super::SexpFormatter);
        registry.register(super::TreevizFormatter::from_config(&config.treeviz));
        registry.register(super::TagFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::DiagnosticsFormatter::new(config.diagnostics));
        registry.register(super::HighlightsFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
