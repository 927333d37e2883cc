//! Processing API
//!
//! Turns a template (string or file) into text output for a `<stage>-<format>` format string:
//!
//!     token-simple, token-json                       the token stream
//!     ast-sexp, ast-treeviz, ast-tag, ast-json,      the parsed tree, through the format registry
//!     ast-yaml, ast-diagnostics, ast-highlights
//!
//! Format-dependent settings (treeviz labels, enabled diagnostics) come from [`MtlogConfig`].

use crate::template::config::MtlogConfig;
use crate::template::formats::{FormatError, FormatRegistry};
use crate::template::lexing::tokenize;
use crate::template::parse_template;
use crate::template::token::TemplateToken;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// What data to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

impl ProcessingStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Sexp,
    Treeviz,
    Tag,
    Yaml,
    Diagnostics,
    Highlights,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Sexp => "sexp",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Tag => "tag",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Diagnostics => "diagnostics",
            OutputFormat::Highlights => "highlights",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        ALL_FORMATS
            .iter()
            .copied()
            .find(|format| format.as_str() == name)
    }

    fn supports(self, stage: ProcessingStage) -> bool {
        match stage {
            ProcessingStage::Token => matches!(self, OutputFormat::Simple | OutputFormat::Json),
            ProcessingStage::Ast => self != OutputFormat::Simple,
        }
    }
}

const ALL_FORMATS: &[OutputFormat] = &[
    OutputFormat::Simple,
    OutputFormat::Json,
    OutputFormat::Sexp,
    OutputFormat::Treeviz,
    OutputFormat::Tag,
    OutputFormat::Yaml,
    OutputFormat::Diagnostics,
    OutputFormat::Highlights,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            other => return Err(ProcessingError::InvalidStage(other.to_string())),
        };

        let format = OutputFormat::from_name(format)
            .ok_or_else(|| ProcessingError::InvalidFormatType(format.to_string()))?;

        if !format.supports(stage) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "Format '{}' not supported for {} stage",
                format.as_str(),
                stage.as_str()
            )));
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Every valid stage/format combination
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [ProcessingStage::Token, ProcessingStage::Ast]
            .into_iter()
            .flat_map(|stage| {
                ALL_FORMATS
                    .iter()
                    .copied()
                    .filter(move |format| format.supports(stage))
                    .map(move |format| ProcessingSpec { stage, format })
            })
            .collect()
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stage.as_str(), self.format.as_str())
    }
}

/// Errors that can occur during processing
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Serialize)]
struct TokenEntry<'a> {
    #[serde(flatten)]
    token: &'a TemplateToken,
    start: usize,
    end: usize,
}

fn serialize_tokens(source: &str, format: OutputFormat) -> Result<String, ProcessingError> {
    let tokens = tokenize(source);
    match format {
        OutputFormat::Json => {
            let entries: Vec<TokenEntry> = tokens
                .iter()
                .map(|(token, span)| TokenEntry {
                    token,
                    start: span.start,
                    end: span.end,
                })
                .collect();
            serde_json::to_string_pretty(&entries)
                .map_err(|err| FormatError::Serialization(err.to_string()).into())
        }
        _ => Ok(tokens
            .iter()
            .map(|(token, span)| format!("{} {}..{}\n", token, span.start, span.end))
            .collect()),
    }
}

/// Process template source text according to `spec`.
pub fn process_str(
    source: &str,
    spec: &ProcessingSpec,
    config: &MtlogConfig,
) -> Result<String, ProcessingError> {
    log::debug!("processor: {} over {} bytes", spec, source.len());
    match spec.stage {
        ProcessingStage::Token => serialize_tokens(source, spec.format),
        ProcessingStage::Ast => {
            let template = parse_template(source);
            let registry = FormatRegistry::with_config(config);
            Ok(registry.serialize(&template, spec.format.as_str())?)
        }
    }
}

/// Process a template file according to `spec`.
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &MtlogConfig,
) -> Result<String, ProcessingError> {
    let content = fs::read_to_string(file_path.as_ref())?;
    process_str(&content, spec, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_spec_from_string() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Token);
        assert_eq!(spec.format, OutputFormat::Simple);

        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Ast);
        assert_eq!(spec.format, OutputFormat::Treeviz);
        assert_eq!(spec.to_string(), "ast-treeviz");
    }

    #[test]
    fn test_invalid_format_strings() {
        assert!(matches!(
            ProcessingSpec::from_string("tokens"),
            Err(ProcessingError::InvalidFormat(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("cst-json"),
            Err(ProcessingError::InvalidStage(stage)) if stage == "cst"
        ));
        assert!(matches!(
            ProcessingSpec::from_string("ast-xml"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("token-treeviz"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(ProcessingSpec::from_string("ast-simple").is_err());
    }

    #[test]
    fn test_available_specs_round_trip() {
        let specs = ProcessingSpec::available_specs();
        assert_eq!(specs.len(), 9);
        for spec in specs {
            assert_eq!(ProcessingSpec::from_string(&spec.to_string()).unwrap(), spec);
        }
    }

    #[test]
    fn test_token_simple_output() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let output = process_str("a{B}", &spec, &MtlogConfig::default()).unwrap();

        assert_eq!(
            output,
            "<literal:a> 0..1\n<property-open> 1..2\n<identifier:B> 2..3\n<property-close> 3..4\n"
        );
    }

    #[test]
    fn test_token_json_output() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let output = process_str("{@A}", &spec, &MtlogConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[1]["kind"], "hint");
        assert_eq!(value[1]["text"], "capture");
        assert_eq!(value[2]["text"], "A");
        assert_eq!(value[3]["start"], 3);
    }

    #[test]
    fn test_ast_output_uses_config() {
        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        let mut config = MtlogConfig::default();
        config.treeviz.show_linum = true;

        let output = process_str("{A}", &spec, &config).unwrap();
        assert!(output.contains("01 └─ ⊕ {A}"));
    }

    #[test]
    fn test_process_missing_file() {
        let spec = ProcessingSpec::from_string("ast-sexp").unwrap();
        let result = process_file("/no/such/template.txt", &spec, &MtlogConfig::default());
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }
}
