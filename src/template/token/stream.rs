//! The full token stream of a template
//!
//! This is what the reducer consumes, recorded in source order: literal runs from the scanner,
//! line break trivia, and the pieces of each placeholder. Every byte of the input belongs to
//! exactly one token, so the stream detokenizes back to the source.

use crate::template::ast::HintKind;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum TemplateToken {
    LiteralText(String),
    /// `\n`, `\r` or `\r\n`
    LineBreak(String),
    /// `{`
    PropertyOpen,
    /// `{{`
    GoPropertyOpen,
    /// `${`
    BuiltinOpen,
    /// `}`
    PropertyClose,
    /// `}}`
    GoPropertyClose,
    Hint(HintKind),
    Identifier(String),
    /// Raw digits, as written
    Number(String),
    Dot,
    Colon,
    FormatText(String),
}

impl TemplateToken {
    pub fn name(&self) -> &'static str {
        match self {
            TemplateToken::LiteralText(_) => "literal",
            TemplateToken::LineBreak(_) => "line-break",
            TemplateToken::PropertyOpen => "property-open",
            TemplateToken::GoPropertyOpen => "go-property-open",
            TemplateToken::BuiltinOpen => "builtin-open",
            TemplateToken::PropertyClose => "property-close",
            TemplateToken::GoPropertyClose => "go-property-close",
            TemplateToken::Hint(_) => "hint",
            TemplateToken::Identifier(_) => "identifier",
            TemplateToken::Number(_) => "number",
            TemplateToken::Dot => "dot",
            TemplateToken::Colon => "colon",
            TemplateToken::FormatText(_) => "format",
        }
    }
}

/// Simple one-token rendering, e.g. `<literal:abc>` or `<property-open>`.
impl fmt::Display for TemplateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateToken::LiteralText(text)
            | TemplateToken::Identifier(text)
            | TemplateToken::Number(text)
            | TemplateToken::FormatText(text) => write!(f, "<{}:{}>", self.name(), text),
            TemplateToken::LineBreak(text) => write!(f, "<{}:{}>", self.name(), text.escape_default()),
            TemplateToken::Hint(kind) => write!(f, "<{}:{}>", self.name(), kind),
            _ => write!(f, "<{}>", self.name()),
        }
    }
}

pub type TokenStream = Vec<(TemplateToken, Range<usize>)>;
