//! Template tree nodes
//!
//! A [`Template`](super::Template) is a flat, ordered list of [`Segment`]s. Literal runs and the
//! three placeholder shapes are the only segment kinds; placeholder children always appear in
//! the order hint, name, format.
//!
//! Every node stores the byte span it was built from, so consumers can slice the original source
//! (highlighters, reformatters) without the tree having to keep copies of delimiters.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid"));

static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("numeric regex is valid"));

/// One element of a template: literal text or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    LiteralText(LiteralText),
    /// `{Name}`, `{@Name}`, `{$Name}`, `{Name:format}`
    Property(Property),
    /// `{{Name}}`, `{{.Name}}`
    GoProperty(GoProperty),
    /// `${Name}`
    BuiltinProperty(BuiltinProperty),
}

/// Discriminant of a [`Segment`], handy for highlighting and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    LiteralText,
    Property,
    GoProperty,
    BuiltinProperty,
}

impl SegmentKind {
    /// Node type name used by the textual renderings.
    pub fn node_type(self) -> &'static str {
        match self {
            SegmentKind::LiteralText => "literal_text",
            SegmentKind::Property => "property",
            SegmentKind::GoProperty => "go_property",
            SegmentKind::BuiltinProperty => "builtin_property",
        }
    }

    /// Opening delimiter for placeholder kinds.
    pub fn opener(self) -> Option<&'static str> {
        match self {
            SegmentKind::LiteralText => None,
            SegmentKind::Property => Some("{"),
            SegmentKind::GoProperty => Some("{{"),
            SegmentKind::BuiltinProperty => Some("${"),
        }
    }

    /// Closing delimiter for placeholder kinds.
    pub fn closer(self) -> Option<&'static str> {
        match self {
            SegmentKind::LiteralText => None,
            SegmentKind::Property | SegmentKind::BuiltinProperty => Some("}"),
            SegmentKind::GoProperty => Some("}}"),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_type())
    }
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::LiteralText(_) => SegmentKind::LiteralText,
            Segment::Property(_) => SegmentKind::Property,
            Segment::GoProperty(_) => SegmentKind::GoProperty,
            Segment::BuiltinProperty(_) => SegmentKind::BuiltinProperty,
        }
    }

    /// Byte span of the whole segment, delimiters included.
    pub fn span(&self) -> Range<usize> {
        match self {
            Segment::LiteralText(literal) => literal.span.clone(),
            Segment::Property(property) => property.span.clone(),
            Segment::GoProperty(property) => property.span.clone(),
            Segment::BuiltinProperty(property) => property.span.clone(),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Segment::LiteralText(_))
    }

    pub fn is_placeholder(&self) -> bool {
        !self.is_literal()
    }

    pub fn as_literal(&self) -> Option<&LiteralText> {
        match self {
            Segment::LiteralText(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Segment::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn as_go_property(&self) -> Option<&GoProperty> {
        match self {
            Segment::GoProperty(property) => Some(property),
            _ => None,
        }
    }

    pub fn as_builtin_property(&self) -> Option<&BuiltinProperty> {
        match self {
            Segment::BuiltinProperty(property) => Some(property),
            _ => None,
        }
    }

    /// The hint, which only a [`Property`] can carry.
    pub fn hint(&self) -> Option<&Hint> {
        self.as_property().and_then(|property| property.hint.as_ref())
    }

    pub fn name(&self) -> Option<&PropertyName> {
        match self {
            Segment::LiteralText(_) => None,
            Segment::Property(property) => property.name.as_ref(),
            Segment::GoProperty(property) => property.name.as_ref(),
            Segment::BuiltinProperty(property) => property.name.as_ref(),
        }
    }

    pub fn format(&self) -> Option<&FormatSpec> {
        match self {
            Segment::LiteralText(_) => None,
            Segment::Property(property) => property.format.as_ref(),
            Segment::GoProperty(property) => property.format.as_ref(),
            Segment::BuiltinProperty(property) => property.format.as_ref(),
        }
    }

    /// Whether the placeholder reached its closing delimiter. Literal text is always closed.
    pub fn is_closed(&self) -> bool {
        match self {
            Segment::LiteralText(_) => true,
            Segment::Property(property) => property.closed,
            Segment::GoProperty(property) => property.closed,
            Segment::BuiltinProperty(property) => property.closed,
        }
    }
}

/// A verbatim run of text. Never contains a line break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteralText {
    pub text: String,
    pub span: Range<usize>,
}

impl LiteralText {
    pub fn new(text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// `{` hint? name? (`:` format)? `}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub hint: Option<Hint>,
    pub name: Option<PropertyName>,
    pub format: Option<FormatSpec>,
    /// False when the closing `}` was never reached and the node was reduced early.
    pub closed: bool,
    pub span: Range<usize>,
}

/// `{{` `.`? name? (`:` format)? `}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoProperty {
    /// Go template style `{{.Name}}`
    pub leading_dot: bool,
    pub name: Option<PropertyName>,
    pub format: Option<FormatSpec>,
    pub closed: bool,
    pub span: Range<usize>,
}

/// `${` name? (`:` format)? `}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltinProperty {
    pub name: Option<PropertyName>,
    pub format: Option<FormatSpec>,
    pub closed: bool,
    pub span: Range<usize>,
}

/// How a property value is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    /// `@`: destructure the value
    Capture,
    /// `$`: render the value as a string
    Stringify,
}

impl HintKind {
    pub fn as_char(self) -> char {
        match self {
            HintKind::Capture => '@',
            HintKind::Stringify => '$',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '@' => Some(HintKind::Capture),
            '$' => Some(HintKind::Stringify),
            _ => None,
        }
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub kind: HintKind,
    pub span: Range<usize>,
}

impl Hint {
    pub fn new(kind: HintKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }
}

/// Name of the value a placeholder refers to: a position or a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyName {
    NumericIndex(NumericIndex),
    DottedName(DottedName),
}

impl PropertyName {
    pub fn span(&self) -> Range<usize> {
        match self {
            PropertyName::NumericIndex(index) => index.span.clone(),
            PropertyName::DottedName(name) => name.span.clone(),
        }
    }

    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            PropertyName::NumericIndex(index) => Some(index.value),
            PropertyName::DottedName(_) => None,
        }
    }

    pub fn as_dotted(&self) -> Option<&DottedName> {
        match self {
            PropertyName::NumericIndex(_) => None,
            PropertyName::DottedName(name) => Some(name),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, PropertyName::NumericIndex(_))
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            PropertyName::NumericIndex(_) => "numeric_index",
            PropertyName::DottedName(_) => "dotted_name",
        }
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyName::NumericIndex(index) => write!(f, "{}", index.value),
            PropertyName::DottedName(name) => write!(f, "{}", name.path()),
        }
    }
}

/// Error returned when a string is neither a numeric index nor a dotted identifier path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid property name: {0:?}")]
pub struct InvalidPropertyName(pub String);

impl FromStr for PropertyName {
    type Err = InvalidPropertyName;

    /// Parses `"0"` or `"a.b.c"`. Spans are relative to the given string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if NUMERIC_RE.is_match(s) {
            let value = s
                .parse::<u64>()
                .map_err(|_| InvalidPropertyName(s.to_string()))?;
            return Ok(PropertyName::NumericIndex(NumericIndex::new(value, 0..s.len())));
        }

        let mut parts = Vec::new();
        let mut offset = 0;
        for part in s.split('.') {
            if !Identifier::is_valid(part) {
                return Err(InvalidPropertyName(s.to_string()));
            }
            parts.push(Identifier::new(part, offset..offset + part.len()));
            offset += part.len() + 1;
        }
        DottedName::new(parts)
            .map(PropertyName::DottedName)
            .ok_or_else(|| InvalidPropertyName(s.to_string()))
    }
}

/// Positional reference such as `{0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumericIndex {
    pub value: u64,
    pub span: Range<usize>,
}

impl NumericIndex {
    pub fn new(value: u64, span: Range<usize>) -> Self {
        Self { value, span }
    }
}

/// `a.b.c`; always holds at least one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DottedName {
    parts: Vec<Identifier>,
    pub span: Range<usize>,
}

impl DottedName {
    /// Returns `None` for an empty list of parts.
    pub fn new(parts: Vec<Identifier>) -> Option<Self> {
        let start = parts.first()?.span.start;
        let end = parts.last()?.span.end;
        Some(Self {
            parts,
            span: start..end,
        })
    }

    pub fn parts(&self) -> &[Identifier] {
        &self.parts
    }

    /// Identifiers joined with `.`
    pub fn path(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Range<usize>,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// ASCII letter or underscore, then letters, digits or underscores.
    pub fn is_valid(name: &str) -> bool {
        IDENTIFIER_RE.is_match(name)
    }
}

/// Raw formatting text after `:`, never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatSpec {
    pub text: String,
    pub span: Range<usize>,
}

impl FormatSpec {
    pub fn new(text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_name_from_numeric_str() {
        let name: PropertyName = "42".parse().unwrap();
        assert_eq!(name.as_numeric(), Some(42));
        assert_eq!(name.span(), 0..2);
    }

    #[test]
    fn test_property_name_from_dotted_str() {
        let name: PropertyName = "http.request.method".parse().unwrap();
        let dotted = name.as_dotted().unwrap();

        assert_eq!(dotted.parts().len(), 3);
        assert_eq!(dotted.parts()[1].name, "request");
        assert_eq!(dotted.parts()[1].span, 5..12);
        assert_eq!(dotted.span, 0..19);
        assert_eq!(name.to_string(), "http.request.method");
    }

    #[test]
    fn test_property_name_rejects_malformed_paths() {
        for bad in ["", "a.", ".a", "a..b", "1a", "0.b", "a b", "a-b"] {
            assert!(bad.parse::<PropertyName>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_identifier_validity() {
        assert!(Identifier::is_valid("_private"));
        assert!(Identifier::is_valid("User2"));
        assert!(!Identifier::is_valid("2User"));
        assert!(!Identifier::is_valid("Üser"));
    }

    #[test]
    fn test_dotted_name_requires_parts() {
        assert!(DottedName::new(Vec::new()).is_none());
    }

    #[test]
    fn test_segment_accessors() {
        let segment = Segment::Property(Property {
            hint: Some(Hint::new(HintKind::Capture, 1..2)),
            name: Some("User".parse().unwrap()),
            format: None,
            closed: true,
            span: 0..7,
        });

        assert_eq!(segment.kind(), SegmentKind::Property);
        assert_eq!(segment.hint().map(|hint| hint.kind), Some(HintKind::Capture));
        assert!(segment.is_placeholder());
        assert!(segment.is_closed());
        assert_eq!(segment.span(), 0..7);
    }

    #[test]
    fn test_hint_chars() {
        assert_eq!(HintKind::from_char('@'), Some(HintKind::Capture));
        assert_eq!(HintKind::from_char('$'), Some(HintKind::Stringify));
        assert_eq!(HintKind::from_char('#'), None);
        assert_eq!(HintKind::Stringify.to_string(), "$");
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(SegmentKind::GoProperty.opener(), Some("{{"));
        assert_eq!(SegmentKind::GoProperty.closer(), Some("}}"));
        assert_eq!(SegmentKind::BuiltinProperty.opener(), Some("${"));
        assert_eq!(SegmentKind::LiteralText.closer(), None);
    }
}
