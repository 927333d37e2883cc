//! Classified spans for syntax highlighting
//!
//! [`Template::highlights`] walks the tree once and returns ordered, non-overlapping spans.
//! Delimiters are not stored as nodes, so punctuation spans are derived from the gaps between
//! a placeholder's children: whatever is not a hint, name or format inside a placeholder is
//! punctuation (openers, closers, `:`, `.`, the Go leading dot).

use super::nodes::{PropertyName, Segment};
use super::tree::Template;
use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    LiteralText,
    Punctuation,
    Hint,
    PropertyName,
    NumericIndex,
    FormatSpec,
}

impl HighlightKind {
    /// Standard editor token type for this kind, so existing themes color it sensibly.
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightKind::LiteralText => "string",
            HighlightKind::Punctuation => "punctuation",
            HighlightKind::Hint => "operator",
            HighlightKind::PropertyName => "variable",
            HighlightKind::NumericIndex => "number",
            HighlightKind::FormatSpec => "string.special",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub span: Range<usize>,
    pub kind: HighlightKind,
}

impl Highlight {
    pub fn new(span: Range<usize>, kind: HighlightKind) -> Self {
        Self { span, kind }
    }
}

impl Template {
    pub fn highlights(&self) -> Vec<Highlight> {
        let mut highlights = Vec::new();
        for segment in self.iter() {
            match segment {
                Segment::LiteralText(literal) => {
                    highlights.push(Highlight::new(literal.span.clone(), HighlightKind::LiteralText))
                }
                _ => highlight_placeholder(segment, &mut highlights),
            }
        }
        highlights
    }
}

fn highlight_placeholder(segment: &Segment, highlights: &mut Vec<Highlight>) {
    let mut children: Vec<Highlight> = Vec::new();
    if let Some(hint) = segment.hint() {
        children.push(Highlight::new(hint.span.clone(), HighlightKind::Hint));
    }
    if let Some(name) = segment.name() {
        match name {
            PropertyName::NumericIndex(index) => {
                children.push(Highlight::new(index.span.clone(), HighlightKind::NumericIndex))
            }
            // Dots between identifiers fall into the gaps and become punctuation
            PropertyName::DottedName(dotted) => children.extend(
                dotted
                    .parts()
                    .iter()
                    .map(|part| Highlight::new(part.span.clone(), HighlightKind::PropertyName)),
            ),
        }
    }
    if let Some(format) = segment.format().filter(|format| !format.is_empty()) {
        children.push(Highlight::new(format.span.clone(), HighlightKind::FormatSpec));
    }

    let span = segment.span();
    let mut cursor = span.start;
    for child in children {
        if child.span.start > cursor {
            highlights.push(Highlight::new(cursor..child.span.start, HighlightKind::Punctuation));
        }
        cursor = child.span.end;
        highlights.push(child);
    }
    if span.end > cursor {
        highlights.push(Highlight::new(cursor..span.end, HighlightKind::Punctuation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_template;

    fn classify(source: &str) -> Vec<(&str, HighlightKind)> {
        let template = parse_template(source);
        template
            .highlights()
            .into_iter()
            .map(|h| (&source[h.span], h.kind))
            .collect()
    }

    #[test]
    fn test_property_highlights() {
        use HighlightKind::*;
        assert_eq!(
            classify("Hi {@User.Name:j}"),
            vec![
                ("Hi ", LiteralText),
                ("{", Punctuation),
                ("@", Hint),
                ("User", PropertyName),
                (".", Punctuation),
                ("Name", PropertyName),
                (":", Punctuation),
                ("j", FormatSpec),
                ("}", Punctuation),
            ]
        );
    }

    #[test]
    fn test_go_and_builtin_highlights() {
        use HighlightKind::*;
        assert_eq!(
            classify("{{.Name}}${0}"),
            vec![
                ("{{.", Punctuation),
                ("Name", PropertyName),
                ("}}", Punctuation),
                ("${", Punctuation),
                ("0", NumericIndex),
                ("}", Punctuation),
            ]
        );
    }

    #[test]
    fn test_highlights_are_ordered_and_disjoint() {
        let template = parse_template("a {b} {{c:d}}\n${e} {0.x} {");
        let highlights = template.highlights();
        for pair in highlights.windows(2) {
            assert!(pair[0].span.end <= pair[1].span.start);
        }
        assert!(highlights.iter().all(|h| !h.span.is_empty()));
    }
}
