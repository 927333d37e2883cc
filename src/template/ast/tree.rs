//! The parse root
//!
//! A [`Template`] owns its source text and the ordered segments built from it. It is produced
//! once per input by [`parse_template`](crate::template::parse_template) and never mutated
//! afterwards.
//!
//! Segments tile the source except for line breaks: a literal run stops at a line break, and
//! line breaks scanned before any content are not part of a segment. Those gaps are the
//! template's trivia; [`Template::reconstruct`] puts them back, so reconstructing always
//! reproduces the input byte for byte.

use super::nodes::{Segment, SegmentKind};
use super::range::{Range, SourceLocation};
use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub(crate) fn new(source: String, segments: Vec<Segment>) -> Self {
        Self { source, segments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Placeholder segments only, in source order.
    pub fn properties(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|segment| segment.is_placeholder())
    }

    pub fn count_of(&self, kind: SegmentKind) -> usize {
        self.segments
            .iter()
            .filter(|segment| segment.kind() == kind)
            .count()
    }

    /// The exact source text a segment was built from, delimiters included.
    pub fn raw_text(&self, segment: &Segment) -> &str {
        &self.source[segment.span()]
    }

    /// Byte spans not covered by any segment. Each one consists only of line break bytes.
    pub fn trivia(&self) -> Vec<ByteRange<usize>> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for segment in &self.segments {
            let span = segment.span();
            if span.start > cursor {
                gaps.push(cursor..span.start);
            }
            cursor = span.end;
        }
        if cursor < self.source.len() {
            gaps.push(cursor..self.source.len());
        }
        gaps
    }

    /// Rebuild the source from segment spans and the line break trivia between them.
    pub fn reconstruct(&self) -> String {
        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for segment in &self.segments {
            let span = segment.span();
            output.push_str(&self.source[cursor..span.start]);
            output.push_str(self.raw_text(segment));
            cursor = span.end;
        }
        output.push_str(&self.source[cursor..]);
        output
    }

    pub fn source_location(&self) -> SourceLocation {
        SourceLocation::new(&self.source)
    }

    /// Line/column range for a byte span of this template.
    pub fn location(&self, span: &ByteRange<usize>) -> Range {
        self.source_location().byte_range_to_range(span)
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Canonical S-expression rendering, one line, used by tests and the `ast-sexp` format.
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::template::formats::sexp::to_sexp_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_template;

    #[test]
    fn test_empty_template() {
        let template = parse_template("");
        assert!(template.is_empty());
        assert_eq!(template.reconstruct(), "");
        assert!(template.trivia().is_empty());
    }

    #[test]
    fn test_raw_text_slices_source() {
        let template = parse_template("a{Name}b");
        let raw: Vec<&str> = template.iter().map(|s| template.raw_text(s)).collect();
        assert_eq!(raw, vec!["a", "{Name}", "b"]);
    }

    #[test]
    fn test_trivia_holds_only_line_breaks() {
        let template = parse_template("first\r\n\nsecond {X}\n");
        let gaps: Vec<&str> = template
            .trivia()
            .into_iter()
            .map(|gap| &template.source()[gap])
            .collect();

        assert_eq!(gaps, vec!["\r\n\n", "\n"]);
        assert_eq!(template.reconstruct(), template.source());
    }

    #[test]
    fn test_properties_and_counts() {
        let template = parse_template("{A} and {{B}} and ${C}");

        assert_eq!(template.properties().count(), 3);
        assert_eq!(template.count_of(SegmentKind::LiteralText), 2);
        assert_eq!(template.count_of(SegmentKind::GoProperty), 1);
    }

    #[test]
    fn test_location_of_segment() {
        let template = parse_template("line one\n{Name}");
        let property = template.properties().next().unwrap();
        let location = template.location(&property.span());

        assert_eq!(location.start.line, 1);
        assert_eq!(location.start.column, 0);
        assert_eq!(location.end.column, 6);
    }
}
