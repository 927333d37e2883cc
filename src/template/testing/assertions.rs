//! Fluent assertions over templates and their segments

use super::matchers::TextMatch;
use crate::template::ast::{HintKind, Segment, SegmentKind, Template};

/// Entry point: `assert_template(&template).segment_count(3).segment(1, |s| ...)`
pub fn assert_template(template: &Template) -> TemplateAssertion<'_> {
    TemplateAssertion { template }
}

/// One line summary of every segment, used in failure messages
fn summarize_segments(template: &Template) -> String {
    template
        .iter()
        .map(|segment| format!("{}({:?})", segment.kind(), template.raw_text(segment)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct TemplateAssertion<'a> {
    template: &'a Template,
}

impl<'a> TemplateAssertion<'a> {
    pub fn segment_count(self, expected: usize) -> Self {
        let actual = self.template.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} segments, found {} segments: [{}]",
            expected,
            actual,
            summarize_segments(self.template)
        );
        self
    }

    pub fn property_count(self, expected: usize) -> Self {
        let actual = self.template.properties().count();
        assert_eq!(
            actual,
            expected,
            "Expected {} placeholders, found {}: [{}]",
            expected,
            actual,
            summarize_segments(self.template)
        );
        self
    }

    /// The segment kinds, in order
    pub fn kinds(self, expected: &[SegmentKind]) -> Self {
        let actual: Vec<SegmentKind> = self.template.iter().map(Segment::kind).collect();
        assert_eq!(
            actual,
            expected,
            "Segment kinds differ: [{}]",
            summarize_segments(self.template)
        );
        self
    }

    /// Reconstructing from spans gives back the source
    pub fn reconstructs(self) -> Self {
        assert_eq!(
            self.template.reconstruct(),
            self.template.source(),
            "Reconstructed text differs from source"
        );
        self
    }

    pub fn sexp(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.template.to_string(), "sexp");
        self
    }

    pub fn segment<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SegmentAssertion<'a>),
    {
        let segment = self.template.get(index).unwrap_or_else(|| {
            panic!(
                "Segment index {} out of bounds (template has {} segments)",
                index,
                self.template.len()
            )
        });
        assertion(SegmentAssertion {
            template: self.template,
            segment,
            context: format!("segments[{}]", index),
        });
        self
    }
}

pub struct SegmentAssertion<'a> {
    template: &'a Template,
    segment: &'a Segment,
    context: String,
}

impl<'a> SegmentAssertion<'a> {
    fn expect_kind(&self, kind: SegmentKind) {
        assert_eq!(
            self.segment.kind(),
            kind,
            "{}: Expected {}, found {} {:?}",
            self.context,
            kind,
            self.segment.kind(),
            self.template.raw_text(self.segment)
        );
    }

    pub fn assert_literal(self) -> LiteralAssertion<'a> {
        self.expect_kind(SegmentKind::LiteralText);
        LiteralAssertion {
            segment: self.segment,
            context: self.context,
        }
    }

    pub fn assert_property(self) -> PlaceholderAssertion<'a> {
        self.expect_kind(SegmentKind::Property);
        self.into_placeholder()
    }

    pub fn assert_go_property(self) -> PlaceholderAssertion<'a> {
        self.expect_kind(SegmentKind::GoProperty);
        self.into_placeholder()
    }

    pub fn assert_builtin_property(self) -> PlaceholderAssertion<'a> {
        self.expect_kind(SegmentKind::BuiltinProperty);
        self.into_placeholder()
    }

    fn into_placeholder(self) -> PlaceholderAssertion<'a> {
        PlaceholderAssertion {
            template: self.template,
            segment: self.segment,
            context: self.context,
        }
    }
}

pub struct LiteralAssertion<'a> {
    segment: &'a Segment,
    context: String,
}

impl LiteralAssertion<'_> {
    fn text_of(&self) -> &str {
        self.segment
            .as_literal()
            .map(|literal| literal.text.as_str())
            .unwrap_or_default()
    }

    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.text_of(), &self.context);
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(self.text_of(), &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(self.text_of(), &self.context);
        self
    }
}

/// Assertions shared by the three placeholder kinds
pub struct PlaceholderAssertion<'a> {
    template: &'a Template,
    segment: &'a Segment,
    context: String,
}

impl PlaceholderAssertion<'_> {
    pub fn raw(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string())
            .assert(self.template.raw_text(self.segment), &self.context);
        self
    }

    pub fn hint(self, expected: HintKind) -> Self {
        let actual = self.segment.hint().map(|hint| hint.kind);
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected hint {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn no_hint(self) -> Self {
        assert!(
            self.segment.hint().is_none(),
            "{}: Expected no hint",
            self.context
        );
        self
    }

    /// Dotted name path, e.g. `"http.method"`
    pub fn name(self, expected: &str) -> Self {
        let actual = self
            .segment
            .name()
            .and_then(|name| name.as_dotted())
            .map(|dotted| dotted.path());
        assert_eq!(
            actual.as_deref(),
            Some(expected),
            "{}: Expected dotted name {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn numeric(self, expected: u64) -> Self {
        let actual = self.segment.name().and_then(|name| name.as_numeric());
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected numeric index {}",
            self.context,
            expected
        );
        self
    }

    pub fn no_name(self) -> Self {
        assert!(
            self.segment.name().is_none(),
            "{}: Expected no property name, found {:?}",
            self.context,
            self.segment.name()
        );
        self
    }

    pub fn format(self, expected: &str) -> Self {
        let actual = self.segment.format().map(|format| format.text.as_str());
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected format {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn no_format(self) -> Self {
        assert!(
            self.segment.format().is_none(),
            "{}: Expected no format",
            self.context
        );
        self
    }

    pub fn closed(self) -> Self {
        assert!(
            self.segment.is_closed(),
            "{}: Expected a closed placeholder",
            self.context
        );
        self
    }

    pub fn unclosed(self) -> Self {
        assert!(
            !self.segment.is_closed(),
            "{}: Expected an unclosed placeholder",
            self.context
        );
        self
    }

    /// Only meaningful for go properties
    pub fn leading_dot(self, expected: bool) -> Self {
        let actual = self
            .segment
            .as_go_property()
            .is_some_and(|go| go.leading_dot);
        assert_eq!(
            actual, expected,
            "{}: Expected leading_dot = {}",
            self.context, expected
        );
        self
    }
}
