//! Placeholder head grammar
//!
//! A placeholder head is the run of hint, dot, identifier and number tokens right after the
//! opener. Every part of a head is optional, so these parsers never fail; what matters is how
//! many tokens they consume. The reducer resumes at the end of the last consumed token and looks
//! at the raw bytes there for `:` or the closer.
//!
//! Grammar:
//!     property head := hint? property_name?
//!     go head       := "."? property_name?
//!     builtin head  := property_name?
//!     property_name := number | identifier ("." identifier)*
//!
//! A number commits the name to a numeric index and is never continued by a dotted path. A
//! trailing `.` with no identifier after it is left unconsumed.

use crate::template::ast::{
    DottedName, Hint, HintKind, Identifier, NumericIndex, PropertyName, SegmentKind,
};
use crate::template::token::Token;
use chumsky::{prelude::*, Stream};
use std::ops::Range;

/// Type alias for token with location
type TokenLocation = (Token, Range<usize>);

type ParserError = Simple<TokenLocation>;

/// The recognized part of a placeholder head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderHead {
    pub hint: Option<Hint>,
    /// Span of the Go `{{.Name}}` dot
    pub leading_dot: Option<Range<usize>>,
    pub name: Option<PropertyName>,
    /// Number of head tokens these parts were built from
    pub consumed: usize,
}

impl PlaceholderHead {
    fn new(
        hint: Option<Hint>,
        leading_dot: Option<Range<usize>>,
        name: Option<(PropertyName, usize)>,
    ) -> Self {
        let consumed = usize::from(hint.is_some())
            + usize::from(leading_dot.is_some())
            + name.as_ref().map_or(0, |(_, count)| *count);
        Self {
            hint,
            leading_dot,
            name: name.map(|(name, _)| name),
            consumed,
        }
    }

    /// End offset of the last consumed token.
    pub fn end(&self) -> Option<usize> {
        self.name
            .as_ref()
            .map(|name| name.span().end)
            .or_else(|| self.leading_dot.as_ref().map(|dot| dot.end))
            .or_else(|| self.hint.as_ref().map(|hint| hint.span.end))
    }
}

fn identifier() -> impl Parser<TokenLocation, Identifier, Error = ParserError> + Clone {
    filter_map(|span, (token, range): TokenLocation| match token {
        Token::Identifier(name) => Ok(Identifier::new(name, range)),
        other => Err(ParserError::expected_input_found(
            span,
            None,
            Some((other, range)),
        )),
    })
}

fn dot() -> impl Parser<TokenLocation, Range<usize>, Error = ParserError> + Clone {
    filter(|(token, _): &TokenLocation| matches!(token, Token::Dot)).map(|(_, range)| range)
}

fn hint() -> impl Parser<TokenLocation, Hint, Error = ParserError> + Clone {
    filter_map(|span, (token, range): TokenLocation| match token {
        Token::At => Ok(Hint::new(HintKind::Capture, range)),
        Token::Dollar => Ok(Hint::new(HintKind::Stringify, range)),
        other => Err(ParserError::expected_input_found(
            span,
            None,
            Some((other, range)),
        )),
    })
}

/// A property name together with the number of tokens it spans.
fn property_name() -> impl Parser<TokenLocation, (PropertyName, usize), Error = ParserError> + Clone
{
    let numeric = filter_map(|span, (token, range): TokenLocation| match token {
        Token::Number(value) => Ok((PropertyName::NumericIndex(NumericIndex::new(value, range)), 1)),
        other => Err(ParserError::expected_input_found(
            span,
            None,
            Some((other, range)),
        )),
    });

    let dotted = identifier()
        .then(dot().ignore_then(identifier()).repeated())
        .try_map(|(head, rest): (Identifier, Vec<Identifier>), span| {
            let count = 1 + 2 * rest.len();
            let mut parts = Vec::with_capacity(rest.len() + 1);
            parts.push(head);
            parts.extend(rest);
            DottedName::new(parts)
                .map(|name| (PropertyName::DottedName(name), count))
                .ok_or_else(|| ParserError::custom(span, "dotted name without parts"))
        });

    numeric.or(dotted)
}

fn run<P>(parser: P, tokens: &[TokenLocation]) -> PlaceholderHead
where
    P: Parser<TokenLocation, PlaceholderHead, Error = ParserError>,
{
    if tokens.is_empty() {
        return PlaceholderHead::default();
    }

    let stream = Stream::from_iter(
        0..0,
        tokens
            .iter()
            .cloned()
            .map(|(token, span)| ((token, span.clone()), span)),
    );

    match parser
        .then(any::<TokenLocation, ParserError>().repeated())
        .parse(stream)
    {
        Ok((head, _remainder)) => head,
        Err(_) => PlaceholderHead::default(),
    }
}

/// Parse the head of a placeholder of the given kind from its head tokens.
pub fn parse_head(kind: SegmentKind, tokens: &[TokenLocation]) -> PlaceholderHead {
    match kind {
        SegmentKind::Property => run(
            hint()
                .or_not()
                .then(property_name().or_not())
                .map(|(hint, name)| PlaceholderHead::new(hint, None, name)),
            tokens,
        ),
        SegmentKind::GoProperty => run(
            dot()
                .or_not()
                .then(property_name().or_not())
                .map(|(dot, name)| PlaceholderHead::new(None, dot, name)),
            tokens,
        ),
        SegmentKind::BuiltinProperty => run(
            property_name()
                .or_not()
                .map(|name| PlaceholderHead::new(None, None, name)),
            tokens,
        ),
        SegmentKind::LiteralText => PlaceholderHead::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::token::lex_head;

    fn head(kind: SegmentKind, text: &str) -> PlaceholderHead {
        parse_head(kind, &lex_head(text, 0))
    }

    #[test]
    fn test_property_head_with_hint() {
        let parsed = head(SegmentKind::Property, "@User.Name");

        assert_eq!(parsed.hint.as_ref().map(|h| h.kind), Some(HintKind::Capture));
        assert_eq!(parsed.name.as_ref().map(|n| n.to_string()), Some("User.Name".into()));
        assert_eq!(parsed.consumed, 4);
        assert_eq!(parsed.end(), Some(10));
    }

    #[test]
    fn test_numeric_name_is_never_dotted() {
        let parsed = head(SegmentKind::Property, "0.b");

        assert_eq!(parsed.name.as_ref().and_then(PropertyName::as_numeric), Some(0));
        assert_eq!(parsed.consumed, 1);
        assert_eq!(parsed.end(), Some(1));
    }

    #[test]
    fn test_trailing_dot_is_left_over() {
        let parsed = head(SegmentKind::Property, "a.b.");

        assert_eq!(parsed.name.as_ref().map(|n| n.to_string()), Some("a.b".into()));
        assert_eq!(parsed.consumed, 3);
    }

    #[test]
    fn test_go_head_leading_dot() {
        let parsed = head(SegmentKind::GoProperty, ".Name");

        assert_eq!(parsed.leading_dot, Some(0..1));
        assert_eq!(parsed.consumed, 2);

        // Hints belong to single brace properties only
        let parsed = head(SegmentKind::GoProperty, "@Name");
        assert_eq!(parsed.consumed, 0);
        assert!(parsed.hint.is_none());
    }

    #[test]
    fn test_builtin_head() {
        let parsed = head(SegmentKind::BuiltinProperty, "Env");
        assert_eq!(parsed.consumed, 1);

        let parsed = head(SegmentKind::BuiltinProperty, "$Env");
        assert_eq!(parsed.consumed, 0);
        assert!(parsed.name.is_none());
    }

    #[test]
    fn test_empty_head() {
        assert_eq!(head(SegmentKind::Property, ""), PlaceholderHead::default());
    }
}
