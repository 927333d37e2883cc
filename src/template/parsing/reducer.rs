//! Reducer
//!
//!     Drives the scanner and assembles segments. Each round asks the scanner for a literal run;
//!     when it declines the cursor sits on an opener and the reducer builds one placeholder:
//!
//!         1. consume the opener (`{{`, `${` or `{`)
//!         2. lex the head with the logos lexer, stopping at the first token that is not a
//!            hint, dot, identifier or number (`:`, a closer, whitespace, a brace)
//!         3. parse the head (hint, leading dot, name) from those tokens
//!         4. on `:` take the raw format text up to the first closer or the line end
//!         5. consume the closer if it is there
//!
//!     Anything that does not fit stops the placeholder early: the node is reduced at the end of
//!     the last consumed token with `closed = false`, and the remaining bytes go back to the
//!     scanner. The opener is always consumed, so every round makes progress.
//!
//!     While building segments the reducer also records the token stream, line breaks included,
//!     which is what [`tokenize`](crate::template::lexing::tokenize) returns.

use super::grammar::{parse_head, PlaceholderHead};
use crate::template::ast::{
    BuiltinProperty, FormatSpec, GoProperty, LiteralText, Property, Segment, SegmentKind,
};
use crate::template::lexing::cursor::Cursor;
use crate::template::lexing::scanner::{scan_literal, Expected, ScanOutcome, ScanState};
use crate::template::token::{lex_head, TemplateToken, Token, TokenStream};
use std::ops::Range;

pub struct Reducer<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    state: ScanState,
    segments: Vec<Segment>,
    tokens: TokenStream,
}

impl<'a> Reducer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            state: ScanState::default(),
            segments: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Reduce the whole input. Returns the segments and the token stream they were built from.
    pub fn run(mut self) -> (Vec<Segment>, TokenStream) {
        loop {
            let before = self.cursor.pos();
            match scan_literal(&mut self.cursor, Expected::literal(), &mut self.state) {
                ScanOutcome::Literal(span) => {
                    self.record_line_breaks(before, span.start);
                    self.push_literal(span);
                }
                ScanOutcome::Decline => {
                    self.record_line_breaks(before, self.cursor.pos());
                    if self.cursor.is_eof() {
                        break;
                    }
                    self.reduce_placeholder();
                }
            }
        }

        log::debug!(
            "reducer: {} segments, {} tokens",
            self.segments.len(),
            self.tokens.len()
        );
        (self.segments, self.tokens)
    }

    fn record_line_breaks(&mut self, from: usize, to: usize) {
        let mut pos = from;
        while pos < to {
            let len = Cursor::at(self.source, pos).line_break_len().max(1);
            let end = (pos + len).min(to);
            self.tokens.push((
                TemplateToken::LineBreak(self.source[pos..end].to_string()),
                pos..end,
            ));
            pos = end;
        }
    }

    fn push_literal(&mut self, span: Range<usize>) {
        let text = &self.source[span.clone()];
        self.tokens
            .push((TemplateToken::LiteralText(text.to_string()), span.clone()));
        self.segments
            .push(Segment::LiteralText(LiteralText::new(text, span)));
    }

    fn reduce_placeholder(&mut self) {
        let start = self.cursor.pos();
        let (kind, open_token, opener, closer) = if self.cursor.starts_with("{{") {
            (SegmentKind::GoProperty, TemplateToken::GoPropertyOpen, "{{", "}}")
        } else if self.cursor.starts_with("${") {
            (SegmentKind::BuiltinProperty, TemplateToken::BuiltinOpen, "${", "}")
        } else if self.cursor.starts_with("{") {
            (SegmentKind::Property, TemplateToken::PropertyOpen, "{", "}")
        } else {
            // The scanner only declines on openers; keep going with one literal char
            let len = self.source[start..].chars().next().map_or(1, char::len_utf8);
            log::debug!("reducer: no opener at {}, taking {} byte(s) as literal", start, len);
            self.cursor.advance(len);
            self.push_literal(start..start + len);
            return;
        };

        let line_end = self.cursor.line_end();

        self.tokens.push((open_token, start..start + opener.len()));
        self.cursor.advance(opener.len());

        let head_start = self.cursor.pos();
        let head_tokens = lex_head(&self.source[head_start..line_end], head_start);
        let head = parse_head(kind, &head_tokens);
        for (token, span) in &head_tokens[..head.consumed] {
            if let Some(token) = to_template_token(token, &self.source[span.clone()]) {
                self.tokens.push((token, span.clone()));
            }
        }
        self.cursor.advance_to(head.end().unwrap_or(head_start));

        let format = if self.cursor.peek() == Some(b':') {
            let colon = self.cursor.pos();
            self.tokens.push((TemplateToken::Colon, colon..colon + 1));
            self.cursor.advance(1);

            let format_start = self.cursor.pos();
            let format_end = self.source[format_start..line_end]
                .find(closer)
                .map_or(line_end, |offset| format_start + offset);
            let text = &self.source[format_start..format_end];
            if !text.is_empty() {
                self.tokens.push((
                    TemplateToken::FormatText(text.to_string()),
                    format_start..format_end,
                ));
            }
            self.cursor.advance_to(format_end);
            Some(FormatSpec::new(text, format_start..format_end))
        } else {
            None
        };

        let closed = self.cursor.starts_with(closer);
        if closed {
            let close_token = match kind {
                SegmentKind::GoProperty => TemplateToken::GoPropertyClose,
                _ => TemplateToken::PropertyClose,
            };
            let pos = self.cursor.pos();
            self.tokens.push((close_token, pos..pos + closer.len()));
            self.cursor.advance(closer.len());
        } else {
            log::debug!(
                "reducer: {} at {} reduced without '{}'",
                kind,
                start,
                closer
            );
        }

        let span = start..self.cursor.pos();
        log::trace!("reducer: {} {:?}", kind, &self.source[span.clone()]);
        self.segments
            .push(build_segment(kind, head, format, closed, span));
    }
}

fn to_template_token(token: &Token, raw: &str) -> Option<TemplateToken> {
    use crate::template::ast::HintKind;

    match token {
        Token::At => Some(TemplateToken::Hint(HintKind::Capture)),
        Token::Dollar => Some(TemplateToken::Hint(HintKind::Stringify)),
        Token::Dot => Some(TemplateToken::Dot),
        Token::Identifier(name) => Some(TemplateToken::Identifier(name.clone())),
        Token::Number(_) => Some(TemplateToken::Number(raw.to_string())),
        // Never part of a parsed head
        _ => None,
    }
}

fn build_segment(
    kind: SegmentKind,
    head: PlaceholderHead,
    format: Option<FormatSpec>,
    closed: bool,
    span: Range<usize>,
) -> Segment {
    match kind {
        SegmentKind::GoProperty => Segment::GoProperty(GoProperty {
            leading_dot: head.leading_dot.is_some(),
            name: head.name,
            format,
            closed,
            span,
        }),
        SegmentKind::BuiltinProperty => Segment::BuiltinProperty(BuiltinProperty {
            name: head.name,
            format,
            closed,
            span,
        }),
        _ => Segment::Property(Property {
            hint: head.hint,
            name: head.name,
            format,
            closed,
            span,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(source: &str) -> Vec<Segment> {
        Reducer::new(source).run().0
    }

    #[test]
    fn test_literal_and_property() {
        let segments = segments("a{Name}b");

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].as_literal().map(|l| l.text.as_str()), Some("a"));
        let property = segments[1].as_property().unwrap();
        assert!(property.closed);
        assert_eq!(property.span, 1..7);
        assert_eq!(property.name.as_ref().unwrap().to_string(), "Name");
        assert_eq!(segments[2].as_literal().map(|l| l.text.as_str()), Some("b"));
    }

    #[test]
    fn test_numeric_followed_by_dot_recovers() {
        let segments = segments("{0.b}");

        assert_eq!(segments.len(), 2);
        let property = segments[0].as_property().unwrap();
        assert!(!property.closed);
        assert_eq!(property.span, 0..2);
        assert_eq!(property.name.as_ref().and_then(|n| n.as_numeric()), Some(0));
        assert_eq!(segments[1].as_literal().map(|l| l.text.as_str()), Some(".b}"));
    }

    #[test]
    fn test_format_runs_to_first_closer() {
        let segments = segments("{Time:HH:mm:ss}");
        let format = segments[0].format().unwrap();
        assert_eq!(format.text, "HH:mm:ss");
        assert_eq!(format.span, 6..14);

        let segments = self::segments("{{A:x}y}}");
        let go = segments[0].as_go_property().unwrap();
        assert_eq!(go.format.as_ref().map(|f| f.text.as_str()), Some("x}y"));
        assert!(go.closed);
    }

    #[test]
    fn test_single_closer_does_not_close_go_property() {
        let segments = segments("{{a}b}}");

        let go = segments[0].as_go_property().unwrap();
        assert!(!go.closed);
        assert_eq!(go.span, 0..3);
        assert_eq!(segments[1].as_literal().map(|l| l.text.as_str()), Some("}b}}"));
    }

    #[test]
    fn test_whitespace_in_head_stops_placeholder() {
        let segments = segments("{Name }");

        assert!(!segments[0].is_closed());
        assert_eq!(segments[0].span(), 0..5);
        assert_eq!(segments[1].as_literal().map(|l| l.text.as_str()), Some(" }"));
    }

    #[test]
    fn test_token_stream_covers_input() {
        let source = "x\r\n{@A:f}";
        let (_, tokens) = Reducer::new(source).run();
        let names: Vec<&str> = tokens.iter().map(|(token, _)| token.name()).collect();

        assert_eq!(
            names,
            vec![
                "literal",
                "line-break",
                "property-open",
                "hint",
                "identifier",
                "colon",
                "format",
                "property-close"
            ]
        );
        let covered: usize = tokens.iter().map(|(_, span)| span.len()).sum();
        assert_eq!(covered, source.len());
    }

    #[test]
    fn test_brace_dense_line_stays_linear() {
        let n = 30_000;
        let source = "{a ".repeat(n) + "}";

        let started = std::time::Instant::now();
        let segments = segments(&source);
        let elapsed = started.elapsed();

        assert_eq!(segments.len(), 2 * n);
        assert!(segments.iter().filter(|s| s.is_placeholder()).all(|s| !s.is_closed()));
        assert!(
            elapsed < std::time::Duration::from_secs(5),
            "{} bytes took {:?}",
            source.len(),
            elapsed
        );
    }
}
