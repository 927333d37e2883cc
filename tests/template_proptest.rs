//! Property-based tests for the template parser
//!
//! Inputs are biased toward the characters that matter to the scanner (braces, `$`, `@`, `:`,
//! `.` and line breaks) so that openers, closers and recovery paths are hit constantly.

use mtlog_template::parse_template;
use mtlog_template::template::ast::{Segment, SegmentKind};
use mtlog_template::template::lexing::tokenize;
use mtlog_template::template::token::detokenize;
use proptest::prelude::*;

/// Template-ish text: mostly syntax characters, some identifiers, digits and line breaks
fn template_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => prop::sample::select(vec![
                "{", "}", "{{", "}}", "${", "$", "@", ":", ".", " ",
            ])
            .prop_map(str::to_string),
            3 => "[A-Za-z_][A-Za-z0-9_]{0,6}",
            1 => "[0-9]{1,3}",
            1 => prop::sample::select(vec!["\n", "\r\n", "\r"]).prop_map(str::to_string),
            1 => "[é漢 -~]{1,3}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn parsing_never_panics(source in any::<String>()) {
        let _ = parse_template(&source);
    }

    #[test]
    fn spans_reconstruct_the_source(source in template_text()) {
        let template = parse_template(&source);
        prop_assert_eq!(template.reconstruct(), source);
    }

    #[test]
    fn token_stream_round_trips(source in template_text()) {
        prop_assert_eq!(detokenize(&tokenize(&source)), source);
    }

    #[test]
    fn segments_are_ordered_and_disjoint(source in template_text()) {
        let template = parse_template(&source);
        let mut previous_end = 0;
        for segment in template.iter() {
            let span = segment.span();
            prop_assert!(span.start >= previous_end);
            prop_assert!(span.end > span.start);
            previous_end = span.end;
        }
    }

    #[test]
    fn trivia_is_only_line_breaks(source in template_text()) {
        let template = parse_template(&source);
        for gap in template.trivia() {
            prop_assert!(source[gap].bytes().all(|b| b == b'\n' || b == b'\r'));
        }
    }

    #[test]
    fn no_segment_crosses_a_line_break(source in template_text()) {
        let template = parse_template(&source);
        for segment in template.iter() {
            let raw = template.raw_text(segment);
            prop_assert!(!raw.contains('\n') && !raw.contains('\r'), "segment {:?}", raw);
        }
    }

    #[test]
    fn hints_only_in_properties(source in template_text()) {
        let template = parse_template(&source);
        for segment in template.iter() {
            if segment.hint().is_some() {
                prop_assert_eq!(segment.kind(), SegmentKind::Property);
            }
        }
    }

    #[test]
    fn closed_placeholders_end_with_their_closer(source in template_text()) {
        let template = parse_template(&source);
        for segment in template.iter().filter(|segment| segment.is_closed()) {
            if let Some(closer) = segment.kind().closer() {
                prop_assert!(template.raw_text(segment).ends_with(closer));
            }
        }
    }

    #[test]
    fn brace_free_line_is_one_literal(source in "[A-Za-z0-9 $@:.,!}é-]{1,40}") {
        let template = parse_template(&source);
        prop_assert_eq!(template.len(), 1);
        match template.get(0) {
            Some(Segment::LiteralText(literal)) => prop_assert_eq!(&literal.text, &source),
            other => prop_assert!(false, "expected one literal, got {:?}", other),
        }
    }
}
