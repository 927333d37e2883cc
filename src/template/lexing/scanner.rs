//! Segment scanner
//!
//!     Decides, byte by byte, whether text is literal or the start of a placeholder. It emits the
//!     longest literal run it can and stops right before the first opener that can be completed
//!     on the current line. When no run is open at such an opener it declines instead, leaving
//!     the cursor on the opener so the reducer can take over.
//!
//! Rules
//!
//!     - `\r` / `\n` end an open run (the break is not part of it). With no run open, breaks are
//!       skipped as trivia.
//!     - `{{`: always ends an open run. With no run open it declines when a `}}` follows on the
//!       line, otherwise the two braces start a literal run.
//!     - `{` followed by `}`, `:`, `@`, `$`, an identifier start or a digit is an opener when a
//!       `}` follows on the line. Any other `{` is literal.
//!     - `${` is an opener when a `}` follows on the line. A lone `$` is literal.
//!     - Everything else is literal.
//!
//!     Lookahead is answered by the cursor's per-line cache and never crosses a line break, so a
//!     scan is linear in the length of the input.

use super::cursor::{is_line_break, Cursor};
use std::ops::Range;

/// Token kinds the caller can accept at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expected {
    pub literal_text: bool,
}

impl Expected {
    pub fn literal() -> Self {
        Self { literal_text: true }
    }

    pub fn nothing() -> Self {
        Self {
            literal_text: false,
        }
    }
}

/// State carried between scanner calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Set once any non line break byte has been scanned.
    pub started: bool,
}

impl ScanState {
    /// One byte: `1` when started, `0` otherwise.
    pub fn serialize(&self) -> [u8; 1] {
        [u8::from(self.started)]
    }

    /// Restores state written by [`ScanState::serialize`]. An empty buffer is a fresh state.
    pub fn deserialize(buffer: &[u8]) -> Self {
        Self {
            started: buffer.first().is_some_and(|byte| *byte != 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Literal(Range<usize>),
    /// No literal here: the cursor is on an opener, or at end of input.
    Decline,
}

/// Bytes that can follow `{` in a property: `}`, `:`, a hint, an identifier start or a digit.
pub fn is_property_start(byte: u8) -> bool {
    matches!(byte, b'}' | b':' | b'@' | b'$' | b'_') || byte.is_ascii_alphanumeric()
}

/// Scan one literal run starting at the cursor.
pub fn scan_literal(cursor: &mut Cursor<'_>, expected: Expected, state: &mut ScanState) -> ScanOutcome {
    if !expected.literal_text {
        return ScanOutcome::Decline;
    }

    let mut run_start: Option<usize> = None;

    while let Some(byte) = cursor.peek() {
        let pos = cursor.pos();

        if is_line_break(byte) {
            if run_start.is_some() {
                break;
            }
            cursor.advance(1);
            continue;
        }

        match byte {
            b'{' if cursor.peek_at(1) == Some(b'{') => {
                if run_start.is_some() {
                    break;
                }
                if cursor.pair_closes_on_line(pos + 2) {
                    state.started = true;
                    log::trace!("scanner: decline at `{{{{` ({})", pos);
                    return ScanOutcome::Decline;
                }
                // Unterminated `{{` opens a literal run
                run_start = Some(pos);
                state.started = true;
                cursor.advance(2);
                continue;
            }
            b'{' if cursor.peek_at(1).is_some_and(is_property_start)
                && cursor.closes_on_line(pos + 1) =>
            {
                if run_start.is_some() {
                    break;
                }
                state.started = true;
                log::trace!("scanner: decline at `{{` ({})", pos);
                return ScanOutcome::Decline;
            }
            b'$' if cursor.peek_at(1) == Some(b'{') && cursor.closes_on_line(pos + 2) => {
                if run_start.is_some() {
                    break;
                }
                state.started = true;
                log::trace!("scanner: decline at `${{` ({})", pos);
                return ScanOutcome::Decline;
            }
            _ => {}
        }

        run_start.get_or_insert(pos);
        state.started = true;
        cursor.advance(1);
    }

    match run_start {
        Some(start) => {
            log::trace!("scanner: literal {}..{}", start, cursor.pos());
            ScanOutcome::Literal(start..cursor.pos())
        }
        None => ScanOutcome::Decline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs the scanner the way the reducer does, skipping one byte on each decline,
    /// and collects the literal runs.
    fn literals(source: &str) -> Vec<&str> {
        let mut cursor = Cursor::new(source);
        let mut state = ScanState::default();
        let mut runs = Vec::new();
        while !cursor.is_eof() {
            match scan_literal(&mut cursor, Expected::literal(), &mut state) {
                ScanOutcome::Literal(span) => runs.push(&source[span]),
                ScanOutcome::Decline => cursor.advance(1),
            }
        }
        runs
    }

    fn first(source: &str) -> (ScanOutcome, usize) {
        let mut cursor = Cursor::new(source);
        let mut state = ScanState::default();
        let outcome = scan_literal(&mut cursor, Expected::literal(), &mut state);
        (outcome, cursor.pos())
    }

    #[test]
    fn test_plain_text_is_one_run() {
        assert_eq!(first("hello world"), (ScanOutcome::Literal(0..11), 11));
    }

    #[test]
    fn test_run_stops_before_property() {
        assert_eq!(first("a{Name}b"), (ScanOutcome::Literal(0..1), 1));
        assert_eq!(first("{Name}"), (ScanOutcome::Decline, 0));
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        assert_eq!(first("a{b"), (ScanOutcome::Literal(0..3), 3));
        assert_eq!(first("{ x }"), (ScanOutcome::Literal(0..5), 5));
    }

    #[test]
    fn test_closer_on_next_line_does_not_count() {
        assert_eq!(literals("a{Name\n:fmt}"), vec!["a{Name", ":fmt}"]);
    }

    #[test]
    fn test_dollar_forms() {
        assert_eq!(first("cost $5"), (ScanOutcome::Literal(0..7), 7));
        assert_eq!(first("x${Env}"), (ScanOutcome::Literal(0..1), 1));
        assert_eq!(first("${Env}"), (ScanOutcome::Decline, 0));
        assert_eq!(first("${Env"), (ScanOutcome::Literal(0..5), 5));
    }

    #[test]
    fn test_double_brace() {
        assert_eq!(first("{{Name}}"), (ScanOutcome::Decline, 0));
        assert_eq!(first("a{{Name}}"), (ScanOutcome::Literal(0..1), 1));
        // Unterminated: an open run still breaks, a fresh run absorbs the braces
        assert_eq!(first("a{{Name"), (ScanOutcome::Literal(0..1), 1));
        assert_eq!(first("{{Name"), (ScanOutcome::Literal(0..6), 6));
    }

    #[test]
    fn test_leading_line_breaks_are_skipped() {
        assert_eq!(first("\n\r\nabc\n"), (ScanOutcome::Literal(3..6), 6));
        assert_eq!(first("\n\n"), (ScanOutcome::Decline, 2));
        assert_eq!(first("\n{A}"), (ScanOutcome::Decline, 1));
    }

    #[test]
    fn test_not_expected_declines_without_moving() {
        let mut cursor = Cursor::new("text");
        let mut state = ScanState::default();
        let outcome = scan_literal(&mut cursor, Expected::nothing(), &mut state);

        assert_eq!(outcome, ScanOutcome::Decline);
        assert_eq!(cursor.pos(), 0);
        assert!(!state.started);
    }

    #[test]
    fn test_started_flag() {
        let mut state = ScanState::default();
        scan_literal(&mut Cursor::new("\n\n"), Expected::literal(), &mut state);
        assert!(!state.started);

        scan_literal(&mut Cursor::new("x"), Expected::literal(), &mut state);
        assert!(state.started);
    }

    #[test]
    fn test_started_flag_set_when_declining_at_opener() {
        for source in ["{A}", "{{A}}", "${A}", "\n{A}"] {
            let mut state = ScanState::default();
            let outcome = scan_literal(&mut Cursor::new(source), Expected::literal(), &mut state);

            assert_eq!(outcome, ScanOutcome::Decline, "{:?}", source);
            assert!(state.started, "{:?}", source);
        }
    }

    #[test]
    fn test_state_serialization() {
        let started = ScanState { started: true };
        assert_eq!(started.serialize(), [1]);
        assert_eq!(ScanState::deserialize(&started.serialize()), started);
        assert_eq!(ScanState::deserialize(&[0]), ScanState::default());
        assert_eq!(ScanState::deserialize(&[]), ScanState::default());
    }
}
