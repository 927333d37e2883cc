//! Position and location tracking for template sources
//!
//! Every node in the template tree stores the byte span it was built from. Tooling such as
//! editors wants line:column positions instead, so this module converts between the two.
//!
//! ## Types
//!
//! - [`Position`] - A zero-based line:column position
//! - [`Range`] - A byte span plus its start/end positions
//! - [`SourceLocation`] - Converts byte offsets to positions for one source string
//!
//! Lines end at `\n`, at `\r\n`, or at a lone `\r`, the same terminators the scanner
//! recognizes. Columns are byte offsets from the start of the line.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// A line:column position in a template source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A byte span together with the positions of its two ends
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// Whether `pos` falls inside this range. The end position is inclusive so a cursor
    /// placed right after a placeholder still hits it.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Whether the two ranges share at least one position
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0..0, Position::default(), Position::default())
    }
}

/// Fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0];

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    line_starts.push(i + 2);
                    i += 2;
                    continue;
                }
                b'\r' | b'\n' => line_starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&byte_offset) {
            Ok(line) => line,
            Err(insert_at) => insert_at.saturating_sub(1),
        };
        Position::new(line, byte_offset - self.line_starts[line])
    }

    /// Convert a line/column position back to a byte offset, if the line exists
    pub fn position_to_byte(&self, position: Position) -> Option<usize> {
        self.line_starts
            .get(position.line)
            .map(|start| start + position.column)
    }

    /// Convert a byte span to a [`Range`]
    pub fn byte_range_to_range(&self, span: &ByteRange<usize>) -> Range {
        Range::new(
            span.clone(),
            self.byte_to_position(span.start),
            self.byte_to_position(span.end),
        )
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}
