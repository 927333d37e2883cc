//! Byte cursor with line-bounded lookahead
//!
//!     The scanner needs to answer "does a closer follow on this line" at every brace it meets.
//!     Answering by scanning forward each time is quadratic on lines full of braces, so the
//!     cursor records, once per line, where the line ends and where the last `}` and the last
//!     `}}` on it start. After that both questions are a single comparison.
//!
//!     The cache covers the line from the offset it was built at up to the first line break
//!     (or end of input). The cursor only moves forward, so once it steps past the line end the
//!     cache is rebuilt from the new position on the next query.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineLookahead {
    built_from: usize,
    /// Offset of the first `\r`/`\n` at or after `built_from`, or the input length
    end: usize,
    last_close: Option<usize>,
    last_pair: Option<usize>,
}

impl LineLookahead {
    fn build(bytes: &[u8], from: usize) -> Self {
        let mut end = from;
        let mut last_close = None;
        let mut last_pair = None;

        while end < bytes.len() && !is_line_break(bytes[end]) {
            if bytes[end] == b'}' {
                // `}}}` holds pairs at two offsets; the later one wins
                if end > from && bytes[end - 1] == b'}' {
                    last_pair = Some(end - 1);
                }
                last_close = Some(end);
            }
            end += 1;
        }

        Self {
            built_from: from,
            end,
            last_close,
            last_pair,
        }
    }

    fn covers(&self, pos: usize) -> bool {
        self.built_from <= pos && pos <= self.end
    }
}

pub fn is_line_break(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    line: Option<LineLookahead>,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// A cursor resuming at `pos`.
    pub fn at(source: &'a str, pos: usize) -> Self {
        Self {
            source,
            pos: pos.min(source.len()),
            line: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// The byte `n` positions ahead of the cursor.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + n).copied()
    }

    pub fn starts_with(&self, needle: &str) -> bool {
        self.source.as_bytes()[self.pos..].starts_with(needle.as_bytes())
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    pub fn advance_to(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos, "cursor only moves forward");
        self.pos = pos.min(self.source.len());
    }

    /// Number of bytes the line break at the cursor occupies: 2 for `\r\n`, otherwise 1.
    /// Zero when the cursor is not at a line break.
    pub fn line_break_len(&self) -> usize {
        match (self.peek(), self.peek_at(1)) {
            (Some(b'\r'), Some(b'\n')) => 2,
            (Some(byte), _) if is_line_break(byte) => 1,
            _ => 0,
        }
    }

    fn lookahead(&mut self) -> LineLookahead {
        match self.line {
            Some(line) if line.covers(self.pos) => line,
            _ => {
                let line = LineLookahead::build(self.source.as_bytes(), self.pos);
                self.line = Some(line);
                line
            }
        }
    }

    /// Offset where the current line ends (exclusive), never past a line break.
    pub fn line_end(&mut self) -> usize {
        self.lookahead().end
    }

    /// Whether a `}` occurs at or after `from` on the current line.
    pub fn closes_on_line(&mut self, from: usize) -> bool {
        self.lookahead().last_close.is_some_and(|close| close >= from)
    }

    /// Whether a `}}` pair starts at or after `from` on the current line.
    pub fn pair_closes_on_line(&mut self, from: usize) -> bool {
        self.lookahead().last_pair.is_some_and(|pair| pair >= from)
    }
}
