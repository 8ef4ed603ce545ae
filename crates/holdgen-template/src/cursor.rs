use crate::Span;

/// A cursor over pattern text that tracks position.
///
/// The formatter only ever stops on `{`, so most of the pattern is skipped
/// in bulk with [`Cursor::eat_until`]. Line and column are kept up to date
/// so placeholder spans can be reported.
pub struct Cursor<'src> {
    /// The pattern being scanned.
    source: &'src str,
    /// Remaining text (slice starting at current position).
    rest: &'src str,
    /// Current byte offset from start of source.
    offset: usize,
    /// Current line number (1-indexed).
    line: u32,
    /// Current column number (1-indexed, byte-based).
    column: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current byte offset from start of source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Text that has not been consumed yet.
    #[inline]
    pub fn rest(&self) -> &'src str {
        self.rest
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        let first = *self.rest.as_bytes().first()?;
        if first < 128 {
            Some(first as char)
        } else {
            self.rest.chars().next()
        }
    }

    /// Consume if the current character matches.
    #[inline]
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance_bytes(ch.len_utf8());
            true
        } else {
            false
        }
    }

    /// Consume everything up to (not including) the next `ch`, or to the end.
    ///
    /// Returns the consumed slice.
    pub fn eat_until(&mut self, ch: char) -> &'src str {
        let len = self.rest.find(ch).unwrap_or(self.rest.len());
        let start = self.offset;
        self.advance_bytes(len);
        &self.source[start..self.offset]
    }

    /// Advance by `n` bytes, updating line and column.
    ///
    /// `n` must land on a character boundary.
    pub fn advance_bytes(&mut self, n: usize) {
        debug_assert!(self.rest.is_char_boundary(n));

        let consumed = &self.rest[..n];
        match consumed.rfind('\n') {
            Some(last_newline) => {
                self.line += consumed.bytes().filter(|&b| b == b'\n').count() as u32;
                self.column = (n - last_newline) as u32;
            }
            None => self.column += n as u32,
        }

        self.rest = &self.rest[n..];
        self.offset += n;
    }

    /// Span of `len` bytes starting at the current position.
    #[inline]
    pub fn span(&self, len: usize) -> Span {
        Span::new(self.line, self.column, len as u32)
    }
}
