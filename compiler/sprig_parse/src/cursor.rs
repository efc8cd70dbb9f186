//! Character cursor over script text.
//!
//! The grammar is context sensitive (operator tokens, `\(...)` lambdas and
//! nested blocks are recognised while parsing), so the parser scans
//! characters directly instead of consuming a pre-lexed token stream.

/// Byte position into a `&str`, always on a character boundary.
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Position as a span offset.
    #[inline]
    pub fn offset(&self) -> u32 {
        u32::try_from(self.pos).unwrap_or(u32::MAX)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    pub fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or("")
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the current one.
    pub fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Advance past the current character and return it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `text` if the input continues with it.
    pub fn eat(&mut self, text: &str) -> bool {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            true
        } else {
            false
        }
    }

    pub fn eat_char(&mut self, c: char) -> bool {
        if self.current() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume the longest prefix whose characters satisfy `pred`.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.source[start..self.pos]
    }

    /// Text consumed since `begin`.
    pub fn since(&self, begin: usize) -> &'a str {
        self.source.get(begin..self.pos).unwrap_or("")
    }

    /// Move back to an earlier position.
    pub fn reset(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos, "cursor only rewinds");
        self.pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn eats_prefixes_and_runs() {
        let mut cursor = Cursor::new("<= 42abc");
        assert!(!cursor.eat("<>"));
        assert!(cursor.eat("<="));
        assert!(cursor.eat_char(' '));
        assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), "42");
        assert_eq!(cursor.current(), Some('a'));
        assert_eq!(cursor.peek_next(), Some('b'));
        assert_eq!(cursor.offset(), 5);
    }

    #[test]
    fn bumps_whole_characters() {
        let mut cursor = Cursor::new("äx");
        assert_eq!(cursor.bump(), Some('ä'));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.bump(), Some('x'));
        assert!(cursor.is_eof());
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn reset_rewinds() {
        let mut cursor = Cursor::new("@name");
        cursor.eat("@");
        cursor.reset(0);
        assert_eq!(cursor.rest(), "@name");
    }
}
