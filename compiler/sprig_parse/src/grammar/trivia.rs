use crate::Parser;

impl Parser<'_> {
    /// Skip spaces, tabs, newlines, `//` comments and nestable `/* */`
    /// comments, recording whether a newline was crossed.
    ///
    /// Calling this again at the position where the last skip ended keeps
    /// the recorded flag, so a token peeked twice sees the same gap.
    pub(crate) fn skip_trivia(&mut self) {
        if self.last_skipped == Some(self.cursor.position()) {
            return;
        }

        let mut newline = false;
        loop {
            self.cursor.eat_while(|c| c == ' ' || c == '\t');
            match self.cursor.current() {
                Some('\n' | '\r') => {
                    newline = true;
                    self.cursor.bump();
                }
                Some('/') if self.cursor.eat("//") => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                Some('/') if self.cursor.peek_next() == Some('*') => {
                    self.skip_block_comment();
                }
                _ => break,
            }
        }

        self.last_skipped = Some(self.cursor.position());
        self.skipped_newline = newline;
    }

    fn skip_block_comment(&mut self) {
        let start = self.cursor.offset();
        self.cursor.eat("/*");
        let mut depth = 1usize;
        while depth > 0 {
            if self.cursor.eat("/*") {
                depth += 1;
            } else if self.cursor.eat("*/") {
                depth -= 1;
            } else if self.cursor.bump().is_none() {
                let end = self.cursor.offset();
                self.error("Unterminated block comment", sprig_ir::Span::new(start, end));
                return;
            }
        }
    }
}
