use sprig_ir::ExprRange;

use crate::Parser;

const INVALID_TOKEN: &str = "Invalid token";

impl Parser<'_> {
    /// Parse expressions separated by commas or newlines until `close` (or
    /// end of input for the top level).
    pub(crate) fn parse_block(&mut self, close: Option<char>) -> ExprRange {
        self.token = None;
        let mut items = Vec::new();

        loop {
            if self.peek_token().is_none() {
                self.skip_trivia();
                if self.cursor.is_eof() {
                    if close.is_some() {
                        self.error_here("Unexpected end of input");
                    }
                    break;
                }
                if self.cursor.eat_char(',') {
                    continue;
                }
                if close.is_some_and(|c| self.cursor.eat_char(c)) {
                    break;
                }
                self.invalid_token();
                continue;
            }

            if let Some(expr) = self.parse_expression(0) {
                items.push(expr);
            }
        }

        self.arena.alloc_list(items)
    }

    /// Report the current character as invalid and skip it, widening the
    /// previous report instead when it ends right here.
    fn invalid_token(&mut self) {
        let start = self.cursor.offset();
        if self.cursor.bump().is_none() {
            return;
        }
        let end = self.cursor.offset();

        if let Some(last) = self.diagnostics.last_mut() {
            if last.message == INVALID_TOKEN && last.position.end() == start {
                last.position.widen_to(end);
                return;
            }
        }
        self.error(INVALID_TOKEN, sprig_ir::Span::new(start, end));
    }
}
