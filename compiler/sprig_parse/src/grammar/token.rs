//! Scanning a single token.

use sprig_ir::{ExprId, ExprKind, Name, Span};
use tracing::trace;

use crate::operators::{self, OPERATOR_TOKENS};
use crate::{Parser, Token};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Parser<'_> {
    /// Current lookahead, scanning it first if needed.
    pub(crate) fn peek_token(&mut self) -> Option<Token> {
        match self.token {
            Some(token) => Some(token),
            None => self.next_token(),
        }
    }

    /// Scan the token after the current one and make it the lookahead.
    ///
    /// Returns `None` at end of input and at characters that cannot start a
    /// token (`,`, closing delimiters, junk); the cursor stays put so block
    /// parsing can deal with them.
    pub(crate) fn next_token(&mut self) -> Option<Token> {
        if let Some((token, skipped_newline)) = self.pending.take() {
            self.skipped_newline = skipped_newline;
            self.token = Some(token);
            return self.token;
        }

        self.skip_trivia();
        let skipped_newline = self.skipped_newline;
        self.token = self.scan_token(skipped_newline);
        if let Some(token) = self.token {
            trace!(?token, newline = skipped_newline, "token");
        }
        self.token
    }

    fn scan_token(&mut self, skipped_newline: bool) -> Option<Token> {
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.offset();

        if let Some(text) = self.scan_operator() {
            return Some(Token::Operator {
                text,
                span: Span::new(start, self.cursor.offset()),
            });
        }

        let expr = if self.cursor.eat_char('(') {
            let children = self.parse_block(Some(')'));
            self.skipped_newline = skipped_newline;
            self.alloc(ExprKind::Group(children), Span::new(start, self.cursor.offset()))
        } else if self.cursor.eat_char('[') {
            let items = self.parse_block(Some(']'));
            self.skipped_newline = skipped_newline;
            self.alloc(
                ExprKind::ArrayLiteral(items),
                Span::new(start, self.cursor.offset()),
            )
        } else if self.cursor.current().is_some_and(|c| c.is_ascii_digit()) {
            self.scan_number(start)
        } else if let Some(quote) = self
            .cursor
            .current()
            .filter(|&c| matches!(c, '"' | '\'' | '`'))
        {
            self.cursor.bump();
            self.scan_string(start, quote)
        } else if self.cursor.eat_char('\\') {
            let lambda = self.scan_lambda(start);
            self.skipped_newline = skipped_newline;
            lambda
        } else {
            let name = self.scan_word()?;
            self.alloc(
                ExprKind::Identifier(name),
                Span::new(start, self.cursor.offset()),
            )
        };

        Some(Token::Expr(expr))
    }

    fn scan_operator(&mut self) -> Option<&'static str> {
        let rest = self.cursor.rest();
        let text = OPERATOR_TOKENS.iter().copied().find(|token| {
            rest.starts_with(token)
                && (!operators::is_word_token(token)
                    || !rest[token.len()..]
                        .chars()
                        .next()
                        .is_some_and(|c| is_word_char(c) || c == ':'))
        })?;
        self.cursor.eat(text);
        Some(text)
    }

    fn scan_number(&mut self, start: u32) -> ExprId {
        let begin = self.cursor.position();
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.eat_char('.') {
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }
        let span = Span::new(start, self.cursor.offset());
        let value = match self.cursor.since(begin).parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                self.error("Invalid number", span);
                f64::NAN
            }
        };
        self.alloc(ExprKind::NumberLiteral(value), span)
    }

    fn scan_string(&mut self, start: u32, quote: char) -> ExprId {
        let mut value = String::new();
        let mut terminated = false;
        while let Some(c) = self.cursor.bump() {
            if c == quote {
                terminated = true;
                break;
            }
            if c == '\\' {
                if let Some(decoded) = self.scan_escape() {
                    value.push(decoded);
                }
                continue;
            }
            value.push(c);
        }

        let span = Span::new(start, self.cursor.offset());
        if !terminated {
            self.error("Unterminated string", span);
        }
        let text = self.arena.alloc_str(value);
        self.alloc(ExprKind::StringLiteral(text), span)
    }

    /// Decode the escape after a backslash.
    fn scan_escape(&mut self) -> Option<char> {
        let start = self.cursor.offset() - 1;
        let Some(escape) = self.cursor.bump() else {
            self.error_here("Unexpected end of input");
            return None;
        };

        let decoded = match escape {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '\'' | '"' | '`' | '\\' | '$' => Some(escape),
            'x' => {
                let hex = self
                    .cursor
                    .rest()
                    .get(..2)
                    .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()));
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok().map(|byte| (h, byte))) {
                    Some((h, byte)) => {
                        self.cursor.eat(h);
                        Some(char::from(byte))
                    }
                    None => None,
                }
            }
            _ => None,
        };

        if decoded.is_none() {
            self.error("Invalid escape sequence", Span::new(start, self.cursor.offset()));
        }
        decoded
    }

    /// `\(a, b) { body }` or `\(a, b) expression`, after the backslash.
    fn scan_lambda(&mut self, start: u32) -> ExprId {
        let mut params: Vec<Name> = Vec::new();
        if self.cursor.eat_char('(') {
            loop {
                self.skip_trivia();
                if self.cursor.is_eof() {
                    self.error_here("Unexpected end of input");
                    break;
                }
                if self.cursor.eat_char(')') {
                    break;
                }
                if self.cursor.eat_char(',') {
                    continue;
                }
                match self.scan_word() {
                    Some(name) => params.push(name),
                    None => {
                        self.error_here("Expected parameter");
                        self.cursor.bump();
                    }
                }
            }
        }
        let header = Span::new(start, self.cursor.offset());

        self.skip_trivia();
        let body = if self.cursor.eat_char('{') {
            let body_start = self.cursor.offset() - 1;
            let children = self.parse_block(Some('}'));
            self.alloc(
                ExprKind::Group(children),
                Span::new(body_start, self.cursor.offset()),
            )
        } else {
            self.token = None;
            let body = self
                .parse_expression(0)
                .unwrap_or_else(|| self.alloc(ExprKind::Error, header));
            // The body parse may have scanned one token past its end.
            if let Some(token) = self.token.take() {
                self.pending = Some((token, self.skipped_newline));
            }
            body
        };

        let params = self.arena.alloc_names(params);
        self.alloc(ExprKind::FunctionDeclaration { params, body }, header)
    }

    /// `@`? followed by word characters and `:`.
    fn scan_word(&mut self) -> Option<Name> {
        let begin = self.cursor.position();
        let raw = self.cursor.eat_char(sprig_ir::methods::RAW_PREFIX);
        let word = self.cursor.eat_while(|c| is_word_char(c) || c == ':');
        if word.is_empty() {
            self.cursor.reset(begin);
            return None;
        }
        let name = if raw {
            self.interner.intern(&format!("{}{word}", sprig_ir::methods::RAW_PREFIX))
        } else {
            self.interner.intern(word)
        };
        Some(name)
    }
}
