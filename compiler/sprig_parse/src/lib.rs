//! Parser for the Sprig expression language.
//!
//! Operator-precedence ("Pratt") parsing straight from characters to an
//! [`ExprArena`]. The parser never fails: errors become [`Diagnostic`]s and
//! parsing resumes, so callers always receive a tree. A host should refuse
//! to evaluate a tree whose [`ParseOutput`] has errors.
//!
//! Operators desugar to method invocations: `a + b` is `a.k:add(b)`,
//! `-a` is `a.k:neg()`, `a[i]` is `a.k:at(i)`.

mod cursor;
mod grammar;
pub mod operators;

use std::sync::Arc;

use sprig_diagnostic::{Diagnostic, Position};
use sprig_ir::{
    ExprArena, ExprId, SharedArena, SharedDocument, SourceDocument, Span, StringInterner,
};
use tracing::debug;

use cursor::Cursor;

/// A scanned token: an operator spelling or an already built node.
#[derive(Copy, Clone, Debug)]
enum Token {
    Operator { text: &'static str, span: Span },
    Expr(ExprId),
}

/// Result of parsing one document.
pub struct ParseOutput {
    pub arena: SharedArena,
    /// A `Group` holding the top-level expressions.
    pub root: ExprId,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn document(&self) -> &SharedDocument {
        self.arena.document()
    }
}

/// Parser state for one document.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    document: SharedDocument,
    arena: ExprArena,
    diagnostics: Vec<Diagnostic>,
    /// Current lookahead, if scanned.
    token: Option<Token>,
    /// Lookahead left over after an unbraced lambda body, with its newline flag.
    pending: Option<(Token, bool)>,
    /// Whether a newline was skipped right before the current token.
    skipped_newline: bool,
    /// Cursor position at which trivia was last skipped.
    last_skipped: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, document: SharedDocument, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(source),
            interner,
            arena: ExprArena::new(Arc::clone(&document)),
            document,
            diagnostics: Vec::new(),
            token: None,
            pending: None,
            skipped_newline: false,
            last_skipped: None,
        }
    }

    fn error(&mut self, message: &str, span: Span) {
        self.diagnostics.push(Diagnostic::new(
            message,
            Position::new(Arc::clone(&self.document), span),
        ));
    }

    /// Report at the current character.
    fn error_here(&mut self, message: &str) {
        let start = self.cursor.offset();
        let len = self.cursor.current().map_or(0, char::len_utf8);
        let span = Span::with_len(start, u32::try_from(len).unwrap_or(0));
        self.error(message, span);
    }
}

/// Parse a document into an expression tree.
pub fn parse(document: SharedDocument, interner: &StringInterner) -> ParseOutput {
    let source_owner = Arc::clone(&document);
    let mut parser = Parser::new(source_owner.content(), document, interner);

    let items = parser.parse_block(None);
    let root = parser.alloc(
        sprig_ir::ExprKind::Group(items),
        Span::new(0, source_owner.len()),
    );

    debug!(
        path = source_owner.path(),
        nodes = parser.arena.len(),
        errors = parser.diagnostics.len(),
        "parsed document"
    );

    ParseOutput {
        arena: Arc::new(parser.arena),
        root,
        diagnostics: parser.diagnostics,
    }
}

/// Parse `text` as a document named `path`.
pub fn parse_source(path: &str, text: &str, interner: &StringInterner) -> ParseOutput {
    parse(SourceDocument::shared(path, text), interner)
}

#[cfg(test)]
mod tests;
