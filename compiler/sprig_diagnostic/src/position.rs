//! Source positions and their `line:col` rendering.

use std::fmt;
use std::sync::Arc;

use sprig_ir::{LineCol, SharedDocument, Span};

use crate::colors;

/// Rendering switches for [`Position::format`] and
/// [`Diagnostic::format`](crate::Diagnostic::format).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Only the `line:col - message` header, no source excerpt.
    pub short: bool,
    /// Prefix for every emitted line.
    pub indent: String,
    /// Emit ANSI colors.
    pub colors: bool,
    /// Leave out the document path in the header.
    pub skip_filename: bool,
}

impl FormatOptions {
    #[must_use]
    pub fn short(mut self, short: bool) -> Self {
        self.short = short;
        self
    }

    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn skip_filename(mut self, skip: bool) -> Self {
        self.skip_filename = skip;
        self
    }

    /// Same options, indented four more spaces.
    #[must_use]
    pub fn nested(&self) -> Self {
        let mut nested = self.clone();
        nested.indent.push_str("    ");
        nested
    }
}

/// A span inside a specific document.
///
/// Positions produced by builtins have no document; they are *intrinsic*
/// and render as the bare message.
#[derive(Clone)]
pub struct Position {
    document: Option<SharedDocument>,
    span: Span,
}

impl Position {
    /// Position of engine-internal failures.
    pub const INTRINSIC: Position = Position {
        document: None,
        span: Span::DUMMY,
    };

    pub fn new(document: SharedDocument, span: Span) -> Self {
        Position {
            document: Some(document),
            span,
        }
    }

    pub fn is_intrinsic(&self) -> bool {
        self.document.is_none()
    }

    pub fn document(&self) -> Option<&SharedDocument> {
        self.document.as_ref()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> u32 {
        self.span.start
    }

    pub fn end(&self) -> u32 {
        self.span.end
    }

    pub fn len(&self) -> u32 {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Grow the span in place to `end`. Used when adjacent parse errors are
    /// coalesced into one.
    pub fn widen_to(&mut self, end: u32) {
        self.span = self.span.extend_to(end);
    }

    /// Zero-based line and column of the start, if this is not intrinsic.
    pub fn line_col(&self) -> Option<LineCol> {
        self.document
            .as_ref()
            .map(|document| document.line_col(self.span.start))
    }

    /// Render `message` at this position.
    ///
    /// `{indent}{path}:{line}:{col} - {message}` with one-based line and
    /// column, then (unless `short`) the source line with its leading
    /// whitespace removed and a pointer line: `^` for spans of at most one
    /// character, `~` repeated over the span otherwise.
    pub fn format(&self, message: &str, options: &FormatOptions) -> String {
        let indent = options.indent.as_str();
        let Some(document) = &self.document else {
            return format!("{indent}{message}");
        };

        let LineCol { line, column } = document.line_col(self.span.start);
        let mut header = String::new();
        if !options.skip_filename {
            header.push_str(document.path());
            header.push(':');
        }
        header.push_str(&format!("{}:{}", line + 1, column + 1));

        let mut out = if options.colors {
            format!(
                "{indent}{}{header}{} - {message}",
                colors::BOLD,
                colors::RESET
            )
        } else {
            format!("{indent}{header} - {message}")
        };
        if options.short {
            return out;
        }

        let text = document.line_text(line);
        let trimmed = text.trim_start();
        let leading = text.chars().count() - trimmed.chars().count();
        let pad = (column as usize).saturating_sub(leading);

        // Multi-line spans are underlined to the end of their first line.
        let rest_of_line = trimmed.chars().count().saturating_sub(pad).max(1);
        let span_chars = document
            .content()
            .get(self.span.to_range())
            .map_or(0, |covered| covered.chars().count());
        let marker = if span_chars > 1 {
            "~".repeat(span_chars.min(rest_of_line))
        } else {
            "^".to_owned()
        };

        out.push('\n');
        out.push_str(indent);
        if options.colors {
            out.push_str(&format!("{}{trimmed}{}", colors::DIM, colors::RESET));
        } else {
            out.push_str(trimmed);
        }
        out.push('\n');
        out.push_str(indent);
        out.push_str(&" ".repeat(pad));
        if options.colors {
            out.push_str(&format!("{}{marker}{}", colors::ERROR, colors::RESET));
        } else {
            out.push_str(&marker);
        }
        out
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span
            && match (&self.document, &other.document) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.document {
            Some(document) => write!(f, "{}@{:?}", document.path(), self.span),
            None => f.write_str("<intrinsic>"),
        }
    }
}
