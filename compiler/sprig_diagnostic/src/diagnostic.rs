//! Nested, positioned error reports.

use std::fmt;

use crate::{FormatOptions, Position};

/// A message at a position, with the diagnostics that caused it.
///
/// Runtime exceptions are diagnostics too: each failed invocation wraps the
/// failure of its callee as a child, so rendering the root prints the whole
/// causal chain from the outermost call down to the deepest failure.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Diagnostic {
    pub message: String,
    pub position: Position,
    pub children: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Diagnostic {
            message: message.into(),
            position,
            children: Vec::new(),
        }
    }

    /// Diagnostic raised by engine code rather than at a source location.
    pub fn intrinsic(message: impl Into<String>) -> Self {
        Self::new(message, Position::INTRINSIC)
    }

    pub fn with_child(mut self, child: Diagnostic) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Diagnostic>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push_child(&mut self, child: Diagnostic) {
        self.children.push(child);
    }

    /// The first leaf reached by following first children.
    pub fn root_cause(&self) -> &Diagnostic {
        let mut current = self;
        while let Some(first) = current.children.first() {
            current = first;
        }
        current
    }

    /// Whether any diagnostic in this tree has a message containing `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.message.contains(needle) || self.children.iter().any(|child| child.mentions(needle))
    }

    /// Render this diagnostic and, four spaces further in, its children.
    pub fn format(&self, options: &FormatOptions) -> String {
        let mut out = self.position.format(&self.message, options);
        if !self.children.is_empty() {
            let nested = options.nested();
            for child in &self.children {
                out.push('\n');
                out.push_str(&child.format(&nested));
            }
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&FormatOptions::default()))
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sprig_ir::{SourceDocument, Span};

    #[test]
    fn children_are_indented_under_parent() {
        let document = SourceDocument::shared("main.sprig", "f(1)");
        let diagnostic = Diagnostic::new("Invocation failed", Position::new(document, Span::new(0, 1)))
            .with_child(
                Diagnostic::intrinsic("Cannot invoke").with_child(Diagnostic::intrinsic(
                    "Wrong type for argument \"a\", expected \"Number\", but got \"String\"",
                )),
            );

        assert_eq!(
            diagnostic.to_string(),
            "main.sprig:1:1 - Invocation failed\n\
             f(1)\n\
             ^\n    \
             Cannot invoke\n        \
             Wrong type for argument \"a\", expected \"Number\", but got \"String\""
        );
    }

    #[test]
    fn root_cause_follows_first_children() {
        let diagnostic = Diagnostic::intrinsic("outer")
            .with_child(Diagnostic::intrinsic("middle").with_child(Diagnostic::intrinsic("inner")))
            .with_child(Diagnostic::intrinsic("sibling"));
        assert_eq!(diagnostic.root_cause().message, "inner");
        assert!(diagnostic.mentions("sib"));
        assert!(!diagnostic.mentions("absent"));
    }
}
