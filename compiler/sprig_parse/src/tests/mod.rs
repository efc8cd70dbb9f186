//! Parser tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod diagnostics;
mod parser;
mod precedence;

use sprig_ir::{dump_expr, StringInterner};

use crate::{parse_source, ParseOutput};

pub(crate) fn parse_text(text: &str) -> (ParseOutput, StringInterner) {
    let interner = StringInterner::new();
    let output = parse_source("test.sprig", text, &interner);
    (output, interner)
}

/// Dump of the top-level group, asserting a clean parse.
pub(crate) fn dump(text: &str) -> String {
    let (output, interner) = parse_text(text);
    assert!(
        !output.has_errors(),
        "unexpected diagnostics for {text:?}: {:?}",
        output.diagnostics
    );
    dump_expr(&output.arena, output.root, &interner)
}

/// Messages of all diagnostics.
pub(crate) fn messages(text: &str) -> Vec<String> {
    parse_text(text)
        .0
        .diagnostics
        .into_iter()
        .map(|d| d.message)
        .collect()
}
