//! The `parse` command: show the expression tree a script parses to.

use std::io::{self, Write};

use sprig_diagnostic::{DiagnosticEmitter, TerminalEmitter};
use sprig_ir::{dump_expr, StringInterner};

use super::{read_file, stderr_is_tty, CliOptions};
use crate::CliError;

pub fn parse_file(path: &str, options: &CliOptions) -> Result<bool, CliError> {
    let text = read_file(path)?;
    let mut emitter = TerminalEmitter::stderr(options.color, stderr_is_tty());
    let mut out = io::stdout().lock();
    let ok = dump_source(path, &text, &mut out, &mut emitter)?;
    emitter.flush();
    Ok(ok)
}

/// Writes one S-expression per top-level expression, then any diagnostics.
///
/// The tree is printed even when the script has syntax errors.
pub fn dump_source(
    path: &str,
    text: &str,
    out: &mut impl Write,
    emitter: &mut impl DiagnosticEmitter,
) -> io::Result<bool> {
    let interner = StringInterner::new();
    let output = sprig_parse::parse_source(path, text, &interner);

    if let sprig_ir::ExprKind::Group(items) = output.arena.kind(output.root) {
        for &item in output.arena.get_list(*items) {
            writeln!(out, "{}", dump_expr(&output.arena, item, &interner))?;
        }
    }

    emitter.emit_all(&output.diagnostics);
    emitter.emit_summary(output.diagnostics.len());
    Ok(!output.has_errors())
}
