//! The `run` command: parse and evaluate a script.

use std::io::{self, Write};

use sprig_diagnostic::{DiagnosticEmitter, TerminalEmitter};
use sprig_eval::{stdout_handler, ControlAction, Value};
use tracing::debug;

use super::{read_file, stderr_is_tty, CliOptions, Session};
use crate::CliError;

/// Runs `path`, printing the result to stdout and diagnostics to stderr.
///
/// Returns `Ok(false)` when the script had syntax errors or raised.
pub fn run_file(path: &str, options: &CliOptions) -> Result<bool, CliError> {
    let text = read_file(path)?;
    let mut session = Session::new(options, stdout_handler());
    let mut emitter = TerminalEmitter::stderr(options.color, stderr_is_tty());
    let mut out = io::stdout().lock();
    let ok = session.run_script(path, &text, &mut out, &mut emitter)?;
    emitter.flush();
    Ok(ok)
}

impl Session {
    /// Parses and evaluates one script.
    ///
    /// Syntax errors are all reported and nothing runs. Otherwise a non-void
    /// result is written to `out` with the inspector, and an exception is
    /// reported as a diagnostic tree.
    pub fn run_script(
        &mut self,
        path: &str,
        text: &str,
        out: &mut impl Write,
        emitter: &mut impl DiagnosticEmitter,
    ) -> io::Result<bool> {
        let output = sprig_parse::parse_source(path, text, self.interpreter.interner());
        if output.has_errors() {
            emitter.emit_all(&output.diagnostics);
            emitter.emit_summary(output.diagnostics.len());
            return Ok(false);
        }

        let ok = match self.interpreter.run(&output) {
            Ok(Value::Void) => true,
            Ok(value) => {
                writeln!(out, "{}", self.interpreter.inspect(&value))?;
                true
            }
            Err(ControlAction::Exception(diagnostic)) => {
                emitter.emit(&diagnostic);
                false
            }
            // `run` converts a top-level return into the result.
            Err(ControlAction::Return(_)) => true,
        };

        let stats = self.interpreter.collect_garbage(&[], &[]);
        debug!(path, ok, ?stats, "script finished");
        Ok(ok)
    }
}
