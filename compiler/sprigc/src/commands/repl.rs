//! The `repl` command: evaluate stdin line by line in one scope.

use std::io::{self, BufRead, Write};

use sprig_diagnostic::{DiagnosticEmitter, TerminalEmitter};
use sprig_eval::{stdout_handler, ControlAction, Value};
use sprig_parse::ParseOutput;

use super::{stderr_is_tty, CliOptions, Session};
use crate::CliError;

const PROMPT: &str = "> ";
const CONTINUE_PROMPT: &str = ". ";
const INCOMPLETE: &str = "Unexpected end of input";

pub fn run_repl(options: &CliOptions) -> Result<(), CliError> {
    let mut session = Session::new(options, stdout_handler());
    let mut emitter = TerminalEmitter::stderr(options.color, stderr_is_tty());
    let interactive = std::io::IsTerminal::is_terminal(&io::stdin());
    let stdin = io::stdin().lock();
    let mut out = io::stdout();
    read_eval_print(&mut session, stdin, &mut out, &mut emitter, interactive)?;
    Ok(())
}

/// Reads entries from `input` until it is exhausted.
///
/// An entry whose only problem is that input ended early (an open bracket,
/// a trailing operator) keeps reading lines; a blank line submits it as is.
pub fn read_eval_print(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
    emitter: &mut impl DiagnosticEmitter,
    prompt: bool,
) -> io::Result<()> {
    let mut entry = String::new();
    let mut lines = input.lines();

    loop {
        if prompt {
            write!(out, "{}", if entry.is_empty() { PROMPT } else { CONTINUE_PROMPT })?;
            out.flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if entry.is_empty() && line.trim().is_empty() {
            continue;
        }
        let submit = line.trim().is_empty();
        entry.push_str(&line);
        entry.push('\n');

        let output = sprig_parse::parse_source("<repl>", &entry, session.interpreter.interner());
        if !submit && is_incomplete(&output) {
            continue;
        }
        session.eval_entry(&output, out, emitter)?;
        emitter.flush();
        entry.clear();
    }

    if !entry.trim().is_empty() {
        let output = sprig_parse::parse_source("<repl>", &entry, session.interpreter.interner());
        session.eval_entry(&output, out, emitter)?;
        emitter.flush();
    }
    Ok(())
}

fn is_incomplete(output: &ParseOutput) -> bool {
    output.has_errors() && output.diagnostics.iter().all(|d| d.message == INCOMPLETE)
}

impl Session {
    fn eval_entry(
        &mut self,
        output: &ParseOutput,
        out: &mut impl Write,
        emitter: &mut impl DiagnosticEmitter,
    ) -> io::Result<()> {
        if output.has_errors() {
            emitter.emit_all(&output.diagnostics);
            return Ok(());
        }
        match self
            .interpreter
            .evaluate(&output.arena, output.root, self.scope)
        {
            Ok(Value::Void) | Err(ControlAction::Return(Value::Void)) => {}
            Ok(value) | Err(ControlAction::Return(value)) => {
                writeln!(out, "{}", self.interpreter.inspect(&value))?;
            }
            Err(ControlAction::Exception(diagnostic)) => emitter.emit(&diagnostic),
        }
        self.collect();
        Ok(())
    }
}
