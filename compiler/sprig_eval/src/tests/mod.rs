//! End-to-end tests: parse a script, run it, inspect the outcome.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod arrays;
mod operators;
mod scenarios;

use sprig_diagnostic::{Diagnostic, FormatOptions};
use sprig_parse::parse_source;

use crate::{buffer_handler, ControlAction, EvalResult, Interpreter, Value};

pub(crate) fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

/// Runs `text` as a script named `test.sprig`, asserting a clean parse.
pub(crate) fn run_in(interp: &mut Interpreter, text: &str) -> EvalResult {
    let output = parse_source("test.sprig", text, interp.interner());
    assert!(
        !output.has_errors(),
        "unexpected diagnostics for {text:?}: {:?}",
        output.diagnostics
    );
    interp.run(&output)
}

pub(crate) fn eval(text: &str) -> Value {
    let mut interp = interpreter();
    match run_in(&mut interp, text) {
        Ok(value) => value,
        Err(action) => panic!(
            "{text:?} failed:\n{}",
            action.into_diagnostic().format(&FormatOptions::default())
        ),
    }
}

/// The inspector rendering of the script's result.
pub(crate) fn show(text: &str) -> String {
    let mut interp = interpreter();
    let value = run_in(&mut interp, text).unwrap();
    interp.inspect(&value)
}

/// The exception a script ends with.
pub(crate) fn exception(text: &str) -> Diagnostic {
    let mut interp = interpreter();
    match run_in(&mut interp, text) {
        Err(ControlAction::Exception(diagnostic)) => *diagnostic,
        other => panic!("{text:?} did not raise: {other:?}"),
    }
}

/// The exception rendered without colors.
pub(crate) fn report(text: &str) -> String {
    exception(text).format(&FormatOptions::default())
}

/// What the script printed.
pub(crate) fn printed(text: &str) -> String {
    let mut interp = interpreter();
    run_in(&mut interp, text).unwrap();
    interp.print_handler().get_output()
}
