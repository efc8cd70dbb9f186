//! Command handlers for the `sprig` CLI.
//!
//! Shared pieces live here: option parsing, file reading, and the
//! [`Session`] that owns one interpreter for the lifetime of a command.

mod debug;
mod repl;
mod run;

pub use debug::{dump_source, parse_file};
pub use repl::{read_eval_print, run_repl};
pub use run::run_file;

use sprig_diagnostic::ColorMode;
use sprig_eval::{Interpreter, ScopeId, SharedPrintHandler};

use crate::CliError;

/// Flags shared by every command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// `--limit=N`: expression budget per evaluation.
    pub execution_limit: Option<u64>,
    /// `--max-depth=N`: call depth limit.
    pub max_call_depth: Option<usize>,
    /// `--color=auto|always|never`.
    pub color: ColorMode,
}

/// Splits `args` into options and positional arguments.
pub fn parse_options(args: &[String]) -> Result<(CliOptions, Vec<String>), CliError> {
    let mut options = CliOptions::default();
    let mut positional = Vec::new();

    for arg in args {
        if let Some(value) = arg.strip_prefix("--limit=") {
            options.execution_limit = Some(parse_number("--limit", value)?);
        } else if let Some(value) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = Some(parse_number("--max-depth", value)?);
        } else if let Some(value) = arg.strip_prefix("--color=") {
            options.color = ColorMode::from_flag(value).ok_or_else(|| CliError::InvalidValue {
                flag: "--color",
                value: value.to_string(),
            })?;
        } else if arg.starts_with("--") {
            return Err(CliError::UnknownOption(arg.clone()));
        } else {
            positional.push(arg.clone());
        }
    }

    Ok((options, positional))
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::from_read(path, e))
}

pub(crate) fn stderr_is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// One interpreter plus the scope that top-level code runs in.
///
/// `run` gets a fresh session per file; the REPL keeps one so declarations
/// persist between lines.
pub struct Session {
    interpreter: Interpreter,
    scope: ScopeId,
}

impl Session {
    pub fn new(options: &CliOptions, print_handler: SharedPrintHandler) -> Self {
        let mut builder = Interpreter::builder().print_handler(print_handler);
        if let Some(limit) = options.execution_limit {
            builder = builder.execution_limit(limit);
        }
        if let Some(depth) = options.max_call_depth {
            builder = builder.max_call_depth(depth);
        }
        let mut interpreter = builder.build();
        let scope = interpreter.global_scope();
        let scope = interpreter.new_scope(scope).unwrap_or(scope);
        Session { interpreter, scope }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Frees everything top-level code can no longer reach.
    pub(crate) fn collect(&mut self) {
        let scope = self.scope;
        self.interpreter.collect_garbage(&[], &[scope]);
    }
}
