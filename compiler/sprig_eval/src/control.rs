//! Non-local signals.
//!
//! Evaluation returns `Result<Value, ControlAction>`; `?` carries a signal
//! out of every enclosing step without touching anything left to evaluate.
//! `Return` is consumed at the boundary of the script function it escapes
//! from. `Exception` travels to the host unless a builtin intercepts it.

use sprig_diagnostic::Diagnostic;

use crate::value::Value;

pub const LABEL_RETURN: &str = "!return";
pub const LABEL_EXCEPTION: &str = "!exception";

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, ControlAction>;

#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    /// `return(value)` unwinding to the enclosing function.
    Return(Value),
    /// A runtime error and its causal chain.
    Exception(Box<Diagnostic>),
}

impl ControlAction {
    pub fn label(&self) -> &'static str {
        match self {
            ControlAction::Return(_) => LABEL_RETURN,
            ControlAction::Exception(_) => LABEL_EXCEPTION,
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, ControlAction::Exception(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ControlAction::Exception(diagnostic) => Some(diagnostic),
            ControlAction::Return(_) => None,
        }
    }

    /// The diagnostic a host should report for a signal that reached it.
    ///
    /// A `Return` here escaped every function boundary, which only happens
    /// when a host evaluates a `return` outside any function.
    pub fn into_diagnostic(self) -> Diagnostic {
        match self {
            ControlAction::Exception(diagnostic) => *diagnostic,
            ControlAction::Return(_) => {
                Diagnostic::intrinsic(format!("Signal \"{LABEL_RETURN}\" escaped evaluation"))
            }
        }
    }
}

impl From<Diagnostic> for ControlAction {
    fn from(diagnostic: Diagnostic) -> Self {
        ControlAction::Exception(Box::new(diagnostic))
    }
}
