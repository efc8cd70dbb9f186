//! Diagnostics for the Sprig language engine.
//!
//! One [`Diagnostic`] type serves both parse errors and runtime exceptions.
//! A diagnostic carries a message, a [`Position`] into a source document,
//! and child diagnostics that record why it happened:
//!
//! ```text
//! main.sprig:3:1 - Invocation failed
//! f(1, "two")
//! ~
//!     main.sprig:1:10 - Invocation failed
//!     \(a, b) { a + b }
//!                 ^
//!         Cannot invoke
//!             Wrong type for argument "right", expected "Number", but got "String"
//! ```

mod diagnostic;
pub mod emitter;
mod position;

pub use diagnostic::Diagnostic;
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use position::{FormatOptions, Position};

/// ANSI escapes used when colored output is requested.
pub(crate) mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}
