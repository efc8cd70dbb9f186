//! Sprig Eval - object model and tree-walking evaluator for Sprig.
//!
//! # Architecture
//!
//! - `Interpreter`: heap, global scope, configuration and the evaluator
//! - `heap`: objects and scopes in generational slots, collected by
//!   mark-and-sweep when the host asks
//! - `builtins`: the global bootstrap and native functions
//! - `ControlAction`: the `Return` / `Exception` signals carried in the
//!   error position of [`EvalResult`]
//!
//! # Example
//!
//! ```
//! use sprig_eval::{Interpreter, Value};
//!
//! let mut interp = Interpreter::new();
//! let output = sprig_parse::parse_source("demo.sprig", "1 + 2 * 3", interp.interner());
//! assert_eq!(interp.run(&output), Ok(Value::Number(7.0)));
//! ```

mod args;
mod builtins;
mod control;
pub mod errors;
mod heap;
mod inspect;
mod interpreter;
mod object;
mod print_handler;
mod scope;
mod value;

pub use control::{ControlAction, EvalResult, LABEL_EXCEPTION, LABEL_RETURN};
pub use errors::EmbedError;
pub use heap::{GcStats, ObjectId, ScopeId};
pub use interpreter::{EvalConfig, Globals, Interpreter, InterpreterBuilder};
pub use object::{FunctionFlags, HostFunction, NativeCall, Object};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandler,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::Value;

#[cfg(test)]
mod tests;
