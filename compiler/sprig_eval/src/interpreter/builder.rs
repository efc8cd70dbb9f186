//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use sprig_ir::{SharedInterner, StringInterner};
use tracing::debug;

use super::{Globals, Interpreter, Names};
use crate::builtins;
use crate::heap::Heap;
use crate::object::Object;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::scope::Scope;

/// Resource limits for evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum expression nodes per outermost `evaluate`, `invoke` or
    /// `call_method`; `None` is unlimited.
    pub execution_limit: Option<u64>,
    /// Maximum nesting of invocations.
    pub max_call_depth: usize,
    /// Longest array a builtin may grow to.
    pub max_array_length: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            execution_limit: None,
            max_call_depth: 1024,
            max_array_length: 1 << 24,
        }
    }
}

/// Builder for [`Interpreter`].
///
/// The interner must be the one the evaluated scripts were parsed with;
/// by default the interpreter creates its own and exposes it through
/// [`Interpreter::interner`].
#[derive(Default)]
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    print_handler: Option<SharedPrintHandler>,
    config: EvalConfig,
    interrupt: Option<Arc<AtomicBool>>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Sink for `print`. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn execution_limit(mut self, limit: u64) -> Self {
        self.config.execution_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn max_array_length(mut self, length: usize) -> Self {
        self.config.max_array_length = length;
        self
    }

    /// Flag checked before every invocation; setting it aborts evaluation
    /// with an exception.
    #[must_use]
    pub fn interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Build the interpreter and install the builtins.
    pub fn build(self) -> Interpreter {
        let interner = self.interner.unwrap_or_else(StringInterner::shared);
        let names = Names::new(&interner);

        let mut heap = Heap::new();
        let scope = heap.alloc_scope(Scope::new(None));
        let table_prototype = heap.alloc_object(Object::table(None));
        let mut table = || heap.alloc_object(Object::table(Some(table_prototype)));
        let globals = Globals {
            scope,
            table: table(),
            table_prototype,
            function: table(),
            function_prototype: table(),
            number: table(),
            number_prototype: table(),
            string: table(),
            string_prototype: table(),
            boolean: table(),
            boolean_prototype: table(),
            array: table(),
            array_prototype: table(),
        };

        let mut interpreter = Interpreter {
            heap,
            interner,
            names,
            globals,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            config: self.config,
            interrupt: self.interrupt,
            steps: 0,
            call_depth: 0,
            active: 0,
        };
        builtins::install(&mut interpreter);

        let (objects, scopes) = interpreter.heap_size();
        debug!(objects, scopes, config = ?interpreter.config, "interpreter ready");
        interpreter
    }
}
