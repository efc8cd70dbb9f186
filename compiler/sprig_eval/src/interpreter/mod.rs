//! Tree-walking interpreter.
//!
//! # Architecture
//!
//! - `eval`: per-node evaluation, declarations and assignments
//! - `invoke`: the invocation protocol shared by script calls, native calls
//!   and host calls
//! - `builder`: [`InterpreterBuilder`] and [`EvalConfig`]
//!
//! Objects and scopes live in the interpreter's heap and are addressed by
//! [`ObjectId`] / [`ScopeId`]. Nothing is reclaimed until the host calls
//! [`Interpreter::collect_garbage`] between evaluations.
//!
//! # Arena Threading
//!
//! A script function carries the [`SharedArena`] it was parsed into, so a
//! closure created by one script and called from another still evaluates
//! its body against its own nodes.

mod builder;
mod eval;
mod invoke;

pub use builder::{EvalConfig, InterpreterBuilder};

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use smallvec::SmallVec;
use sprig_diagnostic::Position;
use sprig_ir::{methods, ExprId, Name, SharedArena, SharedInterner};
use sprig_parse::ParseOutput;
use tracing::debug;

use crate::control::{ControlAction, EvalResult};
use crate::errors::{has_parse_errors, stale_reference, EmbedError};
use crate::heap::{GcStats, Heap, ObjectId, ScopeId};
use crate::object::{
    Function, FunctionBody, FunctionFlags, Handle, HostFunction, NativeCall, NativeHandler,
    Object, ObjectKind,
};
use crate::print_handler::SharedPrintHandler;
use crate::scope::Scope;
use crate::value::Value;

/// Names the evaluator compares against on hot paths, interned once.
#[derive(Copy, Clone)]
pub(crate) struct Names {
    pub(crate) this: Name,
    pub(crate) prototype: Name,
    pub(crate) length: Name,
    pub(crate) name: Name,
    pub(crate) boolean: Name,
    pub(crate) number: Name,
    pub(crate) not: Name,
    pub(crate) eq: Name,
}

impl Names {
    fn new(interner: &sprig_ir::StringInterner) -> Self {
        Names {
            this: interner.intern(methods::THIS),
            prototype: interner.intern(methods::PROTOTYPE),
            length: interner.intern("length"),
            name: interner.intern("name"),
            boolean: interner.intern(methods::BOOLEAN),
            number: interner.intern(methods::NUMBER),
            not: interner.intern(methods::NOT),
            eq: interner.intern(methods::EQ),
        }
    }
}

/// The global scope and the builtin constructor and prototype objects.
#[derive(Copy, Clone, Debug)]
pub struct Globals {
    pub scope: ScopeId,
    pub table: ObjectId,
    pub table_prototype: ObjectId,
    pub function: ObjectId,
    pub function_prototype: ObjectId,
    pub number: ObjectId,
    pub number_prototype: ObjectId,
    pub string: ObjectId,
    pub string_prototype: ObjectId,
    pub boolean: ObjectId,
    pub boolean_prototype: ObjectId,
    pub array: ObjectId,
    pub array_prototype: ObjectId,
}

impl Globals {
    fn objects(&self) -> [ObjectId; 12] {
        [
            self.table,
            self.table_prototype,
            self.function,
            self.function_prototype,
            self.number,
            self.number_prototype,
            self.string,
            self.string_prototype,
            self.boolean,
            self.boolean_prototype,
            self.array,
            self.array_prototype,
        ]
    }
}

/// One interpreter instance: a heap, a global scope and its configuration.
///
/// Single-threaded; objects are shared by id with no locking.
pub struct Interpreter {
    pub(crate) heap: Heap,
    pub(crate) interner: SharedInterner,
    pub(crate) names: Names,
    pub(crate) globals: Globals,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) config: EvalConfig,
    pub(crate) interrupt: Option<Arc<AtomicBool>>,
    /// Expression nodes visited by the outermost `evaluate` in progress.
    pub(crate) steps: u64,
    pub(crate) call_depth: usize,
    /// Nesting of `evaluate` calls; collection is refused while non-zero.
    pub(crate) active: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn intern(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn global_scope(&self) -> ScopeId {
        self.globals.scope
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.heap.object(id)
    }

    /// Live objects and scopes, in that order.
    pub fn heap_size(&self) -> (usize, usize) {
        (self.heap.object_count(), self.heap.scope_count())
    }

    // Embedding API

    /// Declares a global variable; objects without a name take `name`.
    pub fn declare_global(&mut self, name: &str, value: Value) -> Result<(), EmbedError> {
        let key = self.interner.intern(name);
        if self.declare_variable(self.globals.scope, key, value) {
            Ok(())
        } else {
            Err(EmbedError::DuplicateGlobal {
                name: name.to_string(),
            })
        }
    }

    /// Registers a host function as a global.
    ///
    /// A leading `this` parameter receives the call receiver. A name starting
    /// with `@` makes the function receive unevaluated argument handles.
    pub fn register_native<F>(
        &mut self,
        name: &str,
        params: &[&str],
        handler: F,
    ) -> Result<Value, EmbedError>
    where
        F: Fn(&mut Interpreter, NativeCall) -> EvalResult + 'static,
    {
        let handler: HostFunction = std::rc::Rc::new(handler);
        let function = self.new_native(name, params, NativeHandler::Host(handler));
        self.declare_global(name, function.clone())?;
        Ok(function)
    }

    /// Declares a host function as a property of the table `target`.
    ///
    /// An existing property of the same name is left in place.
    pub fn define_method<F>(
        &mut self,
        target: &Value,
        name: &str,
        params: &[&str],
        handler: F,
    ) -> Result<Value, EmbedError>
    where
        F: Fn(&mut Interpreter, NativeCall) -> EvalResult + 'static,
    {
        let Some(id) = target.as_object() else {
            return Err(EmbedError::NotATable {
                name: self.value_name(target),
            });
        };
        let Some(object) = self.heap.object(id) else {
            return Err(EmbedError::StaleObject);
        };
        if !object.is_table() {
            return Err(EmbedError::NotATable {
                name: object.display_name(),
            });
        }
        let handler: HostFunction = std::rc::Rc::new(handler);
        let function = self.new_native(name, params, NativeHandler::Host(handler));
        let key = self.interner.intern(name);
        self.declare_property(id, key, function.clone());
        Ok(function)
    }

    /// A fresh scope whose parent is `parent`.
    pub fn new_scope(&mut self, parent: ScopeId) -> Result<ScopeId, EmbedError> {
        if !self.heap.contains_scope(parent) {
            return Err(EmbedError::StaleScope);
        }
        Ok(self.heap.alloc_scope(Scope::new(Some(parent))))
    }

    /// Evaluates `root` in `scope`.
    ///
    /// A `Return` in the error position escaped every function boundary;
    /// hosts treat it as an internal consistency failure.
    pub fn evaluate(&mut self, arena: &SharedArena, root: ExprId, scope: ScopeId) -> EvalResult {
        if !self.heap.contains_scope(scope) {
            return Err(stale_reference().into());
        }
        self.enter();
        let result = self.eval(arena, root, scope);
        self.active -= 1;
        result
    }

    /// Evaluates a parsed script in a fresh child of the global scope.
    ///
    /// Refuses scripts with syntax errors. A top-level `return(v)` ends the
    /// script with `v`.
    pub fn run(&mut self, output: &ParseOutput) -> EvalResult {
        if output.has_errors() {
            return Err(has_parse_errors(&output.diagnostics).into());
        }
        let scope = self.heap.alloc_scope(Scope::new(Some(self.globals.scope)));
        match self.evaluate(&output.arena, output.root, scope) {
            Err(ControlAction::Return(value)) => Ok(value),
            other => other,
        }
    }

    /// Calls `function` from the host with `receiver` as `this`.
    pub fn invoke(&mut self, function: &Value, receiver: Value, args: Vec<Value>) -> EvalResult {
        self.enter();
        let scope = self.globals.scope;
        let result = match self.expect_function(function, &Position::INTRINSIC) {
            Ok(id) => self.call_function(id, receiver, args, scope, &Position::INTRINSIC),
            Err(action) => Err(action),
        };
        self.active -= 1;
        result
    }

    /// Resolves `method` on `receiver` and calls it.
    pub fn call_method(&mut self, receiver: Value, method: &str, args: Vec<Value>) -> EvalResult {
        let method = self.interner.intern(method);
        self.enter();
        let scope = self.globals.scope;
        let result = self.call_method_in(receiver, method, args, scope);
        self.active -= 1;
        result
    }

    /// Marks the start of a host call. The outermost one gets a fresh
    /// expression budget and call depth.
    fn enter(&mut self) {
        if self.active == 0 {
            self.steps = 0;
            self.call_depth = 0;
        }
        self.active += 1;
    }

    /// Frees objects and scopes unreachable from the globals and the given
    /// roots. Does nothing while an evaluation is in progress.
    pub fn collect_garbage(&mut self, values: &[Value], scopes: &[ScopeId]) -> GcStats {
        if self.active > 0 {
            return GcStats::default();
        }

        let mut object_roots: Vec<ObjectId> = self.globals.objects().to_vec();
        object_roots.extend(values.iter().filter_map(Value::as_object));
        let mut scope_roots = vec![self.globals.scope];
        scope_roots.extend_from_slice(scopes);

        let stats = self.heap.collect(&object_roots, &scope_roots);
        debug!(
            objects_freed = stats.objects_freed,
            scopes_freed = stats.scopes_freed,
            objects_live = stats.objects_live,
            scopes_live = stats.scopes_live,
            "collected garbage"
        );
        stats
    }

    // Object construction

    /// A new empty table inheriting from `Table.prototype`.
    pub fn new_table(&mut self) -> Value {
        let prototype = self.globals.table_prototype;
        Value::Object(self.heap.alloc_object(Object::table(Some(prototype))))
    }

    pub fn new_array(&mut self, elements: Vec<Value>) -> Value {
        let object = Object::new(
            Some(self.globals.array_prototype),
            ObjectKind::Array(elements),
        );
        Value::Object(self.heap.alloc_object(object))
    }

    pub(crate) fn new_native(&mut self, name: &str, params: &[&str], handler: NativeHandler) -> Value {
        let params: SmallVec<[Name; 4]> = params.iter().map(|p| self.interner.intern(p)).collect();
        let flags = if name.starts_with(methods::RAW_PREFIX) {
            FunctionFlags::RAW_ARGUMENTS
        } else {
            FunctionFlags::empty()
        };
        let object = Object::new(
            Some(self.globals.function_prototype),
            ObjectKind::Function(Function {
                params,
                flags,
                body: FunctionBody::Native(handler),
            }),
        );
        Value::Object(self.heap.alloc_object(object))
    }

    pub(crate) fn new_handle(&mut self, arena: &SharedArena, expr: ExprId) -> Value {
        let object = Object::new(
            Some(self.globals.table_prototype),
            ObjectKind::Handle(Handle {
                arena: Arc::clone(arena),
                expr,
            }),
        );
        Value::Object(self.heap.alloc_object(object))
    }

    /// Elements of an array value.
    pub fn array_elements(&self, value: &Value) -> Option<&[Value]> {
        match &self.heap.object(value.as_object()?)?.kind {
            ObjectKind::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub(crate) fn array_elements_mut(&mut self, id: ObjectId) -> Option<&mut Vec<Value>> {
        match &mut self.heap.object_mut(id)?.kind {
            ObjectKind::Array(elements) => Some(elements),
            _ => None,
        }
    }

    // Variables

    pub(crate) fn lookup_variable(&self, scope: ScopeId, name: Name) -> Option<Value> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.heap.scope(id)?;
            if let Some(value) = scope.variables.get(&name) {
                return Some(value.clone());
            }
            current = scope.parent;
        }
        None
    }

    /// Declares `name` in `scope` and names an unnamed object after it.
    pub(crate) fn declare_variable(&mut self, scope: ScopeId, name: Name, value: Value) -> bool {
        let Some(frame) = self.heap.scope_mut(scope) else {
            return false;
        };
        if !frame.declare(name, value.clone()) {
            return false;
        }
        if let Value::Object(id) = value {
            let interner = Arc::clone(&self.interner);
            self.name_object(id, || interner.lookup(name).to_string());
        }
        true
    }

    /// Stores into the nearest declaration of `name`; `false` if undeclared.
    pub(crate) fn assign_variable(&mut self, scope: ScopeId, name: Name, value: Value) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(frame) = self.heap.scope_mut(id) else {
                return false;
            };
            if let Some(slot) = frame.variables.get_mut(&name) {
                *slot = value;
                return true;
            }
            current = frame.parent;
        }
        false
    }

    // Properties

    /// Resolves `name` on `value` through its prototype chain.
    ///
    /// Primitives resolve through their builtin prototype; `null` and `void`
    /// through `Table.prototype`.
    pub fn get_property(&self, value: &Value, name: Name) -> Option<Value> {
        let start = match value {
            Value::Void | Value::Null => self.globals.table_prototype,
            Value::Boolean(_) => self.globals.boolean_prototype,
            Value::Number(_) => self.globals.number_prototype,
            Value::String(text) => {
                if name == self.names.length {
                    #[expect(
                        clippy::cast_precision_loss,
                        reason = "string lengths are far below 2^52"
                    )]
                    let length = text.chars().count() as f64;
                    return Some(Value::Number(length));
                }
                self.globals.string_prototype
            }
            Value::Object(id) => *id,
        };
        self.lookup_chain(start, name)
    }

    fn lookup_chain(&self, start: ObjectId, name: Name) -> Option<Value> {
        let mut current = Some(start);
        while let Some(id) = current {
            let object = self.heap.object(id)?;
            match &object.kind {
                ObjectKind::Table(properties) => {
                    if let Some(value) = properties.get(&name) {
                        return Some(value.clone());
                    }
                }
                ObjectKind::Array(elements) if name == self.names.length => {
                    #[expect(
                        clippy::cast_precision_loss,
                        reason = "array lengths are far below 2^52"
                    )]
                    let length = elements.len() as f64;
                    return Some(Value::Number(length));
                }
                ObjectKind::Function(_) if name == self.names.name => {
                    return Some(object.name.as_deref().map_or(Value::Null, Value::string));
                }
                _ => {}
            }
            current = object.prototype;
        }
        None
    }

    /// Declares a property on a table. First declaration wins: `false` if
    /// `name` already exists on this table or `table` is not a table.
    ///
    /// An unnamed object value takes the name `<table>.<name>`.
    pub fn declare_property(&mut self, table: ObjectId, name: Name, value: Value) -> bool {
        let Some(object) = self.heap.object_mut(table) else {
            return false;
        };
        let ObjectKind::Table(properties) = &mut object.kind else {
            return false;
        };
        if properties.contains_key(&name) {
            return false;
        }
        properties.insert(name, value.clone());

        if let (Some(table_name), Value::Object(id)) = (object.name.clone(), value) {
            let interner = Arc::clone(&self.interner);
            self.name_object(id, || format!("{table_name}.{}", interner.lookup(name)));
        }
        true
    }

    /// Overwrites a property declared on this exact table; `false` otherwise.
    pub fn set_property(&mut self, table: ObjectId, name: Name, value: Value) -> bool {
        let Some(object) = self.heap.object_mut(table) else {
            return false;
        };
        let ObjectKind::Table(properties) = &mut object.kind else {
            return false;
        };
        match properties.get_mut(&name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_table(&self, value: &Value) -> Option<ObjectId> {
        let id = value.as_object()?;
        self.heap.object(id)?.is_table().then_some(id)
    }

    fn name_object(&mut self, id: ObjectId, name: impl FnOnce() -> String) {
        if let Some(object) = self.heap.object_mut(id) {
            if object.name.is_none() {
                object.name = Some(name());
            }
        }
    }

    /// The name a value goes by in messages: `Number`, `[table Point]`, ...
    pub fn value_name(&self, value: &Value) -> String {
        match value {
            Value::Object(id) => self
                .heap
                .object(*id)
                .map_or_else(|| "<collected>".to_string(), Object::display_name),
            primitive => primitive.primitive_name().unwrap_or_default().to_string(),
        }
    }

    pub(crate) fn position(arena: &SharedArena, id: ExprId) -> Position {
        Position::new(Arc::clone(arena.document()), arena.span(id))
    }
}

#[cfg(test)]
mod tests;
