//! Argument checking and implicit coercion for native functions.
//!
//! ```ignore
//! let mut check = ArgumentCheck::new(interp, &call, &["this", "right"])?;
//! let left = check.number(0)?;
//! let right = check.number(1)?;
//! check.finish()?;
//! ```
//!
//! Arity is verified up front. Type mismatches are collected and reported
//! together under one "Cannot invoke" diagnostic by [`ArgumentCheck::finish`];
//! the placeholder returned for a mismatched argument must not be used
//! before `finish` succeeds.

use sprig_diagnostic::Diagnostic;
use sprig_ir::Name;

use crate::control::ControlAction;
use crate::errors::{cannot_convert, cannot_invoke, wrong_arg_count, wrong_arg_type};
use crate::heap::{ObjectId, ScopeId};
use crate::interpreter::Interpreter;
use crate::object::{NativeCall, ObjectKind};
use crate::value::Value;

/// Fails unless at least `names.len()` arguments were passed.
pub(crate) fn verify_arguments(args: &[Value], names: &[&str]) -> Result<(), ControlAction> {
    if args.len() < names.len() {
        return Err(wrong_arg_count(names.len(), args.len(), &names[args.len()..]).into());
    }
    Ok(())
}

pub(crate) struct ArgumentCheck<'a> {
    interp: &'a mut Interpreter,
    args: &'a [Value],
    names: &'a [&'a str],
    scope: ScopeId,
    failures: Vec<Diagnostic>,
}

impl<'a> ArgumentCheck<'a> {
    pub(crate) fn new(
        interp: &'a mut Interpreter,
        call: &'a NativeCall,
        names: &'a [&'a str],
    ) -> Result<Self, ControlAction> {
        verify_arguments(&call.args, names)?;
        Ok(ArgumentCheck {
            interp,
            args: &call.args,
            names,
            scope: call.scope,
            failures: Vec::new(),
        })
    }

    pub(crate) fn value(&self, index: usize) -> Value {
        self.args[index].clone()
    }

    /// A number, converting through `k:number` when needed.
    pub(crate) fn number(&mut self, index: usize) -> Result<f64, ControlAction> {
        let args = self.args;
        let value = &args[index];
        if let Value::Number(n) = value {
            return Ok(*n);
        }
        match self.interp.to_number(value, self.scope) {
            Ok(n) => Ok(n),
            Err(ControlAction::Exception(cause)) => {
                self.mismatch(index, "Number", Some(*cause));
                Ok(f64::NAN)
            }
            Err(signal) => Err(signal),
        }
    }

    /// A boolean, converting through `k:boolean` when needed.
    pub(crate) fn boolean(&mut self, index: usize) -> Result<bool, ControlAction> {
        let args = self.args;
        let value = &args[index];
        if let Value::Boolean(b) = value {
            return Ok(*b);
        }
        match self.interp.to_boolean(value, self.scope) {
            Ok(b) => Ok(b),
            Err(ControlAction::Exception(cause)) => {
                self.mismatch(index, "Boolean", Some(*cause));
                Ok(false)
            }
            Err(signal) => Err(signal),
        }
    }

    /// An array. Arrays are not convertible, so a mismatch fails at once,
    /// together with the mismatches collected so far.
    pub(crate) fn array(&mut self, index: usize) -> Result<ObjectId, ControlAction> {
        let args = self.args;
        let value = &args[index];
        let is_array = value
            .as_object()
            .and_then(|id| self.interp.object(id))
            .is_some_and(|object| matches!(object.kind, ObjectKind::Array(_)));
        match value.as_object() {
            Some(id) if is_array => Ok(id),
            _ => {
                self.mismatch(index, "Array", None);
                Err(cannot_invoke(std::mem::take(&mut self.failures)).into())
            }
        }
    }

    fn mismatch(&mut self, index: usize, expected: &str, cause: Option<Diagnostic>) {
        let got = self.interp.value_name(&self.args[index]);
        let failure = wrong_arg_type(self.names[index], expected, &got);
        self.failures.push(match cause {
            Some(cause) => failure.with_child(cause),
            None => failure,
        });
    }

    pub(crate) fn finish(self) -> Result<(), ControlAction> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(cannot_invoke(self.failures).into())
        }
    }
}

impl Interpreter {
    /// `value.k:boolean()`, falling back to `Table.prototype.k:boolean` when
    /// the override does not produce a boolean.
    pub(crate) fn to_boolean(&mut self, value: &Value, scope: ScopeId) -> Result<bool, ControlAction> {
        if let Value::Boolean(b) = value {
            return Ok(*b);
        }
        let method = self.names.boolean;
        let converted = self.call_method_in(value.clone(), method, Vec::new(), scope)?;
        if let Value::Boolean(b) = converted {
            return Ok(b);
        }
        let generic = self.call_generic(converted.clone(), method, scope)?;
        generic
            .as_bool()
            .ok_or_else(|| cannot_convert(&self.value_name(&converted), "Boolean").into())
    }

    /// `value.k:number()`, falling back to `Table.prototype.k:number` when
    /// the override does not produce a number.
    pub(crate) fn to_number(&mut self, value: &Value, scope: ScopeId) -> Result<f64, ControlAction> {
        if let Value::Number(n) = value {
            return Ok(*n);
        }
        let method = self.names.number;
        let converted = self.call_method_in(value.clone(), method, Vec::new(), scope)?;
        if let Value::Number(n) = converted {
            return Ok(n);
        }
        let generic = self.call_generic(converted.clone(), method, scope)?;
        generic
            .as_number()
            .ok_or_else(|| cannot_convert(&self.value_name(&converted), "Number").into())
    }

    /// Calls the `Table.prototype` implementation of `method` on `receiver`.
    fn call_generic(&mut self, receiver: Value, method: Name, scope: ScopeId) -> Result<Value, ControlAction> {
        let table_prototype = Value::Object(self.globals.table_prototype);
        self.call_method_with(table_prototype, receiver, method, Vec::new(), scope)
    }

    /// Looks `method` up on `container` and calls it with `receiver` as `this`.
    pub(crate) fn call_method_with(
        &mut self,
        container: Value,
        receiver: Value,
        method: Name,
        args: Vec<Value>,
        scope: ScopeId,
    ) -> Result<Value, ControlAction> {
        let position = sprig_diagnostic::Position::INTRINSIC;
        let Some(callee) = self.get_property(&container, method) else {
            let name = self.value_name(&container);
            let method = self.interner.lookup(method);
            return Err(crate::errors::undefined_method(&name, method, position).into());
        };
        let function = self.expect_function(&callee, &position)?;
        self.call_function(function, receiver, args, scope, &position)
    }
}
