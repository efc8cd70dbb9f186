//! The invocation protocol.
//!
//! 1. Evaluate the target: the receiver of a member call, or the callee
//!    value itself for any other target.
//! 2. Build the arguments: evaluated left to right, or wrapped as raw
//!    expression handles when the callee carries
//!    [`FunctionFlags::RAW_ARGUMENTS`] or was named with a leading `@`.
//!    A member callee is consulted here only for its flags.
//! 3. Resolve the callee. A member name is looked up on the receiver's
//!    prototype chain after the arguments ran; a missing method or a
//!    non-function fails only now.
//! 4. Prepend the receiver when the first parameter is `this`.
//! 5. Run the body. An exception coming out is wrapped in
//!    "Invocation failed" at the call site, building the causal chain.

use sprig_diagnostic::Position;
use sprig_ir::{methods, ExprId, ExprKind, ExprRange, Name, SharedArena};
use tracing::trace;

use super::Interpreter;
use crate::builtins;
use crate::control::{ControlAction, EvalResult};
use crate::errors::{
    call_depth_exceeded, invocation_failed, not_callable, stale_reference, undefined_method,
};
use crate::heap::{ObjectId, ScopeId};
use crate::object::{FunctionBody, FunctionFlags, NativeCall, NativeHandler, ObjectKind};
use crate::scope::Scope;
use crate::value::Value;

impl Interpreter {
    pub(super) fn eval_invocation(
        &mut self,
        arena: &SharedArena,
        id: ExprId,
        target: ExprId,
        args: ExprRange,
        scope: ScopeId,
    ) -> EvalResult {
        let position = Self::position(arena, id);
        self.check_interrupt(&position)?;

        let is_method = matches!(arena.kind(target), ExprKind::MemberAccess { .. });
        let (receiver, callee, name) = match arena.kind(target) {
            ExprKind::MemberAccess { receiver, member } => {
                let receiver = self.eval(arena, *receiver, scope)?;
                let callee = self.get_property(&receiver, *member);
                (receiver, callee, *member)
            }
            kind => {
                let name = match kind {
                    ExprKind::Identifier(name) => *name,
                    _ => Name::EMPTY,
                };
                let callee = self.eval(arena, target, scope)?;
                (Value::Void, Some(callee), name)
            }
        };

        // The early member lookup only decides raw arguments; the method is
        // resolved again once the arguments have run.
        let args = if self.takes_raw_arguments(callee.as_ref(), name) {
            arena
                .get_list(args)
                .iter()
                .map(|&expr| self.new_handle(arena, expr))
                .collect()
        } else {
            self.eval_list(arena, args, scope)?
        };

        let callee = if is_method {
            let Some(callee) = self.get_property(&receiver, name) else {
                let container = self.value_name(&receiver);
                let method = self.interner.lookup(name);
                return Err(undefined_method(&container, method, position).into());
            };
            callee
        } else {
            callee.unwrap_or(Value::Void)
        };
        let function = self.expect_function(&callee, &position)?;

        self.call_function(function, receiver, args, scope, &position)
    }

    fn takes_raw_arguments(&self, callee: Option<&Value>, name: Name) -> bool {
        let flagged = callee
            .and_then(Value::as_object)
            .and_then(|id| self.heap.object(id))
            .and_then(|object| object.function())
            .is_some_and(|f| f.flags.contains(FunctionFlags::RAW_ARGUMENTS));
        flagged || self.interner.lookup(name).starts_with(methods::RAW_PREFIX)
    }

    /// The function object behind `callee`, or a "not callable" exception.
    pub(crate) fn expect_function(
        &self,
        callee: &Value,
        position: &Position,
    ) -> Result<ObjectId, ControlAction> {
        match callee
            .as_object()
            .and_then(|id| Some((id, self.heap.object(id)?)))
        {
            Some((id, object)) if object.function().is_some() => Ok(id),
            _ => Err(not_callable(&self.value_name(callee), position.clone()).into()),
        }
    }

    /// Resolves `method` on `receiver` and calls it with no call site.
    pub(crate) fn call_method_in(
        &mut self,
        receiver: Value,
        method: Name,
        args: Vec<Value>,
        scope: ScopeId,
    ) -> EvalResult {
        let Some(callee) = self.get_property(&receiver, method) else {
            let container = self.value_name(&receiver);
            let method = self.interner.lookup(method);
            return Err(undefined_method(&container, method, Position::INTRINSIC).into());
        };
        let function = self.expect_function(&callee, &Position::INTRINSIC)?;
        self.call_function(function, receiver, args, scope, &Position::INTRINSIC)
    }

    /// Calls a resolved function; `scope` is the caller's scope.
    #[tracing::instrument(level = "trace", skip_all, fields(depth = self.call_depth))]
    pub(crate) fn call_function(
        &mut self,
        function: ObjectId,
        receiver: Value,
        mut args: Vec<Value>,
        scope: ScopeId,
        position: &Position,
    ) -> EvalResult {
        let Some(callee) = self.heap.object(function).and_then(|o| o.function()) else {
            return Err(stale_reference().into());
        };
        if callee.params.first() == Some(&self.names.this) {
            args.insert(0, receiver);
        }
        let body = callee.body.clone();

        let result = if self.call_depth >= self.config.max_call_depth {
            Err(call_depth_exceeded(self.config.max_call_depth).into())
        } else {
            self.call_depth += 1;
            let result = self.run_body(function, body, args, scope);
            self.call_depth -= 1;
            result
        };

        result.map_err(|action| match action {
            ControlAction::Exception(cause) => {
                trace!(message = %cause.message, "invocation failed");
                invocation_failed(position.clone(), *cause).into()
            }
            signal @ ControlAction::Return(_) => signal,
        })
    }

    fn run_body(
        &mut self,
        function: ObjectId,
        body: FunctionBody,
        args: Vec<Value>,
        scope: ScopeId,
    ) -> EvalResult {
        match body {
            FunctionBody::Native(NativeHandler::Builtin(builtin)) => {
                let call = NativeCall {
                    function,
                    args,
                    scope,
                };
                builtins::call(self, builtin, call)
            }
            FunctionBody::Native(NativeHandler::Host(handler)) => {
                let call = NativeCall {
                    function,
                    args,
                    scope,
                };
                handler(self, call)
            }
            FunctionBody::Script(script) => {
                let params = match self.heap.object(function).map(|o| &o.kind) {
                    Some(ObjectKind::Function(f)) => f.params.clone(),
                    _ => return Err(stale_reference().into()),
                };

                let mut frame = Scope::new(Some(script.scope));
                let mut args = args.into_iter();
                for param in params {
                    frame.declare(param, args.next().unwrap_or(Value::Void));
                }
                let frame = self.heap.alloc_scope(frame);

                match self.eval(&script.arena, script.body, frame) {
                    Err(ControlAction::Return(value)) => Ok(value),
                    other => other,
                }
            }
        }
    }
}
