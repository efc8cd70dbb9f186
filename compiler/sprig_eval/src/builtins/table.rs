//! `Table` and `Table.prototype`: construction, truthiness, the short-circuit
//! operators and the generic operator fallbacks every value inherits.

use super::BinaryOp;
use crate::args::verify_arguments;
use crate::control::EvalResult;
use crate::errors::{cannot_convert, missing_prototype, prototype_not_table, unsupported_operator};
use crate::interpreter::Interpreter;
use crate::object::{NativeCall, Object};
use crate::value::Value;

/// `Ctor.new()`: a table inheriting from `Ctor.prototype`.
pub(super) fn new(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    verify_arguments(&call.args, &["this"])?;
    let Some(prototype) = interp.get_property(&call.args[0], interp.names.prototype) else {
        return Err(missing_prototype().into());
    };
    let Some(prototype) = interp.is_table(&prototype) else {
        return Err(prototype_not_table().into());
    };
    Ok(Value::Object(interp.heap.alloc_object(Object::table(Some(prototype)))))
}

/// `!x` is `x.k:boolean().k:not()`.
pub(super) fn not(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    verify_arguments(&call.args, &["this"])?;
    let names = interp.names;
    let truth = interp.call_method_in(call.args[0].clone(), names.boolean, Vec::new(), call.scope)?;
    interp.call_method_in(truth, names.not, Vec::new(), call.scope)
}

/// `false`, `0`, `""`, `null` and `void` are falsy; everything else is truthy.
pub(super) fn boolean(call: &NativeCall) -> EvalResult {
    verify_arguments(&call.args, &["this"])?;
    let falsy = match &call.args[0] {
        Value::Void | Value::Null | Value::Boolean(false) => true,
        Value::Number(n) => *n == 0.0,
        Value::String(text) => text.is_empty(),
        Value::Boolean(true) | Value::Object(_) => false,
    };
    Ok(Value::Boolean(!falsy))
}

pub(super) fn number(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    verify_arguments(&call.args, &["this"])?;
    match &call.args[0] {
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::Boolean(b) => Ok(Value::Number(if *b { 1.0 } else { 0.0 })),
        other => Err(cannot_convert(&interp.value_name(other), "Number").into()),
    }
}

/// Identity for objects, equality for primitives.
pub(super) fn is(call: &NativeCall) -> EvalResult {
    verify_arguments(&call.args, &["this", "other"])?;
    Ok(Value::Boolean(call.args[0] == call.args[1]))
}

/// `a && b`: `b` is evaluated only when `a` is truthy; otherwise `a`.
pub(super) fn and(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    short_circuit(interp, call, |truthy| truthy)
}

/// `a || b`: `b` is evaluated only when `a` is falsy; otherwise `a`.
pub(super) fn or(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    short_circuit(interp, call, |truthy| !truthy)
}

/// `a.@k:coalesce(b)`: `b` is evaluated only when `a` is `null` or `void`.
pub(super) fn coalesce(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    select(interp, call, Value::is_nullish)
}

/// `a.@k:else(b)`: `b` is evaluated only when `a` is `void`.
pub(super) fn else_(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    select(interp, call, |value| matches!(value, Value::Void))
}

fn short_circuit(
    interp: &mut Interpreter,
    call: &NativeCall,
    take_right: impl Fn(bool) -> bool,
) -> EvalResult {
    verify_arguments(&call.args, &["this", "other"])?;
    let left = &call.args[0];
    let truthy = interp.to_boolean(left, call.scope)?;
    interp.handle_target(&call.args[1])?;
    if take_right(truthy) {
        interp.eval_handle(&call.args[1], call.scope)
    } else {
        Ok(left.clone())
    }
}

fn select(interp: &mut Interpreter, call: &NativeCall, take_right: impl Fn(&Value) -> bool) -> EvalResult {
    verify_arguments(&call.args, &["this", "other"])?;
    interp.handle_target(&call.args[1])?;
    if take_right(&call.args[0]) {
        interp.eval_handle(&call.args[1], call.scope)
    } else {
        Ok(call.args[0].clone())
    }
}

/// Generic operator implementation inherited through `Table.prototype`.
///
/// Called as `left.op(right)` it re-dispatches to `right.op(void, left, right)`,
/// giving the right operand's prototype a chance to handle the pair. Called
/// in that three-operand form it is the last resort: `k:eq` compares,
/// `k:neq` is `k:eq` followed by `k:not`, anything else is unsupported.
pub(super) fn operator_fallback(
    interp: &mut Interpreter,
    op: BinaryOp,
    call: &NativeCall,
) -> EvalResult {
    verify_arguments(&call.args, &["this", "other"])?;

    if let [_, left, right, ..] = call.args.as_slice() {
        return match op {
            BinaryOp::Eq => Ok(Value::Boolean(left == right)),
            BinaryOp::Neq => {
                let names = interp.names;
                let equal =
                    interp.call_method_in(left.clone(), names.eq, vec![right.clone()], call.scope)?;
                interp.call_method_in(equal, names.not, Vec::new(), call.scope)
            }
            _ => Err(unsupported_operator(
                &interp.value_name(left),
                &interp.value_name(right),
                op.method(),
            )
            .into()),
        };
    }

    let (left, right) = (call.args[0].clone(), call.args[1].clone());
    let method = interp.intern(op.method());
    interp.call_method_with(right.clone(), Value::Void, method, vec![left, right], call.scope)
}
