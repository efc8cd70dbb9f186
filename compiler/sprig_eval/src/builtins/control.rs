//! Control flow globals and the small `String`, `Boolean` and `Function`
//! prototypes.

use sprig_diagnostic::Position;

use crate::args::{verify_arguments, ArgumentCheck};
use crate::control::{ControlAction, EvalResult};
use crate::errors::unreachable_reached;
use crate::interpreter::Interpreter;
use crate::object::NativeCall;
use crate::value::Value;

/// Concatenation. The non-string operand is rendered with the inspector.
pub(super) fn string_add(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    verify_arguments(&call.args, &["this", "other"])?;
    let (left, right) = if call.args.len() > 2 {
        (&call.args[1], &call.args[2])
    } else {
        (&call.args[0], &call.args[1])
    };
    let mut text = interp.display(left);
    text.push_str(&interp.display(right));
    Ok(Value::string(text))
}

pub(super) fn boolean_not(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let mut check = ArgumentCheck::new(interp, call, &["this"])?;
    let value = check.boolean(0)?;
    check.finish()?;
    Ok(Value::Boolean(!value))
}

/// `f.call(receiver, args...)`: calls `f` with an explicit receiver.
pub(super) fn function_call(interp: &mut Interpreter, call: NativeCall) -> EvalResult {
    verify_arguments(&call.args, &["this", "receiver"])?;
    let mut args = call.args;
    let rest = args.split_off(2);
    let function = interp.expect_function(&args[0], &Position::INTRINSIC)?;
    let receiver = args.swap_remove(1);
    interp.call_function(function, receiver, rest, call.scope, &Position::INTRINSIC)
}

/// `@if(cond, then, cond, then, ..., else)`.
///
/// Conditions are evaluated in order until one is truthy; its branch is the
/// result. A trailing odd argument is the else branch. Without a matching
/// branch the result is `void`.
pub(super) fn if_(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    for chunk in call.args.chunks(2) {
        match chunk {
            [predicate, then] => {
                interp.handle_target(then)?;
                let condition = interp.eval_handle(predicate, call.scope)?;
                if interp.to_boolean(&condition, call.scope)? {
                    return interp.eval_handle(then, call.scope);
                }
            }
            [otherwise] => return interp.eval_handle(otherwise, call.scope),
            _ => {}
        }
    }
    Ok(Value::Void)
}

pub(super) fn return_(call: &NativeCall) -> EvalResult {
    let value = call.args.first().cloned().unwrap_or(Value::Void);
    Err(ControlAction::Return(value))
}

/// Writes the arguments, separated by spaces, through the print handler.
pub(super) fn print(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let line = call
        .args
        .iter()
        .map(|value| interp.display(value))
        .collect::<Vec<_>>()
        .join(" ");
    interp.print_handler.println(&line);
    Ok(Value::Void)
}

pub(super) fn unreachable() -> EvalResult {
    Err(unreachable_reached().into())
}
