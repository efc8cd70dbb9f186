//! `Number.prototype` arithmetic, comparison and 32-bit bitwise operators.

use super::BinaryOp;
use crate::args::ArgumentCheck;
use crate::control::EvalResult;
use crate::interpreter::Interpreter;
use crate::object::NativeCall;
use crate::value::Value;

/// `a.op(b)`, or the three-operand `void.op(a, b)` form reached through the
/// operator fallback. Non-number operands are converted with `k:number`.
pub(super) fn binary(interp: &mut Interpreter, op: BinaryOp, call: &NativeCall) -> EvalResult {
    let (left, right) = if call.args.len() > 2 {
        let mut check = ArgumentCheck::new(interp, call, &["this", "left", "right"])?;
        let left = check.number(1)?;
        let right = check.number(2)?;
        check.finish()?;
        (left, right)
    } else {
        let mut check = ArgumentCheck::new(interp, call, &["this", "right"])?;
        let left = check.number(0)?;
        let right = check.number(1)?;
        check.finish()?;
        (left, right)
    };
    Ok(apply(op, left, right))
}

pub(super) fn neg(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let mut check = ArgumentCheck::new(interp, call, &["this"])?;
    let value = check.number(0)?;
    check.finish()?;
    Ok(Value::Number(-value))
}

pub(super) fn bit_neg(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let mut check = ArgumentCheck::new(interp, call, &["this"])?;
    let value = check.number(0)?;
    check.finish()?;
    Ok(Value::Number(f64::from(!to_int32(value))))
}

pub(super) fn apply(op: BinaryOp, a: f64, b: f64) -> Value {
    match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Mod => Value::Number(a % b),
        BinaryOp::Pow => Value::Number(a.powf(b)),
        BinaryOp::Lt => Value::Boolean(a < b),
        BinaryOp::Lte => Value::Boolean(a <= b),
        BinaryOp::Gt => Value::Boolean(a > b),
        BinaryOp::Gte => Value::Boolean(a >= b),
        BinaryOp::Eq => Value::Boolean(a == b),
        BinaryOp::Neq => Value::Boolean(a != b),
        BinaryOp::BitAnd => Value::Number(f64::from(to_int32(a) & to_int32(b))),
        BinaryOp::BitOr => Value::Number(f64::from(to_int32(a) | to_int32(b))),
        BinaryOp::BitXor => Value::Number(f64::from(to_int32(a) ^ to_int32(b))),
        BinaryOp::BitShl => Value::Number(f64::from(to_int32(a).wrapping_shl(shift(b)))),
        BinaryOp::BitShr => Value::Number(f64::from(to_int32(a).wrapping_shr(shift(b)))),
        BinaryOp::BitShrUnsigned => {
            Value::Number(f64::from(to_uint32(a).wrapping_shr(shift(b))))
        }
    }
}

/// Wraps a number into the signed 32-bit range: truncate, then modulo 2^32.
/// Non-finite values become 0.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "modulo 2^32 wrapping is the intended conversion"
)]
pub(super) fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is reduced into [0, 2^32) before the cast"
)]
pub(super) fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// Shift counts use the low five bits.
fn shift(count: f64) -> u32 {
    to_uint32(count) & 31
}
