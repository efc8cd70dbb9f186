//! `Array.prototype`.
//!
//! Indices are numbers; negative indices count from the end. An index that
//! is not an integer is out of range.

use crate::args::ArgumentCheck;
use crate::control::{ControlAction, EvalResult};
use crate::errors::{
    array_too_long, empty_array, index_out_of_range, negative_length, stale_reference,
    void_element,
};
use crate::heap::ObjectId;
use crate::interpreter::Interpreter;
use crate::object::{NativeCall, Object, ObjectKind};
use crate::value::Value;

/// `a[i]` reads an element, `a.k:at(i, value)` replaces one.
pub(super) fn at(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    if call.args.len() > 2 {
        let mut check = ArgumentCheck::new(interp, call, &["this", "index", "value"])?;
        let array = check.array(0)?;
        let index = check.number(1)?;
        let value = check.value(2);
        check.finish()?;

        if value == Value::Void {
            return Err(void_element().into());
        }
        let elements = elements_mut(interp, array)?;
        let slot = normalize_index(index, elements.len())?;
        elements[slot] = value.clone();
        return Ok(value);
    }

    let mut check = ArgumentCheck::new(interp, call, &["this", "index"])?;
    let array = check.array(0)?;
    let index = check.number(1)?;
    check.finish()?;

    let elements = elements(interp, array)?;
    let slot = normalize_index(index, elements.len())?;
    Ok(elements[slot].clone())
}

/// Appends every argument; returns the new length.
pub(super) fn push(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let array = receiver(interp, call)?;
    let limit = interp.config.max_array_length;
    let elements = elements_mut(interp, array)?;
    reserve(elements, call.args.len() - 1, limit)?;
    elements.extend_from_slice(&call.args[1..]);
    Ok(length(elements.len()))
}

/// Prepends every argument, keeping their order; returns the new length.
pub(super) fn unshift(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let array = receiver(interp, call)?;
    let limit = interp.config.max_array_length;
    let elements = elements_mut(interp, array)?;
    reserve(elements, call.args.len() - 1, limit)?;
    elements.splice(0..0, call.args[1..].iter().cloned());
    Ok(length(elements.len()))
}

pub(super) fn pop(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let array = receiver(interp, call)?;
    elements_mut(interp, array)?
        .pop()
        .ok_or_else(|| empty_array("pop").into())
}

pub(super) fn shift(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let array = receiver(interp, call)?;
    let elements = elements_mut(interp, array)?;
    if elements.is_empty() {
        return Err(empty_array("shift").into());
    }
    Ok(elements.remove(0))
}

/// A shallow copy sharing the receiver's prototype.
pub(super) fn clone(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let array = receiver(interp, call)?;
    let copy = elements(interp, array)?.to_vec();
    Ok(new_sibling(interp, array, copy))
}

pub(super) fn clear(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let array = receiver(interp, call)?;
    elements_mut(interp, array)?.clear();
    Ok(Value::Void)
}

/// Shortens the array, or pads it with `null`, to `length` elements.
pub(super) fn truncate(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let mut check = ArgumentCheck::new(interp, call, &["this", "length"])?;
    let array = check.array(0)?;
    let target = check.number(1)?;
    check.finish()?;

    if target < 0.0 {
        return Err(negative_length().into());
    }
    let limit = interp.config.max_array_length;
    let elements = elements_mut(interp, array)?;
    let target = to_index(target).ok_or_else(|| index_out_of_range(target, elements.len()))?;
    if let Some(extra) = target.checked_sub(elements.len()) {
        reserve(elements, extra, limit)?;
    }
    elements.resize(target, Value::Null);
    Ok(Value::Void)
}

/// `a.slice(start)` or `a.slice(start, end)`: a copy of `start..end`.
///
/// Both bounds may be negative and may equal the length. An end before the
/// start gives an empty array.
pub(super) fn slice(interp: &mut Interpreter, call: &NativeCall) -> EvalResult {
    let (array, start, end) = if call.args.len() > 2 {
        let mut check = ArgumentCheck::new(interp, call, &["this", "start", "end"])?;
        let array = check.array(0)?;
        let start = check.number(1)?;
        let end = check.number(2)?;
        check.finish()?;
        (array, start, Some(end))
    } else {
        let mut check = ArgumentCheck::new(interp, call, &["this", "start"])?;
        let array = check.array(0)?;
        let start = check.number(1)?;
        check.finish()?;
        (array, start, None)
    };

    let source = elements(interp, array)?;
    let len = source.len();
    let start = normalize_limit(start, len)?;
    let end = match end {
        Some(end) => normalize_limit(end, len)?,
        None => len,
    };
    let copy = source.get(start..end).map(<[Value]>::to_vec).unwrap_or_default();
    Ok(new_sibling(interp, array, copy))
}

fn receiver(interp: &mut Interpreter, call: &NativeCall) -> Result<ObjectId, ControlAction> {
    let mut check = ArgumentCheck::new(interp, call, &["this"])?;
    let array = check.array(0)?;
    check.finish()?;
    Ok(array)
}

fn elements(interp: &Interpreter, array: ObjectId) -> Result<&[Value], ControlAction> {
    interp
        .array_elements(&Value::Object(array))
        .ok_or_else(|| stale_reference().into())
}

fn elements_mut(interp: &mut Interpreter, array: ObjectId) -> Result<&mut Vec<Value>, ControlAction> {
    interp
        .array_elements_mut(array)
        .ok_or_else(|| stale_reference().into())
}

/// Makes room for `extra` more elements without passing `limit`.
fn reserve(elements: &mut Vec<Value>, extra: usize, limit: usize) -> Result<(), ControlAction> {
    let wanted = elements.len().saturating_add(extra);
    if wanted > limit {
        return Err(array_too_long(wanted, limit).into());
    }
    elements
        .try_reserve(extra)
        .map_err(|_| array_too_long(wanted, limit).into())
}

fn new_sibling(interp: &mut Interpreter, array: ObjectId, elements: Vec<Value>) -> Value {
    let prototype = interp.heap.object(array).and_then(Object::prototype);
    let copy = Object::new(prototype, ObjectKind::Array(elements));
    Value::Object(interp.heap.alloc_object(copy))
}

#[expect(clippy::cast_precision_loss, reason = "array lengths are far below 2^52")]
fn length(len: usize) -> Value {
    Value::Number(len as f64)
}

/// An element index: `0 <= index < len`.
fn normalize_index(index: f64, len: usize) -> Result<usize, ControlAction> {
    resolve(index, len)
        .filter(|&slot| slot < len)
        .ok_or_else(|| index_out_of_range(index, len).into())
}

/// A slice bound: `0 <= index <= len`.
fn normalize_limit(index: f64, len: usize) -> Result<usize, ControlAction> {
    resolve(index, len).ok_or_else(|| index_out_of_range(index, len).into())
}

#[expect(clippy::cast_precision_loss, reason = "array lengths are far below 2^52")]
fn resolve(index: f64, len: usize) -> Option<usize> {
    let from_end = if index < 0.0 { index + len as f64 } else { index };
    to_index(from_end).filter(|&slot| slot <= len)
}

/// A non-negative integral number as an index.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range checked before the cast"
)]
fn to_index(value: f64) -> Option<usize> {
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as usize)
}
