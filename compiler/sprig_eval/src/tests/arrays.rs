use pretty_assertions::assert_eq;

use super::{eval, exception, run_in, show};
use crate::{silent_handler, ControlAction, Interpreter, Value};

#[test]
fn indexing_counts_negative_indices_from_the_end() {
    assert_eq!(eval("[1, 2, 3][-1]"), Value::Number(3.0));
    assert_eq!(eval("[1, 2, 3][0]"), Value::Number(1.0));
}

#[test]
fn out_of_range_index_fails() {
    let diagnostic = exception("[1, 2, 3][3]");
    assert!(diagnostic.mentions("Index 3 out of range of array of length 3"));
    let diagnostic = exception("[1, 2, 3][0.5]");
    assert!(diagnostic.mentions("Index 0.5 out of range of array of length 3"));
}

#[test]
fn index_assignment_replaces_an_element() {
    assert_eq!(show("$a = [1, 2, 3]\na[1] = \"two\"\na"), "[1, \"two\", 3]");
    assert_eq!(eval("$a = [1]\na[0] = 5"), Value::Number(5.0));
    assert!(exception("$a = [1]\na[0] = void").mentions("Cannot set an array element to void"));
}

#[test]
fn push_and_unshift_return_the_new_length() {
    assert_eq!(eval("$a = [1]\na.push(2, 3)"), Value::Number(3.0));
    assert_eq!(show("$a = [3]\na.unshift(1, 2)\na"), "[1, 2, 3]");
}

#[test]
fn pop_and_shift_remove_from_the_ends() {
    assert_eq!(eval("$a = [1, 2, 3]\na.pop()"), Value::Number(3.0));
    assert_eq!(eval("$a = [1, 2, 3]\na.shift()"), Value::Number(1.0));
    assert_eq!(show("$a = [1, 2, 3]\na.pop()\na.shift()\na"), "[2]");
}

#[test]
fn pop_from_empty_array_fails() {
    assert!(exception("[].pop()").mentions("Cannot pop from an empty array"));
    assert!(exception("[].shift()").mentions("Cannot shift from an empty array"));
}

#[test]
fn clone_is_shallow_and_independent() {
    let text = "\
$inner = [1]
$a = [inner]
$b = a.clone()
b.push(2)
inner.push(9)
[a, b]";
    assert_eq!(show(text), "[[[1, 9]], [[1, 9], 2]]");
}

#[test]
fn clear_and_truncate() {
    assert_eq!(show("$a = [1, 2, 3]\na.clear()\na"), "[]");
    assert_eq!(show("$a = [1, 2, 3]\na.truncate(1)\na"), "[1]");
    assert_eq!(show("$a = [1]\na.truncate(3)\na"), "[1, null, null]");
    assert!(exception("[1].truncate(-1)").mentions("Cannot set array length to be less than zero"));
}

#[test]
fn growth_is_capped() {
    let diagnostic = exception("$a = []\na.truncate(4000000000)");
    assert_eq!(
        diagnostic.root_cause().message,
        "Array length 4000000000 exceeds the limit of 16777216 elements"
    );

    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .max_array_length(3)
        .build();
    let text = "$a = [1, 2]\na.push(3)\na.push(4)";
    let Err(ControlAction::Exception(diagnostic)) = run_in(&mut interp, text) else {
        panic!("push past the limit should fail");
    };
    assert!(diagnostic.mentions("Array length 4 exceeds the limit of 3 elements"));
    let value = run_in(&mut interp, "$b = [1]\nb.truncate(3)\nb").unwrap();
    assert_eq!(interp.inspect(&value), "[1, null, null]");
    assert!(run_in(&mut interp, "[].unshift(1, 2, 3, 4)").is_err());
}

#[test]
fn slice_copies_a_range() {
    assert_eq!(show("[1, 2, 3, 4].slice(1)"), "[2, 3, 4]");
    assert_eq!(show("[1, 2, 3, 4].slice(1, 3)"), "[2, 3]");
    assert_eq!(show("[1, 2, 3, 4].slice(-2)"), "[3, 4]");
    assert_eq!(show("[1, 2, 3, 4].slice(0, -1)"), "[1, 2, 3]");
    assert_eq!(show("[1, 2].slice(2)"), "[]");
    assert_eq!(show("[1, 2].slice(2, 1)"), "[]");
    assert!(exception("[1, 2].slice(3)").mentions("Index 3 out of range of array of length 2"));
}

#[test]
fn array_methods_reject_other_receivers() {
    let diagnostic = exception("Array.prototype.push.call(5, 1)");
    assert!(diagnostic.mentions(
        "Wrong type for argument \"this\", expected \"Array\", but got \"Number\""
    ));
}

#[test]
fn index_converts_through_number() {
    assert_eq!(eval("[1, 2][true]"), Value::Number(2.0));
    assert!(exception("[1, 2][\"x\"]").mentions("Wrong type for argument \"index\""));
}
