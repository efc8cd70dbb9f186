use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{eval, exception, interpreter, run_in};
use crate::Value;

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn arithmetic() {
    assert_eq!(eval("7 - 2 - 1"), num(4.0));
    assert_eq!(eval("2 ** 3 ** 2"), num(512.0));
    assert_eq!(eval("-2 ** 2"), num(4.0));
    assert_eq!(eval("7 % 4"), num(3.0));
    assert_eq!(eval("1 / 4"), num(0.25));
}

#[test]
fn comparisons_and_equality() {
    assert_eq!(eval("1 < 2"), Value::Boolean(true));
    assert_eq!(eval("2 <= 1"), Value::Boolean(false));
    assert_eq!(eval("1 == 1"), Value::Boolean(true));
    assert_eq!(eval("1 != 1"), Value::Boolean(false));
    assert_eq!(eval("\"a\" == \"a\""), Value::Boolean(true));
    assert_eq!(eval("\"a\" != \"b\""), Value::Boolean(true));
    assert_eq!(eval("null == void"), Value::Boolean(false));
    assert_eq!(eval("(0 / 0) == (0 / 0)"), Value::Boolean(false));
}

#[test]
fn objects_compare_by_identity() {
    assert_eq!(eval("Table.new() == Table.new()"), Value::Boolean(false));
    assert_eq!(eval("$t = Table.new()\nt == t"), Value::Boolean(true));
    assert_eq!(eval("$t = Table.new()\nt is t"), Value::Boolean(true));
    assert_eq!(eval("[1] is [1]"), Value::Boolean(false));
}

#[test]
fn prefix_operators() {
    assert_eq!(eval("!true"), Value::Boolean(false));
    assert_eq!(eval("!0"), Value::Boolean(true));
    assert_eq!(eval("!!\"\""), Value::Boolean(false));
    assert_eq!(eval("!!Table.new()"), Value::Boolean(true));
    assert_eq!(eval("+true"), num(1.0));
    assert_eq!(eval("-(1 + 2)"), num(-3.0));
}

#[test]
fn booleans_convert_for_arithmetic() {
    assert_eq!(eval("true + 1"), num(2.0));
    assert_eq!(eval("1 + true"), num(2.0));
}

#[test]
fn string_concatenation() {
    assert_eq!(eval("\"a\" + \"b\""), Value::string("ab"));
    assert_eq!(eval("\"n = \" + 5"), Value::string("n = 5"));
    assert_eq!(eval("\"list: \" + [1, \"x\"]"), Value::string("list: [1, \"x\"]"));
    assert_eq!(eval("[1] + \"!\""), Value::string("[1]!"));
}

#[test]
fn bitwise_methods() {
    assert_eq!(eval("(6).k:bitAnd(3)"), num(2.0));
    assert_eq!(eval("(1).k:bitShl(4)"), num(16.0));
    assert_eq!(eval("(0).k:bitNeg()"), num(-1.0));
}

#[test]
fn short_circuit_operators_return_operands() {
    assert_eq!(eval("0 || \"fallback\""), Value::string("fallback"));
    assert_eq!(eval("1 || unreachable()"), num(1.0));
    assert_eq!(eval("0 && unreachable()"), num(0.0));
    assert_eq!(eval("1 && 2"), num(2.0));
}

#[test]
fn coalesce_and_else() {
    assert_eq!(eval("null.@k:coalesce(5)"), num(5.0));
    assert_eq!(eval("(0).@k:coalesce(unreachable())"), num(0.0));
    assert_eq!(eval("void.@k:else(5)"), num(5.0));
    assert_eq!(eval("null.@k:else(5)"), Value::Null);
}

#[test]
fn tables_do_not_support_arithmetic() {
    let diagnostic = exception("Table.new() * Table.new()");
    assert!(diagnostic.mentions(
        "Operands \"[table <anon>]\" and \"[table <anon>]\" do not support operator \"k:mul\""
    ));
}

#[test]
fn operator_methods_can_be_overridden() {
    let text = "\
$Vec = Table.new()
$Vec.prototype = Table.new()
$Vec.new = Table.new
$Vec.prototype.k:add = \\(this, other) this.x + other.x
$a = Vec.new()
$a.x = 2
$b = Vec.new()
$b.x = 5
a + b";
    assert_eq!(eval(text), num(7.0));
}

#[test]
fn number_operand_mismatch_reports_argument() {
    let diagnostic = exception("1 + \"a\"");
    assert!(diagnostic.mentions("Cannot invoke"));
    assert!(diagnostic.mentions(
        "Wrong type for argument \"right\", expected \"Number\", but got \"String\""
    ));
    assert!(diagnostic.mentions("Cannot convert \"String\" to Number"));
}

#[test]
fn every_mismatched_argument_is_reported() {
    let diagnostic = exception("Number.prototype.k:sub.call(void, \"a\", \"b\")");
    let mut node = &diagnostic;
    while node.message != "Cannot invoke" {
        node = node.children.first().expect("no \"Cannot invoke\" in the chain");
    }
    let failures: Vec<&str> = node
        .children
        .iter()
        .map(|child| child.message.as_str())
        .collect();
    assert_eq!(
        failures,
        [
            "Wrong type for argument \"left\", expected \"Number\", but got \"String\"",
            "Wrong type for argument \"right\", expected \"Number\", but got \"String\"",
        ]
    );
}

proptest! {
    #[test]
    fn integer_arithmetic_matches_host(a in -1000i32..1000, b in 1i32..1000) {
        let text = format!("{a} * {b} + {b} - {a} % {b}");
        let mut interp = interpreter();
        let expected = f64::from(a) * f64::from(b) + f64::from(b) - f64::from(a) % f64::from(b);
        prop_assert_eq!(run_in(&mut interp, &text), Ok(num(expected)));
    }

    #[test]
    fn comparison_agrees_with_host(a in -50i32..50, b in -50i32..50) {
        let mut interp = interpreter();
        let text = format!("{a} < {b}");
        prop_assert_eq!(run_in(&mut interp, &text), Ok(Value::Boolean(a < b)));
    }
}
