use pretty_assertions::assert_eq;

use super::{eval, exception, report, show};
use crate::Value;

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(eval("1 + 2 * 3"), Value::Number(7.0));
    assert_eq!(eval("(1 + 2) * 3"), Value::Number(9.0));
}

#[test]
fn declared_variable_is_visible_to_later_statements() {
    assert_eq!(eval("$x = 5\nx + 1"), Value::Number(6.0));
}

#[test]
fn lambda_called_with_arguments() {
    assert_eq!(eval("$f = \\(a, b) { a + b }\nf(2, 3)"), Value::Number(5.0));
    assert_eq!(eval("$f\nf = \\(a, b) { a + b }\nf(2, 3)"), Value::Number(5.0));
}

#[test]
fn assigning_an_undeclared_variable_fails() {
    let diagnostic = exception("f = \\(a, b) { a + b }");
    assert_eq!(diagnostic.message, "Cannot find variable \"f\"");
}

#[test]
fn indexing_is_zero_based() {
    assert_eq!(eval("[1,2,3][1]"), Value::Number(2.0));
}

#[test]
fn calling_an_undeclared_variable_names_it() {
    let diagnostic = exception("y()");
    assert!(diagnostic.message.contains("\"y\""));
    assert_eq!(report("y()"), "test.sprig:1:1 - Cannot find variable \"y\"\ny()\n^");
}

#[test]
fn declaring_a_property_twice_fails() {
    let diagnostic = exception("$t = Table.new()\n$t.foo = 1\n$t.foo = 2");
    assert_eq!(diagnostic.message, "Property \"foo\" is already defined");
    assert_eq!(
        diagnostic.format(&sprig_diagnostic::FormatOptions::default().short(true)),
        "test.sprig:3:4 - Property \"foo\" is already defined"
    );
}

#[test]
fn exceptions_carry_the_call_chain() {
    let text = "$inner = \\() unreachable()\n$outer = \\() inner()\nouter()";
    let expected = [
        "test.sprig:3:1 - Invocation failed",
        "outer()",
        "~~~~~",
        "    test.sprig:2:14 - Invocation failed",
        "    $outer = \\() inner()",
        "                 ~~~~~",
        "        test.sprig:1:14 - Invocation failed",
        "        $inner = \\() unreachable()",
        "                     ~~~~~~~~~~~",
        "            Reached unreachable code",
    ];
    assert_eq!(report(text), expected.join("\n"));
}

#[test]
fn closures_capture_their_defining_scope() {
    let text = "\
$counter = \\() {
    $count = 0
    \\() { count = count + 1 }
}
$next = counter()
next()
next()
next()";
    assert_eq!(eval(text), Value::Number(3.0));
}

#[test]
fn methods_receive_their_receiver() {
    let text = "\
$Point = Table.new()
$Point.prototype = Table.new()
$Point.new = Table.new
$Point.prototype.sum = \\(this) this.x + this.y
$p = Point.new()
$p.x = 3
$p.y = 4
p.sum()";
    assert_eq!(eval(text), Value::Number(7.0));
}

#[test]
fn result_renders_with_the_inspector() {
    assert_eq!(show("[1, \"two\", [true, null]]"), "[1, \"two\", [true, null]]");
    assert_eq!(
        show("$t = Table.new()\n$t.b = 2\n$t.a = \"x\"\nt"),
        "t { a: \"x\", b: 2 }"
    );
    assert_eq!(show("Table.new()"), "{}");
    assert_eq!(show("$f = \\() 1"), "[function f]");
}
