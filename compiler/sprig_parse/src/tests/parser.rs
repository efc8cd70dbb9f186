use pretty_assertions::assert_eq;
use sprig_ir::ExprKind;

use super::{dump, parse_text};

#[test]
fn empty_input_is_empty_group() {
    assert_eq!(dump(""), "(group)");
    assert_eq!(dump("  // nothing\n/* at all */"), "(group)");
}

#[test]
fn literals() {
    assert_eq!(dump("42, 1.5, 7."), "(group 42 1.5 7)");
    assert_eq!(dump(r#""a" 'b' `c`"#), r#"(group "a" "b" "c")"#);
}

#[test]
fn string_escapes() {
    assert_eq!(
        dump(r#""line\nnext\t\"q\" \x41\$""#),
        r#"(group "line\nnext\t\"q\" A$")"#
    );
}

#[test]
fn newlines_and_commas_separate_statements() {
    assert_eq!(dump("a\nb, c"), "(group a b c)");
}

#[test]
fn binary_operators_become_method_calls() {
    assert_eq!(dump("1 + 2 * 3"), "(group (k:add 1 (k:mul 2 3)))");
    assert_eq!(dump("a && b || c"), "(group (@k:or (@k:and a b) c))");
    assert_eq!(dump("a is b"), "(group (k:is a b))");
}

#[test]
fn word_operator_needs_boundary() {
    assert_eq!(dump("isEmpty"), "(group isEmpty)");
    assert_eq!(dump("a is:x"), "(group a is:x)");
}

#[test]
fn prefix_operators() {
    assert_eq!(dump("-a"), "(group (k:neg a))");
    assert_eq!(dump("!!a"), "(group (k:boolean a))");
    assert_eq!(dump("+a"), "(group (k:number a))");
    assert_eq!(dump("!a == b"), "(group (k:eq (k:not a) b))");
    assert_eq!(dump("-2 ** 2"), "(group (k:pow (k:neg 2) 2))");
}

#[test]
fn declarations() {
    assert_eq!(dump("$x"), "(group ($ x))");
    assert_eq!(dump("$x = 5"), "(group (= ($ x) 5))");
    assert_eq!(dump("$t.foo = 1"), "(group (= ($ (. t foo)) 1))");
}

#[test]
fn member_access_and_calls() {
    assert_eq!(dump("a.b.c"), "(group (. (. a b) c))");
    assert_eq!(dump("a.b(1, 2)"), "(group (b a 1 2))");
    assert_eq!(dump("f(1)(2)"), "(group (call (call f 1) 2))");
    assert_eq!(dump("Table.new()"), "(group (new Table))");
}

#[test]
fn indexing_sugar() {
    assert_eq!(dump("[1,2,3][1]"), "(group (k:at [array 1 2 3] 1))");
    assert_eq!(dump("a[0] = 5"), "(group (k:at a 0 5))");
}

#[test]
fn trailing_argument_sugar() {
    assert_eq!(dump("f(a) = b"), "(group (call f a b))");
}

#[test]
fn newline_prevents_juxtaposition() {
    assert_eq!(dump("f\n(1)"), "(group f (group 1))");
    assert_eq!(dump("a\n[1]"), "(group a [array 1])");
    assert_eq!(dump("f /* gap */ (1)"), "(group (call f 1))");
}

#[test]
fn operators_continue_across_newlines() {
    assert_eq!(dump("1\n+ 2"), "(group (k:add 1 2))");
}

#[test]
fn lambdas() {
    assert_eq!(
        dump(r"f = \(a, b) { a + b }"),
        "(group (= f (fn (a b) (group (k:add a b)))))"
    );
    assert_eq!(dump(r"\(x) x * 2"), "(group (fn (x) (k:mul x 2)))");
    assert_eq!(dump(r"\() 1"), "(group (fn () 1))");
}

#[test]
fn unbraced_lambda_keeps_following_statement() {
    assert_eq!(dump("f = \\(x) x\ng(1)"), "(group (= f (fn (x) x)) (call g 1))");
}

#[test]
fn raw_argument_names() {
    assert_eq!(dump("@if(a, b, c)"), "(group (call @if a b c))");
}

#[test]
fn nested_block_comments() {
    assert_eq!(dump("1 /* a /* b */ c */ + 2"), "(group (k:add 1 2))");
}

#[test]
fn spans_point_at_source() {
    let (output, _) = parse_text("foo + bar");
    let ExprKind::Group(items) = output.arena.kind(output.root) else {
        panic!("root is a group");
    };
    let call = output.arena.get_list(*items)[0];
    // Desugared operators sit on the operator token.
    assert_eq!(output.arena.span(call).to_range(), 4..5);
    let ExprKind::Invocation { args, .. } = output.arena.kind(call) else {
        panic!("operator desugars to an invocation");
    };
    let rhs = output.arena.get_list(*args)[0];
    assert_eq!(output.arena.span(rhs).to_range(), 6..9);
}
