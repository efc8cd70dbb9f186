//! Grouping of operator pairs.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::dump;
use crate::operators::{Operator, OperatorKind, INFIX_OPERATORS};

fn method_operators() -> Vec<Operator> {
    INFIX_OPERATORS
        .iter()
        .copied()
        .filter(|op| matches!(op.kind, OperatorKind::Method(_)))
        .collect()
}

fn method(op: Operator) -> &'static str {
    match op.kind {
        OperatorKind::Method(name) => name,
        _ => unreachable!("filtered to method operators"),
    }
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(dump("x = y = z"), "(group (= x (= y z)))");
}

#[test]
fn power_is_right_associative() {
    assert_eq!(dump("x ** y ** z"), "(group (k:pow x (k:pow y z)))");
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(dump("x - y - z"), "(group (k:sub (k:sub x y) z))");
}

#[test]
fn assignment_binds_loosest() {
    assert_eq!(dump("x = a || b"), "(group (= x (@k:or a b)))");
}

proptest! {
    #[test]
    fn pairs_group_by_precedence(
        a in prop::sample::select(method_operators()),
        b in prop::sample::select(method_operators()),
    ) {
        let source = format!("x {} y {} z", a.token, b.token);
        let expected = if b.precedence >= a.result_precedence {
            format!("(group ({} x ({} y z)))", method(a), method(b))
        } else {
            format!("(group ({} ({} x y) z))", method(b), method(a))
        };
        prop_assert_eq!(dump(&source), expected);
    }

    #[test]
    fn tighter_left_operator_groups_first(
        a in prop::sample::select(method_operators()),
        b in prop::sample::select(method_operators()),
    ) {
        prop_assume!(a.precedence > b.precedence);
        let source = format!("x {} y {} z", a.token, b.token);
        let expected = format!("(group ({} ({} x y) z))", method(b), method(a));
        prop_assert_eq!(dump(&source), expected);
    }
}
