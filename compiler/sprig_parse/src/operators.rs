//! Prefix and infix operator tables.
//!
//! Each operator has a binding precedence and a *result precedence*, the
//! minimum precedence used when parsing its right operand. Left-associative
//! operators use `precedence + 1`; `=` and `**` reuse their own precedence
//! and therefore associate to the right.

use sprig_ir::methods;

/// What an operator builds once both operands are parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperatorKind {
    /// Desugars to a call of the named method on the left (or only) operand.
    Method(&'static str),
    /// `$target`
    Declaration,
    /// `target = value`
    Assignment,
    /// `receiver.member`
    MemberAccess,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Operator {
    pub token: &'static str,
    pub precedence: u8,
    pub result_precedence: u8,
    pub kind: OperatorKind,
}

const fn left(token: &'static str, precedence: u8, kind: OperatorKind) -> Operator {
    Operator {
        token,
        precedence,
        result_precedence: precedence + 1,
        kind,
    }
}

const fn right(token: &'static str, precedence: u8, kind: OperatorKind) -> Operator {
    Operator {
        token,
        precedence,
        result_precedence: precedence,
        kind,
    }
}

use OperatorKind::{Assignment, Declaration, MemberAccess, Method};

pub const PREFIX_OPERATORS: &[Operator] = &[
    left("-", 10, Method(methods::NEG)),
    left("!", 10, Method(methods::NOT)),
    left("+", 10, Method(methods::NUMBER)),
    left("!!", 10, Method(methods::BOOLEAN)),
    left("$", 20, Declaration),
];

pub const INFIX_OPERATORS: &[Operator] = &[
    right("=", 0, Assignment),
    left("&&", 1, Method(methods::AND)),
    left("||", 1, Method(methods::OR)),
    left("<", 2, Method(methods::LT)),
    left("<=", 2, Method(methods::LTE)),
    left(">", 2, Method(methods::GT)),
    left(">=", 2, Method(methods::GTE)),
    left("==", 2, Method(methods::EQ)),
    left("!=", 2, Method(methods::NEQ)),
    left("is", 2, Method(methods::IS)),
    left("+", 3, Method(methods::ADD)),
    left("-", 3, Method(methods::SUB)),
    left("*", 4, Method(methods::MUL)),
    left("/", 4, Method(methods::DIV)),
    left("%", 4, Method(methods::MOD)),
    right("**", 5, Method(methods::POW)),
    left(".", 100, MemberAccess),
];

/// Every operator spelling, longest first, so `<=` is tried before `<`.
pub const OPERATOR_TOKENS: &[&str] = &[
    "!!", "&&", "||", "<=", ">=", "==", "!=", "is", "**", "-", "!", "+", "$", "=", "<", ">", "*",
    "/", "%", ".",
];

/// Juxtaposed `(args)` and `[index]` only attach to operands parsed at or
/// below this precedence; member names after `.` stay bare.
pub const MAX_CALL_PRECEDENCE: u8 = 100;

pub fn prefix(token: &str) -> Option<&'static Operator> {
    PREFIX_OPERATORS.iter().find(|op| op.token == token)
}

pub fn infix(token: &str) -> Option<&'static Operator> {
    INFIX_OPERATORS.iter().find(|op| op.token == token)
}

/// Word operators (`is`) only match on a word boundary.
pub(crate) fn is_word_token(token: &str) -> bool {
    token.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_list_is_longest_first() {
        for pair in OPERATOR_TOKENS.windows(2) {
            assert!(pair[0].len() >= pair[1].len(), "{pair:?} out of order");
        }
    }

    #[test]
    fn token_list_covers_both_tables_once() {
        let mut expected: Vec<&str> = PREFIX_OPERATORS
            .iter()
            .chain(INFIX_OPERATORS)
            .map(|op| op.token)
            .collect();
        expected.sort_unstable();
        expected.dedup();
        let mut actual = OPERATOR_TOKENS.to_vec();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn right_associative_operators() {
        let rights: Vec<&str> = INFIX_OPERATORS
            .iter()
            .filter(|op| op.result_precedence == op.precedence)
            .map(|op| op.token)
            .collect();
        assert_eq!(rights, ["=", "**"]);
    }

    #[test]
    fn minus_is_both_prefix_and_infix() {
        assert_eq!(prefix("-").map(|op| op.kind), Some(Method(methods::NEG)));
        assert_eq!(infix("-").map(|op| op.kind), Some(Method(methods::SUB)));
        assert!(prefix("*").is_none());
        assert!(infix("$").is_none());
    }
}
