//! Expression tree.
//!
//! Nodes live in a flat [`ExprArena`] and refer to each other by [`ExprId`].
//! The tree is built once by the parser and never mutated afterwards; script
//! functions keep the arena alive through a [`SharedArena`].

mod arena;
mod dump;

pub use arena::{ExprArena, ExprId, ExprRange, NameRange, SharedArena, StrId};
pub use dump::dump_expr;

use crate::{Name, Span};

/// One expression node with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// The closed set of expression forms.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    NumberLiteral(f64),
    StringLiteral(StrId),
    ArrayLiteral(ExprRange),
    Identifier(Name),
    /// `$target`
    VariableDeclaration(ExprId),
    /// `receiver = value`
    Assignment { receiver: ExprId, value: ExprId },
    /// `receiver.member`
    MemberAccess { receiver: ExprId, member: Name },
    /// `(a, b)` or `{ a \n b }`: evaluates children in order.
    Group(ExprRange),
    /// `\(params) body`
    FunctionDeclaration { params: NameRange, body: ExprId },
    /// `target(args)`; operators desugar to an invocation of a member access.
    Invocation { target: ExprId, args: ExprRange },
    /// Placeholder left where the parser could not build a node.
    Error,
}
