//! Grammar rules.
//!
//! - `trivia`: whitespace, comments, and the skipped-newline flag
//! - `token`: scanning one token (operators, literals, groups, lambdas)
//! - `block`: comma/newline separated expression lists
//! - `expr`: the precedence-climbing loop

mod block;
mod expr;
mod token;
mod trivia;

use sprig_ir::{Expr, ExprId, ExprKind, Span};

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    /// `receiver.method(args)` with both nodes at `span`.
    pub(crate) fn method_call(
        &mut self,
        span: Span,
        receiver: ExprId,
        method: &str,
        args: impl IntoIterator<Item = ExprId>,
    ) -> ExprId {
        let member = self.interner.intern(method);
        let target = self.alloc(ExprKind::MemberAccess { receiver, member }, span);
        let args = self.arena.alloc_list(args);
        self.alloc(ExprKind::Invocation { target, args }, span)
    }
}
