//! Precedence climbing.

use sprig_ir::{methods, ExprId, ExprKind};
use sprig_stack::ensure_sufficient_stack;

use crate::operators::{self, OperatorKind, MAX_CALL_PRECEDENCE};
use crate::{Parser, Token};

impl Parser<'_> {
    /// Parse one expression whose operators bind at least as tightly as
    /// `precedence`.
    ///
    /// Returns `None` after reporting when no operand could be parsed.
    pub(crate) fn parse_expression(&mut self, precedence: u8) -> Option<ExprId> {
        ensure_sufficient_stack(|| self.parse_expression_inner(precedence))
    }

    fn parse_expression_inner(&mut self, precedence: u8) -> Option<ExprId> {
        let Some(first) = self.peek_token() else {
            if self.cursor.is_eof() {
                self.error_here("Unexpected end of input");
            } else {
                self.error_here("Expected expression");
            }
            return None;
        };

        let mut target = match first {
            Token::Operator { text, span } => {
                self.next_token();
                let Some(op) = operators::prefix(text) else {
                    self.error("Unexpected operator", span);
                    return None;
                };
                let operand = self.parse_expression(op.result_precedence)?;
                match op.kind {
                    OperatorKind::Declaration => {
                        self.alloc(ExprKind::VariableDeclaration(operand), span)
                    }
                    OperatorKind::Method(method) => self.method_call(span, operand, method, []),
                    OperatorKind::Assignment | OperatorKind::MemberAccess => {
                        self.error("Unexpected operator", span);
                        return None;
                    }
                }
            }
            Token::Expr(expr) => {
                self.next_token();
                expr
            }
        };

        loop {
            let Some(next) = self.peek_token() else {
                return Some(target);
            };

            match next {
                Token::Operator { text, span } => {
                    let Some(op) = operators::infix(text) else {
                        self.error("Unexpected operator", span);
                        self.next_token();
                        return Some(target);
                    };
                    if op.precedence < precedence {
                        return Some(target);
                    }

                    self.next_token();
                    let Some(operand) = self.parse_expression(op.result_precedence) else {
                        return Some(target);
                    };

                    target = match op.kind {
                        OperatorKind::Method(method) => {
                            self.method_call(span, target, method, [operand])
                        }
                        OperatorKind::MemberAccess => {
                            let operand_span = self.arena.span(operand);
                            let ExprKind::Identifier(member) = *self.arena.kind(operand) else {
                                self.error("Expected member name", operand_span);
                                return Some(target);
                            };
                            self.alloc(
                                ExprKind::MemberAccess {
                                    receiver: target,
                                    member,
                                },
                                operand_span,
                            )
                        }
                        OperatorKind::Assignment => self.assign(target, operand, span),
                        OperatorKind::Declaration => {
                            self.error("Unexpected operator", span);
                            return Some(target);
                        }
                    };
                }
                Token::Expr(expr) if !self.skipped_newline => {
                    let target_span = self.arena.span(target);
                    match *self.arena.kind(expr) {
                        ExprKind::Group(args) => {
                            if precedence > MAX_CALL_PRECEDENCE {
                                return Some(target);
                            }
                            target = self.alloc(ExprKind::Invocation { target, args }, target_span);
                        }
                        ExprKind::ArrayLiteral(items) => {
                            if precedence > MAX_CALL_PRECEDENCE {
                                return Some(target);
                            }
                            let items = self.arena.get_list(items).to_vec();
                            target = self.method_call(target_span, target, methods::AT, items);
                        }
                        _ => return Some(target),
                    }
                    self.next_token();
                }
                Token::Expr(_) => return Some(target),
            }
        }
    }

    /// `target = value`; when `target` is already an invocation the value
    /// becomes its extra trailing argument instead.
    fn assign(&mut self, target: ExprId, value: ExprId, span: sprig_ir::Span) -> ExprId {
        if let ExprKind::Invocation { target: callee, args } = *self.arena.kind(target) {
            let mut extended = self.arena.get_list(args).to_vec();
            extended.push(value);
            let args = self.arena.alloc_list(extended);
            let call_span = self.arena.span(target);
            return self.alloc(ExprKind::Invocation { target: callee, args }, call_span);
        }
        self.alloc(
            ExprKind::Assignment {
                receiver: target,
                value,
            },
            span,
        )
    }
}
