//! S-expression rendering of an expression tree.
//!
//! Used by `sprig parse` and by parser tests. Method invocations render with
//! the method first, so `1 + 2 * 3` reads `(k:add 1 (k:mul 2 3))`; plain
//! calls render as `(call f a b)`.

use std::fmt::Write;

use super::{ExprArena, ExprId, ExprKind};
use crate::number::format_number;
use crate::StringInterner;

pub fn dump_expr(arena: &ExprArena, id: ExprId, interner: &StringInterner) -> String {
    let mut out = String::new();
    write_expr(&mut out, arena, id, interner);
    out
}

fn write_list(out: &mut String, arena: &ExprArena, ids: &[ExprId], interner: &StringInterner) {
    for &child in ids {
        out.push(' ');
        write_expr(out, arena, child, interner);
    }
}

fn write_expr(out: &mut String, arena: &ExprArena, id: ExprId, interner: &StringInterner) {
    match arena.kind(id) {
        ExprKind::NumberLiteral(value) => out.push_str(&format_number(*value)),
        ExprKind::StringLiteral(text) => {
            let _ = write!(out, "{:?}", &**arena.get_str(*text));
        }
        ExprKind::ArrayLiteral(items) => {
            out.push_str("[array");
            write_list(out, arena, arena.get_list(*items), interner);
            out.push(']');
        }
        ExprKind::Identifier(name) => out.push_str(interner.lookup(*name)),
        ExprKind::VariableDeclaration(target) => {
            out.push_str("($ ");
            write_expr(out, arena, *target, interner);
            out.push(')');
        }
        ExprKind::Assignment { receiver, value } => {
            out.push_str("(= ");
            write_expr(out, arena, *receiver, interner);
            out.push(' ');
            write_expr(out, arena, *value, interner);
            out.push(')');
        }
        ExprKind::MemberAccess { receiver, member } => {
            out.push_str("(. ");
            write_expr(out, arena, *receiver, interner);
            let _ = write!(out, " {})", interner.lookup(*member));
        }
        ExprKind::Group(children) => {
            out.push_str("(group");
            write_list(out, arena, arena.get_list(*children), interner);
            out.push(')');
        }
        ExprKind::FunctionDeclaration { params, body } => {
            out.push_str("(fn (");
            for (i, param) in arena.get_names(*params).iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(interner.lookup(*param));
            }
            out.push_str(") ");
            write_expr(out, arena, *body, interner);
            out.push(')');
        }
        ExprKind::Invocation { target, args } => {
            if let ExprKind::MemberAccess { receiver, member } = arena.kind(*target) {
                let _ = write!(out, "({} ", interner.lookup(*member));
                write_expr(out, arena, *receiver, interner);
            } else {
                out.push_str("(call ");
                write_expr(out, arena, *target, interner);
            }
            write_list(out, arena, arena.get_list(*args), interner);
            out.push(')');
        }
        ExprKind::Error => out.push_str("<error>"),
    }
}
