//! Shared data structures for the Sprig language engine.
//!
//! - [`Span`]: byte range into a [`SourceDocument`]
//! - [`Name`] and [`StringInterner`]: interned identifiers
//! - [`SourceDocument`]: script text plus a line table for `line:col` lookup
//! - [`ExprArena`]: flat storage for the expression tree, addressed by [`ExprId`]
//! - [`methods`]: the fixed method names operators desugar to

mod ast;
mod interner;
pub mod methods;
mod name;
mod number;
mod source;
mod span;

pub use ast::{
    dump_expr, Expr, ExprArena, ExprId, ExprKind, ExprRange, NameRange, SharedArena, StrId,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use number::format_number;
pub use source::{LineCol, SharedDocument, SourceDocument};
pub use span::{Span, SpanError};
