//! Flat storage for expression nodes.

use std::sync::Arc;

use super::{Expr, ExprKind};
use crate::{Name, SharedDocument, Span};

/// Index of a node in an [`ExprArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a decoded string literal in an [`ExprArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct StrId(u32);

/// Contiguous run of child ids in the arena's list storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ExprRange {
    start: u32,
    len: u32,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Contiguous run of parameter names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct NameRange {
    start: u32,
    len: u32,
}

impl NameRange {
    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Parsed expression tree for one document.
#[derive(Debug)]
pub struct ExprArena {
    document: SharedDocument,
    exprs: Vec<Expr>,
    lists: Vec<ExprId>,
    names: Vec<Name>,
    strings: Vec<Arc<str>>,
}

/// Arenas are shared by every script function created from them.
pub type SharedArena = Arc<ExprArena>;

fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl ExprArena {
    pub fn new(document: SharedDocument) -> Self {
        ExprArena {
            document,
            exprs: Vec::new(),
            lists: Vec::new(),
            names: Vec::new(),
            strings: Vec::new(),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Node by id.
    ///
    /// # Panics
    /// Panics on an id from a different arena.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.get_expr(id).kind
    }

    #[inline]
    pub fn span(&self, id: ExprId) -> Span {
        self.get_expr(id).span
    }

    pub fn alloc_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.lists.len();
        self.lists.extend(ids);
        ExprRange {
            start: to_u32(start),
            len: to_u32(self.lists.len() - start),
        }
    }

    pub fn get_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.lists[start..start + range.len()]
    }

    pub fn alloc_names(&mut self, names: impl IntoIterator<Item = Name>) -> NameRange {
        let start = self.names.len();
        self.names.extend(names);
        NameRange {
            start: to_u32(start),
            len: to_u32(self.names.len() - start),
        }
    }

    pub fn get_names(&self, range: NameRange) -> &[Name] {
        let start = range.start as usize;
        &self.names[start..start + range.len()]
    }

    pub fn alloc_str(&mut self, text: impl Into<Arc<str>>) -> StrId {
        let id = StrId(to_u32(self.strings.len()));
        self.strings.push(text.into());
        id
    }

    pub fn get_str(&self, id: StrId) -> &Arc<str> {
        &self.strings[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
