//! Storage for objects and scopes.
//!
//! Prototype chains and closures form cyclic graphs, so nothing in the heap
//! owns anything else: every object-to-object and scope-to-scope link is an
//! index into the arenas below. Reclamation is an explicit mark and sweep
//! (see [`gc`]) run by the host between evaluations.

mod gc;
mod slots;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::object::Object;
use crate::scope::Scope;

pub use gc::GcStats;
use slots::{SlotKey, Slots};

/// Stable reference to a heap object.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(SlotKey);

/// Stable reference to a scope.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId(SlotKey);

impl ObjectId {
    pub(crate) fn index(self) -> usize {
        self.0.index as usize
    }
}

impl ScopeId {
    pub(crate) fn index(self) -> usize {
        self.0.index as usize
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}v{})", self.0.index, self.0.generation)
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({}v{})", self.0.index, self.0.generation)
    }
}

pub(crate) struct Heap {
    objects: Slots<Object>,
    scopes: Slots<Scope>,
}

impl Heap {
    pub(crate) fn new() -> Self {
        Heap {
            objects: Slots::new(),
            scopes: Slots::new(),
        }
    }

    pub(crate) fn alloc_object(&mut self, object: Object) -> ObjectId {
        ObjectId(self.objects.insert(object))
    }

    pub(crate) fn alloc_scope(&mut self, scope: Scope) -> ScopeId {
        ScopeId(self.scopes.insert(scope))
    }

    #[inline]
    pub(crate) fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    #[inline]
    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)
    }

    #[inline]
    pub(crate) fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    #[inline]
    pub(crate) fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id.0)
    }

    pub(crate) fn contains_scope(&self, id: ScopeId) -> bool {
        self.scopes.contains(id.0)
    }

    pub(crate) fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub(crate) fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}
