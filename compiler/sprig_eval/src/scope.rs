//! Lexical scopes.

use rustc_hash::FxHashMap;
use sprig_ir::Name;

use crate::heap::ScopeId;
use crate::value::Value;

/// A namespace of declared variables with a link to its enclosing scope.
///
/// A variable is created once by [`Scope::declare`]; afterwards only its
/// value changes.
pub(crate) struct Scope {
    pub(crate) parent: Option<ScopeId>,
    pub(crate) variables: FxHashMap<Name, Value>,
}

impl Scope {
    pub(crate) fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            parent,
            variables: FxHashMap::default(),
        }
    }

    /// Declares `name` bound to `value`; `false` if it already exists here.
    pub(crate) fn declare(&mut self, name: Name, value: Value) -> bool {
        if self.variables.contains_key(&name) {
            return false;
        }
        self.variables.insert(name, value);
        true
    }
}
