//! Mark and sweep over the object and scope arenas.

use super::{Heap, ObjectId, ScopeId};
use crate::object::{FunctionBody, ObjectKind};
use crate::value::Value;

/// Outcome of one collection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GcStats {
    pub objects_freed: usize,
    pub scopes_freed: usize,
    pub objects_live: usize,
    pub scopes_live: usize,
}

struct Worklist {
    objects: Vec<ObjectId>,
    scopes: Vec<ScopeId>,
}

impl Worklist {
    fn push_value(&mut self, value: &Value) {
        if let Value::Object(id) = value {
            self.objects.push(*id);
        }
    }
}

impl Heap {
    /// Frees everything not reachable from the given roots.
    pub(crate) fn collect(
        &mut self,
        object_roots: &[ObjectId],
        scope_roots: &[ScopeId],
    ) -> GcStats {
        let mut marked_objects = vec![false; self.objects.capacity()];
        let mut marked_scopes = vec![false; self.scopes.capacity()];
        let mut work = Worklist {
            objects: object_roots.to_vec(),
            scopes: scope_roots.to_vec(),
        };

        loop {
            if let Some(id) = work.objects.pop() {
                let Some(object) = self.objects.get(id.0) else {
                    continue;
                };
                if std::mem::replace(&mut marked_objects[id.index()], true) {
                    continue;
                }
                if let Some(prototype) = object.prototype {
                    work.objects.push(prototype);
                }
                match &object.kind {
                    ObjectKind::Table(properties) => {
                        properties.values().for_each(|v| work.push_value(v));
                    }
                    ObjectKind::Array(elements) => elements.iter().for_each(|v| work.push_value(v)),
                    ObjectKind::Function(function) => {
                        if let FunctionBody::Script(script) = &function.body {
                            work.scopes.push(script.scope);
                        }
                    }
                    ObjectKind::Handle(_) => {}
                }
            } else if let Some(id) = work.scopes.pop() {
                let Some(scope) = self.scopes.get(id.0) else {
                    continue;
                };
                if std::mem::replace(&mut marked_scopes[id.index()], true) {
                    continue;
                }
                if let Some(parent) = scope.parent {
                    work.scopes.push(parent);
                }
                scope.variables.values().for_each(|v| work.push_value(v));
            } else {
                break;
            }
        }

        let objects_freed = self.objects.sweep(&marked_objects);
        let scopes_freed = self.scopes.sweep(&marked_scopes);
        GcStats {
            objects_freed,
            scopes_freed,
            objects_live: self.objects.len(),
            scopes_live: self.scopes.len(),
        }
    }
}
