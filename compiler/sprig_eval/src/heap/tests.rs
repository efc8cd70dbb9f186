use super::*;
use crate::object::{Object, ObjectKind};
use crate::scope::Scope;
use crate::value::Value;

#[test]
fn freed_slot_rejects_stale_key() {
    let mut heap = Heap::new();
    let first = heap.alloc_object(Object::table(None));
    let stats = heap.collect(&[], &[]);
    assert_eq!(stats.objects_freed, 1);
    assert!(heap.object(first).is_none());

    let second = heap.alloc_object(Object::table(None));
    assert_eq!(first.index(), second.index());
    assert!(heap.object(first).is_none());
    assert!(heap.object(second).is_some());
}

#[test]
fn collects_unreachable_cycle() {
    let mut heap = Heap::new();
    let scope = heap.alloc_scope(Scope::new(None));
    let a = heap.alloc_object(Object::array(Vec::new()));
    let b = heap.alloc_object(Object::array(vec![Value::Object(a)]));
    if let Some(ObjectKind::Array(elements)) = heap.object_mut(a).map(|o| &mut o.kind) {
        elements.push(Value::Object(b));
    }

    let stats = heap.collect(&[], &[scope]);
    assert_eq!(stats.objects_freed, 2);
    assert_eq!(stats.scopes_freed, 0);
    assert_eq!(heap.object_count(), 0);
}

#[test]
fn keeps_values_reachable_from_scope_chain() {
    let mut heap = Heap::new();
    let root = heap.alloc_scope(Scope::new(None));
    let child = heap.alloc_scope(Scope::new(Some(root)));
    let proto = heap.alloc_object(Object::table(None));
    let table = heap.alloc_object(Object::table(Some(proto)));
    if let Some(scope) = heap.scope_mut(root) {
        scope.declare(sprig_ir::Name::from_raw(1), Value::Object(table));
    }

    let stats = heap.collect(&[], &[child]);
    assert_eq!(stats.objects_freed, 0);
    assert_eq!(stats.objects_live, 2);
    assert_eq!(stats.scopes_live, 2);
    assert!(heap.object(proto).is_some());
}

#[test]
fn script_function_keeps_captured_scope() {
    use std::sync::Arc;

    use sprig_ir::{ExprArena, SourceDocument};

    use crate::object::{Function, FunctionBody, FunctionFlags, ScriptBody};

    let mut heap = Heap::new();
    let captured = heap.alloc_scope(Scope::new(None));
    let unrelated = heap.alloc_scope(Scope::new(None));
    let mut arena = ExprArena::new(SourceDocument::shared("t", "x"));
    let body = arena.alloc_expr(sprig_ir::Expr::new(
        sprig_ir::ExprKind::Error,
        sprig_ir::Span::new(0, 1),
    ));
    let function = heap.alloc_object(Object::new(
        None,
        ObjectKind::Function(Function {
            params: smallvec::SmallVec::new(),
            flags: FunctionFlags::empty(),
            body: FunctionBody::Script(ScriptBody {
                arena: Arc::new(arena),
                body,
                scope: captured,
            }),
        }),
    ));

    let stats = heap.collect(&[function], &[]);
    assert_eq!(stats.scopes_freed, 1);
    assert!(heap.contains_scope(captured));
    assert!(!heap.contains_scope(unrelated));
}
