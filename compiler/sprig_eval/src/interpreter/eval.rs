//! Per-node evaluation.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use smallvec::SmallVec;
use sprig_diagnostic::{Diagnostic, Position};
use sprig_ir::{ExprId, ExprKind, ExprRange, NameRange, SharedArena};
use sprig_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::control::{ControlAction, EvalResult};
use crate::errors::{
    cannot_declare_properties, cannot_set_properties, duplicate_variable, execution_limit,
    interrupted, invalid_assignment_target, invalid_declaration_target, property_already_defined,
    property_not_defined, undefined_property, undefined_variable,
};
use crate::heap::ScopeId;
use crate::object::{Function, FunctionBody, FunctionFlags, Object, ObjectKind, ScriptBody};
use crate::value::Value;

impl Interpreter {
    pub(crate) fn eval(&mut self, arena: &SharedArena, id: ExprId, scope: ScopeId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(arena, id, scope))
    }

    fn eval_inner(&mut self, arena: &SharedArena, id: ExprId, scope: ScopeId) -> EvalResult {
        self.tick(arena, id)?;

        match arena.kind(id) {
            ExprKind::NumberLiteral(value) => Ok(Value::Number(*value)),
            ExprKind::StringLiteral(text) => Ok(Value::String(Arc::clone(arena.get_str(*text)))),
            ExprKind::ArrayLiteral(elements) => {
                let elements = self.eval_list(arena, *elements, scope)?;
                Ok(self.new_array(elements))
            }
            ExprKind::Identifier(name) => self.lookup_variable(scope, *name).ok_or_else(|| {
                undefined_variable(self.interner.lookup(*name), Self::position(arena, id)).into()
            }),
            ExprKind::VariableDeclaration(target) => {
                self.eval_declaration(arena, *target, Value::Void, scope)
            }
            ExprKind::Assignment { receiver, value } => {
                self.eval_assignment(arena, id, *receiver, *value, scope)
            }
            ExprKind::MemberAccess { receiver, member } => {
                let receiver = self.eval(arena, *receiver, scope)?;
                self.get_property(&receiver, *member).ok_or_else(|| {
                    undefined_property(
                        &self.value_name(&receiver),
                        self.interner.lookup(*member),
                        Self::position(arena, id),
                    )
                    .into()
                })
            }
            ExprKind::Group(children) => {
                let mut last = Value::Void;
                for &child in arena.get_list(*children) {
                    last = self.eval(arena, child, scope)?;
                }
                Ok(last)
            }
            ExprKind::FunctionDeclaration { params, body } => {
                Ok(self.new_script_function(arena, *params, *body, scope))
            }
            ExprKind::Invocation { target, args } => {
                self.eval_invocation(arena, id, *target, *args, scope)
            }
            ExprKind::Error => Err(Diagnostic::new(
                "Cannot evaluate malformed expression",
                Self::position(arena, id),
            )
            .into()),
        }
    }

    /// Evaluates `range` left to right, stopping at the first signal.
    pub(crate) fn eval_list(
        &mut self,
        arena: &SharedArena,
        range: ExprRange,
        scope: ScopeId,
    ) -> Result<Vec<Value>, ControlAction> {
        let children = arena.get_list(range);
        let mut values = Vec::with_capacity(children.len());
        for &child in children {
            values.push(self.eval(arena, child, scope)?);
        }
        Ok(values)
    }

    /// Declares `target` (a variable or a table property) bound to `value`.
    fn eval_declaration(
        &mut self,
        arena: &SharedArena,
        target: ExprId,
        value: Value,
        scope: ScopeId,
    ) -> EvalResult {
        match arena.kind(target) {
            ExprKind::Identifier(name) => {
                if !self.declare_variable(scope, *name, value.clone()) {
                    let name = self.interner.lookup(*name);
                    return Err(duplicate_variable(name, Self::position(arena, target)).into());
                }
                Ok(value)
            }
            ExprKind::MemberAccess { receiver, member } => {
                let receiver = self.eval(arena, *receiver, scope)?;
                let Some(table) = self.is_table(&receiver) else {
                    let name = self.value_name(&receiver);
                    return Err(cannot_declare_properties(&name, Self::position(arena, target)).into());
                };
                if !self.declare_property(table, *member, value.clone()) {
                    let member = self.interner.lookup(*member);
                    return Err(property_already_defined(member, Self::position(arena, target)).into());
                }
                Ok(value)
            }
            _ => Err(invalid_declaration_target(Self::position(arena, target)).into()),
        }
    }

    /// The right side is evaluated first; a signal there leaves the target
    /// untouched.
    fn eval_assignment(
        &mut self,
        arena: &SharedArena,
        id: ExprId,
        receiver: ExprId,
        value: ExprId,
        scope: ScopeId,
    ) -> EvalResult {
        let value = self.eval(arena, value, scope)?;

        match arena.kind(receiver) {
            ExprKind::Identifier(name) => {
                if !self.assign_variable(scope, *name, value.clone()) {
                    let name = self.interner.lookup(*name);
                    return Err(undefined_variable(name, Self::position(arena, id)).into());
                }
                Ok(value)
            }
            ExprKind::VariableDeclaration(target) => {
                self.eval_declaration(arena, *target, value, scope)
            }
            ExprKind::MemberAccess {
                receiver: object,
                member,
            } => {
                let object = self.eval(arena, *object, scope)?;
                let Some(table) = self.is_table(&object) else {
                    let name = self.value_name(&object);
                    return Err(cannot_set_properties(&name, Self::position(arena, receiver)).into());
                };
                if !self.set_property(table, *member, value.clone()) {
                    let name = self.value_name(&object);
                    let member = self.interner.lookup(*member);
                    return Err(
                        property_not_defined(member, &name, Self::position(arena, receiver)).into(),
                    );
                }
                Ok(value)
            }
            _ => Err(invalid_assignment_target(Self::position(arena, receiver)).into()),
        }
    }

    fn new_script_function(
        &mut self,
        arena: &SharedArena,
        params: NameRange,
        body: ExprId,
        scope: ScopeId,
    ) -> Value {
        let params: SmallVec<[_; 4]> = arena.get_names(params).iter().copied().collect();
        let object = Object::new(
            Some(self.globals.function_prototype),
            ObjectKind::Function(Function {
                params,
                flags: FunctionFlags::empty(),
                body: FunctionBody::Script(ScriptBody {
                    arena: Arc::clone(arena),
                    body,
                    scope,
                }),
            }),
        );
        Value::Object(self.heap.alloc_object(object))
    }

    /// Evaluates the expression behind a raw argument handle in `scope`.
    ///
    /// Host functions registered under an `@` name receive their arguments
    /// as handles and decide here which of them to evaluate.
    pub fn eval_handle(&mut self, handle: &Value, scope: ScopeId) -> EvalResult {
        let (arena, expr) = self.handle_target(handle)?;
        self.eval(&arena, expr, scope)
    }

    pub(crate) fn handle_target(
        &self,
        handle: &Value,
    ) -> Result<(SharedArena, ExprId), ControlAction> {
        handle
            .as_object()
            .and_then(|id| self.heap.object(id))
            .and_then(|object| match &object.kind {
                ObjectKind::Handle(handle) => Some((Arc::clone(&handle.arena), handle.expr)),
                _ => None,
            })
            .ok_or_else(|| crate::errors::expected_expression_arguments().into())
    }

    /// Counts one node against the execution limit.
    fn tick(&mut self, arena: &SharedArena, id: ExprId) -> Result<(), ControlAction> {
        self.steps = self.steps.saturating_add(1);
        match self.config.execution_limit {
            Some(limit) if self.steps > limit => {
                Err(execution_limit(limit, Self::position(arena, id)).into())
            }
            _ => Ok(()),
        }
    }

    /// The cooperative cancel point, checked before every invocation.
    pub(crate) fn check_interrupt(&self, position: &Position) -> Result<(), ControlAction> {
        match &self.interrupt {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(interrupted(position.clone()).into()),
            _ => Ok(()),
        }
    }
}
