//! Heap objects: tables, arrays, functions and raw expression handles.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sprig_ir::{ExprId, Name, SharedArena};

use crate::builtins::Builtin;
use crate::control::EvalResult;
use crate::heap::{ObjectId, ScopeId};
use crate::interpreter::Interpreter;
use crate::value::Value;

/// An object with an optional prototype.
///
/// The prototype link is set at creation and never changes, so every chain
/// is finite and acyclic.
pub struct Object {
    pub(crate) prototype: Option<ObjectId>,
    /// Display name, assigned by the first declaration that binds the object.
    pub(crate) name: Option<String>,
    pub(crate) kind: ObjectKind,
}

pub(crate) enum ObjectKind {
    Table(FxHashMap<Name, Value>),
    Array(Vec<Value>),
    Function(Function),
    /// An unevaluated argument of a raw invocation.
    Handle(Handle),
}

impl Object {
    pub(crate) fn new(prototype: Option<ObjectId>, kind: ObjectKind) -> Self {
        Object {
            prototype,
            name: None,
            kind,
        }
    }

    pub(crate) fn table(prototype: Option<ObjectId>) -> Self {
        Self::new(prototype, ObjectKind::Table(FxHashMap::default()))
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn array(elements: Vec<Value>) -> Self {
        Self::new(None, ObjectKind::Array(elements))
    }

    pub fn prototype(&self) -> Option<ObjectId> {
        self.prototype
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, ObjectKind::Table(_))
    }

    pub(crate) fn function(&self) -> Option<&Function> {
        match &self.kind {
            ObjectKind::Function(function) => Some(function),
            _ => None,
        }
    }

    /// The `[kind Name]` form used in messages.
    pub(crate) fn display_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or("<anon>");
        match &self.kind {
            ObjectKind::Table(_) => format!("[table {name}]"),
            ObjectKind::Function(_) => format!("[function {name}]"),
            ObjectKind::Array(_) => "[array]".to_string(),
            ObjectKind::Handle(_) => "[handle]".to_string(),
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct FunctionFlags: u8 {
        /// Arguments arrive as unevaluated expression handles.
        const RAW_ARGUMENTS = 1;
    }
}

pub(crate) struct Function {
    pub(crate) params: SmallVec<[Name; 4]>,
    pub(crate) flags: FunctionFlags,
    pub(crate) body: FunctionBody,
}

#[derive(Clone)]
pub(crate) enum FunctionBody {
    Native(NativeHandler),
    Script(ScriptBody),
}

/// A lambda body together with the scope it closed over.
#[derive(Clone)]
pub(crate) struct ScriptBody {
    pub(crate) arena: SharedArena,
    pub(crate) body: ExprId,
    pub(crate) scope: ScopeId,
}

/// Host-supplied function body.
pub type HostFunction = Rc<dyn Fn(&mut Interpreter, NativeCall) -> EvalResult>;

#[derive(Clone)]
pub(crate) enum NativeHandler {
    Builtin(Builtin),
    Host(HostFunction),
}

impl fmt::Debug for NativeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeHandler::Builtin(builtin) => write!(f, "Builtin({builtin:?})"),
            NativeHandler::Host(_) => write!(f, "Host"),
        }
    }
}

/// Arguments of a native invocation.
///
/// When the function's first parameter is `this`, `args[0]` is the receiver.
pub struct NativeCall {
    pub function: ObjectId,
    pub args: Vec<Value>,
    /// Scope of the caller; raw argument handles evaluate here.
    pub scope: ScopeId,
}

pub(crate) struct Handle {
    pub(crate) arena: SharedArena,
    pub(crate) expr: ExprId,
}
