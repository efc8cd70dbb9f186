//! Native functions installed by the global bootstrap.
//!
//! Each builtin is a [`Builtin`] variant stored in the function object, so
//! dispatch is a single `match` rather than a lookup by name.

mod array;
mod control;
mod number;
mod table;


use sprig_ir::methods;

use crate::control::EvalResult;
use crate::heap::ObjectId;
use crate::interpreter::Interpreter;
use crate::object::{NativeCall, NativeHandler};
use crate::value::Value;

/// Binary operators that desugar to method calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Eq,
    Neq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Lte,
    Gt,
    Gte,
    BitAnd,
    BitOr,
    BitXor,
    BitShl,
    BitShr,
    BitShrUnsigned,
}

impl BinaryOp {
    pub(crate) fn method(self) -> &'static str {
        match self {
            BinaryOp::Eq => methods::EQ,
            BinaryOp::Neq => methods::NEQ,
            BinaryOp::Add => methods::ADD,
            BinaryOp::Sub => methods::SUB,
            BinaryOp::Mul => methods::MUL,
            BinaryOp::Div => methods::DIV,
            BinaryOp::Mod => methods::MOD,
            BinaryOp::Pow => methods::POW,
            BinaryOp::Lt => methods::LT,
            BinaryOp::Lte => methods::LTE,
            BinaryOp::Gt => methods::GT,
            BinaryOp::Gte => methods::GTE,
            BinaryOp::BitAnd => methods::BIT_AND,
            BinaryOp::BitOr => methods::BIT_OR,
            BinaryOp::BitXor => methods::BIT_XOR,
            BinaryOp::BitShl => methods::BIT_SHL,
            BinaryOp::BitShr => methods::BIT_SHR,
            BinaryOp::BitShrUnsigned => methods::BIT_SHR_UNSIGNED,
        }
    }
}

/// Operators with a generic implementation on `Table.prototype`.
const FALLBACK_OPERATORS: [BinaryOp; 12] = [
    BinaryOp::Eq,
    BinaryOp::Neq,
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::Mod,
    BinaryOp::Pow,
    BinaryOp::Lt,
    BinaryOp::Lte,
    BinaryOp::Gt,
    BinaryOp::Gte,
];

/// Operators implemented natively on `Number.prototype`.
const NUMBER_OPERATORS: [BinaryOp; 16] = [
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::Mod,
    BinaryOp::Pow,
    BinaryOp::Lt,
    BinaryOp::Lte,
    BinaryOp::Gt,
    BinaryOp::Gte,
    BinaryOp::BitAnd,
    BinaryOp::BitOr,
    BinaryOp::BitXor,
    BinaryOp::BitShl,
    BinaryOp::BitShr,
    BinaryOp::BitShrUnsigned,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Builtin {
    TableNew,
    TableNot,
    TableBoolean,
    TableNumber,
    TableIs,
    TableAnd,
    TableOr,
    TableCoalesce,
    TableElse,
    OperatorFallback(BinaryOp),
    NumberOperator(BinaryOp),
    NumberNeg,
    NumberBitNeg,
    StringAdd,
    BooleanNot,
    ArrayAt,
    ArrayPush,
    ArrayPop,
    ArrayShift,
    ArrayUnshift,
    ArrayClone,
    ArrayClear,
    ArrayTruncate,
    ArraySlice,
    FunctionCall,
    If,
    Return,
    Print,
    Unreachable,
}

pub(crate) fn call(interp: &mut Interpreter, builtin: Builtin, call: NativeCall) -> EvalResult {
    match builtin {
        Builtin::TableNew => table::new(interp, &call),
        Builtin::TableNot => table::not(interp, &call),
        Builtin::TableBoolean => table::boolean(&call),
        Builtin::TableNumber => table::number(interp, &call),
        Builtin::TableIs => table::is(&call),
        Builtin::TableAnd => table::and(interp, &call),
        Builtin::TableOr => table::or(interp, &call),
        Builtin::TableCoalesce => table::coalesce(interp, &call),
        Builtin::TableElse => table::else_(interp, &call),
        Builtin::OperatorFallback(op) => table::operator_fallback(interp, op, &call),
        Builtin::NumberOperator(op) => number::binary(interp, op, &call),
        Builtin::NumberNeg => number::neg(interp, &call),
        Builtin::NumberBitNeg => number::bit_neg(interp, &call),
        Builtin::StringAdd => control::string_add(interp, &call),
        Builtin::BooleanNot => control::boolean_not(interp, &call),
        Builtin::ArrayAt => array::at(interp, &call),
        Builtin::ArrayPush => array::push(interp, &call),
        Builtin::ArrayPop => array::pop(interp, &call),
        Builtin::ArrayShift => array::shift(interp, &call),
        Builtin::ArrayUnshift => array::unshift(interp, &call),
        Builtin::ArrayClone => array::clone(interp, &call),
        Builtin::ArrayClear => array::clear(interp, &call),
        Builtin::ArrayTruncate => array::truncate(interp, &call),
        Builtin::ArraySlice => array::slice(interp, &call),
        Builtin::FunctionCall => control::function_call(interp, call),
        Builtin::If => control::if_(interp, &call),
        Builtin::Return => control::return_(&call),
        Builtin::Print => control::print(interp, &call),
        Builtin::Unreachable => control::unreachable(),
    }
}

/// Installs the builtin constructors, prototypes, operators and globals.
pub(crate) fn install(interp: &mut Interpreter) {
    let g = *interp.globals();

    for (name, constructor, prototype) in [
        ("Table", g.table, g.table_prototype),
        ("Function", g.function, g.function_prototype),
        ("Number", g.number, g.number_prototype),
        ("String", g.string, g.string_prototype),
        ("Boolean", g.boolean, g.boolean_prototype),
        ("Array", g.array, g.array_prototype),
    ] {
        define_global(interp, name, Value::Object(constructor));
        let key = interp.names.prototype;
        let declared = interp.declare_property(constructor, key, Value::Object(prototype));
        debug_assert!(declared, "{name}.prototype declared twice");
    }

    method(interp, g.table, "new", &["this"], Builtin::TableNew);

    for op in FALLBACK_OPERATORS {
        let params: &[&str] = &["this", "a", "b"];
        method(interp, g.table_prototype, op.method(), params, Builtin::OperatorFallback(op));
    }
    let tp = g.table_prototype;
    method(interp, tp, methods::IS, &["this", "other"], Builtin::TableIs);
    method(interp, tp, methods::AND, &["this", "other"], Builtin::TableAnd);
    method(interp, tp, methods::OR, &["this", "other"], Builtin::TableOr);
    method(interp, tp, methods::COALESCE, &["this", "other"], Builtin::TableCoalesce);
    method(interp, tp, methods::ELSE, &["this", "other"], Builtin::TableElse);
    method(interp, tp, methods::NOT, &["this"], Builtin::TableNot);
    method(interp, tp, methods::BOOLEAN, &["this"], Builtin::TableBoolean);
    method(interp, tp, methods::NUMBER, &["this"], Builtin::TableNumber);

    let np = g.number_prototype;
    for op in NUMBER_OPERATORS {
        method(interp, np, op.method(), &["this", "other"], Builtin::NumberOperator(op));
    }
    method(interp, np, methods::NEG, &["this"], Builtin::NumberNeg);
    method(interp, np, methods::BIT_NEG, &["this"], Builtin::NumberBitNeg);

    method(interp, g.string_prototype, methods::ADD, &["this", "other"], Builtin::StringAdd);
    method(interp, g.boolean_prototype, methods::NOT, &["this"], Builtin::BooleanNot);

    let ap = g.array_prototype;
    method(interp, ap, methods::AT, &["this", "index"], Builtin::ArrayAt);
    method(interp, ap, "push", &["this"], Builtin::ArrayPush);
    method(interp, ap, "pop", &["this"], Builtin::ArrayPop);
    method(interp, ap, "shift", &["this"], Builtin::ArrayShift);
    method(interp, ap, "unshift", &["this"], Builtin::ArrayUnshift);
    method(interp, ap, "clone", &["this"], Builtin::ArrayClone);
    method(interp, ap, "clear", &["this"], Builtin::ArrayClear);
    method(interp, ap, "truncate", &["this", "length"], Builtin::ArrayTruncate);
    method(interp, ap, "slice", &["this", "start"], Builtin::ArraySlice);

    method(interp, g.function_prototype, "call", &["this", "receiver"], Builtin::FunctionCall);

    for (name, params, builtin) in [
        ("@if", &[][..], Builtin::If),
        ("return", &["value"][..], Builtin::Return),
        ("print", &["value"][..], Builtin::Print),
        ("unreachable", &[][..], Builtin::Unreachable),
    ] {
        let function = interp.new_native(name, params, NativeHandler::Builtin(builtin));
        define_global(interp, name, function);
    }

    define_global(interp, "true", Value::Boolean(true));
    define_global(interp, "false", Value::Boolean(false));
    define_global(interp, "null", Value::Null);
    define_global(interp, "void", Value::Void);
}

fn define_global(interp: &mut Interpreter, name: &str, value: Value) {
    let declared = interp.declare_global(name, value).is_ok();
    debug_assert!(declared, "global {name} declared twice");
}

fn method(interp: &mut Interpreter, table: ObjectId, name: &str, params: &[&str], builtin: Builtin) {
    let function = interp.new_native(name, params, NativeHandler::Builtin(builtin));
    let key = interp.intern(name);
    let declared = interp.declare_property(table, key, function);
    debug_assert!(declared, "builtin {name} declared twice");
}
