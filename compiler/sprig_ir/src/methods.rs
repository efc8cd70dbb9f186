//! Method names that operator syntax desugars to.
//!
//! `a + b` parses as the invocation `a.k:add(b)`, so every operator is an
//! ordinary property lookup on the left operand's prototype chain. The
//! `k:` prefix keeps these out of the way of user identifiers, and a leading
//! `@` marks methods that receive their arguments unevaluated.

pub const NEG: &str = "k:neg";
pub const NOT: &str = "k:not";
pub const NUMBER: &str = "k:number";
pub const BOOLEAN: &str = "k:boolean";

pub const AND: &str = "@k:and";
pub const OR: &str = "@k:or";
pub const COALESCE: &str = "@k:coalesce";
pub const ELSE: &str = "@k:else";

pub const LT: &str = "k:lt";
pub const LTE: &str = "k:lte";
pub const GT: &str = "k:gt";
pub const GTE: &str = "k:gte";
pub const EQ: &str = "k:eq";
pub const NEQ: &str = "k:neq";
pub const IS: &str = "k:is";

pub const ADD: &str = "k:add";
pub const SUB: &str = "k:sub";
pub const MUL: &str = "k:mul";
pub const DIV: &str = "k:div";
pub const MOD: &str = "k:mod";
pub const POW: &str = "k:pow";

pub const BIT_AND: &str = "k:bitAnd";
pub const BIT_OR: &str = "k:bitOr";
pub const BIT_XOR: &str = "k:bitXor";
pub const BIT_SHL: &str = "k:bitShl";
pub const BIT_SHR: &str = "k:bitShr";
pub const BIT_SHR_UNSIGNED: &str = "k:bitShrUnsigned";
pub const BIT_NEG: &str = "k:bitNeg";

/// Indexing sugar: `a[i]` is `a.k:at(i)`.
pub const AT: &str = "k:at";

/// Parameter name that receives the call receiver.
pub const THIS: &str = "this";

/// Property of constructor tables consulted by `Table.new`.
pub const PROTOTYPE: &str = "prototype";

/// Prefix of names whose invocations pass unevaluated arguments.
pub const RAW_PREFIX: char = '@';
