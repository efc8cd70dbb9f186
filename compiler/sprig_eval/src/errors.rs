//! Centralized error constructors for the evaluator.
//!
//! Script-visible failures are [`Diagnostic`]s raised through
//! [`ControlAction::Exception`](crate::ControlAction). Host-facing API misuse
//! is an [`EmbedError`].

use sprig_diagnostic::{Diagnostic, Position};
use sprig_ir::format_number;

/// Errors returned to the embedding host.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EmbedError {
    #[error("duplicate declaration of global \"{name}\"")]
    DuplicateGlobal { name: String },
    #[error("scope was collected or belongs to another interpreter")]
    StaleScope,
    #[error("object was collected or belongs to another interpreter")]
    StaleObject,
    #[error("\"{name}\" is not a table")]
    NotATable { name: String },
}

// Variables

pub fn undefined_variable(name: &str, position: Position) -> Diagnostic {
    Diagnostic::new(format!("Cannot find variable \"{name}\""), position)
}

pub fn duplicate_variable(name: &str, position: Position) -> Diagnostic {
    Diagnostic::new(format!("Duplicate declaration of variable \"{name}\""), position)
}

// Properties

pub fn undefined_property(container: &str, member: &str, position: Position) -> Diagnostic {
    Diagnostic::new(format!("Cannot find property \"{container}.{member}\""), position)
}

pub fn cannot_declare_properties(container: &str, position: Position) -> Diagnostic {
    Diagnostic::new(format!("Cannot declare properties on \"{container}\""), position)
}

pub fn property_already_defined(member: &str, position: Position) -> Diagnostic {
    Diagnostic::new(format!("Property \"{member}\" is already defined"), position)
}

pub fn cannot_set_properties(container: &str, position: Position) -> Diagnostic {
    Diagnostic::new(format!("Cannot set properties on \"{container}\""), position)
}

pub fn property_not_defined(member: &str, container: &str, position: Position) -> Diagnostic {
    Diagnostic::new(
        format!("Property \"{member}\" is not defined on \"{container}\""),
        position,
    )
}

pub fn invalid_declaration_target(position: Position) -> Diagnostic {
    Diagnostic::new("Invalid declaration target", position)
}

pub fn invalid_assignment_target(position: Position) -> Diagnostic {
    Diagnostic::new("Invalid assignment target", position)
}

// Invocation

pub fn undefined_method(container: &str, method: &str, position: Position) -> Diagnostic {
    Diagnostic::new(format!("Cannot find method \"{container}.{method}\""), position)
}

pub fn not_callable(target: &str, position: Position) -> Diagnostic {
    Diagnostic::new(format!("Target \"{target}\" is not callable"), position)
}

pub fn invocation_failed(position: Position, cause: Diagnostic) -> Diagnostic {
    Diagnostic::new("Invocation failed", position).with_child(cause)
}

pub fn wrong_arg_count(expected: usize, got: usize, missing: &[&str]) -> Diagnostic {
    Diagnostic::intrinsic(format!("Expected {expected} arguments, but got {got}")).with_children(
        missing
            .iter()
            .map(|name| Diagnostic::intrinsic(format!("Missing argument \"{name}\""))),
    )
}

pub fn wrong_arg_type(name: &str, expected: &str, got: &str) -> Diagnostic {
    Diagnostic::intrinsic(format!(
        "Wrong type for argument \"{name}\", expected \"{expected}\", but got \"{got}\""
    ))
}

pub fn cannot_invoke(failures: Vec<Diagnostic>) -> Diagnostic {
    Diagnostic::intrinsic("Cannot invoke").with_children(failures)
}

pub fn expected_expression_arguments() -> Diagnostic {
    Diagnostic::intrinsic("Expected expression arguments")
}

pub fn cannot_convert(value: &str, target: &str) -> Diagnostic {
    Diagnostic::intrinsic(format!("Cannot convert \"{value}\" to {target}"))
}

// Operators

pub fn unsupported_operator(left: &str, right: &str, operator: &str) -> Diagnostic {
    Diagnostic::intrinsic(format!(
        "Operands \"{left}\" and \"{right}\" do not support operator \"{operator}\""
    ))
}

// Tables and arrays

pub fn missing_prototype() -> Diagnostic {
    Diagnostic::intrinsic("Cannot find a prototype on receiver")
}

pub fn prototype_not_table() -> Diagnostic {
    Diagnostic::intrinsic("Prototype must be a Table")
}

pub fn index_out_of_range(index: f64, length: usize) -> Diagnostic {
    Diagnostic::intrinsic(format!(
        "Index {} out of range of array of length {length}",
        format_number(index)
    ))
}

pub fn empty_array(operation: &str) -> Diagnostic {
    Diagnostic::intrinsic(format!("Cannot {operation} from an empty array"))
}

pub fn void_element() -> Diagnostic {
    Diagnostic::intrinsic("Cannot set an array element to void")
}

pub fn negative_length() -> Diagnostic {
    Diagnostic::intrinsic("Cannot set array length to be less than zero")
}

// Limits

pub fn execution_limit(limit: u64, position: Position) -> Diagnostic {
    Diagnostic::new(
        format!("Script execution reached the limit of {limit} expressions"),
        position,
    )
}

pub fn array_too_long(length: usize, limit: usize) -> Diagnostic {
    Diagnostic::intrinsic(format!(
        "Array length {length} exceeds the limit of {limit} elements"
    ))
}

pub fn call_depth_exceeded(limit: usize) -> Diagnostic {
    Diagnostic::intrinsic(format!("Maximum call depth of {limit} exceeded"))
}

pub fn interrupted(position: Position) -> Diagnostic {
    Diagnostic::new("Execution interrupted", position)
}

// Engine

pub fn stale_reference() -> Diagnostic {
    Diagnostic::intrinsic("Reference to a collected object")
}

pub fn unreachable_reached() -> Diagnostic {
    Diagnostic::intrinsic("Reached unreachable code")
}

pub fn has_parse_errors(diagnostics: &[Diagnostic]) -> Diagnostic {
    Diagnostic::intrinsic(format!(
        "Cannot run a script with {} syntax error(s)",
        diagnostics.len()
    ))
    .with_children(diagnostics.iter().cloned())
}
