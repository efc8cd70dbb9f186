#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use sprig_parse::{parse_source, ParseOutput};

use super::*;
use crate::errors::EmbedError;
use crate::print_handler::silent_handler;

fn interp() -> Interpreter {
    Interpreter::builder().print_handler(silent_handler()).build()
}

fn parse(interp: &Interpreter, text: &str) -> ParseOutput {
    let output = parse_source("host.sprig", text, interp.interner());
    assert!(!output.has_errors(), "{:?}", output.diagnostics);
    output
}

#[test]
fn builtin_constructors_are_globals() {
    let interp = interp();
    let scope = interp.global_scope();
    for name in ["Table", "Function", "Number", "String", "Boolean", "Array"] {
        let value = interp.lookup_variable(scope, interp.intern(name));
        assert!(matches!(value, Some(Value::Object(_))), "{name} missing");
    }
    let table = Value::Object(interp.globals().table);
    assert_eq!(
        interp.get_property(&table, interp.intern("prototype")),
        Some(Value::Object(interp.globals().table_prototype))
    );
}

#[test]
fn declare_global_rejects_duplicates() {
    let mut interp = interp();
    interp.declare_global("answer", Value::Number(42.0)).unwrap();
    assert_eq!(
        interp.declare_global("answer", Value::Null),
        Err(EmbedError::DuplicateGlobal {
            name: "answer".to_string()
        })
    );
    assert_eq!(
        interp.declare_global("print", Value::Null),
        Err(EmbedError::DuplicateGlobal {
            name: "print".to_string()
        })
    );
}

#[test]
fn host_function_receives_evaluated_arguments() {
    let mut interp = interp();
    interp
        .register_native("twice", &["value"], |_, call| {
            let n = call.args[0].as_number().unwrap_or(f64::NAN);
            Ok(Value::Number(n * 2.0))
        })
        .unwrap();

    let output = parse(&interp, "twice(1 + 2)");
    assert_eq!(interp.run(&output), Ok(Value::Number(6.0)));
}

#[test]
fn host_method_receives_receiver_as_this() {
    let mut interp = interp();
    let describe = interp
        .register_native("describe", &["this"], |interp, call| {
            Ok(Value::string(interp.value_name(&call.args[0])))
        })
        .unwrap();

    let key = interp.intern("describe");
    let table_prototype = interp.globals().table_prototype;
    assert!(interp.declare_property(table_prototype, key, describe));

    let output = parse(&interp, "$t = Table.new()");
    let table = interp.run(&output).unwrap();

    let output = parse(&interp, "Table.new().describe()");
    assert_eq!(
        interp.run(&output),
        Ok(Value::string("[table <anon>]"))
    );
    assert_eq!(
        interp.call_method(table, "describe", Vec::new()),
        Ok(Value::string("[table t]"))
    );
}

#[test]
fn raw_host_function_chooses_what_to_evaluate() {
    let mut interp = interp();
    interp
        .register_native("@first", &[], |interp, call| {
            interp.eval_handle(&call.args[0], call.scope)
        })
        .unwrap();

    let output = parse(&interp, "@first(1 + 1, unreachable())");
    assert_eq!(interp.run(&output), Ok(Value::Number(2.0)));
}

#[test]
fn evaluate_keeps_declarations_in_the_given_scope() {
    let mut interp = interp();
    let scope = interp.new_scope(interp.global_scope()).unwrap();

    let first = parse(&interp, "$x = 5");
    interp.evaluate(&first.arena, first.root, scope).unwrap();
    let second = parse(&interp, "x + 1");
    assert_eq!(
        interp.evaluate(&second.arena, second.root, scope),
        Ok(Value::Number(6.0))
    );

    // `run` uses a fresh scope each time.
    assert!(interp.run(&second).is_err());
}

#[test]
fn run_refuses_scripts_with_syntax_errors() {
    let mut interp = interp();
    let output = parse_source("bad.sprig", "1 +", interp.interner());
    let error = interp.run(&output).unwrap_err();
    let diagnostic = error.into_diagnostic();
    assert_eq!(diagnostic.message, "Cannot run a script with 1 syntax error(s)");
    assert_eq!(diagnostic.children[0].message, "Unexpected end of input");
}

#[test]
fn top_level_return_ends_run_but_escapes_evaluate() {
    let mut interp = interp();
    let output = parse(&interp, "return(3)\nunreachable()");
    assert_eq!(interp.run(&output), Ok(Value::Number(3.0)));

    let scope = interp.new_scope(interp.global_scope()).unwrap();
    let signal = interp.evaluate(&output.arena, output.root, scope).unwrap_err();
    assert_eq!(signal.label(), crate::LABEL_RETURN);
    assert_eq!(signal, ControlAction::Return(Value::Number(3.0)));
    assert_eq!(
        signal.into_diagnostic().message,
        "Signal \"!return\" escaped evaluation"
    );
}

#[test]
fn invoke_calls_script_functions_from_the_host() {
    let mut interp = interp();
    let output = parse(&interp, r"\(a, b) a * b");
    let function = interp.run(&output).unwrap();
    assert_eq!(
        interp.invoke(&function, Value::Void, vec![Value::Number(6.0), Value::Number(7.0)]),
        Ok(Value::Number(42.0))
    );

    let error = interp.invoke(&Value::Number(1.0), Value::Void, Vec::new()).unwrap_err();
    assert_eq!(
        error.diagnostic().map(|d| d.message.as_str()),
        Some("Target \"Number\" is not callable")
    );
}

#[test]
fn call_method_resolves_through_prototypes() {
    let mut interp = interp();
    assert_eq!(
        interp.call_method(Value::Number(2.0), "k:add", vec![Value::Number(3.0)]),
        Ok(Value::Number(5.0))
    );
    let error = interp
        .call_method(Value::Number(2.0), "missing", Vec::new())
        .unwrap_err();
    assert!(error.diagnostic().unwrap().mentions("Cannot find method \"Number.missing\""));
}

#[test]
fn declare_property_first_declaration_wins() {
    let mut interp = interp();
    let table = interp.new_table();
    let id = table.as_object().unwrap();
    let foo = interp.intern("foo");

    assert!(interp.declare_property(id, foo, Value::Number(1.0)));
    assert!(!interp.declare_property(id, foo, Value::Number(2.0)));
    assert_eq!(interp.get_property(&table, foo), Some(Value::Number(1.0)));

    assert!(interp.set_property(id, foo, Value::Number(3.0)));
    assert_eq!(interp.get_property(&table, foo), Some(Value::Number(3.0)));
    assert!(!interp.set_property(id, interp.intern("bar"), Value::Null));
}

#[test]
fn declarations_name_objects_once() {
    let mut interp = interp();
    let output = parse(
        &interp,
        "$point = Table.new()\n$point.norm = \\(this) 0\n$alias = point\npoint",
    );
    let point = interp.run(&output).unwrap();
    assert_eq!(interp.value_name(&point), "[table point]");

    let norm = interp.get_property(&point, interp.intern("norm")).unwrap();
    assert_eq!(interp.value_name(&norm), "[function point.norm]");
    assert_eq!(
        interp.get_property(&norm, interp.intern("name")),
        Some(Value::string("point.norm"))
    );
}

#[test]
fn primitives_resolve_through_builtin_prototypes() {
    let interp = interp();
    let add = interp.intern("k:add");
    let number_add = interp.get_property(&Value::Number(1.0), add).unwrap();
    let string_add = interp.get_property(&Value::string("a"), add).unwrap();
    assert_ne!(number_add, string_add);

    let fallback = interp.get_property(&Value::Null, add).unwrap();
    assert_eq!(interp.get_property(&Value::Void, add), Some(fallback));
    assert_eq!(interp.get_property(&Value::Null, interp.intern("missing")), None);

    let length = interp.intern("length");
    assert_eq!(
        interp.get_property(&Value::string("héllo"), length),
        Some(Value::Number(5.0))
    );
}

#[test]
fn new_scope_rejects_collected_parent() {
    let mut interp = interp();
    let scope = interp.new_scope(interp.global_scope()).unwrap();
    let stats = interp.collect_garbage(&[], &[]);
    assert!(stats.scopes_freed >= 1);
    assert_eq!(interp.new_scope(scope), Err(EmbedError::StaleScope));

    let output = parse(&interp, "1");
    let error = interp.evaluate(&output.arena, output.root, scope).unwrap_err();
    assert_eq!(
        error.into_diagnostic().message,
        "Reference to a collected object"
    );
}

#[test]
fn define_method_targets_live_tables() {
    let mut interp = interp();
    let output = parse(&interp, "$point = Table.new()");
    let point = interp.run(&output).unwrap();
    interp
        .define_method(&point, "origin", &["this"], |_, _| Ok(Value::Number(0.0)))
        .unwrap();
    assert_eq!(
        interp.call_method(point.clone(), "origin", Vec::new()),
        Ok(Value::Number(0.0))
    );

    let error = interp
        .define_method(&Value::Number(1.0), "f", &[], |_, _| Ok(Value::Void))
        .unwrap_err();
    assert_eq!(
        error,
        EmbedError::NotATable {
            name: "Number".to_string()
        }
    );

    interp.collect_garbage(&[], &[]);
    let error = interp
        .define_method(&point, "f", &[], |_, _| Ok(Value::Void))
        .unwrap_err();
    assert_eq!(error, EmbedError::StaleObject);
}
