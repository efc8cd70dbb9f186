use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sprig_diagnostic::FormatOptions;

use super::{messages, parse_text};

#[test]
fn unexpected_end_of_input() {
    assert_eq!(messages("1 +"), ["Unexpected end of input"]);
    assert_eq!(messages("(1, 2"), ["Unexpected end of input"]);
    assert_eq!(messages("[1"), ["Unexpected end of input"]);
}

#[test]
fn missing_operand_before_separator() {
    assert_eq!(messages("1 + , 2"), ["Expected expression"]);
}

#[test]
fn adjacent_invalid_characters_coalesce() {
    let (output, _) = parse_text("a ### b");
    assert_eq!(output.diagnostics.len(), 1);
    let diagnostic = &output.diagnostics[0];
    assert_eq!(diagnostic.message, "Invalid token");
    assert_eq!(diagnostic.position.span().to_range(), 2..5);
}

#[test]
fn separated_invalid_characters_do_not_coalesce() {
    assert_eq!(messages("# a #"), ["Invalid token", "Invalid token"]);
}

#[test]
fn invalid_token_after_other_error_is_reported() {
    assert_eq!(messages("x = #"), ["Expected expression", "Invalid token"]);
}

#[test]
fn member_name_must_be_identifier() {
    assert_eq!(messages("a.1"), ["Expected member name"]);
}

#[test]
fn operator_without_prefix_form() {
    assert_eq!(messages("a * * b"), ["Unexpected operator"]);
    assert_eq!(messages("a !b"), ["Unexpected operator"]);
}

#[test]
fn string_errors() {
    assert_eq!(messages("\"abc"), ["Unterminated string"]);
    assert_eq!(messages(r#""\q""#), ["Invalid escape sequence"]);
    assert_eq!(messages(r#""\xZZ""#), ["Invalid escape sequence"]);
}

#[test]
fn lambda_parameter_errors() {
    assert_eq!(messages(r"\(a, +) a"), ["Expected parameter"]);
}

#[test]
fn unterminated_block_comment() {
    assert_eq!(messages("1 /* open"), ["Unterminated block comment"]);
}

#[test]
fn errors_render_with_location() {
    let (output, _) = parse_text("x = #");
    assert_eq!(
        output.diagnostics[0].format(&FormatOptions::default()),
        "test.sprig:1:5 - Expected expression\nx = #\n    ^"
    );
}

#[test]
fn parsing_continues_after_errors() {
    let (output, interner) = parse_text("# ok");
    assert!(output.has_errors());
    assert_eq!(
        sprig_ir::dump_expr(&output.arena, output.root, &interner),
        "(group ok)"
    );
}

proptest! {
    #[test]
    fn junk_runs_become_one_diagnostic(junk in "[#?^;~]{1,24}") {
        let (output, _) = parse_text(&junk);
        prop_assert_eq!(output.diagnostics.len(), 1);
        prop_assert_eq!(output.diagnostics[0].position.len() as usize, junk.len());
    }
}
