use luna_diagnostic::ErrorCode;
use luna_ir::ast::StmtKind;
use luna_parse::{ErrorContext, ParseErrorKind};
use pretty_assertions::assert_eq;

use super::common::{all_features, error_codes, parse_with};

#[test]
fn recovers_at_next_statement() {
    let (result, _) = parse_with("local = 5\nlocal y = 2", &all_features());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code(), ErrorCode::E1004);
    let last = result.chunk.block.stmts.last().unwrap();
    assert!(matches!(last.kind, StmtKind::Local(_)));
}

#[test]
fn several_errors_are_collected() {
    let source = "local = 1\nlocal ok = true\nx +\nlocal y = 2\nfunction (\nprint(ok)";
    let (result, _) = parse_with(source, &all_features());
    assert!(result.errors.len() >= 3, "{:?}", result.errors);
    assert!(!result.is_fatal());
    assert!(result
        .chunk
        .block
        .stmts
        .iter()
        .any(|s| matches!(s.kind, StmtKind::Local(_))));
}

#[test]
fn unclosed_block_points_at_opener() {
    let source = "if x then\n  print(1)\n";
    let (result, _) = parse_with(source, &all_features());
    assert_eq!(result.errors.len(), 1);
    match &result.errors[0].kind {
        ParseErrorKind::UnclosedDelimiter { opened_at, .. } => {
            assert!(opened_at.text(source).starts_with("if"));
        }
        other => panic!("expected unclosed delimiter, got {other:?}"),
    }
}

#[test]
fn unclosed_paren_is_reported_with_context() {
    let (result, _) = parse_with("print(1, 2", &all_features());
    let error = &result.errors[0];
    assert_eq!(error.code(), ErrorCode::E1003);
    assert_eq!(error.context, Some(ErrorContext::ArgumentList));
}

#[test]
fn stray_end_is_skipped() {
    let (result, _) = parse_with("end\nlocal a = 1", &all_features());
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(
        result.chunk.block.stmts.last().unwrap().kind,
        StmtKind::Local(_)
    ));
}

#[test]
fn errors_inside_function_bodies_stay_local() {
    let source = "local function f()\n  local = 1\n  return 2\nend\nlocal g = f()";
    let (result, _) = parse_with(source, &all_features());
    assert_eq!(result.errors.len(), 1, "{:?}", result.errors);
    assert_eq!(result.chunk.block.stmts.len(), 2);
}

#[test]
fn lex_errors_do_not_stop_parsing() {
    let source = "local a = \"unterminated\nlocal b = 1";
    let (result, _) = parse_with(source, &all_features());
    assert_eq!(result.lex_errors.len(), 1);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.chunk.block.stmts.len(), 2);
}

#[test]
fn diagnostics_carry_codes_and_labels() {
    let (result, _) = parse_with("local x = )", &all_features());
    let diagnostics = result.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_error());
    assert!(diagnostics[0].primary_span().is_some());
}

#[test]
fn literal_cannot_start_a_statement() {
    assert_eq!(
        error_codes("1 = 2", &all_features()),
        vec![ErrorCode::E1002]
    );
}
