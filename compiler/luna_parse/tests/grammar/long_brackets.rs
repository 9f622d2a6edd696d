use luna_diagnostic::ErrorCode;
use luna_ir::ast::{Expr, ExprKind, StmtKind, StringStyle, TableFieldKind};
use luna_parse::{LongBracketMode, ParseConfig, ParseErrorKind};
use pretty_assertions::assert_eq;

use super::common::parse_with;

/// The key of `local _ = foo[...]`.
fn index_key(source: &str, mode: LongBracketMode) -> (ExprKind, Vec<ErrorCode>, String) {
    let config = ParseConfig::default().with_long_bracket_mode(mode);
    let (result, interner) = parse_with(source, &config);
    let codes = result.errors.iter().map(luna_parse::ParseError::code).collect();
    let StmtKind::Local(local) = &result.chunk.block.stmts[0].kind else {
        panic!("expected local, got {:?}", result.chunk.block.stmts);
    };
    let ExprKind::Index { key, .. } = &local.values[0].kind else {
        panic!("expected index, got {:?}", local.values[0].kind);
    };
    let text = match &key.kind {
        ExprKind::String(lit) => interner.lookup(lit.value).to_owned(),
        _ => String::new(),
    };
    (key.kind.clone(), codes, text)
}

#[test]
fn index_bracket_wins_reads_index_of_long_string() {
    let (key, codes, text) = index_key("local _ = foo[[[a]]]", LongBracketMode::IndexBracketWins);
    assert!(codes.is_empty());
    assert!(matches!(
        key,
        ExprKind::String(lit) if lit.style == StringStyle::Long(0)
    ));
    assert_eq!(text, "a");
}

#[test]
fn long_bracket_wins_rejects_and_suggests_a_space() {
    let (key, codes, text) = index_key("local _ = foo[[[a]]]", LongBracketMode::LongBracketWins);
    assert_eq!(codes, vec![ErrorCode::E1012]);
    assert!(matches!(key, ExprKind::String(_)));
    assert_eq!(text, "a");
}

#[test]
fn ambiguity_fix_inserts_space() {
    let config = ParseConfig::default().with_long_bracket_mode(LongBracketMode::LongBracketWins);
    let source = "local _ = foo[[[a]]]";
    let (result, _) = parse_with(source, &config);
    let error = &result.errors[0];
    assert_eq!(error.kind, ParseErrorKind::AmbiguousLongBracket);
    let (span, replacement) = error.fix.clone().unwrap();
    let mut fixed = source.to_owned();
    fixed.replace_range(span.to_range(), &replacement);
    assert_eq!(fixed, "local _ = foo[ [[a]]]");

    let (reparsed, _) = parse_with(&fixed, &config);
    assert!(!reparsed.has_errors(), "{:?}", reparsed.errors);
}

#[test]
fn spaced_form_is_accepted_in_both_modes() {
    for mode in [LongBracketMode::LongBracketWins, LongBracketMode::IndexBracketWins] {
        let (_, codes, text) = index_key("local _ = foo[ [[a]] ]", mode);
        assert!(codes.is_empty(), "{mode:?}");
        assert_eq!(text, "a");
    }
}

#[test]
fn plain_long_strings_are_unaffected() {
    for mode in [LongBracketMode::LongBracketWins, LongBracketMode::IndexBracketWins] {
        let config = ParseConfig::default().with_long_bracket_mode(mode);
        let (result, interner) = parse_with("local s = [==[x]]y]==]\nprint [[hi]]", &config);
        assert!(!result.has_errors(), "{mode:?}: {:?}", result.errors);
        let StmtKind::Local(local) = &result.chunk.block.stmts[0].kind else {
            panic!("expected local");
        };
        let ExprKind::String(lit) = &local.values[0].kind else {
            panic!("expected string");
        };
        assert_eq!(interner.lookup(lit.value), "x]]y");
        assert_eq!(lit.style, StringStyle::Long(2));
    }
}

#[test]
fn edition_selects_mode() {
    let baseline = ParseConfig::default();
    assert_eq!(baseline.long_bracket_mode, LongBracketMode::LongBracketWins);
    let next = ParseConfig::for_edition(luna_parse::Edition::E2026);
    assert_eq!(next.long_bracket_mode, LongBracketMode::IndexBracketWins);
}

#[test]
fn index_bracket_wins_reads_table_keys() {
    let config = ParseConfig::default().with_long_bracket_mode(LongBracketMode::IndexBracketWins);
    let (result, interner) = parse_with("local t = {[[[a]]]=1; [[[b]]]=2}", &config);
    assert!(!result.has_errors(), "{:?}", result.errors);
    let StmtKind::Local(local) = &result.chunk.block.stmts[0].kind else {
        panic!("expected local");
    };
    let ExprKind::Table(table) = &local.values[0].kind else {
        panic!("expected table, got {:?}", local.values[0].kind);
    };
    let keys: Vec<&str> = table
        .fields
        .iter()
        .map(|field| match &field.kind {
            TableFieldKind::Keyed {
                key:
                    Expr {
                        kind: ExprKind::String(lit),
                        ..
                    },
                ..
            } => interner.lookup(lit.value),
            other => panic!("expected keyed field, got {other:?}"),
        })
        .collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn long_bracket_wins_reads_a_long_string_at_field_start() {
    let config = ParseConfig::default().with_long_bracket_mode(LongBracketMode::LongBracketWins);
    let (result, interner) = parse_with("local t = {[[[a]]}", &config);
    assert!(!result.has_errors(), "{:?}", result.errors);
    let StmtKind::Local(local) = &result.chunk.block.stmts[0].kind else {
        panic!("expected local");
    };
    let ExprKind::Table(table) = &local.values[0].kind else {
        panic!("expected table");
    };
    let TableFieldKind::Positional(value) = &table.fields[0].kind else {
        panic!("expected positional field");
    };
    let ExprKind::String(lit) = &value.kind else {
        panic!("expected string");
    };
    assert_eq!(interner.lookup(lit.value), "[a");
}
