use luna_diagnostic::ErrorCode;
use luna_parse::{Edition, FeatureFlags, ParseConfig, ParseErrorKind};
use pretty_assertions::assert_eq;

use super::common::{error_codes, parse_with};

/// Each gated construct, the flag that enables it, and a source using it.
const GATED: &[(FeatureFlags, &str)] = &[
    (FeatureFlags::CONST_BINDINGS, "const x = 1"),
    (FeatureFlags::IF_LOCAL, "if local x = f() then end"),
    (FeatureFlags::GENERIC_INSTANTIATION, "f<<number>>()"),
    (FeatureFlags::GENERIC_BOUNDS_COLON, "function f<T: U>() end"),
    (FeatureFlags::GENERIC_BOUNDS_EXTENDS, "function f<T extends U>() end"),
    (FeatureFlags::NAMED_RETURNS, "type F = () -> (ok: boolean)"),
    (FeatureFlags::INTEGER_SUFFIX, "local n = 3i"),
    (FeatureFlags::ATTRIBUTE_ARGUMENTS, "@[deprecated \"no\"] function f() end"),
];

#[test]
fn each_gated_construct_needs_its_flag() {
    for &(flag, source) in GATED {
        let off = ParseConfig::default();
        let codes = error_codes(source, &off);
        assert_eq!(codes, vec![ErrorCode::E1009], "{source}");

        let on = ParseConfig::default().with_features(flag);
        let codes = error_codes(source, &on);
        assert!(codes.is_empty(), "{source}: {codes:?}");
    }
}

#[test]
fn feature_error_names_the_flag() {
    let (result, _) = parse_with("const x = 1", &ParseConfig::default());
    match &result.errors[0].kind {
        ParseErrorKind::FeatureDisabled { flag, .. } => assert_eq!(*flag, "const-bindings"),
        other => panic!("expected feature error, got {other:?}"),
    }
    let diagnostic = result.errors[0].to_diagnostic();
    assert!(diagnostic.notes.iter().any(|n| n.contains("--feature const-bindings")));
}

#[test]
fn newer_edition_enables_const() {
    let config = ParseConfig::for_edition(Edition::E2026);
    assert!(error_codes("const x = 1", &config).is_empty());
    assert_eq!(error_codes("local n = 3i", &config), vec![ErrorCode::E1009]);
}

#[test]
fn gated_syntax_still_builds_a_tree() {
    let (result, _) = parse_with("const x = 1\nlocal y = x", &ParseConfig::default());
    assert_eq!(result.chunk.block.stmts.len(), 2);
}

#[test]
fn multiline_interpolation_needs_flag() {
    let source = "local s = `[[\nline {x}\n]]`";
    let on = ParseConfig::default().with_features(FeatureFlags::MULTILINE_INTERPOLATION);
    let (result, _) = parse_with(source, &on);
    assert!(!result.has_errors(), "{:?} {:?}", result.lex_errors, result.errors);

    let (result, _) = parse_with(source, &ParseConfig::default());
    assert!(result.has_errors());
}
