use luna_diagnostic::ErrorCode;
use luna_ir::ast::{
    Access, BoundSyntax, GenericDefault, PackTail, StmtKind, TypeAlias, TypeArg, TypeExpr,
    TypeExprKind,
};
use luna_ir::StringInterner;
use pretty_assertions::assert_eq;

use super::common::{all_features, error_codes, first_stmt, parse_with, without_spans};

fn alias(source: &str) -> (TypeAlias, StringInterner) {
    let (stmt, interner) = first_stmt(source);
    let StmtKind::TypeAlias(alias) = stmt.kind else {
        panic!("expected type alias");
    };
    (*alias, interner)
}

fn aliased(source: &str) -> TypeExpr {
    alias(source).0.ty
}

#[test]
fn leading_bar_adds_no_member() {
    let ty = aliased("type T = | \"a\" | \"b\"");
    let TypeExprKind::Union(members) = ty.kind else {
        panic!("expected union");
    };
    assert_eq!(members.len(), 2);
}

#[test]
fn leading_ampersand_intersection() {
    let ty = aliased("type T = & A & B & C");
    let TypeExprKind::Intersection(members) = ty.kind else {
        panic!("expected intersection");
    };
    assert_eq!(members.len(), 3);
}

#[test]
fn leading_bar_on_single_type_is_that_type() {
    let ty = aliased("type T = | number");
    assert!(matches!(ty.kind, TypeExprKind::Reference(_)));
}

#[test]
fn mixed_union_and_intersection_needs_parens() {
    let codes = error_codes("type T = A | B & C", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1001]);
    let (result, _) = parse_with("type T = A | (B & C)", &all_features());
    assert!(!result.has_errors());
}

#[test]
fn optional_suffix() {
    let ty = aliased("type T = string?");
    assert!(matches!(ty.kind, TypeExprKind::Optional(_)));
}

#[test]
fn named_parameters_and_returns() {
    let ty = aliased("type F = (x: number, y: number) -> (ok: boolean, message: string?)");
    let TypeExprKind::Function(func) = ty.kind else {
        panic!("expected function type");
    };
    assert!(func.params.entries.iter().all(|e| e.name.is_some()));
    assert!(func.returns.entries.iter().all(|e| e.name.is_some()));
    assert!(func.returns.parenthesized);
}

#[test]
fn named_and_unnamed_signatures_differ_only_in_names() {
    let config = all_features();
    let (named, _) = parse_with("type F = (x: number) -> number", &config);
    let (unnamed, _) = parse_with("type F = (number) -> number", &config);
    assert!(!named.has_errors() && !unnamed.has_errors());
    assert_ne!(without_spans(&named.chunk), without_spans(&unnamed.chunk));
}

#[test]
fn variadic_and_generic_pack_tails() {
    let ty = aliased("type F = (string, ...number) -> T...");
    let TypeExprKind::Function(func) = ty.kind else {
        panic!("expected function type");
    };
    assert!(matches!(func.params.tail, Some(PackTail::Variadic(_))));
    assert!(matches!(func.returns.tail, Some(PackTail::Generic(_))));
}

#[test]
fn trailing_comma_after_pack_tail_is_rejected() {
    let codes = error_codes("type F = (number, ...string,) -> ()", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1006]);
}

#[test]
fn trailing_comma_in_type_pack_is_equivalent() {
    let config = all_features();
    let (plain, _) = parse_with("type F = (number, string) -> ()", &config);
    let (trailing, _) = parse_with("type F = (number, string,) -> ()", &config);
    assert!(!trailing.has_errors(), "{:?}", trailing.errors);
    assert_eq!(without_spans(&plain.chunk), without_spans(&trailing.chunk));
}

#[test]
fn generic_function_type() {
    let ty = aliased("type Id = <T>(T) -> T");
    let TypeExprKind::Function(func) = ty.kind else {
        panic!("expected function type");
    };
    assert_eq!(func.generics.len(), 1);
}

#[test]
fn generic_defaults_on_alias() {
    let (alias, interner) = alias("type Map<K, V = K, R... = ...number> = { [K]: V }");
    assert_eq!(alias.generics.len(), 3);
    assert_eq!(interner.lookup(alias.generics[1].name.name), "V");
    assert!(matches!(
        alias.generics[1].default,
        Some(GenericDefault::Type(_))
    ));
    assert!(alias.generics[2].pack);
    assert!(matches!(
        alias.generics[2].default,
        Some(GenericDefault::Pack(_))
    ));
}

#[test]
fn defaults_must_come_last() {
    let codes = error_codes("type T<A = number, B> = A", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1013]);
}

#[test]
fn defaults_only_on_aliases() {
    let codes = error_codes("function f<T = number>() end", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1013]);
}

#[test]
fn packs_come_after_types() {
    let codes = error_codes("type T<A..., B> = A", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1013]);
}

#[test]
fn generic_bounds_in_both_spellings() {
    let (stmt, _) = first_stmt("function f<T: Comparable, U extends Object>(a: T, b: U) end");
    let StmtKind::Function(func) = stmt.kind else {
        panic!("expected function");
    };
    let syntaxes: Vec<_> = func
        .func
        .signature
        .generics
        .iter()
        .map(|g| g.bound.as_ref().map(|b| b.syntax))
        .collect();
    assert_eq!(
        syntaxes,
        vec![Some(BoundSyntax::Colon), Some(BoundSyntax::Extends)]
    );
}

#[test]
fn read_and_write_on_the_same_field() {
    let ty = aliased("type T = { read x: string, write x: \"hello\" }");
    let TypeExprKind::Table(table) = ty.kind else {
        panic!("expected table type");
    };
    let access: Vec<_> = table.props.iter().map(|p| p.access).collect();
    assert_eq!(access, vec![Some(Access::Read), Some(Access::Write)]);
}

#[test]
fn repeated_modifier_is_rejected() {
    let codes = error_codes(
        "type T = { read x: string, read x: \"hello\" }",
        &all_features(),
    );
    assert_eq!(codes, vec![ErrorCode::E1007]);
}

#[test]
fn repeated_modifier_keeps_first_property() {
    let (result, _) = parse_with(
        "type T = { read x: string, read x: number }",
        &all_features(),
    );
    let StmtKind::TypeAlias(alias) = &result.chunk.block.stmts[0].kind else {
        panic!("expected type alias");
    };
    let TypeExprKind::Table(table) = &alias.ty.kind else {
        panic!("expected table type");
    };
    assert_eq!(table.props.len(), 1);
}

#[test]
fn modifier_words_as_field_names() {
    let ty = aliased("type T = { read: boolean, write: boolean }");
    let TypeExprKind::Table(table) = ty.kind else {
        panic!("expected table type");
    };
    assert!(table.props.iter().all(|p| p.access.is_none()));
}

#[test]
fn read_only_indexer() {
    let ty = aliased("type T = { read [string]: number }");
    let TypeExprKind::Table(table) = ty.kind else {
        panic!("expected table type");
    };
    assert_eq!(table.indexer.unwrap().access, Some(Access::Read));
}

#[test]
fn second_indexer_is_rejected() {
    let codes = error_codes("type T = { [string]: number, [number]: string }", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1007]);
}

#[test]
fn array_sugar_and_string_keys() {
    let ty = aliased("type T = { {number} }");
    assert!(matches!(ty.kind, TypeExprKind::Array(_)));
    let ty = aliased("type T = { [\"key with spaces\"]: number }");
    let TypeExprKind::Table(table) = ty.kind else {
        panic!("expected table type");
    };
    assert_eq!(table.props.len(), 1);
}

#[test]
fn typeof_and_module_references() {
    let ty = aliased("type T = typeof(setmetatable({}, mt))");
    assert!(matches!(ty.kind, TypeExprKind::Typeof(_)));
    let ty = aliased("type T = Mod.Thing<number, ...string>");
    let TypeExprKind::Reference(reference) = ty.kind else {
        panic!("expected reference");
    };
    assert!(reference.prefix.is_some());
    assert!(matches!(reference.args[1], TypeArg::Pack(_)));
}

#[test]
fn nested_type_arguments_close_together() {
    let ty = aliased("type T = Array<Array<number>>");
    let TypeExprKind::Reference(reference) = ty.kind else {
        panic!("expected reference");
    };
    assert_eq!(reference.args.len(), 1);
}

#[test]
fn exported_alias() {
    let (alias, _) = alias("export type Point = { x: number, y: number }");
    assert!(alias.exported);
}

#[test]
fn singleton_types() {
    let ty = aliased("type T = true | false | nil | \"on\"");
    let TypeExprKind::Union(members) = ty.kind else {
        panic!("expected union");
    };
    assert_eq!(members.len(), 4);
    assert!(matches!(members[2].kind, TypeExprKind::Nil));
}
