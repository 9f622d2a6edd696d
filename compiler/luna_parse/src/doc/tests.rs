#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use luna_ir::ast::{StmtKind, TypeExprKind};
use luna_ir::StringInterner;
use pretty_assertions::assert_eq;

use crate::{parse, FeatureFlags, ParseConfig, ParseResult};

fn parse_all(source: &str) -> ParseResult {
    let interner = StringInterner::new();
    let config = ParseConfig::default().with_features(FeatureFlags::all());
    parse(source, &config, &interner)
}

fn local_doc(result: &ParseResult, index: usize) -> Option<String> {
    match &result.chunk.block.stmts[index].kind {
        StmtKind::Local(local) => local.doc.as_ref().map(|d| d.text.clone()),
        other => panic!("expected local, got {other:?}"),
    }
}

#[test]
fn adjacent_comment_documents_local() {
    let result = parse_all("--- The answer ---\nlocal x = 42");
    assert_eq!(local_doc(&result, 0).as_deref(), Some("The answer"));
}

#[test]
fn blank_line_detaches_comment() {
    let result = parse_all("-- not a doc\n\nlocal x = 42");
    assert_eq!(local_doc(&result, 0), None);
}

#[test]
fn consecutive_comments_join() {
    let result = parse_all("-- first\n-- second\nlocal x = 1");
    assert_eq!(local_doc(&result, 0).as_deref(), Some("first\nsecond"));
}

#[test]
fn trailing_comment_belongs_to_previous_line() {
    let result = parse_all("local a = 1 -- about a\nlocal b = 2");
    assert_eq!(local_doc(&result, 1), None);
}

#[test]
fn block_comment_doc() {
    let result = parse_all("--[[ Adds two numbers ]]\nlocal function add(a, b) return a + b end");
    let StmtKind::LocalFunction(func) = &result.chunk.block.stmts[0].kind else {
        panic!("expected local function");
    };
    assert_eq!(func.doc.as_ref().unwrap().text, "Adds two numbers");
}

#[test]
fn parameter_docs_ignore_spacing() {
    let source = "function f(\n  -- the x\n\n  x: number,\n  -- the y\n  y)\nend";
    let result = parse_all(source);
    let StmtKind::Function(func) = &result.chunk.block.stmts[0].kind else {
        panic!("expected function");
    };
    let docs: Vec<_> = func
        .func
        .signature
        .params
        .iter()
        .map(|p| p.doc.as_ref().map(|d| d.text.clone()))
        .collect();
    assert_eq!(docs, vec![Some("the x".to_owned()), Some("the y".to_owned())]);
}

#[test]
fn attribute_is_part_of_documented_node() {
    let result = parse_all("-- fast\n@native\nlocal function f() end");
    let StmtKind::LocalFunction(func) = &result.chunk.block.stmts[0].kind else {
        panic!("expected local function");
    };
    assert_eq!(func.doc.as_ref().unwrap().text, "fast");
    assert_eq!(func.attrs.len(), 1);
}

#[test]
fn table_type_fields_take_docs() {
    let result = parse_all("type P = {\n  -- horizontal\n  x: number,\n  y: number,\n}");
    let StmtKind::TypeAlias(alias) = &result.chunk.block.stmts[0].kind else {
        panic!("expected alias");
    };
    let TypeExprKind::Table(table) = &alias.ty.kind else {
        panic!("expected table type");
    };
    assert_eq!(table.props[0].doc.as_ref().unwrap().text, "horizontal");
    assert_eq!(table.props[1].doc, None);
}

#[test]
fn doc_span_covers_comments() {
    let source = "-- a\n-- b\nlocal x";
    let result = parse_all(source);
    let StmtKind::Local(local) = &result.chunk.block.stmts[0].kind else {
        panic!("expected local");
    };
    let doc = local.doc.as_ref().unwrap();
    assert_eq!(doc.span.text(source), "-- a\n-- b");
}
