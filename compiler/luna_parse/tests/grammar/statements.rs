use luna_diagnostic::ErrorCode;
use luna_ir::ast::{
    CompoundOp, Condition, ExprKind, LocalKind, StmtKind, TypeExprKind,
};
use pretty_assertions::assert_eq;

use super::common::{all_features, error_codes, first_stmt, parse_ok, parse_with, without_spans};

#[test]
fn statement_order_is_preserved() {
    let (chunk, _) = parse_ok("local a = 1\nb = 2\nprint(a)\nreturn a");
    let kinds: Vec<_> = chunk
        .block
        .stmts
        .iter()
        .map(|s| match s.kind {
            StmtKind::Local(_) => "local",
            StmtKind::Assign(_) => "assign",
            StmtKind::Expr(_) => "call",
            StmtKind::Return(_) => "return",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["local", "assign", "call", "return"]);
}

#[test]
fn annotated_local_with_read_only_table() {
    let (stmt, interner) = first_stmt("local t: { read x: number } = { x = 5 }");
    let StmtKind::Local(local) = stmt.kind else {
        panic!("expected local");
    };
    assert_eq!(local.kind, LocalKind::Local);
    let annotation = local.bindings[0].annotation.as_ref().unwrap();
    let TypeExprKind::Table(table) = &annotation.kind else {
        panic!("expected table type");
    };
    assert_eq!(table.props.len(), 1);
    assert_eq!(table.props[0].access, Some(luna_ir::ast::Access::Read));
    assert_eq!(interner.lookup(table.props[0].key.name()), "x");
    assert!(matches!(local.values[0].kind, ExprKind::Table(_)));
}

#[test]
fn const_declaration() {
    let (stmt, _) = first_stmt("const LIMIT: number = 10");
    let StmtKind::Local(local) = stmt.kind else {
        panic!("expected local");
    };
    assert_eq!(local.kind, LocalKind::Const);
    assert!(local.bindings[0].annotation.is_some());
}

#[test]
fn const_as_identifier_still_works() {
    let (chunk, _) = parse_ok("const = 1\nconst.x = 2\nconst()");
    assert_eq!(chunk.block.stmts.len(), 3);
    assert!(matches!(chunk.block.stmts[0].kind, StmtKind::Assign(_)));
    assert!(matches!(chunk.block.stmts[2].kind, StmtKind::Expr(_)));
}

#[test]
fn continue_is_contextual() {
    let (chunk, _) = parse_ok("while true do\n continue\nend\ncontinue = 1\ncontinue()");
    let StmtKind::While(w) = &chunk.block.stmts[0].kind else {
        panic!("expected while");
    };
    assert_eq!(w.body.stmts[0].kind, StmtKind::Continue);
    assert!(matches!(chunk.block.stmts[1].kind, StmtKind::Assign(_)));
    assert!(matches!(chunk.block.stmts[2].kind, StmtKind::Expr(_)));
}

#[test]
fn type_is_contextual() {
    let (chunk, _) = parse_ok("type = 1\nlocal k = type(x)\ntype T = number");
    assert!(matches!(chunk.block.stmts[0].kind, StmtKind::Assign(_)));
    assert!(matches!(chunk.block.stmts[2].kind, StmtKind::TypeAlias(_)));
}

#[test]
fn if_local_with_refinement() {
    let (stmt, _) = first_stmt("if local x = f() in x > 0 then print(x) end");
    let StmtKind::If(if_stmt) = stmt.kind else {
        panic!("expected if");
    };
    let Condition::Local(cond) = &if_stmt.clauses[0].cond else {
        panic!("expected local condition");
    };
    assert_eq!(cond.bindings.len(), 1);
    assert!(cond.refinement.is_some());
}

#[test]
fn while_local_without_refinement() {
    let (stmt, _) = first_stmt("while local line = read() do print(line) end");
    let StmtKind::While(w) = stmt.kind else {
        panic!("expected while");
    };
    let Condition::Local(cond) = &w.cond else {
        panic!("expected local condition");
    };
    assert!(cond.refinement.is_none());
}

#[test]
fn elseif_chain() {
    let (stmt, _) = first_stmt("if a then x() elseif b then y() elseif c then z() else w() end");
    let StmtKind::If(if_stmt) = stmt.kind else {
        panic!("expected if");
    };
    assert_eq!(if_stmt.clauses.len(), 3);
    assert!(if_stmt.else_block.is_some());
}

#[test]
fn numeric_and_generic_for() {
    let (chunk, _) = parse_ok("for i = 1, 10, 2 do end\nfor k, v in pairs(t) do end");
    let StmtKind::NumericFor(numeric) = &chunk.block.stmts[0].kind else {
        panic!("expected numeric for");
    };
    assert!(numeric.step.is_some());
    let StmtKind::GenericFor(generic) = &chunk.block.stmts[1].kind else {
        panic!("expected generic for");
    };
    assert_eq!(generic.vars.len(), 2);
}

#[test]
fn repeat_until_sees_body() {
    let (stmt, _) = first_stmt("repeat local done = step() until done");
    assert!(matches!(stmt.kind, StmtKind::Repeat(_)));
}

#[test]
fn compound_assignment() {
    let (stmt, _) = first_stmt("total //= 2");
    let StmtKind::CompoundAssign(assign) = stmt.kind else {
        panic!("expected compound assignment");
    };
    assert_eq!(assign.op, CompoundOp::FloorDiv);
}

#[test]
fn method_function_name() {
    let (stmt, interner) = first_stmt("function a.b.c:d(self) end");
    let StmtKind::Function(func) = stmt.kind else {
        panic!("expected function");
    };
    let path: Vec<_> = func.name.path.iter().map(|i| interner.lookup(i.name)).collect();
    assert_eq!(path, vec!["a", "b", "c"]);
    assert_eq!(interner.lookup(func.name.method.unwrap().name), "d");
}

#[test]
fn attributes_on_functions() {
    let (stmt, interner) = first_stmt("@native @checked\nlocal function f() end");
    let StmtKind::LocalFunction(func) = stmt.kind else {
        panic!("expected local function");
    };
    let names: Vec<_> = func.attrs.iter().map(|a| interner.lookup(a.name.name)).collect();
    assert_eq!(names, vec!["native", "checked"]);
}

#[test]
fn bracketed_attributes_with_arguments() {
    let (stmt, _) = first_stmt("@[deprecated(\"use g\"), native]\nfunction f() end");
    let StmtKind::Function(func) = stmt.kind else {
        panic!("expected function");
    };
    assert_eq!(func.attrs.len(), 2);
    assert!(func.attrs[0].bracketed);
    assert_eq!(func.attrs[0].args.len(), 1);
}

#[test]
fn duplicate_attribute_is_rejected() {
    let codes = error_codes("@native @native function f() end", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1008]);
}

#[test]
fn attributed_function_expression() {
    let (stmt, _) = first_stmt("local f = @native function() end");
    let StmtKind::Local(local) = stmt.kind else {
        panic!("expected local");
    };
    let ExprKind::Function(func) = &local.values[0].kind else {
        panic!("expected function");
    };
    assert_eq!(func.attrs.len(), 1);
}

#[test]
fn return_must_end_block() {
    let codes = error_codes("return 1\nprint(2)", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1001]);
}

#[test]
fn semicolons_are_separators() {
    let (chunk, _) = parse_ok("local a = 1; local b = 2;; return a;");
    assert_eq!(chunk.block.stmts.len(), 3);
}

#[test]
fn trailing_comma_in_parameters_is_equivalent() {
    let config = all_features();
    let (plain, _) = parse_with("local function f(a, b) end", &config);
    let (trailing, _) = parse_with("local function f(a, b,) end", &config);
    assert!(!trailing.has_errors(), "{:?}", trailing.errors);
    assert_eq!(without_spans(&plain.chunk), without_spans(&trailing.chunk));
}

#[test]
fn trailing_comma_in_table_and_call_is_accepted() {
    let (chunk, _) = parse_ok("f(1, 2,)\nlocal t = { 1, 2, }");
    assert_eq!(chunk.block.stmts.len(), 2);
}

#[test]
fn trailing_comma_after_varargs_is_rejected() {
    let codes = error_codes("local function f(a, ...,) end", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1006]);
}

#[test]
fn typed_varargs() {
    let (stmt, _) = first_stmt("function f(...: number) end");
    let StmtKind::Function(func) = stmt.kind else {
        panic!("expected function");
    };
    assert!(func.func.signature.vararg.unwrap().annotation.is_some());
}

#[test]
fn call_is_the_only_expression_statement() {
    let codes = error_codes("x + 1", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1001]);
}

#[test]
fn assignment_to_call_is_rejected() {
    let codes = error_codes("f() = 1", &all_features());
    assert_eq!(codes, vec![ErrorCode::E1014]);
}
