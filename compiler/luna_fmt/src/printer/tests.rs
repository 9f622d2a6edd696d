//! Hand-built trees, which may lack the `Paren` nodes a parse would give.

use luna_ir::ast::{
    BinaryOp, Expr, ExprKind, FunctionType, Ident, IfElseExpr, TypeExpr, TypeExprKind, TypePack,
    TypeReference, UnaryOp,
};
use luna_ir::{Span, StringInterner};
use pretty_assertions::assert_eq;

use crate::{format_expr, format_type};

fn name(names: &StringInterner, text: &str) -> Expr {
    Expr::new(
        ExprKind::Name(Ident::new(names.intern(text), Span::DUMMY)),
        Span::DUMMY,
    )
}

fn bin(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        Span::DUMMY,
    )
}

fn neg(operand: Expr) -> Expr {
    Expr::new(
        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        },
        Span::DUMMY,
    )
}

#[test]
fn lower_precedence_operand_is_parenthesised() {
    let names = StringInterner::new();
    let sum = bin(BinaryOp::Add, name(&names, "a"), name(&names, "b"));
    let expr = bin(BinaryOp::Mul, sum, name(&names, "c"));
    assert_eq!(format_expr(&expr, &names), "(a + b) * c");
}

#[test]
fn associativity_is_respected() {
    let names = StringInterner::new();
    let right_nested = bin(
        BinaryOp::Sub,
        name(&names, "a"),
        bin(BinaryOp::Sub, name(&names, "b"), name(&names, "c")),
    );
    assert_eq!(format_expr(&right_nested, &names), "a - (b - c)");

    let left_concat = bin(
        BinaryOp::Concat,
        bin(BinaryOp::Concat, name(&names, "a"), name(&names, "b")),
        name(&names, "c"),
    );
    assert_eq!(format_expr(&left_concat, &names), "(a .. b) .. c");

    let right_concat = bin(
        BinaryOp::Concat,
        name(&names, "a"),
        bin(BinaryOp::Concat, name(&names, "b"), name(&names, "c")),
    );
    assert_eq!(format_expr(&right_concat, &names), "a .. b .. c");
}

#[test]
fn unary_operands() {
    let names = StringInterner::new();
    let power_of_negation = bin(BinaryOp::Pow, neg(name(&names, "a")), name(&names, "b"));
    assert_eq!(format_expr(&power_of_negation, &names), "(-a) ^ b");

    let negated_sum = neg(bin(BinaryOp::Add, name(&names, "a"), name(&names, "b")));
    assert_eq!(format_expr(&negated_sum, &names), "-(a + b)");

    assert_eq!(format_expr(&neg(neg(name(&names, "a"))), &names), "- -a");
}

#[test]
fn if_expression_on_the_left_is_parenthesised() {
    let names = StringInterner::new();
    let if_else = Expr::new(
        ExprKind::IfElse(Box::new(IfElseExpr {
            cond: name(&names, "c"),
            then_expr: name(&names, "a"),
            elseifs: Vec::new(),
            else_expr: name(&names, "b"),
        })),
        Span::DUMMY,
    );
    let expr = bin(BinaryOp::Add, if_else.clone(), name(&names, "d"));
    assert_eq!(format_expr(&expr, &names), "(if c then a else b) + d");

    let trailing = bin(BinaryOp::Add, name(&names, "d"), if_else);
    assert_eq!(format_expr(&trailing, &names), "d + if c then a else b");
}

#[test]
fn field_of_a_non_prefix_expression() {
    let names = StringInterner::new();
    let object = bin(BinaryOp::Add, name(&names, "a"), name(&names, "b"));
    let expr = Expr::new(
        ExprKind::Field {
            object: Box::new(object),
            field: Ident::new(names.intern("f"), Span::DUMMY),
        },
        Span::DUMMY,
    );
    assert_eq!(format_expr(&expr, &names), "(a + b).f");
}

fn type_ref(names: &StringInterner, text: &str) -> TypeExpr {
    TypeExpr::new(
        TypeExprKind::Reference(TypeReference {
            prefix: None,
            name: Ident::new(names.intern(text), Span::DUMMY),
            args: Vec::new(),
        }),
        Span::DUMMY,
    )
}

fn empty_pack(parenthesized: bool) -> TypePack {
    TypePack {
        entries: Vec::new(),
        tail: None,
        parenthesized,
        span: Span::DUMMY,
    }
}

#[test]
fn function_member_of_a_union() {
    let names = StringInterner::new();
    let func = TypeExpr::new(
        TypeExprKind::Function(Box::new(FunctionType {
            generics: Vec::new(),
            params: empty_pack(true),
            returns: empty_pack(true),
        })),
        Span::DUMMY,
    );
    let first = TypeExpr::new(
        TypeExprKind::Union(vec![func.clone(), type_ref(&names, "string")]),
        Span::DUMMY,
    );
    assert_eq!(format_type(&first, &names), "(() -> ()) | string");

    let last = TypeExpr::new(
        TypeExprKind::Union(vec![type_ref(&names, "string"), func.clone()]),
        Span::DUMMY,
    );
    assert_eq!(format_type(&last, &names), "string | () -> ()");

    let optional = TypeExpr::new(TypeExprKind::Optional(Box::new(func)), Span::DUMMY);
    assert_eq!(format_type(&optional, &names), "(() -> ())?");
}

#[test]
fn nested_union_in_intersection() {
    let names = StringInterner::new();
    let union = TypeExpr::new(
        TypeExprKind::Union(vec![type_ref(&names, "A"), type_ref(&names, "B")]),
        Span::DUMMY,
    );
    let ty = TypeExpr::new(
        TypeExprKind::Intersection(vec![union, type_ref(&names, "C")]),
        Span::DUMMY,
    );
    assert_eq!(format_type(&ty, &names), "(A | B) & C");
}
