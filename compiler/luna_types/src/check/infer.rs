//! Expression types.
//!
//! Inference is deliberately shallow: literals get singleton types, names
//! the type of their binding, and a handful of operators a primitive
//! result. Anything else is `unknown`, which the checker never reports
//! against. An expected type flows into table constructors so that
//! `{ x = 5 }` can take the property types of its annotation.

use luna_ir::ast::{
    BinaryOp, CallExpr, Expr, ExprKind, NumberLit, TableConstructor, TableFieldKind, UnaryOp,
};
use luna_ir::{Name, Span};

use super::Checker;
use crate::data::{Singleton, TableData, TypeData};
use crate::instantiate::instantiate_function;
use crate::scope::ScopeId;
use crate::{Idx, TableBuilder};

impl Checker<'_> {
    pub(super) fn infer(&mut self, expr: &Expr, scope: ScopeId, expected: Option<Idx>) -> Idx {
        match &expr.kind {
            ExprKind::Nil => Idx::NIL,
            ExprKind::Bool(b) => self.types.bool_singleton(*b),
            ExprKind::Number(NumberLit::Float(value)) => self.types.number_singleton(*value),
            ExprKind::Number(NumberLit::Integer(value)) => {
                self.types.singleton(Singleton::Integer(*value))
            }
            ExprKind::String(lit) => self.types.string_singleton(lit.value),
            ExprKind::Interp(interp) => {
                for part in &interp.exprs {
                    self.infer(part, scope, None);
                }
                Idx::STRING
            }
            ExprKind::Varargs => Idx::UNKNOWN,
            ExprKind::Name(ident) => self
                .scopes
                .lookup(scope, ident.name)
                .and_then(|id| self.scopes.binding(id))
                .map_or(Idx::UNKNOWN, |binding| binding.ty),
            ExprKind::Paren(inner) => self.infer(inner, scope, expected),
            ExprKind::Field { object, field } => {
                let object = self.infer(object, scope, None);
                self.read_prop(object, field.name)
            }
            ExprKind::Index { object, key } => {
                let object = self.infer(object, scope, None);
                let key = self.infer(key, scope, None);
                match self.types.lookup(key) {
                    TypeData::Singleton(Singleton::String(name)) => self.read_prop(object, name),
                    _ => self.read_index(object),
                }
            }
            ExprKind::Call(call) => self.call(call, expr.span, scope),
            ExprKind::Function(func) => self.function_body(&func.body, scope, None),
            ExprKind::Table(table) => self.table_constructor(table, expr.span, scope, expected),
            ExprKind::Unary { op, operand } => {
                let operand = self.infer(operand, scope, None);
                match op {
                    UnaryOp::Not => Idx::BOOLEAN,
                    UnaryOp::Len => Idx::NUMBER,
                    UnaryOp::Neg => self.arithmetic(operand, operand, expr.span),
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.infer(lhs, scope, None);
                let rhs = self.infer(rhs, scope, None);
                self.binary(*op, lhs, rhs, expr.span)
            }
            ExprKind::Cast { expr: inner, ty } => {
                self.infer(inner, scope, None);
                self.lower_type(ty, scope)
            }
            ExprKind::IfElse(if_else) => {
                self.infer(&if_else.cond, scope, None);
                let mut branches = vec![self.infer(&if_else.then_expr, scope, expected)];
                for (cond, value) in &if_else.elseifs {
                    self.infer(cond, scope, None);
                    branches.push(self.infer(value, scope, expected));
                }
                branches.push(self.infer(&if_else.else_expr, scope, expected));
                self.types.union(branches)
            }
            ExprKind::Error => Idx::ERROR,
        }
    }

    /// Forget literal values: `5` becomes `number`, `"a" | "b"` becomes
    /// `string`.
    pub(super) fn widen(&self, ty: Idx) -> Idx {
        match self.types.lookup(ty) {
            TypeData::Singleton(s) => s.primitive().idx(),
            TypeData::Union(members) => self
                .types
                .union(members.iter().map(|&member| self.widen(member))),
            _ => ty,
        }
    }

    fn table_of(&self, ty: Idx) -> Option<Box<TableData>> {
        let resolved = self.types.resolve(ty);
        match self.types.lookup(resolved) {
            TypeData::Table(table) => Some(table),
            TypeData::Extern(_) => self
                .types
                .extern_info(resolved)
                .and_then(|info| info.members)
                .and_then(|members| self.table_of(members)),
            // `T?` and other unions: the first table member.
            TypeData::Union(members) => members.iter().find_map(|&member| self.table_of(member)),
            _ => None,
        }
    }

    fn read_prop(&self, object: Idx, name: Name) -> Idx {
        self.table_of(object)
            .and_then(|table| table.prop(name))
            .and_then(|prop| prop.read)
            .unwrap_or(Idx::UNKNOWN)
    }

    fn read_index(&self, object: Idx) -> Idx {
        self.table_of(object)
            .and_then(|table| table.indexer)
            .and_then(|indexer| indexer.value.read)
            .unwrap_or(Idx::UNKNOWN)
    }

    fn call(&mut self, call: &CallExpr, span: Span, scope: ScopeId) -> Idx {
        let callee = self.infer(&call.callee, scope, None);
        let callee = match call.method {
            Some(method) => self.read_prop(callee, method.name),
            None => callee,
        };
        for arg in &call.args {
            self.infer(arg, scope, None);
        }
        let mut func = self.types.resolve(callee);
        if !call.type_args.is_empty() {
            let args: Vec<_> = call
                .type_args
                .iter()
                .map(|arg| self.lower_type_arg(arg, scope))
                .collect();
            let display_name = match (&call.callee.kind, call.method) {
                (_, Some(method)) => self.names.lookup(method.name),
                (ExprKind::Name(ident), None) => self.names.lookup(ident.name),
                _ => "function",
            };
            match instantiate_function(self.types, func, &args, display_name) {
                Ok(instantiated) => func = instantiated,
                Err(e) => {
                    self.error(e, span);
                    return Idx::ERROR;
                }
            }
        }
        match self.types.lookup(func) {
            TypeData::Function(data) if data.generics.is_empty() => data.returns.first(),
            _ => Idx::UNKNOWN,
        }
    }

    fn arithmetic(&mut self, lhs: Idx, rhs: Idx, span: Span) -> Idx {
        if self.subtype(lhs, Idx::INTEGER, span) && self.subtype(rhs, Idx::INTEGER, span) {
            Idx::INTEGER
        } else if self.subtype(lhs, Idx::NUMBER, span) && self.subtype(rhs, Idx::NUMBER, span) {
            Idx::NUMBER
        } else {
            Idx::UNKNOWN
        }
    }

    fn binary(&mut self, op: BinaryOp, lhs: Idx, rhs: Idx, span: Span) -> Idx {
        match op {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::FloorDiv
            | BinaryOp::Mod
            | BinaryOp::Pow => self.arithmetic(lhs, rhs, span),
            BinaryOp::Concat => {
                let stringish = self.types.union([Idx::STRING, Idx::NUMBER]);
                if self.subtype(lhs, stringish, span) && self.subtype(rhs, stringish, span) {
                    Idx::STRING
                } else {
                    Idx::UNKNOWN
                }
            }
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => Idx::BOOLEAN,
            BinaryOp::And => {
                if self.may_be_falsy(lhs, span) {
                    self.types.union([lhs, rhs])
                } else {
                    rhs
                }
            }
            BinaryOp::Or => {
                if self.may_be_falsy(lhs, span) {
                    let truthy = self.without_nil(lhs);
                    self.types.union([truthy, rhs])
                } else {
                    lhs
                }
            }
        }
    }

    fn may_be_falsy(&mut self, ty: Idx, span: Span) -> bool {
        let falsy = self.types.bool_singleton(false);
        ty.is_top()
            || self.subtype(Idx::NIL, ty, span)
            || self.subtype(falsy, ty, span)
    }

    fn without_nil(&self, ty: Idx) -> Idx {
        match self.types.lookup(ty) {
            TypeData::Union(members) => self
                .types
                .union(members.iter().copied().filter(|&m| m != Idx::NIL)),
            _ => ty,
        }
    }

    /// Type of a table constructor, sealed since the literal lists every
    /// property it has. A field whose value fits the corresponding
    /// property of `expected` takes that property's type instead of the
    /// widened value type.
    fn table_constructor(
        &mut self,
        table: &TableConstructor,
        span: Span,
        scope: ScopeId,
        expected: Option<Idx>,
    ) -> Idx {
        let expected = expected.and_then(|ty| self.table_of(ty));
        let mut builder = TableBuilder::new(self.names);
        let mut keys = Vec::new();
        let mut values = Vec::new();
        for field in &table.fields {
            match &field.kind {
                TableFieldKind::Named { name, value } => {
                    let ty = self.field_type(value, name.name, expected.as_deref(), scope);
                    // A repeated field overwrites at run time; the first
                    // type is kept.
                    let _ = builder.prop(name.name, None, ty);
                }
                TableFieldKind::Keyed { key, value } => {
                    if let ExprKind::String(lit) = &key.kind {
                        let ty = self.field_type(value, lit.value, expected.as_deref(), scope);
                        let _ = builder.prop(lit.value, None, ty);
                    } else {
                        let key = self.infer(key, scope, None);
                        keys.push(self.widen(key));
                        let value = self.infer(value, scope, None);
                        values.push(self.widen(value));
                    }
                }
                TableFieldKind::Positional(value) => {
                    let element = expected.as_deref().and_then(TableData::array_element);
                    let ty = self.infer(value, scope, element);
                    keys.push(Idx::NUMBER);
                    values.push(match element {
                        Some(element) if self.subtype(ty, element, value.span) => element,
                        _ => self.widen(ty),
                    });
                }
            }
        }
        if !keys.is_empty() {
            let key = self.types.union(keys);
            let value = self.types.union(values);
            let _ = builder.indexer(key, None, value);
        }
        match builder.seal(self.types) {
            Ok(ty) => ty,
            Err(e) => {
                self.error(e, span);
                Idx::ERROR
            }
        }
    }

    fn field_type(
        &mut self,
        value: &Expr,
        name: Name,
        expected: Option<&TableData>,
        scope: ScopeId,
    ) -> Idx {
        let want = expected
            .and_then(|table| table.prop(name))
            .and_then(|prop| prop.read.or(prop.write));
        let ty = self.infer(value, scope, want);
        match want {
            Some(want) if self.subtype(ty, want, value.span) => want,
            _ => self.widen(ty),
        }
    }
}
