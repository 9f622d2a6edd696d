//! Read-only traversal of the syntax tree.
//!
//! Override a `visit_*` method to act on a node kind and call the matching
//! `walk_*` function to keep descending.
//!
//! ```text
//! struct CountCalls(usize);
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if expr.is_call() {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use super::{
    Attribute, Binding, Block, Chunk, ClassMemberKind, Condition, Expr, ExprKind,
    FunctionSignature, GenericDefault, GenericParam, PackTail, Stmt, StmtKind, TableFieldKind,
    TypeArg, TypeExpr, TypeExprKind, TypePack,
};

pub trait Visitor<'ast>: Sized {
    fn visit_chunk(&mut self, chunk: &'ast Chunk) {
        self.visit_block(&chunk.block);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &'ast TypeExpr) {
        walk_type(self, ty);
    }

    fn visit_type_pack(&mut self, pack: &'ast TypePack) {
        walk_type_pack(self, pack);
    }

    fn visit_binding(&mut self, binding: &'ast Binding) {
        if let Some(ty) = &binding.annotation {
            self.visit_type(ty);
        }
    }

    fn visit_signature(&mut self, signature: &'ast FunctionSignature) {
        walk_signature(self, signature);
    }

    fn visit_generic_param(&mut self, param: &'ast GenericParam) {
        walk_generic_param(self, param);
    }

    fn visit_attribute(&mut self, attr: &'ast Attribute) {
        for arg in &attr.args {
            self.visit_expr(arg);
        }
    }
}

pub fn walk_block<'ast, V: Visitor<'ast>>(v: &mut V, block: &'ast Block) {
    for stmt in &block.stmts {
        v.visit_stmt(stmt);
    }
}

fn walk_condition<'ast, V: Visitor<'ast>>(v: &mut V, cond: &'ast Condition) {
    match cond {
        Condition::Expr(e) => v.visit_expr(e),
        Condition::Local(local) => {
            for b in &local.bindings {
                v.visit_binding(b);
            }
            for e in &local.values {
                v.visit_expr(e);
            }
            if let Some(r) = &local.refinement {
                v.visit_expr(r);
            }
        }
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast>>(v: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::Local(local) => {
            local.attrs.iter().for_each(|a| v.visit_attribute(a));
            local.bindings.iter().for_each(|b| v.visit_binding(b));
            local.values.iter().for_each(|e| v.visit_expr(e));
        }
        StmtKind::Assign(assign) => {
            assign.targets.iter().for_each(|e| v.visit_expr(e));
            assign.values.iter().for_each(|e| v.visit_expr(e));
        }
        StmtKind::CompoundAssign(assign) => {
            v.visit_expr(&assign.target);
            v.visit_expr(&assign.value);
        }
        StmtKind::Expr(e) => v.visit_expr(e),
        StmtKind::Do(block) => v.visit_block(block),
        StmtKind::While(w) => {
            walk_condition(v, &w.cond);
            v.visit_block(&w.body);
        }
        StmtKind::Repeat(r) => {
            v.visit_block(&r.body);
            v.visit_expr(&r.cond);
        }
        StmtKind::If(i) => {
            for clause in &i.clauses {
                walk_condition(v, &clause.cond);
                v.visit_block(&clause.body);
            }
            if let Some(block) = &i.else_block {
                v.visit_block(block);
            }
        }
        StmtKind::NumericFor(f) => {
            v.visit_binding(&f.var);
            v.visit_expr(&f.start);
            v.visit_expr(&f.limit);
            if let Some(step) = &f.step {
                v.visit_expr(step);
            }
            v.visit_block(&f.body);
        }
        StmtKind::GenericFor(f) => {
            f.vars.iter().for_each(|b| v.visit_binding(b));
            f.values.iter().for_each(|e| v.visit_expr(e));
            v.visit_block(&f.body);
        }
        StmtKind::Function(f) => {
            f.attrs.iter().for_each(|a| v.visit_attribute(a));
            v.visit_signature(&f.func.signature);
            v.visit_block(&f.func.block);
        }
        StmtKind::LocalFunction(f) => {
            f.attrs.iter().for_each(|a| v.visit_attribute(a));
            v.visit_signature(&f.func.signature);
            v.visit_block(&f.func.block);
        }
        StmtKind::Return(values) => values.iter().for_each(|e| v.visit_expr(e)),
        StmtKind::TypeAlias(alias) => {
            alias.attrs.iter().for_each(|a| v.visit_attribute(a));
            alias.generics.iter().for_each(|g| v.visit_generic_param(g));
            v.visit_type(&alias.ty);
        }
        StmtKind::DeclareGlobal(global) => v.visit_type(&global.ty),
        StmtKind::DeclareFunction(func) => {
            func.attrs.iter().for_each(|a| v.visit_attribute(a));
            v.visit_signature(&func.signature);
        }
        StmtKind::DeclareClass(class) => {
            for member in &class.members {
                match &member.kind {
                    ClassMemberKind::Property { attrs, ty, .. } => {
                        attrs.iter().for_each(|a| v.visit_attribute(a));
                        v.visit_type(ty);
                    }
                    ClassMemberKind::Method {
                        attrs, signature, ..
                    } => {
                        attrs.iter().for_each(|a| v.visit_attribute(a));
                        v.visit_signature(signature);
                    }
                    ClassMemberKind::Indexer(indexer) => {
                        v.visit_type(&indexer.key);
                        v.visit_type(&indexer.value);
                    }
                }
            }
        }
        StmtKind::Break | StmtKind::Continue | StmtKind::Error => {}
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast>>(v: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Nil
        | ExprKind::Bool(_)
        | ExprKind::Number(_)
        | ExprKind::String(_)
        | ExprKind::Varargs
        | ExprKind::Name(_)
        | ExprKind::Error => {}
        ExprKind::Interp(interp) => interp.exprs.iter().for_each(|e| v.visit_expr(e)),
        ExprKind::Paren(inner) => v.visit_expr(inner),
        ExprKind::Field { object, .. } => v.visit_expr(object),
        ExprKind::Index { object, key } => {
            v.visit_expr(object);
            v.visit_expr(key);
        }
        ExprKind::Call(call) => {
            v.visit_expr(&call.callee);
            walk_type_args(v, &call.type_args);
            call.args.iter().for_each(|e| v.visit_expr(e));
        }
        ExprKind::Function(func) => {
            func.attrs.iter().for_each(|a| v.visit_attribute(a));
            v.visit_signature(&func.body.signature);
            v.visit_block(&func.body.block);
        }
        ExprKind::Table(table) => {
            for field in &table.fields {
                match &field.kind {
                    TableFieldKind::Positional(value) | TableFieldKind::Named { value, .. } => {
                        v.visit_expr(value);
                    }
                    TableFieldKind::Keyed { key, value } => {
                        v.visit_expr(key);
                        v.visit_expr(value);
                    }
                }
            }
        }
        ExprKind::Unary { operand, .. } => v.visit_expr(operand),
        ExprKind::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        ExprKind::Cast { expr, ty } => {
            v.visit_expr(expr);
            v.visit_type(ty);
        }
        ExprKind::IfElse(if_else) => {
            v.visit_expr(&if_else.cond);
            v.visit_expr(&if_else.then_expr);
            for (cond, value) in &if_else.elseifs {
                v.visit_expr(cond);
                v.visit_expr(value);
            }
            v.visit_expr(&if_else.else_expr);
        }
    }
}

fn walk_type_args<'ast, V: Visitor<'ast>>(v: &mut V, args: &'ast [TypeArg]) {
    for arg in args {
        match arg {
            TypeArg::Type(ty) => v.visit_type(ty),
            TypeArg::Pack(pack) => v.visit_type_pack(pack),
        }
    }
}

pub fn walk_type<'ast, V: Visitor<'ast>>(v: &mut V, ty: &'ast TypeExpr) {
    match &ty.kind {
        TypeExprKind::Reference(reference) => walk_type_args(v, &reference.args),
        TypeExprKind::Nil | TypeExprKind::Singleton(_) | TypeExprKind::Error => {}
        TypeExprKind::Typeof(expr) => v.visit_expr(expr),
        TypeExprKind::Table(table) => {
            for prop in &table.props {
                prop.attrs.iter().for_each(|a| v.visit_attribute(a));
                v.visit_type(&prop.ty);
            }
            if let Some(indexer) = &table.indexer {
                v.visit_type(&indexer.key);
                v.visit_type(&indexer.value);
            }
        }
        TypeExprKind::Array(elem) | TypeExprKind::Optional(elem) | TypeExprKind::Paren(elem) => {
            v.visit_type(elem);
        }
        TypeExprKind::Function(func) => {
            func.generics.iter().for_each(|g| v.visit_generic_param(g));
            v.visit_type_pack(&func.params);
            v.visit_type_pack(&func.returns);
        }
        TypeExprKind::Union(members) | TypeExprKind::Intersection(members) => {
            members.iter().for_each(|m| v.visit_type(m));
        }
    }
}

pub fn walk_type_pack<'ast, V: Visitor<'ast>>(v: &mut V, pack: &'ast TypePack) {
    for entry in &pack.entries {
        v.visit_type(&entry.ty);
    }
    if let Some(PackTail::Variadic(ty)) = &pack.tail {
        v.visit_type(ty);
    }
}

pub fn walk_signature<'ast, V: Visitor<'ast>>(v: &mut V, signature: &'ast FunctionSignature) {
    signature
        .generics
        .iter()
        .for_each(|g| v.visit_generic_param(g));
    for param in &signature.params {
        if let Some(ty) = &param.annotation {
            v.visit_type(ty);
        }
    }
    let vararg = signature.vararg.as_ref().and_then(|va| va.annotation.as_ref());
    if let Some(PackTail::Variadic(ty)) = vararg {
        v.visit_type(ty);
    }
    if let Some(returns) = &signature.returns {
        v.visit_type_pack(returns);
    }
}

pub fn walk_generic_param<'ast, V: Visitor<'ast>>(v: &mut V, param: &'ast GenericParam) {
    if let Some(bound) = &param.bound {
        v.visit_type(&bound.ty);
    }
    match &param.default {
        Some(GenericDefault::Type(ty)) => v.visit_type(ty),
        Some(GenericDefault::Pack(pack)) => v.visit_type_pack(pack),
        None => {}
    }
}
