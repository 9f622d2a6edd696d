//! Tree walker that writes source text into an [`Emitter`].
//!
//! Statements go one per line, blocks are indented one level, and
//! expressions and types are written on one line except where a function
//! body or a documented table type forces line breaks. Parentheses,
//! attribute order and literal spellings are taken from the tree, so
//! printing a parsed tree and parsing the result gives the same tree.

mod expr;
mod ty;

use luna_ir::ast::{
    Attribute, Binding, Block, BoundSyntax, CallStyle, Chunk, ClassDecl, ClassKind,
    ClassMemberKind, Condition, DocComment, Expr, FunctionBody, FunctionSignature,
    GenericDefault, GenericParam, IfStmt, LocalCondition, PackTail, Param, Stmt, StmtKind,
    TypeAlias,
};
use luna_ir::{Name, StringInterner};

use crate::emitter::Emitter;
use crate::literal;

/// Printer state: the output sink, the name table and the indent level.
pub struct Printer<'a, E: Emitter> {
    out: E,
    names: &'a StringInterner,
    indent: usize,
}

impl<'a, E: Emitter> Printer<'a, E> {
    pub fn new(out: E, names: &'a StringInterner) -> Self {
        Printer {
            out,
            names,
            indent: 0,
        }
    }

    pub fn into_output(self) -> E {
        self.out
    }

    // ─── Emission helpers ───

    fn text(&mut self, text: &str) {
        self.out.emit(text);
    }

    fn space(&mut self) {
        self.out.emit_space();
    }

    fn name(&mut self, name: Name) {
        let text = self.names.lookup(name);
        self.out.emit(text);
    }

    /// Line break followed by the current indentation.
    fn line(&mut self) {
        self.out.emit_newline();
        self.out.emit_indent(self.indent);
    }

    fn comma_separated<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            each(self, item);
        }
    }

    // ─── Blocks and statements ───

    pub fn chunk(&mut self, chunk: &Chunk) {
        for (i, stmt) in chunk.block.stmts.iter().enumerate() {
            if i > 0 {
                self.line();
            }
            self.stmt(stmt);
        }
    }

    /// Statements of a nested block, each on its own line one level in.
    /// The caller writes the closing keyword on a fresh line.
    fn block(&mut self, block: &Block) {
        self.indent += 1;
        for stmt in &block.stmts {
            self.line();
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.line();
    }

    pub fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Local(local) => {
                self.doc(local.doc.as_ref());
                self.attributes(&local.attrs);
                self.text(local.kind.keyword());
                self.space();
                self.comma_separated(&local.bindings, Self::binding);
                if !local.values.is_empty() {
                    self.text(" = ");
                    self.expr_list(&local.values);
                }
            }
            StmtKind::Assign(assign) => {
                if assign.targets.first().is_some_and(expr::starts_with_paren) {
                    self.text(";");
                }
                self.expr_list(&assign.targets);
                self.text(" = ");
                self.expr_list(&assign.values);
            }
            StmtKind::CompoundAssign(assign) => {
                if expr::starts_with_paren(&assign.target) {
                    self.text(";");
                }
                self.expr(&assign.target);
                self.space();
                self.text(assign.op.as_str());
                self.space();
                self.expr(&assign.value);
            }
            StmtKind::Expr(call) => {
                // `a = b` then `(f)()` on the next line would read as `b(f)()`.
                if expr::starts_with_paren(call) {
                    self.text(";");
                }
                self.expr(call);
            }
            StmtKind::Do(body) => {
                self.text("do");
                self.block(body);
                self.text("end");
            }
            StmtKind::While(w) => {
                self.text("while ");
                self.condition(&w.cond);
                self.text(" do");
                self.block(&w.body);
                self.text("end");
            }
            StmtKind::Repeat(r) => {
                self.text("repeat");
                self.block(&r.body);
                self.text("until ");
                self.expr(&r.cond);
            }
            StmtKind::If(stmt) => self.if_stmt(stmt),
            StmtKind::NumericFor(f) => {
                self.text("for ");
                self.binding(&f.var);
                self.text(" = ");
                self.expr(&f.start);
                self.text(", ");
                self.expr(&f.limit);
                if let Some(step) = &f.step {
                    self.text(", ");
                    self.expr(step);
                }
                self.text(" do");
                self.block(&f.body);
                self.text("end");
            }
            StmtKind::GenericFor(f) => {
                self.text("for ");
                self.comma_separated(&f.vars, Self::binding);
                self.text(" in ");
                self.expr_list(&f.values);
                self.text(" do");
                self.block(&f.body);
                self.text("end");
            }
            StmtKind::Function(f) => {
                self.doc(f.doc.as_ref());
                self.attributes(&f.attrs);
                self.text("function ");
                for (i, part) in f.name.path.iter().enumerate() {
                    if i > 0 {
                        self.text(".");
                    }
                    self.name(part.name);
                }
                if let Some(method) = &f.name.method {
                    self.text(":");
                    self.name(method.name);
                }
                self.function_body(&f.func);
            }
            StmtKind::LocalFunction(f) => {
                self.doc(f.doc.as_ref());
                self.attributes(&f.attrs);
                self.text("local function ");
                self.name(f.name.name);
                self.function_body(&f.func);
            }
            StmtKind::Return(values) => {
                self.text("return");
                if !values.is_empty() {
                    self.space();
                    self.expr_list(values);
                }
            }
            StmtKind::Break => self.text("break"),
            StmtKind::Continue => self.text("continue"),
            StmtKind::TypeAlias(alias) => self.type_alias(alias),
            StmtKind::DeclareGlobal(global) => {
                self.doc(global.doc.as_ref());
                self.text("declare ");
                self.name(global.name.name);
                self.text(": ");
                self.ty(&global.ty);
            }
            StmtKind::DeclareFunction(func) => {
                self.doc(func.doc.as_ref());
                self.attributes(&func.attrs);
                self.text("declare function ");
                self.name(func.name.name);
                self.signature(&func.signature);
            }
            StmtKind::DeclareClass(class) => self.class(class),
            StmtKind::Error => {}
        }
    }

    fn if_stmt(&mut self, stmt: &IfStmt) {
        for (i, clause) in stmt.clauses.iter().enumerate() {
            self.text(if i == 0 { "if " } else { "elseif " });
            self.condition(&clause.cond);
            self.text(" then");
            self.block(&clause.body);
        }
        if let Some(else_block) = &stmt.else_block {
            self.text("else");
            self.block(else_block);
        }
        self.text("end");
    }

    fn condition(&mut self, cond: &Condition) {
        match cond {
            Condition::Expr(e) => self.expr(e),
            Condition::Local(local) => self.local_condition(local),
        }
    }

    fn local_condition(&mut self, local: &LocalCondition) {
        self.text("local ");
        self.comma_separated(&local.bindings, Self::binding);
        self.text(" = ");
        self.expr_list(&local.values);
        if let Some(refinement) = &local.refinement {
            self.text(" in ");
            self.expr(refinement);
        }
    }

    fn type_alias(&mut self, alias: &TypeAlias) {
        self.doc(alias.doc.as_ref());
        self.attributes(&alias.attrs);
        if alias.exported {
            self.text("export ");
        }
        self.text("type ");
        self.name(alias.name.name);
        self.generic_params(&alias.generics);
        self.text(" = ");
        self.ty(&alias.ty);
    }

    fn class(&mut self, class: &ClassDecl) {
        self.doc(class.doc.as_ref());
        self.text(match class.kind {
            ClassKind::Class => "declare class ",
            ClassKind::ExternType => "declare extern type ",
        });
        self.name(class.name.name);
        if let Some(superclass) = &class.superclass {
            self.text(" extends ");
            self.name(superclass.name);
        }
        if class.kind == ClassKind::ExternType {
            self.text(" with");
        }
        self.indent += 1;
        for member in &class.members {
            self.line();
            match &member.kind {
                ClassMemberKind::Property {
                    attrs,
                    access,
                    name,
                    ty,
                    doc,
                } => {
                    self.doc(doc.as_ref());
                    self.attributes(attrs);
                    if let Some(access) = access {
                        self.text(access.keyword());
                        self.space();
                    }
                    self.prop_name(name.name);
                    self.text(": ");
                    self.ty(ty);
                }
                ClassMemberKind::Method {
                    attrs,
                    name,
                    signature,
                    doc,
                } => {
                    self.doc(doc.as_ref());
                    self.attributes(attrs);
                    self.text("function ");
                    self.name(name.name);
                    self.signature(signature);
                }
                ClassMemberKind::Indexer(indexer) => self.indexer(indexer),
            }
        }
        self.indent -= 1;
        self.line();
        self.text("end");
    }

    // ─── Shared pieces ───

    /// Doc comment on its own line before a declaration.
    fn doc(&mut self, doc: Option<&DocComment>) {
        if let Some(doc) = doc {
            let comment = literal::doc_comment(&doc.text, false);
            self.text(&comment);
            self.line();
        }
    }

    /// Attributes on their own line before a declaration, in source order.
    fn attributes(&mut self, attrs: &[Attribute]) {
        if attrs.is_empty() {
            return;
        }
        for (i, attr) in attrs.iter().enumerate() {
            if i > 0 {
                self.space();
            }
            self.attribute(attr);
        }
        self.line();
    }

    fn attribute(&mut self, attr: &Attribute) {
        self.text("@");
        if !attr.bracketed {
            self.name(attr.name.name);
            return;
        }
        self.text("[");
        self.name(attr.name.name);
        if !attr.args.is_empty() {
            match attr.style {
                CallStyle::Parens => {
                    self.text("(");
                    self.expr_list(&attr.args);
                    self.text(")");
                }
                CallStyle::Table | CallStyle::String => {
                    self.space();
                    self.expr_list(&attr.args);
                }
            }
        }
        self.text("]");
    }

    fn binding(&mut self, binding: &Binding) {
        self.name(binding.name.name);
        if let Some(ty) = &binding.annotation {
            self.text(": ");
            self.ty(ty);
        }
    }

    fn expr_list(&mut self, exprs: &[Expr]) {
        self.comma_separated(exprs, Self::expr);
    }

    /// Signature, indented body and `end`.
    fn function_body(&mut self, body: &FunctionBody) {
        self.signature(&body.signature);
        self.block(&body.block);
        self.text("end");
    }

    fn signature(&mut self, signature: &FunctionSignature) {
        self.generic_params(&signature.generics);
        self.text("(");
        self.comma_separated(&signature.params, Self::param);
        if let Some(vararg) = &signature.vararg {
            if !signature.params.is_empty() {
                self.text(", ");
            }
            self.text("...");
            match &vararg.annotation {
                Some(PackTail::Variadic(ty)) => {
                    self.text(": ");
                    self.ty(ty);
                }
                Some(PackTail::Generic(name)) => {
                    self.text(": ");
                    self.name(name.name);
                    self.text("...");
                }
                None => {}
            }
        }
        self.text(")");
        if let Some(returns) = &signature.returns {
            self.text(": ");
            self.type_pack(returns);
        }
    }

    fn param(&mut self, param: &Param) {
        if let Some(doc) = &param.doc {
            let comment = literal::doc_comment(&doc.text, true);
            self.text(&comment);
            self.space();
        }
        self.name(param.name.name);
        if let Some(ty) = &param.annotation {
            self.text(": ");
            self.ty(ty);
        }
    }

    pub(crate) fn generic_params(&mut self, generics: &[GenericParam]) {
        if generics.is_empty() {
            return;
        }
        self.text("<");
        self.comma_separated(generics, |p, param| {
            p.name(param.name.name);
            if param.pack {
                p.text("...");
            }
            if let Some(bound) = &param.bound {
                p.text(match bound.syntax {
                    BoundSyntax::Colon => ": ",
                    BoundSyntax::Extends => " extends ",
                });
                p.ty(&bound.ty);
            }
            match &param.default {
                Some(GenericDefault::Type(ty)) => {
                    p.text(" = ");
                    p.ty(ty);
                }
                Some(GenericDefault::Pack(pack)) => {
                    p.text(" = ");
                    p.type_pack(pack);
                }
                None => {}
            }
        });
        self.text(">");
    }

    /// A property name, bracketed when it is not a plain identifier.
    fn prop_name(&mut self, name: Name) {
        let text = self.names.lookup(name);
        if luna_ir::is_identifier(text) {
            self.text(text);
        } else {
            self.text("[");
            self.text(&literal::quoted(text));
            self.text("]");
        }
    }
}

#[cfg(test)]
mod tests;
