//! Type annotations.

use luna_ir::ast::{
    FunctionType, PackTail, PropKey, SingletonType, TableIndexer, TableType, TableTypeProp,
    TypeExpr, TypeExprKind, TypePack,
};

use super::Printer;
use crate::emitter::Emitter;
use crate::literal;

impl<E: Emitter> Printer<'_, E> {
    pub fn ty(&mut self, ty: &TypeExpr) {
        match &ty.kind {
            TypeExprKind::Reference(reference) => {
                if let Some(prefix) = &reference.prefix {
                    self.name(prefix.name);
                    self.text(".");
                }
                self.name(reference.name.name);
                if !reference.args.is_empty() {
                    self.text("<");
                    self.comma_separated(&reference.args, Self::type_arg);
                    self.text(">");
                }
            }
            TypeExprKind::Nil => self.text("nil"),
            TypeExprKind::Singleton(SingletonType::Bool(value)) => {
                self.text(if *value { "true" } else { "false" });
            }
            TypeExprKind::Singleton(SingletonType::String(value)) => {
                let text = literal::quoted(self.names.lookup(*value));
                self.text(&text);
            }
            TypeExprKind::Typeof(expr) => {
                self.text("typeof(");
                self.expr(expr);
                self.text(")");
            }
            TypeExprKind::Table(table) => self.table_type(table),
            TypeExprKind::Array(element) => {
                self.text("{ ");
                self.ty(element);
                self.text(" }");
            }
            TypeExprKind::Function(func) => self.function_type(func),
            TypeExprKind::Union(members) => self.members(members, " | "),
            TypeExprKind::Intersection(members) => self.members(members, " & "),
            TypeExprKind::Optional(inner) => {
                let paren = matches!(
                    inner.kind,
                    TypeExprKind::Union(_)
                        | TypeExprKind::Intersection(_)
                        | TypeExprKind::Function(_)
                );
                self.paren_type(inner, paren);
                self.text("?");
            }
            TypeExprKind::Paren(inner) => self.paren_type(inner, true),
            TypeExprKind::Error => {}
        }
    }

    fn paren_type(&mut self, ty: &TypeExpr, paren: bool) {
        if paren {
            self.text("(");
            self.ty(ty);
            self.text(")");
        } else {
            self.ty(ty);
        }
    }

    /// Union or intersection members. A function type may only come last:
    /// anywhere else its return type would take the following members.
    fn members(&mut self, members: &[TypeExpr], separator: &str) {
        let last = members.len().saturating_sub(1);
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                self.text(separator);
            }
            let paren = match member.kind {
                TypeExprKind::Union(_) | TypeExprKind::Intersection(_) => true,
                TypeExprKind::Function(_) => i != last,
                _ => false,
            };
            self.paren_type(member, paren);
        }
    }

    fn function_type(&mut self, func: &FunctionType) {
        self.generic_params(&func.generics);
        self.text("(");
        self.pack_contents(&func.params);
        self.text(") -> ");
        self.type_pack(&func.returns);
    }

    /// A parameter or return list, parenthesised as written.
    pub(crate) fn type_pack(&mut self, pack: &TypePack) {
        if pack.parenthesized {
            self.text("(");
            self.pack_contents(pack);
            self.text(")");
        } else {
            self.pack_contents(pack);
        }
    }

    fn pack_contents(&mut self, pack: &TypePack) {
        self.comma_separated(&pack.entries, |p, entry| {
            if let Some(name) = &entry.name {
                p.name(name.name);
                p.text(": ");
            }
            p.ty(&entry.ty);
        });
        if let Some(tail) = &pack.tail {
            if !pack.entries.is_empty() {
                self.text(", ");
            }
            self.pack_tail(tail);
        }
    }

    fn pack_tail(&mut self, tail: &PackTail) {
        match tail {
            PackTail::Variadic(ty) => {
                self.text("...");
                self.ty(ty);
            }
            PackTail::Generic(name) => {
                self.name(name.name);
                self.text("...");
            }
        }
    }

    /// `{ a: T, read b: U, [K]: V }`. Documented properties get a line each
    /// so their comments stay attached.
    fn table_type(&mut self, table: &TableType) {
        if table.props.is_empty() && table.indexer.is_none() {
            self.text("{}");
            return;
        }
        let broken = table.props.iter().any(|prop| prop.doc.is_some());
        if !broken {
            self.text("{ ");
            self.comma_separated(&table.props, Self::table_prop);
            if let Some(indexer) = &table.indexer {
                if !table.props.is_empty() {
                    self.text(", ");
                }
                self.indexer(indexer);
            }
            self.text(" }");
            return;
        }
        self.text("{");
        self.indent += 1;
        for prop in &table.props {
            self.line();
            if let Some(doc) = &prop.doc {
                let comment = literal::doc_comment(&doc.text, false);
                self.text(&comment);
                self.line();
            }
            self.table_prop(prop);
            self.text(",");
        }
        if let Some(indexer) = &table.indexer {
            self.line();
            self.indexer(indexer);
            self.text(",");
        }
        self.indent -= 1;
        self.line();
        self.text("}");
    }

    fn table_prop(&mut self, prop: &TableTypeProp) {
        for attr in &prop.attrs {
            self.attribute(attr);
            self.space();
        }
        if let Some(access) = prop.access {
            self.text(access.keyword());
            self.space();
        }
        match &prop.key {
            PropKey::Name(ident) => self.name(ident.name),
            PropKey::String(name, _) => {
                let text = literal::quoted(self.names.lookup(*name));
                self.text("[");
                self.text(&text);
                self.text("]");
            }
        }
        self.text(": ");
        self.ty(&prop.ty);
    }

    pub(crate) fn indexer(&mut self, indexer: &TableIndexer) {
        if let Some(access) = indexer.access {
            self.text(access.keyword());
            self.space();
        }
        self.text("[");
        self.ty(&indexer.key);
        self.text("]: ");
        self.ty(&indexer.value);
    }
}
