//! Grammar productions, one file per area. Every production is a method
//! on [`Parser`](crate::Parser) returning `PResult`.

mod attr;
mod decl;
mod expr;
mod function;
mod generics;
mod stmt;
mod ty;

use luna_ir::ast::{Binding, Expr, Ident};
use luna_ir::TokenKind;

use crate::{PResult, Parser};

impl Parser<'_> {
    pub(crate) fn parse_ident(&mut self) -> PResult<Ident> {
        let (name, span) = self.cursor.expect_ident()?;
        Ok(Ident::new(name, span))
    }

    /// `name [: Type]`
    pub(crate) fn parse_binding(&mut self) -> PResult<Binding> {
        let name = self.parse_ident()?;
        let annotation = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let span = self.span_from(name.span);
        Ok(Binding {
            name,
            annotation,
            span,
        })
    }

    pub(crate) fn parse_binding_list(&mut self) -> PResult<Vec<Binding>> {
        let mut bindings = vec![self.parse_binding()?];
        while self.eat(&TokenKind::Comma) {
            bindings.push(self.parse_binding()?);
        }
        Ok(bindings)
    }

    pub(crate) fn parse_expr_list(&mut self) -> PResult<Vec<Expr>> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }
}
