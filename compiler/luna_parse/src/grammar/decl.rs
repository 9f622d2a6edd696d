//! `declare` statements for declaration files.

use luna_ir::ast::{
    Attribute, ClassDecl, ClassKind, ClassMember, ClassMemberKind, DeclareFunction,
    DeclareGlobal, Ident, PropKey, Stmt, StmtKind, TableIndexer,
};
use luna_ir::{Span, TokenKind};

use crate::doc::DocRule;
use crate::{ErrorContext, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// After `declare`: a global, a function, a class or an extern type.
    pub(crate) fn parse_declare(
        &mut self,
        attrs: Vec<Attribute>,
        first: usize,
        start: Span,
    ) -> PResult<Stmt> {
        let words = self.words;
        let kind = if self.eat(&TokenKind::Function) {
            let name = self.parse_ident()?;
            let signature = self.parse_signature()?;
            StmtKind::DeclareFunction(Box::new(DeclareFunction {
                attrs,
                name,
                signature,
                doc: self.doc_for(first, DocRule::Adjacent),
            }))
        } else if self.cursor.check_word(words.class) && self.cursor.next_is_ident() {
            self.advance();
            self.parse_class(ClassKind::Class, first, start)?
        } else if self.cursor.check_word(words.extern_)
            && matches!(self.cursor.peek_kind(1), TokenKind::Ident(n) if *n == words.type_)
        {
            self.advance();
            self.advance();
            self.parse_class(ClassKind::ExternType, first, start)?
        } else {
            if let Some(attr) = attrs.first() {
                self.error(
                    ParseError::new(ParseErrorKind::UnexpectedToken, attr.span)
                        .with_expected("`function` after attributes")
                        .with_found("a global declaration"),
                );
            }
            let name = self.parse_ident()?;
            self.expect(&TokenKind::Colon)?;
            let ty = self.parse_type()?;
            StmtKind::DeclareGlobal(Box::new(DeclareGlobal {
                name,
                ty,
                doc: self.doc_for(first, DocRule::Adjacent),
            }))
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    /// `Name [extends Super] [with] members end`
    fn parse_class(&mut self, kind: ClassKind, first: usize, opener: Span) -> PResult<StmtKind> {
        self.in_error_context(ErrorContext::ClassDeclaration, |p| {
            let words = p.words;
            let name = p.parse_ident()?;
            let superclass = if p.cursor.eat_word(words.extends) {
                Some(p.parse_ident()?)
            } else {
                None
            };
            if kind == ClassKind::ExternType && !p.cursor.eat_word(words.with) {
                return Err(p.cursor.unexpected("`with`"));
            }
            let doc = p.doc_for(first, DocRule::Adjacent);
            let mut members = Vec::new();
            while !p.check(&TokenKind::End) && !p.cursor.is_at_end() {
                members.push(p.parse_class_member()?);
                if !p.eat(&TokenKind::Comma) {
                    p.eat(&TokenKind::Semicolon);
                }
            }
            p.expect_block_end(opener)?;
            Ok(StmtKind::DeclareClass(Box::new(ClassDecl {
                kind,
                name,
                superclass,
                members,
                doc,
            })))
        })
    }

    fn parse_class_member(&mut self) -> PResult<ClassMember> {
        let first = self.cursor.position();
        let start = self.current_span();
        let attrs = if self.check(&TokenKind::At) {
            self.parse_attributes()?
        } else {
            Vec::new()
        };
        if self.eat(&TokenKind::Function) {
            let name = self.parse_ident()?;
            let signature = self.parse_signature()?;
            return Ok(ClassMember {
                kind: ClassMemberKind::Method {
                    attrs,
                    name,
                    signature,
                    doc: self.doc_for(first, DocRule::Adjacent),
                },
                span: self.span_from(start),
            });
        }
        let access = self.words.access_modifier(&self.cursor);
        if access.is_some() {
            self.advance();
        }
        if self.check(&TokenKind::LBracket) && !self.at_string_key() {
            let open = self.advance();
            let key = self.parse_type()?;
            self.expect_closing(&TokenKind::RBracket, &open)?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_type()?;
            let span = self.span_from(start);
            return Ok(ClassMember {
                kind: ClassMemberKind::Indexer(TableIndexer {
                    access,
                    key,
                    value,
                    span,
                }),
                span,
            });
        }
        let name = match self.parse_prop_key()? {
            PropKey::Name(ident) => ident,
            PropKey::String(name, span) => Ident::new(name, span),
        };
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(ClassMember {
            kind: ClassMemberKind::Property {
                attrs,
                access,
                name,
                ty,
                doc: self.doc_for(first, DocRule::Adjacent),
            },
            span: self.span_from(start),
        })
    }
}
