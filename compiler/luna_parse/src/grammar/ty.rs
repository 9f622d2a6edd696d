//! Type annotations.
//!
//! `(` in type position is resolved after the closing parenthesis: a
//! following `->` makes a function type, a single unnamed entry makes a
//! parenthesised type, anything else is a type pack where packs are
//! allowed.

use luna_ir::ast::{
    FunctionType, PackEntry, PackTail, PropKey, SingletonType, TableIndexer, TableType,
    TableTypeProp, TypeArg, TypeExpr, TypeExprKind, TypePack, TypeReference,
};
use luna_ir::{Span, TokenKind};
use rustc_hash::FxHashSet;

use crate::doc::DocRule;
use crate::{ErrorContext, FeatureFlags, PResult, ParseError, ParseErrorKind, Parser};

/// A parsed position that may hold either a type or a type pack.
pub(crate) enum TypeOrPack {
    Type(TypeExpr),
    Pack(TypePack),
}

/// Where a parenthesised pack appears; names in return packs are gated.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum PackPosition {
    Params,
    Returns,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Union,
    Intersection,
}

impl Parser<'_> {
    /// A full type: members joined by `|` or `&`, with an optional leading
    /// operator that contributes no member.
    pub(crate) fn parse_type(&mut self) -> PResult<TypeExpr> {
        self.guarded(|p| {
            let start = p.current_span();
            let leading = if p.eat(&TokenKind::Pipe) {
                Some(Combinator::Union)
            } else if p.eat(&TokenKind::Amp) {
                Some(Combinator::Intersection)
            } else {
                None
            };
            let first = p.parse_simple_type()?;
            p.continue_type(first, start, leading)
        })
    }

    fn continue_type(
        &mut self,
        first: TypeExpr,
        start: Span,
        leading: Option<Combinator>,
    ) -> PResult<TypeExpr> {
        let mut members = vec![first];
        let mut combinator = leading;
        loop {
            let this = match self.current_kind() {
                TokenKind::Pipe => Combinator::Union,
                TokenKind::Amp => Combinator::Intersection,
                _ => break,
            };
            if let Some(current) = combinator.filter(|&c| c != this) {
                let expected = match current {
                    Combinator::Union => "`|` (parenthesize to mix with `&`)",
                    Combinator::Intersection => "`&` (parenthesize to mix with `|`)",
                };
                return Err(self.cursor.unexpected(expected));
            }
            combinator = Some(this);
            self.advance();
            members.push(self.parse_simple_type()?);
        }
        if members.len() == 1 {
            if let Some(only) = members.pop() {
                return Ok(only);
            }
        }
        let kind = match combinator {
            Some(Combinator::Intersection) => TypeExprKind::Intersection(members),
            _ => TypeExprKind::Union(members),
        };
        Ok(TypeExpr::new(kind, self.span_from(start)))
    }

    /// An atom followed by any number of `?`.
    fn parse_simple_type(&mut self) -> PResult<TypeExpr> {
        let start = self.current_span();
        let atom = self.parse_type_atom()?;
        Ok(self.optional_suffix(atom, start))
    }

    fn optional_suffix(&mut self, mut ty: TypeExpr, start: Span) -> TypeExpr {
        while self.eat(&TokenKind::Question) {
            ty = TypeExpr::new(TypeExprKind::Optional(Box::new(ty)), self.span_from(start));
        }
        ty
    }

    fn parse_type_atom(&mut self) -> PResult<TypeExpr> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Nil => {
                self.advance();
                TypeExprKind::Nil
            }
            TokenKind::True | TokenKind::False => {
                let value = self.advance().kind == TokenKind::True;
                TypeExprKind::Singleton(SingletonType::Bool(value))
            }
            TokenKind::String(value) => {
                self.advance();
                TypeExprKind::Singleton(SingletonType::String(value))
            }
            TokenKind::LBrace => self.parse_table_type()?,
            TokenKind::LParen => {
                let pack = self.parse_paren_pack(PackPosition::Params)?;
                if self.eat(&TokenKind::Arrow) {
                    let returns = self.parse_return_pack()?;
                    TypeExprKind::Function(Box::new(FunctionType {
                        generics: Vec::new(),
                        params: pack,
                        returns,
                    }))
                } else {
                    match single_type(pack) {
                        Ok(inner) => TypeExprKind::Paren(Box::new(inner)),
                        Err(_) => return Err(self.cursor.unexpected("`->` after a type pack")),
                    }
                }
            }
            TokenKind::Lt => self.in_error_context(ErrorContext::FunctionType, |p| {
                let generics = p.parse_generic_params(false)?;
                let params = p.parse_paren_pack(PackPosition::Params)?;
                p.expect(&TokenKind::Arrow)?;
                let returns = p.parse_return_pack()?;
                Ok(TypeExprKind::Function(Box::new(FunctionType {
                    generics,
                    params,
                    returns,
                })))
            })?,
            TokenKind::Ident(name)
                if name == self.words.typeof_ && self.cursor.check_next(&TokenKind::LParen) =>
            {
                self.advance();
                let open = self.advance();
                let expr = self.parse_expr()?;
                self.expect_closing(&TokenKind::RParen, &open)?;
                TypeExprKind::Typeof(Box::new(expr))
            }
            TokenKind::Ident(_) => TypeExprKind::Reference(self.parse_type_reference()?),
            _ => {
                return Err(ParseError::new(ParseErrorKind::ExpectedType, start)
                    .with_expected("a type")
                    .with_found(self.cursor.describe_current()))
            }
        };
        Ok(TypeExpr::new(kind, self.span_from(start)))
    }

    /// `Name`, `module.Name`, either with `<args>`.
    fn parse_type_reference(&mut self) -> PResult<TypeReference> {
        let first = self.parse_ident()?;
        let (prefix, name) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.parse_ident()?)
        } else {
            (None, first)
        };
        let args = if self.check(&TokenKind::Lt) {
            self.parse_type_args()?
        } else {
            Vec::new()
        };
        Ok(TypeReference { prefix, name, args })
    }

    /// `<T, (A, B), U...>`
    fn parse_type_args(&mut self) -> PResult<Vec<TypeArg>> {
        self.in_error_context(ErrorContext::TypeArguments, |p| {
            let open = p.expect(&TokenKind::Lt)?;
            let mut args = Vec::new();
            while !p.check(&TokenKind::Gt) {
                args.push(p.parse_type_arg()?);
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            p.expect_closing(&TokenKind::Gt, &open)?;
            Ok(args)
        })
    }

    pub(crate) fn parse_type_arg(&mut self) -> PResult<TypeArg> {
        Ok(match self.parse_type_or_pack(PackPosition::Params)? {
            TypeOrPack::Type(ty) => TypeArg::Type(ty),
            TypeOrPack::Pack(pack) => TypeArg::Pack(pack),
        })
    }

    /// A return annotation or the right side of `->`.
    pub(crate) fn parse_return_pack(&mut self) -> PResult<TypePack> {
        Ok(match self.parse_type_or_pack(PackPosition::Returns)? {
            TypeOrPack::Pack(pack) => pack,
            TypeOrPack::Type(ty) => TypePack {
                span: ty.span,
                entries: vec![PackEntry { name: None, ty }],
                tail: None,
                parenthesized: false,
            },
        })
    }

    pub(crate) fn parse_type_or_pack(&mut self, position: PackPosition) -> PResult<TypeOrPack> {
        let start = self.current_span();
        match self.current_kind() {
            TokenKind::DotDotDot | TokenKind::Ident(_) if self.at_pack_tail() => {
                let tail = self.parse_pack_tail()?;
                Ok(TypeOrPack::Pack(TypePack {
                    entries: Vec::new(),
                    tail: Some(tail),
                    parenthesized: false,
                    span: self.span_from(start),
                }))
            }
            TokenKind::LParen => {
                let pack = self.parse_paren_pack(position)?;
                if self.eat(&TokenKind::Arrow) {
                    let returns = self.parse_return_pack()?;
                    let function = TypeExpr::new(
                        TypeExprKind::Function(Box::new(FunctionType {
                            generics: Vec::new(),
                            params: pack,
                            returns,
                        })),
                        self.span_from(start),
                    );
                    return Ok(TypeOrPack::Type(self.continue_after_atom(function, start)?));
                }
                let continues = matches!(
                    self.current_kind(),
                    TokenKind::Question | TokenKind::Pipe | TokenKind::Amp
                );
                if !continues {
                    return Ok(TypeOrPack::Pack(pack));
                }
                let span = pack.span;
                match single_type(pack) {
                    Ok(inner) => {
                        let paren = TypeExpr::new(TypeExprKind::Paren(Box::new(inner)), span);
                        Ok(TypeOrPack::Type(self.continue_after_atom(paren, start)?))
                    }
                    Err(_) => Err(self.cursor.unexpected("`->` after a type pack")),
                }
            }
            _ => Ok(TypeOrPack::Type(self.parse_type()?)),
        }
    }

    fn continue_after_atom(&mut self, atom: TypeExpr, start: Span) -> PResult<TypeExpr> {
        let first = self.optional_suffix(atom, start);
        self.continue_type(first, start, None)
    }

    /// `...T` or `T...` comes next.
    fn at_pack_tail(&self) -> bool {
        match self.current_kind() {
            TokenKind::DotDotDot => true,
            TokenKind::Ident(_) => self.cursor.check_next(&TokenKind::DotDotDot),
            _ => false,
        }
    }

    fn parse_pack_tail(&mut self) -> PResult<PackTail> {
        if self.eat(&TokenKind::DotDotDot) {
            return Ok(PackTail::Variadic(Box::new(self.parse_type()?)));
        }
        let name = self.parse_ident()?;
        self.expect(&TokenKind::DotDotDot)?;
        Ok(PackTail::Generic(name))
    }

    /// `(a: A, B, ...C)`
    pub(crate) fn parse_paren_pack(&mut self, position: PackPosition) -> PResult<TypePack> {
        let open = self.expect(&TokenKind::LParen)?;
        let mut entries = Vec::new();
        let mut tail = None;
        while !self.check(&TokenKind::RParen) {
            if self.at_pack_tail() {
                tail = Some(self.parse_pack_tail()?);
                if self.check(&TokenKind::Comma) {
                    let comma = self.advance();
                    self.error(ParseError::new(
                        ParseErrorKind::TrailingCommaAfterVarargs,
                        comma.span,
                    ));
                }
                break;
            }
            let named =
                self.cursor.check_ident().is_some() && self.cursor.check_next(&TokenKind::Colon);
            let name = if named {
                let name = self.parse_ident()?;
                if position == PackPosition::Returns {
                    self.require_feature(
                        FeatureFlags::NAMED_RETURNS,
                        "named return values",
                        name.span,
                    );
                }
                self.advance();
                Some(name)
            } else {
                None
            };
            let ty = self.parse_type()?;
            entries.push(PackEntry { name, ty });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect_closing(&TokenKind::RParen, &open)?;
        Ok(TypePack {
            entries,
            tail,
            parenthesized: true,
            span: open.span.to(close.span),
        })
    }

    // ─── Table types ───

    fn parse_table_type(&mut self) -> PResult<TypeExprKind> {
        self.guarded(|p| p.in_error_context(ErrorContext::TableType, Self::table_type_body))
    }

    fn table_type_body(&mut self) -> PResult<TypeExprKind> {
        let open = self.expect(&TokenKind::LBrace)?;
        if !self.check(&TokenKind::RBrace) && !self.at_table_prop() {
            let element = self.parse_type()?;
            self.expect_closing(&TokenKind::RBrace, &open)?;
            return Ok(TypeExprKind::Array(Box::new(element)));
        }
        let mut table = TableType::default();
        let mut modifiers = FxHashSet::default();
        while !self.check(&TokenKind::RBrace) {
            let first = self.cursor.position();
            let start = self.current_span();
            let attrs = if self.check(&TokenKind::At) {
                self.parse_attributes()?
            } else {
                Vec::new()
            };
            let access = self.words.access_modifier(&self.cursor);
            if access.is_some() {
                self.advance();
            }
            if self.check(&TokenKind::LBracket) && !self.at_string_key() {
                let open_bracket = self.advance();
                let key = self.parse_type()?;
                self.expect_closing(&TokenKind::RBracket, &open_bracket)?;
                self.expect(&TokenKind::Colon)?;
                let value = self.parse_type()?;
                let span = self.span_from(start);
                if table.indexer.is_some() {
                    self.error(ParseError::new(ParseErrorKind::DuplicateIndexer, span));
                } else {
                    table.indexer = Some(Box::new(TableIndexer {
                        access,
                        key,
                        value,
                        span,
                    }));
                }
            } else {
                let key = self.parse_prop_key()?;
                self.expect(&TokenKind::Colon)?;
                let ty = self.parse_type()?;
                let span = self.span_from(start);
                let duplicate = access.is_some_and(|a| !modifiers.insert((key.name(), a)));
                match access {
                    Some(access) if duplicate => {
                        self.error(ParseError::new(
                            ParseErrorKind::DuplicateModifier {
                                field: self.interner.lookup(key.name()).to_owned(),
                                modifier: access.keyword(),
                            },
                            span,
                        ));
                    }
                    _ => table.props.push(TableTypeProp {
                        attrs,
                        access,
                        key,
                        ty,
                        doc: self.doc_for(first, DocRule::Adjacent),
                        span,
                    }),
                }
            }
            if !self.eat(&TokenKind::Comma) && !self.eat(&TokenKind::Semicolon) {
                break;
            }
        }
        self.expect_closing(&TokenKind::RBrace, &open)?;
        Ok(TypeExprKind::Table(table))
    }

    /// The current token starts a property or indexer rather than the
    /// element type of `{T}`.
    fn at_table_prop(&self) -> bool {
        match self.current_kind() {
            TokenKind::LBracket | TokenKind::At => true,
            TokenKind::Ident(_) => {
                self.cursor.check_next(&TokenKind::Colon)
                    || self.words.access_modifier(&self.cursor).is_some()
            }
            _ => false,
        }
    }

    /// `["name"]`
    pub(crate) fn at_string_key(&self) -> bool {
        self.check(&TokenKind::LBracket)
            && matches!(self.cursor.peek_kind(1), TokenKind::String(_))
            && matches!(self.cursor.peek_kind(2), TokenKind::RBracket)
    }

    /// `name` or `["name"]`.
    pub(crate) fn parse_prop_key(&mut self) -> PResult<PropKey> {
        if self.at_string_key() {
            self.advance();
            let string = self.advance();
            self.advance();
            let TokenKind::String(value) = string.kind else {
                return Err(self.cursor.unexpected("a string"));
            };
            return Ok(PropKey::String(value, string.span));
        }
        Ok(PropKey::Name(self.parse_ident()?))
    }
}

/// The only entry of an unnamed one-element pack, or the pack back.
fn single_type(mut pack: TypePack) -> Result<TypeExpr, TypePack> {
    if pack.entries.len() == 1 && pack.tail.is_none() && pack.entries[0].name.is_none() {
        if let Some(entry) = pack.entries.pop() {
            return Ok(entry.ty);
        }
    }
    Err(pack)
}
