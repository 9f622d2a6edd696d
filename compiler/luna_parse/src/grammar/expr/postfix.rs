//! Prefix expressions and their suffixes: fields, indexing, calls and
//! explicit instantiation.

use luna_ir::ast::{CallExpr, CallStyle, Expr, ExprKind, Ident, StringLit, StringStyle, TypeArg};
use luna_ir::{Name, Span, TokenKind};

use crate::{
    ErrorContext, FeatureFlags, LongBracketMode, PResult, ParseError, ParseErrorKind, Parser,
};

impl Parser<'_> {
    /// A name or parenthesised expression followed by any suffixes.
    pub(crate) fn parse_suffixed_expr(&mut self) -> PResult<Expr> {
        let start = self.current_span();
        let mut expr = match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Expr::new(ExprKind::Name(Ident::new(name, span)), span)
            }
            TokenKind::LParen => {
                let open = self.advance();
                let inner = self.parse_expr()?;
                self.expect_closing(&TokenKind::RParen, &open)?;
                Expr::new(ExprKind::Paren(Box::new(inner)), self.span_from(start))
            }
            // Already reported by the lexer.
            TokenKind::Error => Expr::error(self.advance().span),
            _ => {
                return Err(ParseError::new(ParseErrorKind::ExpectedExpression, start)
                    .with_found(self.cursor.describe_current()))
            }
        };
        loop {
            expr = match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let field = self.parse_ident()?;
                    Expr::new(
                        ExprKind::Field {
                            object: Box::new(expr),
                            field,
                        },
                        self.span_from(start),
                    )
                }
                TokenKind::LBracket => {
                    let open = self.advance();
                    let key = self.parse_expr()?;
                    self.expect_closing(&TokenKind::RBracket, &open)?;
                    Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            key: Box::new(key),
                        },
                        self.span_from(start),
                    )
                }
                TokenKind::Colon => {
                    self.advance();
                    let method = self.parse_ident()?;
                    self.finish_call(expr, Some(method), start)?
                }
                TokenKind::LongString(value) if self.at_index_of_long_string() => {
                    self.recover_index_of_long_string(expr, value, start)
                }
                TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::String(_)
                | TokenKind::LongString(_) => self.finish_call(expr, None, start)?,
                TokenKind::Lt if self.at_instantiation() => self.finish_call(expr, None, start)?,
                _ => break,
            };
        }
        Ok(expr)
    }

    /// Optional `<<T>>` then the arguments.
    fn finish_call(
        &mut self,
        callee: Expr,
        method: Option<Ident>,
        start: Span,
    ) -> PResult<Expr> {
        let type_args = if self.at_instantiation() {
            self.in_error_context(ErrorContext::TypeInstantiation, Self::parse_instantiation)?
        } else {
            Vec::new()
        };
        let (args, style) = self.parse_call_args()?;
        Ok(Expr::new(
            ExprKind::Call(Box::new(CallExpr {
                callee,
                method,
                type_args,
                args,
                style,
            })),
            self.span_from(start),
        ))
    }

    /// `(a, b,)`, `{...}` or a string literal.
    fn parse_call_args(&mut self) -> PResult<(Vec<Expr>, CallStyle)> {
        match self.current_kind() {
            TokenKind::LParen => self.in_error_context(ErrorContext::ArgumentList, |p| {
                let open = p.advance();
                let mut args = Vec::new();
                while !p.check(&TokenKind::RParen) {
                    args.push(p.parse_expr()?);
                    if !p.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                p.expect_closing(&TokenKind::RParen, &open)?;
                Ok((args, CallStyle::Parens))
            }),
            TokenKind::LBrace => {
                let start = self.current_span();
                let table = self.parse_table_constructor()?;
                let arg = Expr::new(ExprKind::Table(table), self.span_from(start));
                Ok((vec![arg], CallStyle::Table))
            }
            TokenKind::String(_) | TokenKind::LongString(_) => {
                Ok((vec![self.parse_string_literal()], CallStyle::String))
            }
            _ => Err(self.cursor.unexpected("function arguments")),
        }
    }

    /// Two adjacent `<`. Nothing else can start with `< <`: no expression
    /// begins with `<`, so one token of lookahead decides.
    fn at_instantiation(&self) -> bool {
        self.check(&TokenKind::Lt)
            && self.cursor.check_next(&TokenKind::Lt)
            && self.cursor.current_and_next_adjacent()
    }

    /// `<<T, U...>>`
    fn parse_instantiation(&mut self) -> PResult<Vec<TypeArg>> {
        let first = self.advance();
        let opener = first.span.to(self.advance().span);
        self.require_feature(
            FeatureFlags::GENERIC_INSTANTIATION,
            "explicit type instantiation",
            opener,
        );
        let mut args = Vec::new();
        while !self.check(&TokenKind::Gt) {
            args.push(self.parse_type_arg()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if self.check(&TokenKind::Gt)
            && self.cursor.check_next(&TokenKind::Gt)
            && self.cursor.current_and_next_adjacent()
        {
            self.advance();
            self.advance();
            return Ok(args);
        }
        Err(ParseError::new(
            ParseErrorKind::UnclosedDelimiter {
                delimiter: "<<",
                opened_at: opener,
            },
            self.current_span(),
        )
        .with_expected("`>>`")
        .with_found(self.cursor.describe_current()))
    }

    /// `foo[[[a]]]` under the legacy rule: `[[` opened a long string
    /// holding `[a`, and a stray `]` follows.
    fn at_index_of_long_string(&self) -> bool {
        self.config.long_bracket_mode == LongBracketMode::LongBracketWins
            && self
                .cursor
                .current()
                .lexeme(self.cursor.source())
                .starts_with("[[[")
            && self.cursor.check_next(&TokenKind::RBracket)
            && self.cursor.current_and_next_adjacent()
    }

    /// Report the ambiguity and read the text as the index it was probably
    /// meant to be, `foo[ [[a]] ]`.
    fn recover_index_of_long_string(
        &mut self,
        object: Expr,
        value: Name,
        start: Span,
    ) -> Expr {
        let token = self.advance();
        self.advance();
        let first_bracket = Span::new(token.span.start, token.span.start + 1);
        self.error(
            ParseError::new(ParseErrorKind::AmbiguousLongBracket, self.span_from(token.span))
                .with_fix(first_bracket, "[ "),
        );
        let content = self.interner.lookup(value);
        let key_value = self.interner.intern(content.strip_prefix('[').unwrap_or(content));
        let key = Expr::new(
            ExprKind::String(StringLit {
                value: key_value,
                style: StringStyle::Long(0),
            }),
            Span::new(first_bracket.end, token.span.end),
        );
        Expr::new(
            ExprKind::Index {
                object: Box::new(object),
                key: Box::new(key),
            },
            self.span_from(start),
        )
    }
}
