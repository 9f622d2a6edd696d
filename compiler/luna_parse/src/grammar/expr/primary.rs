//! Literals and the other expressions that cannot be call targets.

use luna_ir::ast::{
    Expr, ExprKind, FunctionExpr, IfElseExpr, InterpString, NumberLit, StringLit, StringStyle,
};
use luna_ir::{Span, TokenKind};

use crate::{ErrorContext, FeatureFlags, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// A simple expression followed by any `:: Type` assertions.
    pub(crate) fn parse_simple_expr(&mut self) -> PResult<Expr> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Nil => {
                self.advance();
                ExprKind::Nil
            }
            TokenKind::True => {
                self.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Bool(false)
            }
            TokenKind::Number(value) => {
                self.advance();
                ExprKind::Number(NumberLit::Float(value))
            }
            TokenKind::Integer(value) => {
                self.advance();
                self.require_feature(FeatureFlags::INTEGER_SUFFIX, "integer literals", start);
                ExprKind::Number(NumberLit::Integer(value))
            }
            TokenKind::String(_) | TokenKind::LongString(_) => self.parse_string_literal().kind,
            TokenKind::InterpSimple(_) | TokenKind::InterpBegin(_) => {
                self.in_error_context(ErrorContext::InterpolatedString, Self::parse_interp)?
            }
            TokenKind::DotDotDot => {
                self.advance();
                ExprKind::Varargs
            }
            TokenKind::LBrace => ExprKind::Table(self.parse_table_constructor()?),
            TokenKind::Function => {
                self.advance();
                let body = self.parse_function_body(start)?;
                ExprKind::Function(Box::new(FunctionExpr {
                    attrs: Vec::new(),
                    body,
                }))
            }
            TokenKind::At => {
                let attrs = self.parse_attributes()?;
                let keyword = self.expect(&TokenKind::Function)?;
                let body = self.parse_function_body(keyword.span)?;
                ExprKind::Function(Box::new(FunctionExpr { attrs, body }))
            }
            TokenKind::If => {
                self.in_error_context(ErrorContext::IfExpression, Self::parse_if_expr)?
            }
            _ => return self.with_casts(start, Self::parse_suffixed_expr),
        };
        let expr = Expr::new(kind, self.span_from(start));
        self.with_casts(start, |_| Ok(expr))
    }

    fn with_casts(
        &mut self,
        start: Span,
        operand: impl FnOnce(&mut Self) -> PResult<Expr>,
    ) -> PResult<Expr> {
        let mut expr = operand(self)?;
        while self.eat(&TokenKind::ColonColon) {
            let ty = self.parse_type()?;
            expr = Expr::new(
                ExprKind::Cast {
                    expr: Box::new(expr),
                    ty: Box::new(ty),
                },
                self.span_from(start),
            );
        }
        Ok(expr)
    }

    /// The current `String` or `LongString` token as an expression.
    pub(crate) fn parse_string_literal(&mut self) -> Expr {
        let token = self.advance();
        let (value, style) = match token.kind {
            TokenKind::LongString(value) => {
                let level = long_bracket_level(token.lexeme(self.cursor.source()));
                (value, StringStyle::Long(level))
            }
            TokenKind::String(value) => (value, StringStyle::Quoted),
            _ => return Expr::error(token.span),
        };
        Expr::new(ExprKind::String(StringLit { value, style }), token.span)
    }

    /// `` `a{x}b` ``, arriving as `InterpBegin`, alternating expressions and
    /// `InterpMid` segments, then `InterpEnd`.
    fn parse_interp(&mut self) -> PResult<ExprKind> {
        let open = self.advance();
        let multiline = self.multiline_level(open.lexeme(self.cursor.source()));
        let mut strings = Vec::new();
        let mut exprs = Vec::new();
        match open.kind {
            TokenKind::InterpSimple(text) => strings.push(text),
            TokenKind::InterpBegin(text) => {
                strings.push(text);
                loop {
                    exprs.push(self.parse_expr()?);
                    match self.current_kind() {
                        TokenKind::InterpMid(text) => {
                            self.advance();
                            strings.push(text);
                        }
                        TokenKind::InterpEnd(text) => {
                            self.advance();
                            strings.push(text);
                            break;
                        }
                        _ => {
                            return Err(ParseError::new(
                                ParseErrorKind::UnclosedDelimiter {
                                    delimiter: "{",
                                    opened_at: open.span,
                                },
                                self.current_span(),
                            )
                            .with_expected("`}`")
                            .with_found(self.cursor.describe_current()))
                        }
                    }
                }
            }
            _ => return Err(self.cursor.unexpected("an interpolated string")),
        }
        Ok(ExprKind::Interp(InterpString {
            strings,
            exprs,
            multiline,
        }))
    }

    /// Level of a `` `[==[ `` opener, when multi-line strings are enabled.
    fn multiline_level(&self, lexeme: &str) -> Option<u16> {
        if !self.config.allows(FeatureFlags::MULTILINE_INTERPOLATION) {
            return None;
        }
        let rest = lexeme.strip_prefix("`[")?;
        let equals = rest.bytes().take_while(|&b| b == b'=').count();
        if rest.as_bytes().get(equals) != Some(&b'[') {
            return None;
        }
        u16::try_from(equals).ok()
    }

    /// `if c then a elseif d then b else e`
    fn parse_if_expr(&mut self) -> PResult<ExprKind> {
        self.expect(&TokenKind::If)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Then)?;
        let then_expr = self.parse_expr()?;
        let mut elseifs = Vec::new();
        while self.eat(&TokenKind::Elseif) {
            let cond = self.parse_expr()?;
            self.expect(&TokenKind::Then)?;
            elseifs.push((cond, self.parse_expr()?));
        }
        self.expect(&TokenKind::Else)?;
        let else_expr = self.parse_expr()?;
        Ok(ExprKind::IfElse(Box::new(IfElseExpr {
            cond,
            then_expr,
            elseifs,
            else_expr,
        })))
    }
}

/// Number of `=` in a `[==[` opener.
fn long_bracket_level(lexeme: &str) -> u16 {
    let equals = lexeme
        .bytes()
        .skip(1)
        .take_while(|&b| b == b'=')
        .count();
    u16::try_from(equals).unwrap_or(u16::MAX)
}
