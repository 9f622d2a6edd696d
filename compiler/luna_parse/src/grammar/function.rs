//! Function signatures and bodies.

use luna_ir::ast::{FunctionBody, FunctionSignature, PackTail, Param, VarargParam};
use luna_ir::{Span, TokenKind};

use crate::doc::DocRule;
use crate::{ErrorContext, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `<T>(params): R block end`. `opener` is the span of the construct's
    /// first token, reported if `end` is missing.
    pub(crate) fn parse_function_body(&mut self, opener: Span) -> PResult<FunctionBody> {
        let start = self.current_span();
        let signature = self.parse_signature()?;
        let block = self.parse_block()?;
        self.expect_block_end(opener)?;
        Ok(FunctionBody {
            signature,
            block,
            span: self.span_from(start),
        })
    }

    /// Generics, parameters and return annotation.
    pub(crate) fn parse_signature(&mut self) -> PResult<FunctionSignature> {
        let generics = if self.check(&TokenKind::Lt) {
            self.parse_generic_params(false)?
        } else {
            Vec::new()
        };
        let (params, vararg) = self.in_error_context(ErrorContext::ParameterList, Self::parse_params)?;
        let returns = if self.eat(&TokenKind::Colon) {
            Some(self.parse_return_pack()?)
        } else {
            None
        };
        Ok(FunctionSignature {
            generics,
            params,
            vararg,
            returns,
        })
    }

    /// `(a: T, b, ...: U)`. A trailing comma is accepted after a named
    /// parameter but not after `...`.
    fn parse_params(&mut self) -> PResult<(Vec<Param>, Option<VarargParam>)> {
        let open = self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        let mut vararg = None;
        while !self.check(&TokenKind::RParen) {
            if self.check(&TokenKind::DotDotDot) {
                let dots = self.advance();
                let annotation = if self.eat(&TokenKind::Colon) {
                    Some(self.parse_vararg_annotation()?)
                } else {
                    None
                };
                vararg = Some(VarargParam {
                    annotation,
                    span: self.span_from(dots.span),
                });
                if self.check(&TokenKind::Comma) {
                    let comma = self.advance();
                    self.error(ParseError::new(
                        ParseErrorKind::TrailingCommaAfterVarargs,
                        comma.span,
                    ));
                }
                break;
            }
            let index = self.cursor.position();
            let binding = self.parse_binding()?;
            params.push(Param {
                name: binding.name,
                annotation: binding.annotation,
                doc: self.doc_for(index, DocRule::Unrestricted),
                span: binding.span,
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&TokenKind::RParen, &open)?;
        Ok((params, vararg))
    }

    /// `...: T` or `...: T...`
    fn parse_vararg_annotation(&mut self) -> PResult<PackTail> {
        if self.cursor.check_ident().is_some() && self.cursor.check_next(&TokenKind::DotDotDot) {
            let name = self.parse_ident()?;
            self.advance();
            return Ok(PackTail::Generic(name));
        }
        Ok(PackTail::Variadic(Box::new(self.parse_type()?)))
    }
}
