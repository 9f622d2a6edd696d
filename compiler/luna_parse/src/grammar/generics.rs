//! Generic parameter lists.
//!
//! `<T, U = number, V...>`. Type parameters come before pack parameters,
//! and once one parameter has a default every later one needs one too.
//! Defaults are only meaningful on type aliases. Bounds have two competing
//! spellings, `<T: B>` and `<T extends B>`, each behind its own flag.

use luna_ir::ast::{BoundSyntax, GenericBound, GenericDefault, GenericParam, PackEntry, TypePack};
use luna_ir::{Span, TokenKind};

use super::ty::{PackPosition, TypeOrPack};
use crate::{ErrorContext, FeatureFlags, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_generic_params(
        &mut self,
        allow_defaults: bool,
    ) -> PResult<Vec<GenericParam>> {
        self.in_error_context(ErrorContext::GenericParameters, |p| {
            let open = p.expect(&TokenKind::Lt)?;
            let mut params: Vec<GenericParam> = Vec::new();
            while !p.check(&TokenKind::Gt) {
                let param = p.parse_generic_param(allow_defaults)?;
                p.check_param_order(&params, &param);
                params.push(param);
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            let close = p.expect_closing(&TokenKind::Gt, &open)?;
            if params.is_empty() {
                p.invalid_generics("the list is empty", open.span.to(close.span));
            }
            Ok(params)
        })
    }

    fn parse_generic_param(&mut self, allow_defaults: bool) -> PResult<GenericParam> {
        let name = self.parse_ident()?;
        let pack = self.eat(&TokenKind::DotDotDot);
        let bound = self.parse_generic_bound(pack)?;
        let default = if self.check(&TokenKind::Eq) {
            let eq = self.advance();
            if !allow_defaults {
                self.invalid_generics("defaults are only allowed on type aliases", eq.span);
            }
            Some(self.parse_generic_default(pack)?)
        } else {
            None
        };
        Ok(GenericParam {
            name,
            pack,
            bound,
            default,
            span: self.span_from(name.span),
        })
    }

    fn parse_generic_bound(&mut self, pack: bool) -> PResult<Option<GenericBound>> {
        let (syntax, flag, feature) = if self.check(&TokenKind::Colon) {
            (
                BoundSyntax::Colon,
                FeatureFlags::GENERIC_BOUNDS_COLON,
                "`:` generic bounds",
            )
        } else if self.cursor.check_word(self.words.extends) {
            (
                BoundSyntax::Extends,
                FeatureFlags::GENERIC_BOUNDS_EXTENDS,
                "`extends` generic bounds",
            )
        } else {
            return Ok(None);
        };
        let keyword = self.advance();
        self.require_feature(flag, feature, keyword.span);
        if pack {
            self.invalid_generics("type pack parameters cannot have bounds", keyword.span);
        }
        let ty = self.parse_type()?;
        Ok(Some(GenericBound { ty, syntax }))
    }

    fn parse_generic_default(&mut self, pack: bool) -> PResult<GenericDefault> {
        if !pack {
            return Ok(GenericDefault::Type(self.parse_type()?));
        }
        match self.parse_type_or_pack(PackPosition::Params)? {
            TypeOrPack::Pack(default) => Ok(GenericDefault::Pack(default)),
            TypeOrPack::Type(ty) => {
                self.invalid_generics("a type pack parameter needs a type pack default", ty.span);
                Ok(GenericDefault::Pack(TypePack {
                    span: ty.span,
                    entries: vec![PackEntry { name: None, ty }],
                    tail: None,
                    parenthesized: false,
                }))
            }
        }
    }

    fn check_param_order(&mut self, before: &[GenericParam], param: &GenericParam) {
        if !param.pack && before.iter().any(|p| p.pack) {
            self.invalid_generics(
                "type parameters must come before type pack parameters",
                param.span,
            );
        }
        if param.default.is_none() && before.iter().any(|p| p.default.is_some()) {
            self.invalid_generics(
                "parameters with defaults must come after those without",
                param.span,
            );
        }
    }

    fn invalid_generics(&mut self, reason: &'static str, span: Span) {
        self.error(ParseError::new(
            ParseErrorKind::InvalidGenericParams { reason },
            span,
        ));
    }
}
