//! Attributes: `@native`, `@[checked, deprecated "use g"]`.

use luna_ir::ast::{Attribute, CallStyle, Expr, ExprKind};
use luna_ir::{Span, TokenKind};

use crate::{ErrorContext, FeatureFlags, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Every attribute before a declaration, in source order. A repeated
    /// name is reported and dropped.
    pub(crate) fn parse_attributes(&mut self) -> PResult<Vec<Attribute>> {
        self.in_error_context(ErrorContext::Attribute, |p| {
            let mut attrs = Vec::new();
            while p.check(&TokenKind::At) {
                let at = p.advance();
                if !p.check(&TokenKind::LBracket) {
                    let name = p.parse_ident()?;
                    let attr = Attribute {
                        name,
                        args: Vec::new(),
                        style: CallStyle::Parens,
                        bracketed: false,
                        span: at.span.to(name.span),
                    };
                    p.push_attribute(&mut attrs, attr);
                    continue;
                }
                let open = p.advance();
                while !p.check(&TokenKind::RBracket) {
                    let attr = p.parse_bracketed_attribute()?;
                    p.push_attribute(&mut attrs, attr);
                    if !p.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                p.expect_closing(&TokenKind::RBracket, &open)?;
            }
            Ok(attrs)
        })
    }

    /// One entry of `@[...]`: a name with optional literal arguments.
    fn parse_bracketed_attribute(&mut self) -> PResult<Attribute> {
        let name = self.parse_ident()?;
        let (args, style, written) = match self.current_kind() {
            TokenKind::LParen => {
                let open = self.advance();
                let args = if self.check(&TokenKind::RParen) {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                self.expect_closing(&TokenKind::RParen, &open)?;
                (args, CallStyle::Parens, true)
            }
            TokenKind::LBrace => {
                let start = self.current_span();
                let table = self.parse_table_constructor()?;
                let table = Expr::new(ExprKind::Table(table), self.span_from(start));
                (vec![table], CallStyle::Table, true)
            }
            TokenKind::String(_) | TokenKind::LongString(_) => {
                (vec![self.parse_string_literal()], CallStyle::String, true)
            }
            _ => (Vec::new(), CallStyle::Parens, false),
        };
        let span = self.span_from(name.span);
        if written {
            self.require_feature(
                FeatureFlags::ATTRIBUTE_ARGUMENTS,
                "attribute arguments",
                Span::new(name.span.end, span.end),
            );
        }
        Ok(Attribute {
            name,
            args,
            style,
            bracketed: true,
            span,
        })
    }

    fn push_attribute(&mut self, attrs: &mut Vec<Attribute>, attr: Attribute) {
        if attrs.iter().any(|a| a.name.name == attr.name.name) {
            self.error(ParseError::new(
                ParseErrorKind::DuplicateAttribute {
                    name: self.interner.lookup(attr.name.name).to_owned(),
                },
                attr.span,
            ));
        } else {
            attrs.push(attr);
        }
    }
}
