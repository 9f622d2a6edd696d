//! Table constructors.

use luna_ir::ast::{TableConstructor, TableField, TableFieldKind};
use luna_ir::TokenKind;

use crate::{ErrorContext, PResult, Parser};

impl Parser<'_> {
    /// `{ [k] = v, name = v, v; }` with `,` or `;` separators and an
    /// optional trailing separator.
    pub(crate) fn parse_table_constructor(&mut self) -> PResult<TableConstructor> {
        self.guarded(|p| {
            p.in_error_context(ErrorContext::TableConstructor, |p| {
                let open = p.expect(&TokenKind::LBrace)?;
                let mut fields = Vec::new();
                while !p.check(&TokenKind::RBrace) {
                    let start = p.current_span();
                    let kind = match p.current_kind() {
                        TokenKind::LBracket => {
                            let open_bracket = p.advance();
                            let key = p.parse_expr()?;
                            p.expect_closing(&TokenKind::RBracket, &open_bracket)?;
                            p.expect(&TokenKind::Eq)?;
                            TableFieldKind::Keyed {
                                key,
                                value: p.parse_expr()?,
                            }
                        }
                        TokenKind::Ident(_) if p.cursor.check_next(&TokenKind::Eq) => {
                            let name = p.parse_ident()?;
                            p.advance();
                            TableFieldKind::Named {
                                name,
                                value: p.parse_expr()?,
                            }
                        }
                        _ => TableFieldKind::Positional(p.parse_expr()?),
                    };
                    fields.push(TableField {
                        kind,
                        span: p.span_from(start),
                    });
                    if !p.eat(&TokenKind::Comma) && !p.eat(&TokenKind::Semicolon) {
                        break;
                    }
                }
                p.expect_closing(&TokenKind::RBrace, &open)?;
                Ok(TableConstructor { fields })
            })
        })
    }
}
