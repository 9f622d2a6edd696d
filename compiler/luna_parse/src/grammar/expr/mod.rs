//! Expressions.
//!
//! Binary operators use precedence climbing over
//! [`BinaryOp::binding_power`](luna_ir::ast::BinaryOp::binding_power):
//! an operator continues the current expression only while its left power
//! exceeds the caller's limit, and its right operand is parsed with the
//! right power, which makes `..` and `^` right-associative.

mod operators;
mod postfix;
mod primary;
mod table;

use luna_ir::ast::{Expr, ExprKind, UNARY_PRIORITY};

use crate::{PResult, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> PResult<Expr> {
        self.guarded(|p| p.parse_binary(0))
    }

    fn parse_binary(&mut self, limit: u8) -> PResult<Expr> {
        let start = self.current_span();
        let mut lhs = if let Some(op) = operators::unary_op(self.current_kind()) {
            self.advance();
            let operand = self.guarded(|p| p.parse_binary(UNARY_PRIORITY))?;
            Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                self.span_from(start),
            )
        } else {
            self.parse_simple_expr()?
        };
        while let Some(op) = operators::binary_op(self.current_kind()) {
            let (left, right) = op.binding_power();
            if left <= limit {
                break;
            }
            self.advance();
            let rhs = self.guarded(|p| p.parse_binary(right))?;
            lhs = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                self.span_from(start),
            );
        }
        Ok(lhs)
    }
}
