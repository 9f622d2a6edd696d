//! Expressions.
//!
//! Parenthesised source stays parenthesised through `ExprKind::Paren`.
//! Extra parentheses are only added where a hand-built tree would
//! otherwise parse back differently.

use luna_ir::ast::{
    BinaryOp, CallExpr, CallStyle, Expr, ExprKind, InterpString, StringLit, StringStyle,
    TableConstructor, TableFieldKind, TypeArg, UnaryOp, UNARY_PRIORITY,
};

use super::Printer;
use crate::emitter::Emitter;
use crate::literal;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl<E: Emitter> Printer<'_, E> {
    pub fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Nil => self.text("nil"),
            ExprKind::Bool(value) => self.text(if *value { "true" } else { "false" }),
            ExprKind::Number(lit) => {
                let text = literal::number(*lit);
                self.text(&text);
            }
            ExprKind::String(lit) => self.string(*lit),
            ExprKind::Interp(interp) => self.interp(interp),
            ExprKind::Varargs => self.text("..."),
            ExprKind::Name(ident) => self.name(ident.name),
            ExprKind::Paren(inner) => {
                self.text("(");
                self.expr(inner);
                self.text(")");
            }
            ExprKind::Field { object, field } => {
                self.prefix(object);
                self.text(".");
                self.name(field.name);
            }
            ExprKind::Index { object, key } => {
                self.prefix(object);
                self.bracketed_key(key);
            }
            ExprKind::Call(call) => self.call(call),
            ExprKind::Function(func) => {
                for attr in &func.attrs {
                    self.attribute(attr);
                    self.space();
                }
                self.text("function");
                self.function_body(&func.body);
            }
            ExprKind::Table(table) => self.table(table),
            ExprKind::Unary { op, operand } => {
                self.text(op.as_str());
                // `- -x` must not become the comment `--x`.
                let spaced = *op == UnaryOp::Not
                    || matches!(operand.kind, ExprKind::Unary { op: UnaryOp::Neg, .. });
                if spaced {
                    self.space();
                }
                let paren = matches!(
                    &operand.kind,
                    ExprKind::Binary { op, .. } if op.binding_power().0 <= UNARY_PRIORITY
                );
                self.maybe_paren(operand, paren);
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let left = operand_needs_parens(*op, lhs, Side::Left);
                self.maybe_paren(lhs, left);
                self.space();
                self.text(op.as_str());
                self.space();
                let right = operand_needs_parens(*op, rhs, Side::Right);
                self.maybe_paren(rhs, right);
            }
            ExprKind::Cast { expr: inner, ty } => {
                let paren = matches!(
                    inner.kind,
                    ExprKind::Binary { .. } | ExprKind::Unary { .. } | ExprKind::IfElse(_)
                );
                self.maybe_paren(inner, paren);
                self.text(" :: ");
                self.ty(ty);
            }
            ExprKind::IfElse(if_else) => {
                self.text("if ");
                self.expr(&if_else.cond);
                self.text(" then ");
                self.expr(&if_else.then_expr);
                for (cond, value) in &if_else.elseifs {
                    self.text(" elseif ");
                    self.expr(cond);
                    self.text(" then ");
                    self.expr(value);
                }
                self.text(" else ");
                self.expr(&if_else.else_expr);
            }
            ExprKind::Error => {}
        }
    }

    fn maybe_paren(&mut self, expr: &Expr, paren: bool) {
        if paren {
            self.text("(");
            self.expr(expr);
            self.text(")");
        } else {
            self.expr(expr);
        }
    }

    /// The object of a field access, index or call, which must be a name,
    /// a suffixed expression or a parenthesised one.
    fn prefix(&mut self, expr: &Expr) {
        let is_prefix = matches!(
            expr.kind,
            ExprKind::Name(_)
                | ExprKind::Paren(_)
                | ExprKind::Field { .. }
                | ExprKind::Index { .. }
                | ExprKind::Call(_)
                | ExprKind::Error
        );
        self.maybe_paren(expr, !is_prefix);
    }

    /// `[key]`, spaced when the key would otherwise open a long bracket.
    fn bracketed_key(&mut self, key: &Expr) {
        if starts_with_long_string(key) {
            self.text("[ ");
            self.expr(key);
            self.text(" ]");
        } else {
            self.text("[");
            self.expr(key);
            self.text("]");
        }
    }

    fn string(&mut self, lit: StringLit) {
        let value = self.names.lookup(lit.value);
        let text = match lit.style {
            StringStyle::Quoted => literal::quoted(value),
            StringStyle::Long(level) => literal::long_string(value, level),
        };
        self.text(&text);
    }

    fn interp(&mut self, interp: &InterpString) {
        let multiline = interp.multiline.is_some();
        let equals = "=".repeat(interp.multiline.map_or(0, usize::from));
        self.text("`");
        if multiline {
            self.text("[");
            self.text(&equals);
            self.text("[");
            let starts_with_newline = interp
                .strings
                .first()
                .is_some_and(|&s| self.names.lookup(s).starts_with('\n'));
            if starts_with_newline {
                self.text("\n");
            }
        }
        for (i, &segment) in interp.strings.iter().enumerate() {
            let text = literal::interp_segment(self.names.lookup(segment), multiline);
            self.text(&text);
            if let Some(expr) = interp.exprs.get(i) {
                // `{{` does not open a splice holding a table.
                let spaced = matches!(leftmost(expr).kind, ExprKind::Table(_));
                self.text(if spaced { "{ " } else { "{" });
                self.expr(expr);
                self.text(if spaced { " }" } else { "}" });
            }
        }
        if multiline {
            self.text("]");
            self.text(&equals);
            self.text("]");
        }
        self.text("`");
    }

    fn call(&mut self, call: &CallExpr) {
        self.prefix(&call.callee);
        if let Some(method) = &call.method {
            self.text(":");
            self.name(method.name);
        }
        if !call.type_args.is_empty() {
            self.text("<<");
            self.comma_separated(&call.type_args, Self::type_arg);
            self.text(">>");
        }
        match call.style {
            CallStyle::Parens => {
                self.text("(");
                self.expr_list(&call.args);
                self.text(")");
            }
            CallStyle::Table | CallStyle::String => {
                self.space();
                self.expr_list(&call.args);
            }
        }
    }

    pub(super) fn type_arg(&mut self, arg: &TypeArg) {
        match arg {
            TypeArg::Type(ty) => self.ty(ty),
            TypeArg::Pack(pack) => self.type_pack(pack),
        }
    }

    fn table(&mut self, table: &TableConstructor) {
        if table.fields.is_empty() {
            self.text("{}");
            return;
        }
        self.text("{ ");
        self.comma_separated(&table.fields, |p, field| match &field.kind {
            TableFieldKind::Positional(value) => p.expr(value),
            TableFieldKind::Named { name, value } => {
                p.name(name.name);
                p.text(" = ");
                p.expr(value);
            }
            TableFieldKind::Keyed { key, value } => {
                p.bracketed_key(key);
                p.text(" = ");
                p.expr(value);
            }
        });
        self.text(" }");
    }
}

/// Whether `operand` on `side` of `parent` needs parentheses to parse back
/// into the same tree.
fn operand_needs_parens(parent: BinaryOp, operand: &Expr, side: Side) -> bool {
    let (parent_left, parent_right) = parent.binding_power();
    match &operand.kind {
        ExprKind::Binary { op, .. } => {
            let (left, _) = op.binding_power();
            match side {
                Side::Left => {
                    left < parent_left
                        || (left == parent_left && parent_right < parent_left)
                        || ends_open(operand)
                }
                Side::Right => left <= parent_right,
            }
        }
        ExprKind::Unary { .. } => {
            side == Side::Left && (parent_left > UNARY_PRIORITY || ends_open(operand))
        }
        ExprKind::IfElse(_) => side == Side::Left,
        _ => false,
    }
}

/// Whether the text of `expr` ends in an `if` expression's `else` branch,
/// which would swallow a following operator.
fn ends_open(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::IfElse(_) => true,
        ExprKind::Binary { rhs, .. } => ends_open(rhs),
        ExprKind::Unary { operand, .. } => ends_open(operand),
        _ => false,
    }
}

/// The expression whose first token starts the text of `expr`.
pub(super) fn leftmost(expr: &Expr) -> &Expr {
    match &expr.kind {
        ExprKind::Field { object, .. } | ExprKind::Index { object, .. } => leftmost(object),
        ExprKind::Call(call) => leftmost(&call.callee),
        ExprKind::Binary { lhs, .. } => leftmost(lhs),
        ExprKind::Cast { expr, .. } => leftmost(expr),
        _ => expr,
    }
}

pub(super) fn starts_with_paren(expr: &Expr) -> bool {
    matches!(leftmost(expr).kind, ExprKind::Paren(_))
}

fn starts_with_long_string(expr: &Expr) -> bool {
    matches!(
        leftmost(expr).kind,
        ExprKind::String(StringLit {
            style: StringStyle::Long(_),
            ..
        })
    )
}
