use crate::{Name, Span};

use super::{Attribute, FunctionBody, Ident, TypeArg, TypeExpr};

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Placeholder produced after a syntax error.
    pub fn error(span: Span) -> Self {
        Expr {
            kind: ExprKind::Error,
            span,
        }
    }

    /// True for expressions that may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Name(_) | ExprKind::Field { .. } | ExprKind::Index { .. }
        )
    }

    /// True for calls, the only expressions allowed as statements.
    pub fn is_call(&self) -> bool {
        matches!(self.kind, ExprKind::Call(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Nil,
    Bool(bool),
    Number(NumberLit),
    String(StringLit),
    Interp(InterpString),
    /// `...`
    Varargs,
    Name(Ident),
    /// `( expr )`, kept so that `(f())` still truncates to one value.
    Paren(Box<Expr>),
    /// `object.field`
    Field {
        object: Box<Expr>,
        field: Ident,
    },
    /// `object[key]`
    Index {
        object: Box<Expr>,
        key: Box<Expr>,
    },
    Call(Box<CallExpr>),
    Function(Box<FunctionExpr>),
    Table(TableConstructor),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `expr :: Type`
    Cast {
        expr: Box<Expr>,
        ty: Box<TypeExpr>,
    },
    IfElse(Box<IfElseExpr>),
    Error,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NumberLit {
    Float(f64),
    /// Written with the integer suffix.
    Integer(i64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StringStyle {
    Quoted,
    /// Long bracket with the given number of `=`.
    Long(u16),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StringLit {
    /// Decoded contents.
    pub value: Name,
    pub style: StringStyle,
}

/// `` `a{x}b{y}c` ``: `strings` has exactly one more element than `exprs`.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpString {
    pub strings: Vec<Name>,
    pub exprs: Vec<Expr>,
    /// Long-bracket level when written in the multi-line form `` `[[...]]` ``.
    pub multiline: Option<u16>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallStyle {
    /// `f(a, b)`
    Parens,
    /// `f { ... }`
    Table,
    /// `f "text"`
    String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub callee: Expr,
    /// `obj:method(...)`
    pub method: Option<Ident>,
    /// Explicit instantiation `f<<T, U>>(...)`.
    pub type_args: Vec<TypeArg>,
    pub args: Vec<Expr>,
    pub style: CallStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionExpr {
    pub attrs: Vec<Attribute>,
    pub body: FunctionBody,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableConstructor {
    pub fields: Vec<TableField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableField {
    pub kind: TableFieldKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TableFieldKind {
    /// `value`
    Positional(Expr),
    /// `name = value`
    Named { name: Ident, value: Expr },
    /// `[key] = value`
    Keyed { key: Expr, value: Expr },
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfElseExpr {
    pub cond: Expr,
    pub then_expr: Expr,
    pub elseifs: Vec<(Expr, Expr)>,
    pub else_expr: Expr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    Len,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Neg => "-",
            UnaryOp::Len => "#",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Concat => "..",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "~=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }

    /// Left and right binding power. Right-associative operators bind
    /// tighter on the left.
    pub fn binding_power(self) -> (u8, u8) {
        match self {
            BinaryOp::Or => (1, 1),
            BinaryOp::And => (2, 2),
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => (3, 3),
            BinaryOp::Concat => (5, 4),
            BinaryOp::Add | BinaryOp::Sub => (6, 6),
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod => (7, 7),
            BinaryOp::Pow => (10, 9),
        }
    }
}

/// Binding power of the unary operators: above `*`, below `^`.
pub const UNARY_PRIORITY: u8 = 8;
