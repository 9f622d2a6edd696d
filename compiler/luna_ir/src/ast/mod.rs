//! Owned syntax tree.
//!
//! Every node owns its children through `Box`/`Vec`; nothing is shared and
//! no node has two parents. Doc comments are copied into the node they
//! document. Each node carries a [`Span`] that lies inside its parent's.
//!
//! Equality (`PartialEq`) includes spans. Tests that compare trees parsed
//! from differently formatted text erase spans first.

mod expr;
mod stmt;
mod ty;
pub mod visit;

pub use expr::{
    BinaryOp, CallExpr, CallStyle, Expr, ExprKind, FunctionExpr, IfElseExpr, InterpString,
    NumberLit, StringLit, StringStyle, TableConstructor, TableField, TableFieldKind, UnaryOp,
    UNARY_PRIORITY,
};
pub use stmt::{
    AssignStmt, Binding, ClassDecl, ClassKind, ClassMember, ClassMemberKind, CompoundAssignStmt,
    CompoundOp, Condition, DeclareFunction, DeclareGlobal, FunctionBody, FunctionName,
    FunctionSignature, FunctionStmt, GenericForStmt, IfClause, IfStmt, LocalCondition,
    LocalFunctionStmt, LocalKind, LocalStmt, NumericForStmt, Param, RepeatStmt, Stmt, StmtKind,
    TypeAlias, VarargParam, WhileStmt,
};
pub use ty::{
    Access, BoundSyntax, FunctionType, GenericBound, GenericDefault, GenericParam, PackEntry,
    PackTail, PropKey, SingletonType, TableIndexer, TableType, TableTypeProp, TypeArg, TypeExpr,
    TypeExprKind, TypePack, TypeReference,
};

use crate::{Name, Span};

/// An identifier occurrence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: Name,
    pub span: Span,
}

impl Ident {
    pub const fn new(name: Name, span: Span) -> Self {
        Ident { name, span }
    }
}

/// Documentation attached to a declaration.
///
/// `text` is the normalised display text (comment markers stripped);
/// `span` covers the comment(s) it came from, which precede the node and
/// therefore sit outside the node's own span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocComment {
    pub text: String,
    pub span: Span,
}

/// `@name`, `@[name]` or `@[name args]` before a declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: Ident,
    /// Literal arguments, empty for a bare attribute.
    pub args: Vec<Expr>,
    /// How the arguments were written; meaningless when `args` is empty.
    pub style: CallStyle,
    /// Written in the bracketed `@[...]` form.
    pub bracketed: bool,
    pub span: Span,
}

/// A sequence of statements.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// A whole source file.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Chunk {
    pub block: Block,
    pub span: Span,
}
