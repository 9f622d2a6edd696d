use crate::Span;

use super::{
    Access, Attribute, Block, DocComment, Expr, GenericParam, Ident, PackTail, TableIndexer,
    TypeExpr, TypePack,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `local a, b = ...` or `const a = ...`
    Local(Box<LocalStmt>),
    /// `a, b.c = ...`
    Assign(AssignStmt),
    /// `a += 1`
    CompoundAssign(CompoundAssignStmt),
    /// A call used as a statement.
    Expr(Expr),
    Do(Block),
    While(Box<WhileStmt>),
    Repeat(Box<RepeatStmt>),
    If(Box<IfStmt>),
    NumericFor(Box<NumericForStmt>),
    GenericFor(Box<GenericForStmt>),
    /// `function a.b:c() ... end`
    Function(Box<FunctionStmt>),
    /// `local function f() ... end`
    LocalFunction(Box<LocalFunctionStmt>),
    Return(Vec<Expr>),
    Break,
    Continue,
    /// `[export] type Name<T> = ...`
    TypeAlias(Box<TypeAlias>),
    /// `declare name: T`
    DeclareGlobal(Box<DeclareGlobal>),
    /// `declare function f(...): R`
    DeclareFunction(Box<DeclareFunction>),
    /// `declare class` / `declare extern type`
    DeclareClass(Box<ClassDecl>),
    /// Statement that failed to parse; the error was recorded.
    Error,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LocalKind {
    Local,
    Const,
}

impl LocalKind {
    pub fn keyword(self) -> &'static str {
        match self {
            LocalKind::Local => "local",
            LocalKind::Const => "const",
        }
    }
}

/// A declared name with an optional annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub name: Ident,
    pub annotation: Option<TypeExpr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalStmt {
    pub kind: LocalKind,
    pub attrs: Vec<Attribute>,
    pub bindings: Vec<Binding>,
    pub values: Vec<Expr>,
    pub doc: Option<DocComment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignStmt {
    pub targets: Vec<Expr>,
    pub values: Vec<Expr>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompoundOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Concat,
}

impl CompoundOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompoundOp::Add => "+=",
            CompoundOp::Sub => "-=",
            CompoundOp::Mul => "*=",
            CompoundOp::Div => "/=",
            CompoundOp::FloorDiv => "//=",
            CompoundOp::Mod => "%=",
            CompoundOp::Pow => "^=",
            CompoundOp::Concat => "..=",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompoundAssignStmt {
    pub op: CompoundOp,
    pub target: Expr,
    pub value: Expr,
}

/// Condition of `if`/`elseif`/`while`.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Expr(Expr),
    /// `if local x = f() in x > 0 then`
    Local(Box<LocalCondition>),
}

impl Condition {
    pub fn span(&self) -> Span {
        match self {
            Condition::Expr(e) => e.span,
            Condition::Local(l) => l.span,
        }
    }
}

/// Binding form of a condition. The body runs when the first binding is
/// non-nil and, if present, `refinement` is truthy. `refinement` is only
/// evaluated once the first binding has been found to be non-nil.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalCondition {
    pub bindings: Vec<Binding>,
    pub values: Vec<Expr>,
    pub refinement: Option<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileStmt {
    pub cond: Condition,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RepeatStmt {
    pub body: Block,
    pub cond: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfClause {
    pub cond: Condition,
    pub body: Block,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    /// The `if` clause followed by each `elseif`.
    pub clauses: Vec<IfClause>,
    pub else_block: Option<Block>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NumericForStmt {
    pub var: Binding,
    pub start: Expr,
    pub limit: Expr,
    pub step: Option<Expr>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenericForStmt {
    pub vars: Vec<Binding>,
    pub values: Vec<Expr>,
    pub body: Block,
}

/// Function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub annotation: Option<TypeExpr>,
    pub doc: Option<DocComment>,
    pub span: Span,
}

/// Trailing `...` parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct VarargParam {
    pub annotation: Option<PackTail>,
    pub span: Span,
}

/// Everything about a function except its body.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FunctionSignature {
    pub generics: Vec<GenericParam>,
    pub params: Vec<Param>,
    pub vararg: Option<VarargParam>,
    pub returns: Option<TypePack>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionBody {
    pub signature: FunctionSignature,
    pub block: Block,
    /// From the parameter list to `end`.
    pub span: Span,
}

/// `a.b.c` or `a.b:c` naming a function statement.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionName {
    pub path: Vec<Ident>,
    pub method: Option<Ident>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionStmt {
    pub attrs: Vec<Attribute>,
    pub name: FunctionName,
    pub func: FunctionBody,
    pub doc: Option<DocComment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalFunctionStmt {
    pub attrs: Vec<Attribute>,
    pub name: Ident,
    pub func: FunctionBody,
    pub doc: Option<DocComment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeAlias {
    pub exported: bool,
    pub attrs: Vec<Attribute>,
    pub name: Ident,
    pub generics: Vec<GenericParam>,
    pub ty: TypeExpr,
    pub doc: Option<DocComment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeclareGlobal {
    pub name: Ident,
    pub ty: TypeExpr,
    pub doc: Option<DocComment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeclareFunction {
    pub attrs: Vec<Attribute>,
    pub name: Ident,
    pub signature: FunctionSignature,
    pub doc: Option<DocComment>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// `declare class N ... end`
    Class,
    /// `declare extern type N with ... end`
    ExternType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub kind: ClassKind,
    pub name: Ident,
    pub superclass: Option<Ident>,
    pub members: Vec<ClassMember>,
    pub doc: Option<DocComment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassMember {
    pub kind: ClassMemberKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMemberKind {
    Property {
        attrs: Vec<Attribute>,
        access: Option<Access>,
        name: Ident,
        ty: TypeExpr,
        doc: Option<DocComment>,
    },
    Method {
        attrs: Vec<Attribute>,
        name: Ident,
        signature: FunctionSignature,
        doc: Option<DocComment>,
    },
    Indexer(TableIndexer),
}
