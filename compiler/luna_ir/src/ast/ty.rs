use crate::{Name, Span};

use super::{Attribute, DocComment, Expr, Ident};

#[derive(Clone, Debug, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        TypeExpr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExprKind {
    /// `Name`, `module.Name`, `Name<T, U...>`
    Reference(TypeReference),
    Nil,
    Singleton(SingletonType),
    /// `typeof(expr)`
    Typeof(Box<Expr>),
    Table(TableType),
    /// `{ T }`, sugar for `{ [number]: T }`
    Array(Box<TypeExpr>),
    Function(Box<FunctionType>),
    /// Members in source order. A leading `|` contributes no member.
    Union(Vec<TypeExpr>),
    /// Members in source order. A leading `&` contributes no member.
    Intersection(Vec<TypeExpr>),
    /// `T?`
    Optional(Box<TypeExpr>),
    /// `( T )`
    Paren(Box<TypeExpr>),
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeReference {
    pub prefix: Option<Ident>,
    pub name: Ident,
    pub args: Vec<TypeArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SingletonType {
    Bool(bool),
    String(Name),
}

/// An argument in `Name<...>` or `f<<...>>`.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeArg {
    Type(TypeExpr),
    Pack(TypePack),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    pub fn keyword(self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropKey {
    Name(Ident),
    /// `["key"]: T`
    String(Name, Span),
}

impl PropKey {
    pub fn name(&self) -> Name {
        match self {
            PropKey::Name(ident) => ident.name,
            PropKey::String(name, _) => *name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            PropKey::Name(ident) => ident.span,
            PropKey::String(_, span) => *span,
        }
    }
}

/// One property of a table type. `access` is `None` for a plain
/// read-write property.
#[derive(Clone, Debug, PartialEq)]
pub struct TableTypeProp {
    pub attrs: Vec<Attribute>,
    pub access: Option<Access>,
    pub key: PropKey,
    pub ty: TypeExpr,
    pub doc: Option<DocComment>,
    pub span: Span,
}

/// `[K]: V`, optionally with an access modifier.
#[derive(Clone, Debug, PartialEq)]
pub struct TableIndexer {
    pub access: Option<Access>,
    pub key: TypeExpr,
    pub value: TypeExpr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct TableType {
    pub props: Vec<TableTypeProp>,
    pub indexer: Option<Box<TableIndexer>>,
}

/// `...T` or `T...` at the end of a pack.
#[derive(Clone, Debug, PartialEq)]
pub enum PackTail {
    Variadic(Box<TypeExpr>),
    Generic(Ident),
}

impl PackTail {
    pub fn span(&self) -> Span {
        match self {
            PackTail::Variadic(ty) => ty.span,
            PackTail::Generic(ident) => ident.span,
        }
    }
}

/// A pack entry. Names document the position and play no part in
/// type identity.
#[derive(Clone, Debug, PartialEq)]
pub struct PackEntry {
    pub name: Option<Ident>,
    pub ty: TypeExpr,
}

/// Parameter or return list.
#[derive(Clone, Debug, PartialEq)]
pub struct TypePack {
    pub entries: Vec<PackEntry>,
    pub tail: Option<PackTail>,
    /// Written inside parentheses.
    pub parenthesized: bool,
    pub span: Span,
}

impl TypePack {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.tail.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionType {
    pub generics: Vec<GenericParam>,
    pub params: TypePack,
    pub returns: TypePack,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundSyntax {
    /// `<T: Bound>`
    Colon,
    /// `<T extends Bound>`
    Extends,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenericBound {
    pub ty: TypeExpr,
    pub syntax: BoundSyntax,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GenericDefault {
    Type(TypeExpr),
    Pack(TypePack),
}

/// `T`, `T...`, with optional bound and default.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericParam {
    pub name: Ident,
    pub pack: bool,
    pub bound: Option<GenericBound>,
    pub default: Option<GenericDefault>,
    pub span: Span,
}
