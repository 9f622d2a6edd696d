//! Structural type representation stored in the interner.
//!
//! Children are [`Idx`] handles, never boxed types, so equality of whole
//! types is equality of handles. The interner normalises unions and
//! intersections and sorts table properties before a `TypeData` is
//! hashed, which keeps structurally equal types on one handle.

use luna_ir::Name;

use crate::Idx;

/// Builtin primitive types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Primitive {
    Nil,
    Boolean,
    Number,
    Integer,
    String,
    Thread,
    Buffer,
}

impl Primitive {
    pub const fn idx(self) -> Idx {
        match self {
            Primitive::Nil => Idx::NIL,
            Primitive::Boolean => Idx::BOOLEAN,
            Primitive::Number => Idx::NUMBER,
            Primitive::Integer => Idx::INTEGER,
            Primitive::String => Idx::STRING,
            Primitive::Thread => Idx::THREAD,
            Primitive::Buffer => Idx::BUFFER,
        }
    }
}

/// Bit pattern of a number singleton. `-0.0` is stored as `0.0` and every
/// NaN as the canonical NaN, so hashing agrees with numeric equality on
/// everything except NaN itself.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NumberBits(u64);

impl NumberBits {
    pub fn from_f64(value: f64) -> Self {
        // `-0.0 + 0.0` is `0.0`.
        let value = if value.is_nan() { f64::NAN } else { value + 0.0 };
        NumberBits(value.to_bits())
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// The type inhabited by exactly one value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Singleton {
    Bool(bool),
    String(Name),
    Number(NumberBits),
    Integer(i64),
}

impl Singleton {
    /// The primitive every value of this singleton belongs to.
    pub const fn primitive(self) -> Primitive {
        match self {
            Singleton::Bool(_) => Primitive::Boolean,
            Singleton::String(_) => Primitive::String,
            Singleton::Number(_) => Primitive::Number,
            Singleton::Integer(_) => Primitive::Integer,
        }
    }
}

/// Read and write types of a table property. A plain `x: T` property has
/// both set to `T`; at least one side is always present.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Prop {
    pub read: Option<Idx>,
    pub write: Option<Idx>,
}

impl Prop {
    pub const fn read_write(ty: Idx) -> Self {
        Prop {
            read: Some(ty),
            write: Some(ty),
        }
    }

    pub const fn read_only(ty: Idx) -> Self {
        Prop {
            read: Some(ty),
            write: None,
        }
    }

    pub const fn write_only(ty: Idx) -> Self {
        Prop {
            read: None,
            write: Some(ty),
        }
    }

    /// Both sides present and equal, printed as a plain `name: T`.
    pub fn is_plain(self) -> bool {
        self.read.is_some() && self.read == self.write
    }
}

/// `[K]: V` with the same read/write split as properties.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Indexer {
    pub key: Idx,
    pub value: Prop,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TableData {
    /// Sorted by `Name`, unique.
    pub props: Box<[(Name, Prop)]>,
    pub indexer: Option<Indexer>,
    pub metatable: Option<Idx>,
    /// A sealed table has exactly the listed properties; an unsealed one
    /// may carry more.
    pub sealed: bool,
}

impl TableData {
    pub fn prop(&self, name: Name) -> Option<Prop> {
        self.props
            .iter()
            .find_map(|&(n, prop)| (n == name).then_some(prop))
    }

    /// `{ [number]: T }` and nothing else.
    pub fn array_element(&self) -> Option<Idx> {
        match self.indexer {
            Some(Indexer { key, value })
                if self.props.is_empty()
                    && self.metatable.is_none()
                    && key == Idx::NUMBER
                    && value.is_plain() =>
            {
                value.read
            }
            _ => None,
        }
    }
}

/// What follows the fixed entries of a pack.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Tail {
    #[default]
    None,
    /// `...T`: any number of `T`.
    Variadic(Idx),
    /// `T...`: a generic pack parameter.
    Generic(Idx),
}

/// Ordered parameter or return list.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Pack {
    pub head: Box<[Idx]>,
    pub tail: Tail,
}

impl Pack {
    pub fn new(head: impl Into<Box<[Idx]>>, tail: Tail) -> Self {
        Pack {
            head: head.into(),
            tail,
        }
    }

    pub fn single(ty: Idx) -> Self {
        Pack::new(vec![ty], Tail::None)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.tail == Tail::None
    }

    /// Type of the first value, `nil` when the pack is empty.
    pub fn first(&self) -> Idx {
        match (self.head.first(), self.tail) {
            (Some(&ty), _) | (None, Tail::Variadic(ty)) => ty,
            (None, Tail::Generic(_)) => Idx::UNKNOWN,
            (None, Tail::None) => Idx::NIL,
        }
    }

    /// Every type mentioned, tail included.
    pub fn types(&self) -> impl Iterator<Item = Idx> + '_ {
        let tail = match self.tail {
            Tail::None => None,
            Tail::Variadic(ty) | Tail::Generic(ty) => Some(ty),
        };
        self.head.iter().copied().chain(tail)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionData {
    /// Generic parameters bound by this function, types and packs in
    /// declaration order.
    pub generics: Box<[Idx]>,
    pub params: Pack,
    pub returns: Pack,
}

/// Argument of an alias application: a type, or a pack for a pack
/// parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeArgData {
    Type(Idx),
    Pack(Pack),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenericId(pub u32);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct AliasId(pub u32);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExternId(pub u32);

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Primitive(Primitive),
    Any,
    Unknown,
    Never,
    Error,
    Singleton(Singleton),
    Table(Box<TableData>),
    Function(Box<FunctionData>),
    /// Flattened, sorted, duplicate-free, at least two members.
    Union(Box<[Idx]>),
    /// Flattened, sorted, duplicate-free, at least two members.
    Intersection(Box<[Idx]>),
    /// A generic type or pack parameter; each declaration gets its own id.
    Generic(GenericId),
    /// A nominal type from `declare class` or `declare extern type`.
    Extern(ExternId),
    /// A named alias applied to arguments, resolved lazily so that
    /// recursive aliases stay finite.
    Alias { id: AliasId, args: Box<[TypeArgData]> },
}

impl TypeData {
    /// Children whose flags the type inherits.
    pub(crate) fn children(&self) -> Vec<Idx> {
        match self {
            TypeData::Primitive(_)
            | TypeData::Any
            | TypeData::Unknown
            | TypeData::Never
            | TypeData::Error
            | TypeData::Singleton(_)
            | TypeData::Generic(_)
            | TypeData::Extern(_) => Vec::new(),
            TypeData::Table(table) => {
                let mut out = Vec::with_capacity(table.props.len() * 2 + 3);
                for (_, prop) in &*table.props {
                    out.extend(prop.read);
                    out.extend(prop.write);
                }
                if let Some(indexer) = table.indexer {
                    out.push(indexer.key);
                    out.extend(indexer.value.read);
                    out.extend(indexer.value.write);
                }
                out.extend(table.metatable);
                out
            }
            TypeData::Function(func) => func.params.types().chain(func.returns.types()).collect(),
            TypeData::Union(members) | TypeData::Intersection(members) => members.to_vec(),
            TypeData::Alias { args, .. } => args
                .iter()
                .flat_map(|arg| match arg {
                    TypeArgData::Type(ty) => vec![*ty],
                    TypeArgData::Pack(pack) => pack.types().collect(),
                })
                .collect(),
        }
    }
}
