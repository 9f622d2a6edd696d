//! Sharded type interner.
//!
//! Same layout as [`luna_ir::StringInterner`]: sixteen shards behind their
//! own `RwLock`, chosen by hashing the [`TypeData`]. Interning hands back an
//! [`Idx`]; structurally equal types always get the same one, which makes
//! type equality a `u32` compare.
//!
//! Nominal identities (generic parameters, aliases, extern types) get a
//! side-table entry carrying the parts that are filled in after the
//! identity exists: bounds, alias bodies, extern members.

use luna_ir::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::data::{
    AliasId, ExternId, FunctionData, GenericId, Pack, Primitive, Singleton, TableData,
    TypeArgData, TypeData,
};
use crate::{Idx, NumberBits, TypeFlags};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeInternError {
    #[error("type interner shard {shard} is full ({count} types)")]
    ShardOverflow { shard: usize, count: usize },
}

/// A generic type or pack parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericInfo {
    pub name: Name,
    pub pack: bool,
    /// `T: Bound`; always `None` for packs.
    pub bound: Option<Idx>,
}

/// A type alias declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasInfo {
    pub name: Name,
    /// Generic parameters, in declaration order.
    pub params: Box<[Idx]>,
    /// One entry per parameter; defaults may mention earlier parameters.
    pub defaults: Box<[Option<TypeArgData>]>,
    /// `None` until the declaration has been lowered.
    pub body: Option<Idx>,
}

impl AliasInfo {
    /// Fewest arguments an application must supply.
    pub fn required_args(&self) -> usize {
        self.defaults
            .iter()
            .position(Option::is_some)
            .unwrap_or(self.defaults.len())
    }
}

/// A `declare class` / `declare extern type` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternInfo {
    pub name: Name,
    pub supertype: Option<Idx>,
    /// Table type of the declared members, set once lowered.
    pub members: Option<Idx>,
}

struct TypeShard {
    map: FxHashMap<TypeData, u32>,
    types: Vec<(TypeData, TypeFlags)>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            map: FxHashMap::default(),
            types: Vec::with_capacity(256),
        }
    }

    /// Shard 0, holding the builtins at their fixed indices.
    fn with_builtins() -> Self {
        let mut shard = Self::new();
        let builtins = [
            (TypeData::Primitive(Primitive::Nil), TypeFlags::IS_PRIMITIVE),
            (TypeData::Primitive(Primitive::Boolean), TypeFlags::IS_PRIMITIVE),
            (TypeData::Primitive(Primitive::Number), TypeFlags::IS_PRIMITIVE),
            (TypeData::Primitive(Primitive::Integer), TypeFlags::IS_PRIMITIVE),
            (TypeData::Primitive(Primitive::String), TypeFlags::IS_PRIMITIVE),
            (TypeData::Primitive(Primitive::Thread), TypeFlags::IS_PRIMITIVE),
            (TypeData::Primitive(Primitive::Buffer), TypeFlags::IS_PRIMITIVE),
            (TypeData::Any, TypeFlags::IS_TOP | TypeFlags::HAS_UNKNOWN),
            (TypeData::Unknown, TypeFlags::IS_TOP | TypeFlags::HAS_UNKNOWN),
            (TypeData::Never, TypeFlags::empty()),
            (TypeData::Error, TypeFlags::HAS_ERROR),
        ];
        for (local, (data, flags)) in (0u32..).zip(builtins) {
            shard.map.insert(data.clone(), local);
            shard.types.push((data, flags));
        }
        debug_assert_eq!(shard.types.len(), Idx::BUILTIN_COUNT as usize);
        shard
    }
}

/// Thread-safe store of every type built while checking a program.
pub struct TypeInterner {
    shards: [RwLock<TypeShard>; Idx::NUM_SHARDS],
    generics: RwLock<Vec<GenericInfo>>,
    aliases: RwLock<Vec<AliasInfo>>,
    externs: RwLock<Vec<ExternInfo>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let shards = std::array::from_fn(|i| {
            RwLock::new(if i == 0 {
                TypeShard::with_builtins()
            } else {
                TypeShard::new()
            })
        });
        TypeInterner {
            shards,
            generics: RwLock::new(Vec::new()),
            aliases: RwLock::new(Vec::new()),
            externs: RwLock::new(Vec::new()),
        }
    }

    #[inline]
    fn shard_for(data: &TypeData) -> usize {
        let mut hasher = rustc_hash::FxHasher::default();
        data.hash(&mut hasher);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "truncation is fine for hash-based shard selection"
        )]
        let hash = hasher.finish() as usize;
        hash % Idx::NUM_SHARDS
    }

    /// Intern `data` as given. Callers normally go through the constructors
    /// below, which normalise first.
    pub fn try_intern(&self, data: TypeData) -> Result<Idx, TypeInternError> {
        match &data {
            TypeData::Primitive(p) => return Ok(p.idx()),
            TypeData::Any => return Ok(Idx::ANY),
            TypeData::Unknown => return Ok(Idx::UNKNOWN),
            TypeData::Never => return Ok(Idx::NEVER),
            TypeData::Error => return Ok(Idx::ERROR),
            _ => {}
        }

        let shard_idx = Self::shard_for(&data);
        let shard = &self.shards[shard_idx];
        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(&data) {
                return Ok(Idx::from_shard_local(shard_idx, local));
            }
        }

        // Children are already interned; read their flags before taking the
        // write lock, since a child may live in this very shard.
        let flags = self.compute_flags(&data);

        let mut guard = shard.write();
        if let Some(&local) = guard.map.get(&data) {
            return Ok(Idx::from_shard_local(shard_idx, local));
        }
        let count = guard.types.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|&local| local <= Idx::MAX_LOCAL)
            .ok_or(TypeInternError::ShardOverflow {
                shard: shard_idx,
                count,
            })?;
        guard.types.push((data.clone(), flags));
        guard.map.insert(data, local);
        Ok(Idx::from_shard_local(shard_idx, local))
    }

    /// # Panics
    /// Panics if a shard exceeds capacity. Use `try_intern` to handle that.
    pub fn intern(&self, data: TypeData) -> Idx {
        self.try_intern(data).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The structure behind `idx`. A handle from another interner reads as
    /// the error type.
    pub fn lookup(&self, idx: Idx) -> TypeData {
        self.shards[idx.shard()]
            .read()
            .types
            .get(idx.local())
            .map_or(TypeData::Error, |(data, _)| data.clone())
    }

    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.shards[idx.shard()]
            .read()
            .types
            .get(idx.local())
            .map_or(TypeFlags::HAS_ERROR, |&(_, flags)| flags)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().types.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn compute_flags(&self, data: &TypeData) -> TypeFlags {
        let own = match data {
            TypeData::Primitive(_) => TypeFlags::IS_PRIMITIVE,
            TypeData::Any | TypeData::Unknown => TypeFlags::IS_TOP | TypeFlags::HAS_UNKNOWN,
            TypeData::Never => TypeFlags::empty(),
            TypeData::Error => TypeFlags::HAS_ERROR,
            TypeData::Singleton(_) => TypeFlags::IS_SINGLETON,
            TypeData::Table(table) if table.sealed => TypeFlags::IS_TABLE | TypeFlags::IS_SEALED,
            TypeData::Table(_) => TypeFlags::IS_TABLE,
            TypeData::Function(_) => TypeFlags::IS_FUNCTION,
            TypeData::Union(_) => TypeFlags::IS_UNION,
            TypeData::Intersection(_) => TypeFlags::IS_INTERSECTION,
            TypeData::Generic(id) => {
                let pack = self
                    .generics
                    .read()
                    .get(id.0 as usize)
                    .is_some_and(|info| info.pack);
                TypeFlags::IS_NOMINAL
                    | if pack {
                        TypeFlags::HAS_GENERIC_PACK
                    } else {
                        TypeFlags::HAS_GENERIC
                    }
            }
            TypeData::Extern(_) => TypeFlags::IS_NOMINAL,
            TypeData::Alias { .. } => TypeFlags::HAS_ALIAS,
        };
        own | TypeFlags::propagate_all(data.children().into_iter().map(|c| self.flags(c)))
    }

    // ─── Constructors ───

    pub fn singleton(&self, singleton: Singleton) -> Idx {
        self.intern(TypeData::Singleton(singleton))
    }

    pub fn bool_singleton(&self, value: bool) -> Idx {
        self.singleton(Singleton::Bool(value))
    }

    pub fn string_singleton(&self, value: Name) -> Idx {
        self.singleton(Singleton::String(value))
    }

    pub fn number_singleton(&self, value: f64) -> Idx {
        self.singleton(Singleton::Number(NumberBits::from_f64(value)))
    }

    /// Union with set semantics: nested unions are flattened, duplicates
    /// and `never` dropped, and members ordered canonically. `any` and
    /// `unknown` absorb everything; a single survivor is returned as is
    /// and an empty union is `never`.
    pub fn union(&self, members: impl IntoIterator<Item = Idx>) -> Idx {
        let mut flat = Vec::new();
        for member in members {
            match member {
                Idx::ERROR => return Idx::ERROR,
                Idx::NEVER => {}
                _ => match self.lookup(member) {
                    TypeData::Union(inner) => flat.extend_from_slice(&inner),
                    _ => flat.push(member),
                },
            }
        }
        if flat.contains(&Idx::ANY) {
            return Idx::ANY;
        }
        if flat.contains(&Idx::UNKNOWN) {
            return Idx::UNKNOWN;
        }
        flat.sort_unstable();
        flat.dedup();
        match flat.as_slice() {
            [] => Idx::NEVER,
            [only] => *only,
            _ => self.intern(TypeData::Union(flat.into_boxed_slice())),
        }
    }

    /// Intersection, normalised like [`union`](Self::union): `never`
    /// absorbs everything, `unknown` is dropped, and an empty intersection
    /// is `unknown`.
    pub fn intersection(&self, members: impl IntoIterator<Item = Idx>) -> Idx {
        let mut flat = Vec::new();
        for member in members {
            match member {
                Idx::ERROR => return Idx::ERROR,
                Idx::NEVER => return Idx::NEVER,
                Idx::UNKNOWN => {}
                _ => match self.lookup(member) {
                    TypeData::Intersection(inner) => flat.extend_from_slice(&inner),
                    _ => flat.push(member),
                },
            }
        }
        flat.sort_unstable();
        flat.dedup();
        match flat.as_slice() {
            [] => Idx::UNKNOWN,
            [only] => *only,
            _ => self.intern(TypeData::Intersection(flat.into_boxed_slice())),
        }
    }

    /// `T?`
    pub fn optional(&self, ty: Idx) -> Idx {
        self.union([ty, Idx::NIL])
    }

    /// Intern a table after putting its properties in canonical order.
    pub fn table(&self, mut table: TableData) -> Idx {
        if !table.props.is_sorted_by_key(|(name, _)| *name) {
            table.props.sort_unstable_by_key(|(name, _)| *name);
        }
        self.intern(TypeData::Table(Box::new(table)))
    }

    pub fn function(&self, func: FunctionData) -> Idx {
        self.intern(TypeData::Function(Box::new(func)))
    }

    /// Non-generic function from parameter and return packs.
    pub fn simple_function(&self, params: Pack, returns: Pack) -> Idx {
        self.function(FunctionData {
            generics: Box::default(),
            params,
            returns,
        })
    }

    /// Sealed copy of a table type. Idempotent: a sealed table and every
    /// non-table type come back unchanged.
    pub fn seal(&self, idx: Idx) -> Idx {
        match self.lookup(idx) {
            TypeData::Table(table) if !table.sealed => self.table(TableData {
                sealed: true,
                ..*table
            }),
            _ => idx,
        }
    }

    // ─── Generic parameters ───

    /// A new generic parameter, distinct from every other even when the
    /// name is the same.
    pub fn fresh_generic(&self, name: Name, pack: bool) -> Idx {
        let id = {
            let mut generics = self.generics.write();
            let id = side_table_id(generics.len(), "generic parameters");
            generics.push(GenericInfo {
                name,
                pack,
                bound: None,
            });
            id
        };
        self.intern(TypeData::Generic(GenericId(id)))
    }

    pub fn generic_info(&self, idx: Idx) -> Option<GenericInfo> {
        match self.lookup(idx) {
            TypeData::Generic(id) => self.generics.read().get(id.0 as usize).cloned(),
            _ => None,
        }
    }

    pub fn set_generic_bound(&self, idx: Idx, bound: Idx) {
        if let TypeData::Generic(id) = self.lookup(idx) {
            if let Some(info) = self.generics.write().get_mut(id.0 as usize) {
                info.bound = Some(bound);
            }
        }
    }

    // ─── Aliases ───

    /// Reserve an alias so that its body, and earlier declarations, can
    /// refer to it before it is lowered.
    pub fn reserve_alias(&self, name: Name) -> AliasId {
        let mut aliases = self.aliases.write();
        let id = side_table_id(aliases.len(), "type aliases");
        aliases.push(AliasInfo {
            name,
            params: Box::default(),
            defaults: Box::default(),
            body: None,
        });
        AliasId(id)
    }

    pub fn set_alias_params(
        &self,
        id: AliasId,
        params: Vec<Idx>,
        defaults: Vec<Option<TypeArgData>>,
    ) {
        debug_assert_eq!(params.len(), defaults.len());
        if let Some(info) = self.aliases.write().get_mut(id.0 as usize) {
            info.params = params.into_boxed_slice();
            info.defaults = defaults.into_boxed_slice();
        }
    }

    pub fn define_alias(&self, id: AliasId, body: Idx) {
        if let Some(info) = self.aliases.write().get_mut(id.0 as usize) {
            info.body = Some(body);
        }
    }

    pub fn alias_info(&self, id: AliasId) -> Option<AliasInfo> {
        self.aliases.read().get(id.0 as usize).cloned()
    }

    /// Application of an alias to arguments. Not resolved here.
    pub fn alias(&self, id: AliasId, args: Vec<TypeArgData>) -> Idx {
        self.intern(TypeData::Alias {
            id,
            args: args.into_boxed_slice(),
        })
    }

    // ─── Extern types ───

    pub fn declare_extern(&self, name: Name, supertype: Option<Idx>) -> Idx {
        let id = {
            let mut externs = self.externs.write();
            let id = side_table_id(externs.len(), "extern types");
            externs.push(ExternInfo {
                name,
                supertype,
                members: None,
            });
            id
        };
        self.intern(TypeData::Extern(ExternId(id)))
    }

    pub fn set_extern_members(&self, idx: Idx, members: Idx) {
        if let TypeData::Extern(id) = self.lookup(idx) {
            if let Some(info) = self.externs.write().get_mut(id.0 as usize) {
                info.members = Some(members);
            }
        }
    }

    pub fn extern_info(&self, idx: Idx) -> Option<ExternInfo> {
        match self.lookup(idx) {
            TypeData::Extern(id) => self.externs.read().get(id.0 as usize).cloned(),
            _ => None,
        }
    }

    /// Follow alias applications until a non-alias type appears. A chain
    /// that never reaches one (`type A = B; type B = A`), or an alias whose
    /// body is not known yet, resolves to the error type.
    pub fn resolve(&self, idx: Idx) -> Idx {
        crate::instantiate::resolve_alias(self, idx)
    }
}

fn side_table_id(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what}"))
}

#[cfg(test)]
mod tests;
