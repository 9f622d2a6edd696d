//! Generic substitution and alias resolution.
//!
//! A function type binds its own generics, so substituting into it first
//! removes those parameters from the map: an inner `<T>` shadows an outer
//! `T` of the same identity.

use rustc_hash::FxHashMap;

use crate::data::{FunctionData, Indexer, Pack, Prop, TableData, Tail, TypeArgData, TypeData};
use crate::{Idx, TypeBuildError, TypeInterner};

/// Alias hops followed before giving up on a cyclic chain.
const MAX_ALIAS_CHAIN: usize = 64;

/// Mapping from generic parameters to what replaces them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution {
    types: FxHashMap<Idx, Idx>,
    packs: FxHashMap<Idx, Pack>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `params` to `args` position by position. A type argument for
    /// a pack parameter becomes a one-element pack; a pack argument for a
    /// type parameter binds its first element.
    pub fn bind(types: &TypeInterner, params: &[Idx], args: &[TypeArgData]) -> Self {
        let mut subst = Self::new();
        for (&param, arg) in params.iter().zip(args) {
            let pack = types.generic_info(param).is_some_and(|info| info.pack);
            match (pack, arg) {
                (false, TypeArgData::Type(ty)) => subst.insert_type(param, *ty),
                (false, TypeArgData::Pack(p)) => subst.insert_type(param, p.first()),
                (true, TypeArgData::Type(ty)) => subst.insert_pack(param, Pack::single(*ty)),
                (true, TypeArgData::Pack(p)) => subst.insert_pack(param, p.clone()),
            }
        }
        subst
    }

    pub fn insert_type(&mut self, generic: Idx, ty: Idx) {
        self.types.insert(generic, ty);
    }

    pub fn insert_pack(&mut self, generic: Idx, pack: Pack) {
        self.packs.insert(generic, pack);
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.packs.is_empty()
    }

    fn binds(&self, generic: Idx) -> bool {
        self.types.contains_key(&generic) || self.packs.contains_key(&generic)
    }

    fn without(&self, shadowed: &[Idx]) -> Self {
        let mut inner = self.clone();
        for generic in shadowed {
            inner.types.remove(generic);
            inner.packs.remove(generic);
        }
        inner
    }
}

/// Replace generics in `ty` according to `subst`.
pub fn instantiate(types: &TypeInterner, ty: Idx, subst: &Substitution) -> Idx {
    if subst.is_empty() || !types.flags(ty).needs_subst() {
        return ty;
    }
    match types.lookup(ty) {
        TypeData::Generic(_) => subst.types.get(&ty).copied().unwrap_or(ty),
        TypeData::Table(table) => {
            let prop = |p: Prop| Prop {
                read: p.read.map(|t| instantiate(types, t, subst)),
                write: p.write.map(|t| instantiate(types, t, subst)),
            };
            types.table(TableData {
                props: table.props.iter().map(|&(name, p)| (name, prop(p))).collect(),
                indexer: table.indexer.map(|ix| Indexer {
                    key: instantiate(types, ix.key, subst),
                    value: prop(ix.value),
                }),
                metatable: table.metatable.map(|m| instantiate(types, m, subst)),
                sealed: table.sealed,
            })
        }
        TypeData::Function(func) => {
            let shadowed: Vec<Idx> = func
                .generics
                .iter()
                .copied()
                .filter(|&g| subst.binds(g))
                .collect();
            let inner;
            let subst = if shadowed.is_empty() {
                subst
            } else {
                inner = subst.without(&shadowed);
                &inner
            };
            types.function(FunctionData {
                generics: func.generics.clone(),
                params: instantiate_pack(types, &func.params, subst),
                returns: instantiate_pack(types, &func.returns, subst),
            })
        }
        TypeData::Union(members) => {
            types.union(members.iter().map(|&m| instantiate(types, m, subst)))
        }
        TypeData::Intersection(members) => {
            types.intersection(members.iter().map(|&m| instantiate(types, m, subst)))
        }
        TypeData::Alias { id, args } => {
            let args = args
                .iter()
                .map(|arg| match arg {
                    TypeArgData::Type(t) => TypeArgData::Type(instantiate(types, *t, subst)),
                    TypeArgData::Pack(p) => TypeArgData::Pack(instantiate_pack(types, p, subst)),
                })
                .collect();
            types.alias(id, args)
        }
        TypeData::Primitive(_)
        | TypeData::Any
        | TypeData::Unknown
        | TypeData::Never
        | TypeData::Error
        | TypeData::Singleton(_)
        | TypeData::Extern(_) => ty,
    }
}

/// Pack counterpart of [`instantiate`]. A substituted generic tail is
/// spliced in: `(A, T...)` with `T... = (B, ...C)` becomes `(A, B, ...C)`.
pub fn instantiate_pack(types: &TypeInterner, pack: &Pack, subst: &Substitution) -> Pack {
    let mut head: Vec<Idx> = pack
        .head
        .iter()
        .map(|&t| instantiate(types, t, subst))
        .collect();
    let tail = match pack.tail {
        Tail::None => Tail::None,
        Tail::Variadic(t) => Tail::Variadic(instantiate(types, t, subst)),
        Tail::Generic(g) => match subst.packs.get(&g) {
            Some(replacement) => {
                head.extend_from_slice(&replacement.head);
                replacement.tail
            }
            None => Tail::Generic(g),
        },
    };
    Pack::new(head, tail)
}

/// Strip a generic function's parameters by applying `args` to them.
///
/// Missing trailing pack arguments become empty packs. Too many arguments,
/// or too few type arguments, is a [`TypeBuildError::WrongTypeArgCount`].
pub fn instantiate_function(
    types: &TypeInterner,
    func: Idx,
    args: &[TypeArgData],
    display_name: &str,
) -> Result<Idx, TypeBuildError> {
    let TypeData::Function(data) = types.lookup(func) else {
        return Ok(func);
    };
    let type_params = data
        .generics
        .iter()
        .filter(|&&g| !types.generic_info(g).is_some_and(|info| info.pack))
        .count();
    if args.len() > data.generics.len() || args.len() < type_params {
        return Err(TypeBuildError::WrongTypeArgCount {
            name: display_name.to_owned(),
            expected: data.generics.len(),
            found: args.len(),
        });
    }
    let mut subst = Substitution::bind(types, &data.generics, args);
    for &generic in &data.generics[args.len()..] {
        if types.generic_info(generic).is_some_and(|info| info.pack) {
            subst.insert_pack(generic, Pack::default());
        } else {
            subst.insert_type(generic, Idx::UNKNOWN);
        }
    }
    Ok(types.function(FunctionData {
        generics: Box::default(),
        params: instantiate_pack(types, &data.params, &subst),
        returns: instantiate_pack(types, &data.returns, &subst),
    }))
}

pub(crate) fn resolve_alias(types: &TypeInterner, mut idx: Idx) -> Idx {
    for _ in 0..MAX_ALIAS_CHAIN {
        let TypeData::Alias { id, args } = types.lookup(idx) else {
            return idx;
        };
        let Some(info) = types.alias_info(id) else {
            return Idx::ERROR;
        };
        let Some(body) = info.body else {
            return Idx::ERROR;
        };
        let subst = Substitution::bind(types, &info.params, &args);
        idx = instantiate(types, body, &subst);
    }
    tracing::debug!(?idx, "alias chain did not reach a structural type");
    Idx::ERROR
}

#[cfg(test)]
mod tests;
