//! Structural subtyping.
//!
//! `a <: b` holds when every value of `a` is a value of `b`. Unions and
//! intersections are decomposed first, then like constructors are compared
//! structurally. Aliases are resolved lazily; a pair already being compared
//! further up is assumed to hold, which makes recursive aliases terminate.
//!
//! `any` and `unknown` are top types. `never` and the error type are
//! bottom types; callers that want to stay quiet about mismatches against
//! an error type check for it before asking.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::data::{FunctionData, Pack, Prop, TableData, Tail, TypeData};
use crate::instantiate::{instantiate_pack, Substitution};
use crate::{BudgetExceeded, Idx, TypeInterner};

/// `sub <: sup` with no step limit.
pub fn is_subtype(types: &TypeInterner, sub: Idx, sup: Idx) -> bool {
    matches!(SubtypeChecker::new(types).check(sub, sup), Ok(true))
}

/// Reusable subtype query engine.
///
/// Results are memoised across calls. A `false` is always cached; a `true`
/// is cached only when it did not lean on an in-progress assumption.
pub struct SubtypeChecker<'a> {
    types: &'a TypeInterner,
    budget: Option<u32>,
    steps: u32,
    assumptions: FxHashSet<(Idx, Idx)>,
    cache: FxHashMap<(Idx, Idx), bool>,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(types: &'a TypeInterner) -> Self {
        SubtypeChecker {
            types,
            budget: None,
            steps: 0,
            assumptions: FxHashSet::default(),
            cache: FxHashMap::default(),
        }
    }

    /// Stop any single query after `limit` comparison steps.
    pub fn with_budget(types: &'a TypeInterner, limit: u32) -> Self {
        SubtypeChecker {
            budget: Some(limit),
            ..Self::new(types)
        }
    }

    /// Steps taken by the last query.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[tracing::instrument(level = "debug", skip_all, fields(sub = ?sub, sup = ?sup))]
    pub fn check(&mut self, sub: Idx, sup: Idx) -> Result<bool, BudgetExceeded> {
        self.steps = 0;
        self.assumptions.clear();
        self.relate(sub, sup)
    }

    fn tick(&mut self) -> Result<(), BudgetExceeded> {
        self.steps = self.steps.saturating_add(1);
        match self.budget {
            Some(limit) if self.steps > limit => Err(BudgetExceeded { limit }),
            _ => Ok(()),
        }
    }

    fn relate(&mut self, a: Idx, b: Idx) -> Result<bool, BudgetExceeded> {
        if a == b {
            return Ok(true);
        }
        self.tick()?;
        if let Some(&cached) = self.cache.get(&(a, b)) {
            return Ok(cached);
        }
        if !self.assumptions.insert((a, b)) {
            return Ok(true);
        }
        let result = self.relate_uncached(a, b);
        self.assumptions.remove(&(a, b));
        let result = result?;
        if !result || self.assumptions.is_empty() {
            self.cache.insert((a, b), result);
        }
        Ok(result)
    }

    fn relate_uncached(&mut self, a: Idx, b: Idx) -> Result<bool, BudgetExceeded> {
        let types = self.types;
        let a_data = types.lookup(a);
        if matches!(a_data, TypeData::Alias { .. }) {
            return self.relate(types.resolve(a), b);
        }
        let b_data = types.lookup(b);
        if matches!(b_data, TypeData::Alias { .. }) {
            return self.relate(a, types.resolve(b));
        }

        // The error type sits at the bottom with `never`. Treating it as a
        // top type as well would relate any two types through it.
        match (&a_data, &b_data) {
            (TypeData::Error | TypeData::Never, _)
            | (_, TypeData::Any | TypeData::Unknown) => return Ok(true),
            _ => {}
        }

        if let TypeData::Union(members) = &a_data {
            for &member in members.iter() {
                if !self.relate(member, b)? {
                    return Ok(false);
                }
            }
            return Ok(true);
        }
        if let TypeData::Intersection(members) = &b_data {
            for &member in members.iter() {
                if !self.relate(a, member)? {
                    return Ok(false);
                }
            }
            return Ok(true);
        }
        if let TypeData::Union(members) = &b_data {
            for &member in members.iter() {
                if self.relate(a, member)? {
                    return Ok(true);
                }
            }
        }
        if let TypeData::Intersection(members) = &a_data {
            for &member in members.iter() {
                if self.relate(member, b)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        Ok(match (&a_data, &b_data) {
            (TypeData::Singleton(s), TypeData::Primitive(p)) => s.primitive() == *p,
            (TypeData::Table(x), TypeData::Table(y)) => self.tables(x, y)?,
            (TypeData::Function(x), TypeData::Function(y)) => self.functions(x, y)?,
            (TypeData::Generic(_), _) => match types.generic_info(a).and_then(|g| g.bound) {
                Some(bound) => self.relate(bound, b)?,
                None => false,
            },
            (TypeData::Extern(_), _) => {
                let Some(info) = types.extern_info(a) else {
                    return Ok(false);
                };
                if let Some(supertype) = info.supertype {
                    if self.relate(supertype, b)? {
                        return Ok(true);
                    }
                }
                match (info.members, &b_data) {
                    (Some(members), TypeData::Table(_)) => self.relate(members, b)?,
                    _ => false,
                }
            }
            _ => false,
        })
    }

    fn tables(&mut self, a: &TableData, b: &TableData) -> Result<bool, BudgetExceeded> {
        if b.sealed
            && (!a.sealed || a.props.iter().any(|&(name, _)| b.prop(name).is_none()))
        {
            return Ok(false);
        }
        for &(name, want) in b.props.iter() {
            let Some(have) = a.prop(name) else {
                return Ok(false);
            };
            if !self.props(have, want)? {
                return Ok(false);
            }
        }
        match (a.indexer, b.indexer) {
            (_, None) => {}
            (None, Some(_)) => return Ok(false),
            (Some(have), Some(want)) => {
                let key_matches =
                    self.relate(have.key, want.key)? && self.relate(want.key, have.key)?;
                if !key_matches || !self.props(have.value, want.value)? {
                    return Ok(false);
                }
            }
        }
        match (a.metatable, b.metatable) {
            (_, None) => Ok(true),
            (None, Some(_)) => Ok(false),
            (Some(have), Some(want)) => self.relate(have, want),
        }
    }

    /// Reads are covariant, writes contravariant. Each side the supertype
    /// offers must be offered by the subtype too.
    fn props(&mut self, have: Prop, want: Prop) -> Result<bool, BudgetExceeded> {
        if let Some(want_read) = want.read {
            match have.read {
                Some(have_read) if self.relate(have_read, want_read)? => {}
                _ => return Ok(false),
            }
        }
        if let Some(want_write) = want.write {
            match have.write {
                Some(have_write) if self.relate(want_write, have_write)? => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    fn functions(&mut self, a: &FunctionData, b: &FunctionData) -> Result<bool, BudgetExceeded> {
        if a.generics.len() != b.generics.len() {
            return Ok(false);
        }
        // Compare generic functions up to renaming: b's parameters are
        // replaced by a's, position by position.
        let renamed;
        let b = if b.generics.is_empty() || a.generics == b.generics {
            b
        } else {
            let types = self.types;
            let mut subst = Substitution::new();
            for (&ours, &theirs) in a.generics.iter().zip(b.generics.iter()) {
                let ours_pack = types.generic_info(ours).is_some_and(|g| g.pack);
                let theirs_pack = types.generic_info(theirs).is_some_and(|g| g.pack);
                if ours_pack != theirs_pack {
                    return Ok(false);
                }
                if ours_pack {
                    subst.insert_pack(theirs, Pack::new(Vec::new(), Tail::Generic(ours)));
                } else {
                    subst.insert_type(theirs, ours);
                }
            }
            renamed = FunctionData {
                generics: a.generics.clone(),
                params: instantiate_pack(types, &b.params, &subst),
                returns: instantiate_pack(types, &b.returns, &subst),
            };
            &renamed
        };
        Ok(self.packs(&b.params, &a.params)? && self.packs(&a.returns, &b.returns)?)
    }

    /// Extra values in `a` are dropped; values `a` lacks read as `nil`; a
    /// variadic tail in `b` absorbs whatever `a` has left.
    fn packs(&mut self, a: &Pack, b: &Pack) -> Result<bool, BudgetExceeded> {
        for (i, &want) in b.head.iter().enumerate() {
            let have = match (a.head.get(i), a.tail) {
                (Some(&ty), _) | (None, Tail::Variadic(ty)) => ty,
                (None, Tail::None) => Idx::NIL,
                (None, Tail::Generic(_)) => return Ok(false),
            };
            if !self.relate(have, want)? {
                return Ok(false);
            }
        }
        match b.tail {
            Tail::None => Ok(true),
            Tail::Variadic(want) => {
                for &extra in a.head.iter().skip(b.head.len()) {
                    if !self.relate(extra, want)? {
                        return Ok(false);
                    }
                }
                match a.tail {
                    Tail::None => Ok(true),
                    Tail::Variadic(have) => self.relate(have, want),
                    Tail::Generic(_) => Ok(false),
                }
            }
            Tail::Generic(_) => Ok(a.head.len() == b.head.len() && a.tail == b.tail),
        }
    }
}

#[cfg(test)]
mod tests;
