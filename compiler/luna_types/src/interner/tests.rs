#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use luna_ir::StringInterner;
use pretty_assertions::assert_eq;

use crate::{
    Idx, Pack, Primitive, Prop, TableData, Tail, TypeArgData, TypeData, TypeFlags, TypeInterner,
};

fn table(types: &TypeInterner, props: &[(luna_ir::Name, Idx)]) -> Idx {
    types.table(TableData {
        props: props.iter().map(|&(n, t)| (n, Prop::read_write(t))).collect(),
        ..TableData::default()
    })
}

#[test]
fn builtins_sit_at_fixed_indices() {
    let types = TypeInterner::new();
    assert_eq!(types.intern(TypeData::Primitive(Primitive::Number)), Idx::NUMBER);
    assert_eq!(types.intern(TypeData::Primitive(Primitive::Nil)), Idx::NIL);
    assert_eq!(types.intern(TypeData::Unknown), Idx::UNKNOWN);
    assert_eq!(types.lookup(Idx::ANY), TypeData::Any);
    assert_eq!(types.lookup(Idx::ERROR), TypeData::Error);
    assert_eq!(types.len(), Idx::BUILTIN_COUNT as usize);
    assert!(types.flags(Idx::STRING).contains(TypeFlags::IS_PRIMITIVE));
}

#[test]
fn equal_structure_shares_an_index() {
    let names = StringInterner::new();
    let types = TypeInterner::new();
    let (x, y) = (names.intern("x"), names.intern("y"));
    let a = table(&types, &[(x, Idx::NUMBER), (y, Idx::STRING)]);
    let b = table(&types, &[(y, Idx::STRING), (x, Idx::NUMBER)]);
    assert_eq!(a, b);
    assert_ne!(a, table(&types, &[(x, Idx::NUMBER)]));
}

#[test]
fn union_is_a_set() {
    let types = TypeInterner::new();
    let a = types.union([Idx::NUMBER, Idx::STRING]);
    assert_eq!(a, types.union([Idx::STRING, Idx::NUMBER, Idx::NUMBER]));
    assert_eq!(types.union([a, Idx::BOOLEAN]), types.union([Idx::NUMBER, Idx::BOOLEAN, Idx::STRING]));
    let TypeData::Union(members) = types.lookup(types.union([a, Idx::BOOLEAN])) else {
        panic!("expected a union");
    };
    assert_eq!(members.len(), 3);
}

#[test]
fn union_identities() {
    let types = TypeInterner::new();
    assert_eq!(types.union([]), Idx::NEVER);
    assert_eq!(types.union([Idx::NUMBER]), Idx::NUMBER);
    assert_eq!(types.union([Idx::NUMBER, Idx::NEVER]), Idx::NUMBER);
    assert_eq!(types.union([Idx::NUMBER, Idx::UNKNOWN]), Idx::UNKNOWN);
    assert_eq!(types.union([Idx::UNKNOWN, Idx::ANY]), Idx::ANY);
    assert_eq!(types.union([Idx::NUMBER, Idx::ERROR]), Idx::ERROR);
}

#[test]
fn intersection_identities() {
    let types = TypeInterner::new();
    assert_eq!(types.intersection([]), Idx::UNKNOWN);
    assert_eq!(types.intersection([Idx::NUMBER, Idx::UNKNOWN]), Idx::NUMBER);
    assert_eq!(types.intersection([Idx::NUMBER, Idx::NEVER]), Idx::NEVER);
    let both = types.intersection([Idx::NUMBER, Idx::STRING]);
    assert_eq!(types.intersection([both, Idx::NUMBER]), both);
}

#[test]
fn optional_is_idempotent() {
    let types = TypeInterner::new();
    let once = types.optional(Idx::NUMBER);
    assert_eq!(types.optional(once), once);
    assert_eq!(types.optional(Idx::NIL), Idx::NIL);
}

#[test]
fn negative_zero_is_zero() {
    let types = TypeInterner::new();
    assert_eq!(types.number_singleton(-0.0), types.number_singleton(0.0));
    assert_ne!(types.number_singleton(1.0), types.number_singleton(0.0));
}

#[test]
fn generics_are_nominal() {
    let names = StringInterner::new();
    let types = TypeInterner::new();
    let t = names.intern("T");
    let first = types.fresh_generic(t, false);
    let second = types.fresh_generic(t, false);
    assert_ne!(first, second);
    assert!(types.flags(first).contains(TypeFlags::HAS_GENERIC));

    let pack = types.fresh_generic(names.intern("U"), true);
    assert!(types.flags(pack).contains(TypeFlags::HAS_GENERIC_PACK));
    assert!(types.generic_info(pack).unwrap().pack);
}

#[test]
fn flags_propagate_to_parents() {
    let names = StringInterner::new();
    let types = TypeInterner::new();
    let t = types.fresh_generic(names.intern("T"), false);
    let func = types.simple_function(Pack::single(t), Pack::default());
    assert!(types.flags(func).needs_subst());
    assert!(types.flags(func).contains(TypeFlags::IS_FUNCTION));

    let broken = table(&types, &[(names.intern("x"), Idx::ERROR)]);
    assert!(types.flags(broken).is_imprecise());
    assert!(!types.flags(broken).contains(TypeFlags::IS_FUNCTION));
}

#[test]
fn sealing_is_idempotent() {
    let names = StringInterner::new();
    let types = TypeInterner::new();
    let open = table(&types, &[(names.intern("x"), Idx::NUMBER)]);
    let sealed = types.seal(open);
    assert_ne!(open, sealed);
    assert_eq!(types.seal(sealed), sealed);
    assert_eq!(types.seal(Idx::NUMBER), Idx::NUMBER);
    assert!(types.flags(sealed).contains(TypeFlags::IS_SEALED));
}

#[test]
fn concurrent_interning_agrees() {
    let names = StringInterner::new();
    let types = TypeInterner::new();
    let x = names.intern("x");
    let results: Vec<Idx> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| table(&types, &[(x, Idx::NUMBER)])))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn aliases_resolve_through_their_parameters() {
    let names = StringInterner::new();
    let types = TypeInterner::new();
    let id = types.reserve_alias(names.intern("Box"));
    let t = types.fresh_generic(names.intern("T"), false);
    types.set_alias_params(id, vec![t], vec![None]);
    let value = names.intern("value");
    types.define_alias(id, table(&types, &[(value, t)]));

    let applied = types.alias(id, vec![TypeArgData::Type(Idx::NUMBER)]);
    assert!(types.flags(applied).contains(TypeFlags::HAS_ALIAS));
    assert_eq!(types.resolve(applied), table(&types, &[(value, Idx::NUMBER)]));
}

#[test]
fn unresolvable_aliases_become_errors() {
    let names = StringInterner::new();
    let types = TypeInterner::new();
    let pending = types.reserve_alias(names.intern("Later"));
    assert_eq!(types.resolve(types.alias(pending, Vec::new())), Idx::ERROR);

    let a = types.reserve_alias(names.intern("A"));
    let b = types.reserve_alias(names.intern("B"));
    types.define_alias(a, types.alias(b, Vec::new()));
    types.define_alias(b, types.alias(a, Vec::new()));
    assert_eq!(types.resolve(types.alias(a, Vec::new())), Idx::ERROR);
}

#[test]
fn pack_tail_generics_are_children() {
    let names = StringInterner::new();
    let types = TypeInterner::new();
    let rest = types.fresh_generic(names.intern("R"), true);
    let func = types.simple_function(Pack::new(vec![Idx::NUMBER], Tail::Generic(rest)), Pack::default());
    assert!(types.flags(func).contains(TypeFlags::HAS_GENERIC_PACK));
}
