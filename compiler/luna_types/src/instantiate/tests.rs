#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use luna_ir::StringInterner;
use pretty_assertions::assert_eq;

use super::*;
use crate::data::FunctionData;

struct Fixture {
    names: StringInterner,
    types: TypeInterner,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            names: StringInterner::new(),
            types: TypeInterner::new(),
        }
    }

    fn generic(&self, name: &str, pack: bool) -> Idx {
        self.types.fresh_generic(self.names.intern(name), pack)
    }

    fn record(&self, props: &[(&str, Idx)]) -> Idx {
        self.types.table(TableData {
            props: props
                .iter()
                .map(|&(n, t)| (self.names.intern(n), Prop::read_write(t)))
                .collect(),
            ..TableData::default()
        })
    }

    fn func(&self, generics: &[Idx], params: Pack, returns: Pack) -> Idx {
        self.types.function(FunctionData {
            generics: generics.into(),
            params,
            returns,
        })
    }
}

#[test]
fn substitutes_through_tables_and_functions() {
    let fx = Fixture::new();
    let t = fx.generic("T", false);
    let identity = fx.func(&[], Pack::single(t), Pack::single(t));
    let before = fx.record(&[("x", t), ("f", identity)]);

    let mut subst = Substitution::new();
    subst.insert_type(t, Idx::NUMBER);
    let numeric = fx.func(&[], Pack::single(Idx::NUMBER), Pack::single(Idx::NUMBER));
    assert_eq!(
        instantiate(&fx.types, before, &subst),
        fx.record(&[("x", Idx::NUMBER), ("f", numeric)])
    );
}

#[test]
fn types_without_generics_come_back_unchanged() {
    let fx = Fixture::new();
    let t = fx.generic("T", false);
    let plain = fx.record(&[("x", Idx::STRING)]);
    let mut subst = Substitution::new();
    subst.insert_type(t, Idx::NUMBER);
    assert_eq!(instantiate(&fx.types, plain, &subst), plain);
    assert_eq!(instantiate(&fx.types, t, &Substitution::new()), t);
}

#[test]
fn inner_generic_list_shadows_outer_binding() {
    let fx = Fixture::new();
    let t = fx.generic("T", false);
    let inner = fx.func(&[t], Pack::single(t), Pack::single(t));
    let outer = fx.record(&[("value", t), ("map", inner)]);

    let mut subst = Substitution::new();
    subst.insert_type(t, Idx::STRING);
    assert_eq!(
        instantiate(&fx.types, outer, &subst),
        fx.record(&[("value", Idx::STRING), ("map", inner)])
    );
}

#[test]
fn generic_pack_tail_is_spliced() {
    let fx = Fixture::new();
    let rest = fx.generic("R", true);
    let pack = Pack::new(vec![Idx::NUMBER], Tail::Generic(rest));

    let mut subst = Substitution::new();
    subst.insert_pack(rest, Pack::new(vec![Idx::STRING], Tail::Variadic(Idx::BOOLEAN)));
    assert_eq!(
        instantiate_pack(&fx.types, &pack, &subst),
        Pack::new(vec![Idx::NUMBER, Idx::STRING], Tail::Variadic(Idx::BOOLEAN))
    );
}

#[test]
fn bind_adapts_arguments_to_parameter_kinds() {
    let fx = Fixture::new();
    let t = fx.generic("T", false);
    let rest = fx.generic("R", true);
    let subst = Substitution::bind(
        &fx.types,
        &[t, rest],
        &[TypeArgData::Type(Idx::NUMBER), TypeArgData::Type(Idx::STRING)],
    );
    let func = fx.func(&[], Pack::new(vec![t], Tail::Generic(rest)), Pack::default());
    assert_eq!(
        instantiate(&fx.types, func, &subst),
        fx.func(&[], Pack::new(vec![Idx::NUMBER, Idx::STRING], Tail::None), Pack::default())
    );
}

#[test]
fn explicit_instantiation_strips_generics() {
    let fx = Fixture::new();
    let t = fx.generic("T", false);
    let rest = fx.generic("R", true);
    let func = fx.func(
        &[t, rest],
        Pack::new(vec![t], Tail::Generic(rest)),
        Pack::single(t),
    );
    let applied =
        instantiate_function(&fx.types, func, &[TypeArgData::Type(Idx::NUMBER)], "f").unwrap();
    assert_eq!(
        applied,
        fx.func(&[], Pack::single(Idx::NUMBER), Pack::single(Idx::NUMBER))
    );
}

#[test]
fn explicit_instantiation_checks_the_count() {
    let fx = Fixture::new();
    let t = fx.generic("T", false);
    let func = fx.func(&[t], Pack::single(t), Pack::single(t));
    let err = instantiate_function(
        &fx.types,
        func,
        &[TypeArgData::Type(Idx::NUMBER), TypeArgData::Type(Idx::STRING)],
        "id",
    )
    .unwrap_err();
    assert_eq!(
        err,
        TypeBuildError::WrongTypeArgCount {
            name: "id".to_owned(),
            expected: 1,
            found: 2,
        }
    );
    assert!(instantiate_function(&fx.types, func, &[], "id").is_err());
}

#[test]
fn recursive_alias_arguments_are_substituted_lazily() {
    let fx = Fixture::new();
    let id = fx.types.reserve_alias(fx.names.intern("List"));
    let t = fx.generic("T", false);
    fx.types.set_alias_params(id, vec![t], vec![None]);
    let next = fx.types.optional(fx.types.alias(id, vec![TypeArgData::Type(t)]));
    fx.types.define_alias(id, fx.record(&[("value", t), ("next", next)]));

    let numbers = fx.types.alias(id, vec![TypeArgData::Type(Idx::NUMBER)]);
    assert_eq!(
        fx.types.resolve(numbers),
        fx.record(&[("value", Idx::NUMBER), ("next", fx.types.optional(numbers))])
    );
}
