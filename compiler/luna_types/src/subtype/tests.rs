#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use luna_ir::ast::Access;
use luna_ir::StringInterner;

use super::*;
use crate::data::{FunctionData, Indexer};
use crate::TableBuilder;

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

    fn sub(&self, a: Idx, b: Idx) -> bool {
        is_subtype(&self.types, a, b)
    }

    /// Table from `(access, name, type)` triples.
    fn table(&self, props: &[(Option<Access>, &str, Idx)]) -> Idx {
        let mut builder = TableBuilder::new(&self.names);
        for &(access, name, ty) in props {
            builder.prop(self.names.intern(name), access, ty).unwrap();
        }
        builder.build(&self.types).unwrap()
    }

    fn func(&self, params: &[Idx], returns: &[Idx]) -> Idx {
        self.types
            .simple_function(Pack::new(params.to_vec(), Tail::None), Pack::new(returns.to_vec(), Tail::None))
    }

    fn str(&self, s: &str) -> Idx {
        self.types.string_singleton(self.names.intern(s))
    }
}

const RW: Option<Access> = None;
const READ: Option<Access> = Some(Access::Read);
const WRITE: Option<Access> = Some(Access::Write);

#[test]
fn primitives_relate_by_name() {
    let fx = Fixture::new();
    assert!(fx.sub(Idx::NUMBER, Idx::NUMBER));
    assert!(!fx.sub(Idx::NUMBER, Idx::STRING));
    assert!(!fx.sub(Idx::INTEGER, Idx::NUMBER));
}

#[test]
fn top_and_bottom() {
    let fx = Fixture::new();
    let t = fx.table(&[(RW, "x", Idx::NUMBER)]);
    for ty in [Idx::NUMBER, Idx::NIL, t, Idx::NEVER] {
        assert!(fx.sub(ty, Idx::UNKNOWN));
        assert!(fx.sub(ty, Idx::ANY));
        assert!(fx.sub(Idx::NEVER, ty));
    }
    assert!(!fx.sub(Idx::UNKNOWN, Idx::NUMBER));
    assert!(!fx.sub(Idx::ANY, Idx::NUMBER));
    assert!(!fx.sub(Idx::NUMBER, Idx::NEVER));
}

#[test]
fn singletons_widen_to_their_primitive() {
    let fx = Fixture::new();
    let five = fx.types.number_singleton(5.0);
    assert!(fx.sub(five, Idx::NUMBER));
    assert!(!fx.sub(five, Idx::STRING));
    assert!(fx.sub(fx.str("a"), Idx::STRING));
    assert!(!fx.sub(fx.str("a"), fx.str("b")));
    assert!(fx.sub(fx.types.bool_singleton(true), Idx::BOOLEAN));
    assert!(!fx.sub(Idx::STRING, fx.str("a")));
}

#[test]
fn unions_and_intersections_decompose() {
    let fx = Fixture::new();
    let num_or_str = fx.types.union([Idx::NUMBER, Idx::STRING]);
    assert!(fx.sub(Idx::NUMBER, num_or_str));
    assert!(!fx.sub(num_or_str, Idx::NUMBER));
    let ab = fx.types.union([fx.str("a"), fx.str("b")]);
    assert!(fx.sub(ab, Idx::STRING));
    assert!(fx.sub(ab, fx.types.union([fx.str("a"), fx.str("b"), fx.str("c")])));

    let both = fx.types.intersection([Idx::NUMBER, Idx::STRING]);
    assert!(fx.sub(both, Idx::NUMBER));
    assert!(!fx.sub(Idx::NUMBER, both));
}

#[test]
fn intersection_inside_union_on_the_right() {
    let fx = Fixture::new();
    let ab = fx.types.union([fx.str("a"), fx.str("b")]);
    let lhs = fx.types.intersection([Idx::NUMBER, ab]);
    let rhs = fx.types.union([fx.str("a"), fx.str("b"), Idx::BOOLEAN]);
    assert!(fx.sub(lhs, rhs));
}

#[test]
fn read_only_property_accepts_a_singleton() {
    let fx = Fixture::new();
    let five = fx.types.number_singleton(5.0);
    let literal = fx.table(&[(READ, "x", five)]);
    let annotation = fx.table(&[(READ, "x", Idx::NUMBER)]);
    assert!(fx.sub(literal, annotation));
    assert!(!fx.sub(annotation, literal));
}

#[test]
fn read_write_properties_are_invariant() {
    let fx = Fixture::new();
    let five = fx.types.number_singleton(5.0);
    let narrow = fx.table(&[(RW, "x", five)]);
    let wide = fx.table(&[(RW, "x", Idx::NUMBER)]);
    assert!(!fx.sub(narrow, wide));
    assert!(!fx.sub(wide, narrow));
    assert!(fx.sub(wide, fx.table(&[(READ, "x", Idx::NUMBER)])));
    assert!(fx.sub(wide, fx.table(&[(WRITE, "x", Idx::NUMBER)])));
}

#[test]
fn write_types_are_contravariant() {
    let fx = Fixture::new();
    let five = fx.types.number_singleton(5.0);
    let accepts_numbers = fx.table(&[(WRITE, "x", Idx::NUMBER)]);
    let accepts_five = fx.table(&[(WRITE, "x", five)]);
    assert!(fx.sub(accepts_numbers, accepts_five));
    assert!(!fx.sub(accepts_five, accepts_numbers));
    // A read-only property offers no write side.
    assert!(!fx.sub(fx.table(&[(READ, "x", Idx::NUMBER)]), accepts_numbers));
}

#[test]
fn width_subtyping_stops_at_sealed_tables() {
    let fx = Fixture::new();
    let wide = fx.table(&[(RW, "x", Idx::NUMBER), (RW, "y", Idx::NUMBER)]);
    let narrow = fx.table(&[(RW, "x", Idx::NUMBER)]);
    assert!(fx.sub(wide, narrow));
    assert!(!fx.sub(narrow, wide));

    let exact = fx.types.seal(narrow);
    assert!(!fx.sub(fx.types.seal(wide), exact));
    assert!(!fx.sub(wide, exact));
    assert!(fx.sub(exact, exact));
    assert!(fx.sub(exact, narrow));
}

#[test]
fn indexer_keys_are_invariant() {
    let fx = Fixture::new();
    let indexed = |key, value| {
        fx.types.table(TableData {
            indexer: Some(Indexer {
                key,
                value: Prop::read_write(value),
            }),
            ..TableData::default()
        })
    };
    let by_string = indexed(Idx::STRING, Idx::NUMBER);
    assert!(fx.sub(by_string, by_string));
    assert!(!fx.sub(by_string, indexed(fx.str("a"), Idx::NUMBER)));
    assert!(!fx.sub(fx.table(&[]), by_string));
    assert!(fx.sub(by_string, fx.table(&[])));
}

#[test]
fn functions_flip_parameters() {
    let fx = Fixture::new();
    let five = fx.types.number_singleton(5.0);
    let takes_number = fx.func(&[Idx::NUMBER], &[five]);
    let takes_five = fx.func(&[five], &[Idx::NUMBER]);
    assert!(fx.sub(takes_number, takes_five));
    assert!(!fx.sub(takes_five, takes_number));
}

#[test]
fn packs_pad_with_nil_and_drop_extras() {
    let fx = Fixture::new();
    let two = fx.func(&[], &[Idx::NUMBER, Idx::STRING]);
    let one = fx.func(&[], &[Idx::NUMBER]);
    assert!(fx.sub(two, one));
    assert!(!fx.sub(one, two));
    let maybe = fx.func(&[], &[Idx::NUMBER, fx.types.optional(Idx::STRING)]);
    assert!(fx.sub(one, maybe));
}

#[test]
fn variadic_tails_absorb_extra_values() {
    let fx = Fixture::new();
    let many = fx.types.simple_function(
        Pack::default(),
        Pack::new(Vec::new(), Tail::Variadic(Idx::NUMBER)),
    );
    let three = fx.func(&[], &[Idx::NUMBER, Idx::NUMBER, Idx::NUMBER]);
    assert!(fx.sub(three, many));
    let mixed = fx.func(&[], &[Idx::NUMBER, Idx::STRING]);
    assert!(!fx.sub(mixed, many));
}

#[test]
fn generic_functions_compare_up_to_renaming() {
    let fx = Fixture::new();
    let make_identity = |name: &str| {
        let t = fx.types.fresh_generic(fx.names.intern(name), false);
        fx.types.function(FunctionData {
            generics: vec![t].into(),
            params: Pack::single(t),
            returns: Pack::single(t),
        })
    };
    let a = make_identity("T");
    let b = make_identity("U");
    assert_ne!(a, b);
    assert!(fx.sub(a, b));
    assert!(fx.sub(b, a));
    assert!(!fx.sub(a, fx.func(&[Idx::NUMBER], &[Idx::NUMBER])));
}

#[test]
fn extern_types_follow_their_supertype_chain() {
    let fx = Fixture::new();
    let instance = fx.types.declare_extern(fx.names.intern("Instance"), None);
    let part = fx.types.declare_extern(fx.names.intern("Part"), Some(instance));
    let other = fx.types.declare_extern(fx.names.intern("Other"), None);
    assert!(fx.sub(part, instance));
    assert!(!fx.sub(instance, part));
    assert!(!fx.sub(part, other));

    fx.types
        .set_extern_members(instance, fx.table(&[(READ, "Name", Idx::STRING)]));
    assert!(fx.sub(part, fx.table(&[(READ, "Name", Idx::STRING)])));
}

#[test]
fn bounded_generics_use_their_bound() {
    let fx = Fixture::new();
    let t = fx.types.fresh_generic(fx.names.intern("T"), false);
    assert!(!fx.sub(t, Idx::STRING));
    fx.types.set_generic_bound(t, Idx::STRING);
    assert!(fx.sub(t, fx.types.optional(Idx::STRING)));
}

#[test]
fn recursive_aliases_terminate() {
    let fx = Fixture::new();
    let make_list = |name: &str, element: Idx| {
        let id = fx.types.reserve_alias(fx.names.intern(name));
        let list = fx.types.alias(id, Vec::new());
        let body = fx.table(&[
            (READ, "value", element),
            (READ, "next", fx.types.optional(list)),
        ]);
        fx.types.define_alias(id, body);
        list
    };
    let strings = make_list("Strings", fx.str("a"));
    let words = make_list("Words", Idx::STRING);
    let numbers = make_list("Numbers", Idx::NUMBER);
    assert!(fx.sub(strings, words));
    assert!(!fx.sub(words, strings));
    assert!(!fx.sub(strings, numbers));
}

#[test]
fn error_type_is_a_bottom_type() {
    let fx = Fixture::new();
    assert!(fx.sub(Idx::ERROR, Idx::NUMBER));
    assert!(fx.sub(Idx::ERROR, Idx::STRING));
    assert!(!fx.sub(Idx::NUMBER, Idx::ERROR));
    // No path from number to string runs through the error type.
    assert!(!fx.sub(Idx::NUMBER, Idx::STRING));
    assert!(fx.sub(Idx::ERROR, Idx::UNKNOWN));
}

#[test]
fn budget_stops_long_queries() {
    let fx = Fixture::new();
    let wide = fx.types.union((0..50).map(|i| fx.str(&format!("k{i}"))));
    let mut checker = SubtypeChecker::with_budget(&fx.types, 10);
    assert_eq!(checker.check(wide, Idx::STRING), Err(BudgetExceeded { limit: 10 }));
    // A failing member short-circuits before the budget runs out.
    assert_eq!(checker.check(wide, Idx::NUMBER), Ok(false));

    let mut unlimited = SubtypeChecker::new(&fx.types);
    assert_eq!(unlimited.check(wide, Idx::STRING), Ok(true));
    assert!(unlimited.steps() > 10);
}

#[test]
fn memo_survives_between_queries() {
    let fx = Fixture::new();
    let wide = fx.types.union((0..20).map(|i| fx.str(&format!("k{i}"))));
    let mut checker = SubtypeChecker::new(&fx.types);
    assert_eq!(checker.check(wide, Idx::STRING), Ok(true));
    assert!(checker.steps() > 20);
    assert_eq!(checker.check(wide, Idx::STRING), Ok(true));
    assert_eq!(checker.steps(), 1);
}
