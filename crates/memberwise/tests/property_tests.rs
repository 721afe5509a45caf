//! Property-based tests for nebula-memberwise.

use std::collections::BTreeMap;

use nebula_memberwise::operators::{Eq as EqOp, Gt, Gte, Lt, Lte, Ne};
use nebula_memberwise::prelude::*;
use proptest::prelude::*;
use serde_json::json;

fn pair(a: i64, b: i64) -> BTreeMap<String, i64> {
    [("a".to_owned(), a), ("b".to_owned(), b)].into_iter().collect()
}

fn ok(v: &Validator<'_>, object: &dyn Inspect) -> bool {
    v.check(object).unwrap()
}

fn comparisons() -> Vec<Op> {
    vec![
        Op::new(EqOp),
        Op::new(Ne),
        Op::new(Gt),
        Op::new(Gte),
        Op::new(Lt),
        Op::new(Lte),
    ]
}

// ============================================================================
// NEGATION: negate(op)(a, b) == !op(a, b), and NOT inverts the status
// ============================================================================

proptest! {
    #[test]
    fn negated_operator_inverts(a in -50i64..50, b in -50i64..50) {
        let object = pair(a, 0);
        let checks = [
            (member("a").check(Gt, b), member("a").check(negate(Gt), b)),
            (member("a").check(Lte, b), member("a").check(negate(Lte), b)),
            (member("a").check(EqOp, b), member("a").check(negate(EqOp), b)),
        ];
        for (plain, negated) in &checks {
            prop_assert_eq!(ok(plain, &object), !ok(negated, &object));
        }
    }

    #[test]
    fn not_inverts_every_comparison(a in -50i64..50, b in -50i64..50) {
        let object = pair(a, b);
        for op in comparisons() {
            let leaf = member("a").check_op(op, other_member("b"));
            prop_assert_eq!(ok(&leaf, &object), !ok(&not(leaf.clone()), &object));
        }
    }

    #[test]
    fn double_not_is_identity(a in -50i64..50, b in -50i64..50) {
        let object = pair(a, b);
        let leaf = member("a").lt(other_member("b"));
        prop_assert_eq!(ok(&leaf, &object), ok(&not(not(leaf.clone())), &object));
    }
}

// ============================================================================
// IDEMPOTENCY: the same validator gives the same status and message
// ============================================================================

proptest! {
    #[test]
    fn status_and_message_idempotent(a in -50i64..50, b in -50i64..50) {
        let object = pair(a, b);
        let v = or([member("a").gt(10), and([member("b").lt(0), not(member("a").eq(3))])]);
        let first = validate_report(&object, &v).unwrap();
        let second = validate_report(&object, &v).unwrap();
        prop_assert_eq!(first.status, second.status);
        prop_assert_eq!(first.message(), second.message());
    }
}

// ============================================================================
// COMBINATOR LAWS: AND, OR and De Morgan
// ============================================================================

proptest! {
    #[test]
    fn and_passes_iff_both_pass(a in -50i64..50, b in -50i64..50) {
        let object = pair(a, b);
        let x = member("a").gte(0);
        let y = member("b").lt(10);
        prop_assert_eq!(ok(&and([x.clone(), y.clone()]), &object), ok(&x, &object) && ok(&y, &object));
    }

    #[test]
    fn or_passes_iff_either_passes(a in -50i64..50, b in -50i64..50) {
        let object = pair(a, b);
        let x = member("a").gte(0);
        let y = member("b").lt(10);
        prop_assert_eq!(ok(&or([x.clone(), y.clone()]), &object), ok(&x, &object) || ok(&y, &object));
    }

    #[test]
    fn de_morgan(a in -50i64..50, b in -50i64..50) {
        let object = pair(a, b);
        let x = member("a").gte(0);
        let y = member("b").lt(10);
        prop_assert_eq!(
            ok(&not(and([x.clone(), y.clone()])), &object),
            ok(&or([not(x.clone()), not(y.clone())]), &object)
        );
        prop_assert_eq!(
            ok(&not(or([x.clone(), y.clone()])), &object),
            ok(&and([not(x), not(y)]), &object)
        );
    }

    #[test]
    fn all_and_any_are_duals(items in prop::collection::vec(-20i64..20, 0..8), bound in -20i64..20) {
        let object: BTreeMap<String, Vec<i64>> = [("items".to_owned(), items.clone())].into_iter().collect();
        let all = member("items").all().gt(bound);
        let any = member("items").any().lte(bound);
        prop_assert_eq!(ok(&all, &object), items.iter().all(|i| *i > bound));
        prop_assert_eq!(ok(&any, &object), items.iter().any(|i| *i <= bound));
        prop_assert_eq!(ok(&not(all), &object), ok(&any, &object));
    }
}

// ============================================================================
// PREFIXES: nesting a scope is the same as spelling out the full path
// ============================================================================

proptest! {
    #[test]
    fn nested_scopes_equal_full_paths(x in -50i64..50, bound in -50i64..50) {
        let object = json!({"outer": {"inner": {"x": x}}});
        let full = member("outer").at("inner").at("x").gt(bound);
        let left = member("outer").at("inner").nest(member("x").gt(bound));
        let right = member("outer").nest(member("inner").nest(member("x").gt(bound)));

        let expected = validate_report(&object, &full).unwrap();
        for v in [left, right] {
            let outcome = validate_report(&object, &v).unwrap();
            prop_assert_eq!(outcome.status, expected.status);
            prop_assert_eq!(outcome.message(), expected.message());
        }
    }
}
