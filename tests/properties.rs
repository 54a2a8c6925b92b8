use orderly::algo::stable_sort_by;
use orderly::comparators::{self, compare};
use orderly::prelude::*;
use proptest::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

type Row = (u8, i16, bool);

/// Builds an order from a compact description: one entry per step, giving the
/// field, whether it is descending and which guard (if any) applies.
fn build(plan: &[(u8, bool, u8)]) -> Order<Row> {
    plan.iter().fold(Order::new(), |order, &(field, descending, guard)| {
        let step = match field % 3 {
            0 => Order::by(|r: &Row| r.0),
            1 => Order::by(|r: &Row| r.1),
            _ => Order::by(|r: &Row| r.2),
        };
        let step = if descending { step.reverse() } else { step };
        match guard % 3 {
            0 => order.then_map(|r: &Row| *r, &step),
            1 => order.then_when(|r: &Row| r.2, &step),
            _ => order.then_when(|r: &Row| r.1 >= 0, &step),
        }
    })
}

fn unguarded(plan: &[(u8, bool)]) -> Order<Row> {
    let steps: Vec<(u8, bool, u8)> = plan.iter().map(|&(f, d)| (f, d, 0)).collect();
    build(&steps)
}

fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0u8..4, -3i16..3, any::<bool>()), 0..120)
}

proptest! {
    #[test]
    fn compare_is_reflexive_and_antisymmetric(
        plan in prop::collection::vec((0u8..3, any::<bool>()), 0..4),
        a in (0u8..4, -3i16..3, any::<bool>()),
        b in (0u8..4, -3i16..3, any::<bool>()),
    ) {
        let order = unguarded(&plan);
        prop_assert_eq!(order.compare(&a, &a), Ordering::Equal);
        prop_assert_eq!(order.compare(&a, &b), order.compare(&b, &a).reverse());
    }

    #[test]
    fn reverse_is_an_involution(
        plan in prop::collection::vec((0u8..3, any::<bool>(), 0u8..3), 0..4),
        a in (0u8..4, -3i16..3, any::<bool>()),
        b in (0u8..4, -3i16..3, any::<bool>()),
    ) {
        let order = build(&plan);
        let twice = order.reverse().reverse();
        prop_assert_eq!(twice.compare(&a, &b), order.compare(&a, &b));
    }

    #[test]
    fn sort_matches_std_sort_by_for_total_orders(
        plan in prop::collection::vec((0u8..3, any::<bool>()), 0..4),
        input in rows(),
    ) {
        let order = unguarded(&plan);
        let mut expected = input.clone();
        expected.sort_by(order.comparator());
        prop_assert_eq!(order.sort(&input), expected);
    }

    #[test]
    fn sort_matches_comparator_for_any_guards(
        plan in prop::collection::vec((0u8..3, any::<bool>(), 0u8..3), 0..5),
        input in rows(),
    ) {
        let order = build(&plan);
        let mut expected = input.clone();
        stable_sort_by(&mut expected, order.comparator());
        prop_assert_eq!(order.sort(&input), expected);
    }

    #[test]
    fn sort_never_mutates_input(
        plan in prop::collection::vec((0u8..3, any::<bool>(), 0u8..3), 0..4),
        input in rows(),
    ) {
        let order = build(&plan);
        let snapshot = input.clone();
        let sorted = order.sort(&input);
        prop_assert_eq!(&input, &snapshot);
        prop_assert_eq!(sorted.len(), input.len());
    }

    #[test]
    fn sort_indices_is_a_permutation(
        plan in prop::collection::vec((0u8..3, any::<bool>(), 0u8..3), 0..4),
        input in rows(),
    ) {
        let order = build(&plan);
        let mut indices = order.sort_indices(&input);
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..input.len()).collect::<Vec<_>>());
    }

    #[test]
    fn predicate_limits_key_calls(input in prop::collection::vec(-50i32..50, 0..200)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let order = Order::by_with(
            move |v: &i32| {
                counter.fetch_add(1, AtomicOrdering::SeqCst);
                *v
            },
            KeyOptions::default().predicate(|v: &i32| v % 3 != 0),
        );

        let _ = order.sort(&input);
        let expected = if input.len() <= 1 {
            0
        } else {
            input.iter().filter(|v| *v % 3 != 0).count()
        };
        prop_assert_eq!(calls.load(AtomicOrdering::SeqCst), expected);
    }

    #[test]
    fn guard_ties_when_either_side_fails(a in -10i32..10, b in -10i32..10) {
        let order = Order::when(|v: &i32| *v > 0, &Order::by(|v: &i32| *v));
        if a <= 0 || b <= 0 {
            prop_assert_eq!(order.compare(&a, &b), Ordering::Equal);
        } else {
            prop_assert_eq!(order.compare(&a, &b), a.cmp(&b));
        }
    }

    #[test]
    fn chain_with_leading_tie_is_transparent(a in any::<i64>(), b in any::<i64>()) {
        let tail = comparators::reverse(compare::<i64>);
        let chained = orderly::order![|_: &i64, _: &i64| Ordering::Equal, comparators::reverse(compare::<i64>)];
        prop_assert_eq!(chained(&a, &b), tail(&a, &b));
    }
}
