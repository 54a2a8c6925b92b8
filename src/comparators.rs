//! Standalone comparator combinators.
//!
//! Plain two-argument comparators (`Fn(&T, &T) -> Ordering`) and functions that
//! combine them, without building an [`Order`](crate::Order). Every combinator
//! returns a closure, so the results plug straight into `slice::sort_by`.
//!
//! ```
//! use orderly::comparators::{by, compare, map, nulls_last, reverse};
//! use orderly::{KeyOptions, order};
//!
//! #[derive(Debug, PartialEq)]
//! struct Task {
//!     priority: u8,
//!     due: Option<u32>,
//! }
//!
//! let mut tasks = vec![
//!     Task { priority: 1, due: None },
//!     Task { priority: 2, due: Some(7) },
//!     Task { priority: 1, due: Some(3) },
//! ];
//!
//! tasks.sort_by(order![
//!     reverse(map(|t: &Task| t.priority, compare::<u8>)),
//!     map(|t: &Task| t.due, nulls_last(compare::<u32>)),
//! ]);
//!
//! assert_eq!(tasks[0].priority, 2);
//! assert_eq!(tasks[1].due, Some(3));
//! assert_eq!(tasks[2].due, None);
//!
//! // `by` accepts the same options as `Order::by_with`.
//! let newest_first = by(|t: &Task| t.due, KeyOptions::default().descending());
//! assert!(newest_first(&tasks[0], &tasks[1]).is_lt());
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone};

use crate::core::{Direction, KeyOptions, natural};

/// A boxed comparator, as accepted by [`order`].
pub type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync + 'a>;

/// Natural three-way comparison using `PartialOrd`.
///
/// Values that cannot be ordered against each other compare equal.
pub fn compare<T: PartialOrd + ?Sized>(a: &T, b: &T) -> Ordering {
    natural(a, b)
}

/// Compares strings by their `str` contents.
pub fn string<S: AsRef<str> + ?Sized>(a: &S, b: &S) -> Ordering {
    a.as_ref().cmp(b.as_ref())
}

/// Numeric comparison where NaN sorts before every other number.
///
/// ```
/// use orderly::comparators::number;
///
/// assert!(number(&f64::NAN, &5.0).is_lt());
/// assert!(number(&5.0, &f64::NAN).is_gt());
/// assert!(number(&f64::NAN, &f64::NAN).is_eq());
/// ```
pub fn number<N: MaybeNan + PartialOrd>(a: &N, b: &N) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => natural(a, b),
    }
}

/// `false` before `true`.
pub fn boolean(a: &bool, b: &bool) -> Ordering {
    a.cmp(b)
}

/// Compares date-times by the instant they denote, regardless of offset.
pub fn date<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> Ordering {
    a.naive_utc().cmp(&b.naive_utc())
}

/// Like [`date`], for date-times that may be invalid (`None`).
///
/// Invalid values form one equivalence class that sorts before every valid one.
pub fn maybe_date<Tz: TimeZone>(a: &Option<DateTime<Tz>>, b: &Option<DateTime<Tz>>) -> Ordering {
    nulls_first(date::<Tz>)(a, b)
}

/// Swaps the arguments before calling `cmp`.
pub fn reverse<T: ?Sized, C>(cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    C: Fn(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| cmp(b, a)
}

/// `None` sorts before every `Some`; two `None`s are equal.
pub fn nulls_first<T, C>(cmp: C) -> impl Fn(&Option<T>, &Option<T>) -> Ordering
where
    C: Fn(&T, &T) -> Ordering,
{
    move |a: &Option<T>, b: &Option<T>| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => cmp(x, y),
    }
}

/// `None` sorts after every `Some`; two `None`s are equal.
///
/// ```
/// use orderly::comparators::{compare, nulls_last};
///
/// let cmp = nulls_last(compare::<i32>);
/// assert!(cmp(&None, &Some(1)).is_gt());
/// assert!(cmp(&Some(1), &None).is_lt());
/// assert!(cmp(&None, &None).is_eq());
/// ```
pub fn nulls_last<T, C>(cmp: C) -> impl Fn(&Option<T>, &Option<T>) -> Ordering
where
    C: Fn(&T, &T) -> Ordering,
{
    move |a: &Option<T>, b: &Option<T>| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => cmp(x, y),
    }
}

/// Values that may hold a floating-point NaN.
///
/// Integers are never NaN. `None` is not NaN either; wrap with [`nulls_first`]
/// or [`nulls_last`] to place it.
pub trait MaybeNan {
    /// `true` for NaN.
    fn is_nan(&self) -> bool;
}

impl MaybeNan for f32 {
    fn is_nan(&self) -> bool {
        f32::is_nan(*self)
    }
}

impl MaybeNan for f64 {
    fn is_nan(&self) -> bool {
        f64::is_nan(*self)
    }
}

macro_rules! never_nan {
    ($($t:ty),*) => {
        $(
            impl MaybeNan for $t {
                fn is_nan(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_nan!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<N: MaybeNan> MaybeNan for Option<N> {
    fn is_nan(&self) -> bool {
        self.as_ref().is_some_and(MaybeNan::is_nan)
    }
}

/// NaN sorts before every other value; two NaNs are equal.
pub fn nans_first<T: MaybeNan, C>(cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    C: Fn(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => cmp(a, b),
    }
}

/// NaN sorts after every other value; two NaNs are equal.
pub fn nans_last<T: MaybeNan, C>(cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    C: Fn(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => cmp(a, b),
    }
}

/// A comparator on `key(element)`, configured like a step of an [`Order`](crate::Order).
///
/// Descending keys swap the arguments. With a predicate, pairs where either
/// element fails it compare equal.
pub fn by<T, K, F>(key: F, options: KeyOptions<T, K>) -> impl Fn(&T, &T) -> Ordering
where
    F: Fn(&T) -> K,
{
    let KeyOptions {
        direction,
        compare,
        predicate,
    } = options;
    move |a: &T, b: &T| {
        if let Some(predicate) = &predicate {
            if !(predicate(a) && predicate(b)) {
                return Ordering::Equal;
            }
        }
        let (a, b) = match direction {
            Direction::Ascending => (a, b),
            Direction::Descending => (b, a),
        };
        compare(&key(a), &key(b))
    }
}

/// Chains comparators left to right: the first non-equal result wins.
///
/// Later comparators are not called once one returns non-equal. See also the
/// [`order!`](crate::order!) macro, which boxes its arguments.
pub fn order<'a, T, I>(comparators: I) -> impl Fn(&T, &T) -> Ordering
where
    T: 'a,
    I: IntoIterator<Item = Comparator<'a, T>>,
{
    let comparators: Vec<Comparator<'a, T>> = comparators.into_iter().collect();
    move |a: &T, b: &T| {
        comparators
            .iter()
            .map(|cmp| cmp(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// `first`, falling back to `second` on ties.
pub fn then<T: ?Sized, A, B>(first: A, second: B) -> impl Fn(&T, &T) -> Ordering
where
    A: Fn(&T, &T) -> Ordering,
    B: Fn(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| first(a, b).then_with(|| second(a, b))
}

/// Compares `mapper(a)` with `mapper(b)` using `cmp`.
///
/// Pass [`compare`] for the natural order of the mapped values.
pub fn map<T: ?Sized, U, M, C>(mapper: M, cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    M: Fn(&T) -> U,
    C: Fn(&U, &U) -> Ordering,
{
    move |a: &T, b: &T| cmp(&mapper(a), &mapper(b))
}

/// Calls `cmp` only when both elements satisfy `predicate`; otherwise equal.
pub fn when<T: ?Sized, P, C>(predicate: P, cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    P: Fn(&T) -> bool,
    C: Fn(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| {
        if predicate(a) && predicate(b) {
            cmp(a, b)
        } else {
            Ordering::Equal
        }
    }
}

/// Chains comparators left to right, boxing each one.
///
/// `order![a, b, c]` is `comparators::order(vec![Box::new(a), Box::new(b), Box::new(c)])`.
#[macro_export]
macro_rules! order {
    ($($cmp:expr),* $(,)?) => {
        $crate::comparators::order(::std::vec![
            $(::std::boxed::Box::new($cmp) as $crate::comparators::Comparator<'_, _>),*
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn natural_and_string() {
        assert_eq!(compare(&1, &2), Ordering::Less);
        assert_eq!(compare("b", "a"), Ordering::Greater);
        assert_eq!(compare(&f64::NAN, &1.0), Ordering::Equal);
        assert_eq!(string(&"apple".to_string(), &"banana".to_string()), Ordering::Less);
        assert_eq!(string("x", "x"), Ordering::Equal);
    }

    #[test]
    fn number_places_nan_first() {
        assert_eq!(number(&f64::NAN, &5.0), Ordering::Less);
        assert_eq!(number(&5.0, &f64::NAN), Ordering::Greater);
        assert_eq!(number(&f64::NAN, &f64::NAN), Ordering::Equal);
        assert_eq!(number(&1.5f32, &-2.0f32), Ordering::Greater);
        assert_eq!(number(&3u8, &3u8), Ordering::Equal);

        let mut values = vec![2.0, f64::NAN, -1.0, f64::NAN, 0.5];
        values.sort_by(number);
        assert!(values[0].is_nan() && values[1].is_nan());
        assert_eq!(&values[2..], &[-1.0, 0.5, 2.0]);
    }

    #[test]
    fn boolean_false_first() {
        assert_eq!(boolean(&false, &true), Ordering::Less);
        assert_eq!(boolean(&true, &false), Ordering::Greater);
        assert_eq!(boolean(&true, &true), Ordering::Equal);
    }

    #[test]
    fn date_compares_instants_across_offsets() {
        let utc = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        // 13:00+02:00 is 11:00 UTC.
        let earlier = plus_two
            .with_ymd_and_hms(2024, 5, 1, 13, 0, 0)
            .unwrap()
            .fixed_offset();

        assert_eq!(date(&earlier, &utc.fixed_offset()), Ordering::Less);
        assert_eq!(date(&utc, &utc), Ordering::Equal);
    }

    #[test]
    fn maybe_date_places_invalid_first() {
        let valid = Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(maybe_date(&None, &valid), Ordering::Less);
        assert_eq!(maybe_date(&valid, &None), Ordering::Greater);
        assert_eq!(maybe_date::<Utc>(&None, &None), Ordering::Equal);
    }

    #[test]
    fn reverse_swaps_arguments() {
        let desc = reverse(compare::<i32>);
        assert_eq!(desc(&1, &2), Ordering::Greater);
        assert_eq!(reverse(desc)(&1, &2), Ordering::Less);
    }

    #[test]
    fn nulls_first_and_last() {
        let first = nulls_first(compare::<i32>);
        assert_eq!(first(&None, &Some(1)), Ordering::Less);
        assert_eq!(first(&Some(1), &None), Ordering::Greater);
        assert_eq!(first(&Some(1), &Some(2)), Ordering::Less);

        let last = nulls_last(compare::<i32>);
        assert_eq!(last(&None, &Some(1)), Ordering::Greater);
        assert_eq!(last(&Some(1), &None), Ordering::Less);
        assert_eq!(last(&None, &None), Ordering::Equal);
    }

    #[test]
    fn nans_first_and_last() {
        let first = nans_first(compare::<f64>);
        assert_eq!(first(&f64::NAN, &-1.0), Ordering::Less);
        assert_eq!(first(&f64::NAN, &f64::NAN), Ordering::Equal);
        assert_eq!(first(&1.0, &2.0), Ordering::Less);

        let last = nans_last(compare::<f64>);
        assert_eq!(last(&f64::NAN, &-1.0), Ordering::Greater);
        assert_eq!(last(&-1.0, &f64::NAN), Ordering::Less);

        // Integers and `None` are never NaN, so they reach the inner comparator.
        let ints = nans_first(compare::<i64>);
        assert_eq!(ints(&2, &1), Ordering::Greater);
        let optional = nans_last(nulls_first(compare::<f64>));
        assert_eq!(optional(&None, &Some(f64::NAN)), Ordering::Less);
        assert_eq!(optional(&Some(f64::NAN), &Some(1.0)), Ordering::Greater);
    }

    #[test]
    fn by_applies_direction_and_predicate() {
        let asc = by(|p: &(i32, i32)| p.0, KeyOptions::default());
        assert_eq!(asc(&(1, 0), &(2, 0)), Ordering::Less);

        let desc = by(|p: &(i32, i32)| p.0, KeyOptions::default().descending());
        assert_eq!(desc(&(1, 0), &(2, 0)), Ordering::Greater);

        let guarded = by(
            |p: &(i32, i32)| p.0,
            KeyOptions::default().predicate(|p: &(i32, i32)| p.1 > 0),
        );
        assert_eq!(guarded(&(1, 1), &(2, 1)), Ordering::Less);
        assert_eq!(guarded(&(1, 0), &(2, 1)), Ordering::Equal);

        let custom = by(
            |s: &&str| s.len(),
            KeyOptions::compare_by(|a: &usize, b: &usize| b.cmp(a)),
        );
        assert_eq!(custom(&"aa", &"a"), Ordering::Less);
    }

    #[test]
    fn order_short_circuits() {
        use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
        let calls = AtomicUsize::new(0);

        let chained = order![
            |a: &i32, b: &i32| a.cmp(b),
            |_: &i32, _: &i32| {
                calls.fetch_add(1, AtomicOrdering::SeqCst);
                Ordering::Greater
            },
        ];
        assert_eq!(chained(&1, &2), Ordering::Less);
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(chained(&2, &2), Ordering::Greater);
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[test]
    fn tie_falls_through_to_next_comparator() {
        let returns_positive = |_: &i32, _: &i32| Ordering::Greater;
        let chained = order![|_: &i32, _: &i32| Ordering::Equal, returns_positive];
        assert_eq!(chained(&1, &2), returns_positive(&1, &2));

        let empty = order::<i32, _>(Vec::new());
        assert_eq!(empty(&1, &2), Ordering::Equal);

        let pair = then(|_: &i32, _: &i32| Ordering::Equal, compare::<i32>);
        assert_eq!(pair(&3, &1), Ordering::Greater);
    }

    #[test]
    fn map_projects_both_operands() {
        let by_len = map(|s: &str| s.len(), compare::<usize>);
        assert_eq!(by_len("aaa", "b"), Ordering::Greater);
        assert_eq!(by_len("aa", "bb"), Ordering::Equal);
    }

    #[test]
    fn when_ties_unless_both_match() {
        let positives = when(|v: &i32| *v > 0, compare::<i32>);
        assert_eq!(positives(&1, &2), Ordering::Less);
        assert_eq!(positives(&-1, &2), Ordering::Equal);
        assert_eq!(positives(&2, &-1), Ordering::Equal);

        let chained = order![
            when(|v: &i32| *v > 0, compare::<i32>),
            reverse(compare::<i32>),
        ];
        assert_eq!(chained(&-1, &2), Ordering::Greater);
    }
}
