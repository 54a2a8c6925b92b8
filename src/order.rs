//! The [`Order`] builder.
//!
//! An [`Order`] is an immutable list of steps. Every composition method returns a
//! new `Order` with a freshly allocated step list; the receiver never changes.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::algo;
use crate::core::{KeyOptions, PredicateFn};
use crate::step::{Keyed, ProjectFn, Step};

/// An immutable, composable ordering over `T`.
///
/// Steps are evaluated in the order they were added. The first step that does
/// not tie decides the comparison.
///
/// # Examples
///
/// ```
/// use orderly::{KeyOptions, Order};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Item {
///     primary: u32,
///     secondary: &'static str,
/// }
///
/// let order = Order::by(|i: &Item| i.primary).then_by(|i: &Item| i.secondary);
///
/// let items = vec![
///     Item { primary: 1, secondary: "b" },
///     Item { primary: 1, secondary: "a" },
///     Item { primary: 0, secondary: "z" },
/// ];
///
/// let sorted = order.sort(&items);
/// let names: Vec<_> = sorted.iter().map(|i| i.secondary).collect();
/// assert_eq!(names, ["z", "a", "b"]);
///
/// // The input is left untouched.
/// assert_eq!(items[0].secondary, "b");
///
/// // Flip every step.
/// let newest_first = order.reverse();
/// assert_eq!(newest_first.sort(&items)[0].secondary, "b");
///
/// // Keys with custom options.
/// let by_len = Order::by_with(|s: &String| s.len(), KeyOptions::default().descending());
/// assert!(by_len.compare(&"long".to_string(), &"s".to_string()).is_lt());
/// ```
///
/// # Borrowed elements
///
/// Keys, projections and predicates are stored as shared `'static` callables,
/// so `T` must be `'static` too. An order cannot be built over records that
/// borrow from a local value:
///
/// ```compile_fail
/// use orderly::Order;
///
/// let text = String::from("pear fig banana");
/// let words: Vec<&str> = text.split(' ').collect();
/// let sorted = Order::by(|w: &&str| w.len()).sort(&words);
/// ```
///
/// Order the owned values instead, or order positions and look the borrowed
/// records up afterwards:
///
/// ```
/// use orderly::Order;
///
/// let text = String::from("pear fig banana");
/// let words: Vec<&str> = text.split(' ').collect();
///
/// let lengths: Vec<usize> = words.iter().map(|w| w.len()).collect();
/// let positions: Vec<usize> = (0..words.len()).collect();
/// let order = Order::by(move |i: &usize| lengths[*i]);
/// let sorted: Vec<&str> = order.sort(&positions).into_iter().map(|i| words[i]).collect();
/// assert_eq!(sorted, ["fig", "pear", "banana"]);
/// ```
pub struct Order<T> {
    steps: Vec<Step<T>>,
}

impl<T> Clone for Order<T> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<T> Default for Order<T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<T> fmt::Debug for Order<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(StepSummary))
            .finish()
    }
}

struct StepSummary<'a, T>(&'a Step<T>);

impl<T> fmt::Debug for StepSummary<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("direction", &self.0.direction)
            .field("predicate", &self.0.predicate.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Order<T> {
    /// An order with no steps. Every pair compares equal.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of `other`, sharing its steps.
    pub fn from_order(other: &Order<T>) -> Self {
        other.clone()
    }

    /// Concatenates the steps of several orders, in iteration order.
    ///
    /// Items may be `&Order<T>` or `Option<&Order<T>>`; `None` entries and
    /// orders without steps contribute nothing.
    ///
    /// ```
    /// use orderly::Order;
    ///
    /// let first = Order::by(|p: &(u8, u8)| p.0);
    /// let second = Order::by(|p: &(u8, u8)| p.1);
    ///
    /// let merged = Order::concat([Some(&first), None, Some(&second)]);
    /// assert_eq!(merged.len(), 2);
    /// ```
    pub fn concat<'a, I>(orders: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<&'a Order<T>>>,
    {
        let steps = orders
            .into_iter()
            .filter_map(Into::<Option<&'a Order<T>>>::into)
            .flat_map(|order| order.steps.iter().cloned())
            .collect();
        Self { steps }
    }

    /// A single ascending step comparing `key` values with `PartialOrd`.
    pub fn by<K, F>(key: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        K: PartialOrd + 'static,
    {
        Self::by_with(key, KeyOptions::default())
    }

    /// A single step configured by `options`.
    pub fn by_with<K, F>(key: F, options: KeyOptions<T, K>) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        K: 'static,
    {
        let KeyOptions {
            direction,
            compare,
            predicate,
        } = options;
        Self {
            steps: vec![Step {
                key: Arc::new(Keyed::new(key, compare)),
                direction,
                predicate,
            }],
        }
    }

    /// This order followed by an ascending step on `key`.
    pub fn then_by<K, F>(&self, key: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        K: PartialOrd + 'static,
    {
        self.then_by_with(key, KeyOptions::default())
    }

    /// This order followed by a step configured by `options`.
    pub fn then_by_with<K, F>(&self, key: F, options: KeyOptions<T, K>) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        K: 'static,
    {
        self.chain(Self::by_with(key, options).steps)
    }

    /// Every step with its direction flipped.
    ///
    /// Keys, comparators and predicates are kept. Reversing twice gives back an
    /// order that compares exactly like the original.
    pub fn reverse(&self) -> Self {
        Self {
            steps: self.steps.iter().map(Step::reversed).collect(),
        }
    }

    /// Lifts `sub`, an order over nested values, to the parent type through `outer`.
    ///
    /// Each lifted step extracts its key (and checks its predicate) on
    /// `outer(parent)`.
    ///
    /// ```
    /// use orderly::Order;
    ///
    /// struct Address { city: &'static str }
    /// struct Person { address: Address }
    ///
    /// let by_city = Order::by(|a: &&'static str| *a);
    /// let order = Order::map(|p: &Person| p.address.city, &by_city);
    ///
    /// let oslo = Person { address: Address { city: "Oslo" } };
    /// let bergen = Person { address: Address { city: "Bergen" } };
    /// assert!(order.compare(&bergen, &oslo).is_lt());
    /// ```
    pub fn map<U, F>(outer: F, sub: &Order<U>) -> Self
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
        U: 'static,
    {
        if sub.is_empty() {
            return Self::new();
        }
        let outer: ProjectFn<T, U> = Arc::new(outer);
        Self {
            steps: sub.steps.iter().map(|step| step.lift(&outer)).collect(),
        }
    }

    /// This order followed by `sub` lifted through `outer`. See [`Order::map`].
    pub fn then_map<U, F>(&self, outer: F, sub: &Order<U>) -> Self
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
        U: 'static,
    {
        self.chain(Self::map(outer, sub).steps)
    }

    /// The steps of `sub`, each applying only when both elements satisfy `guard`.
    ///
    /// The guard is checked after any predicate a step already has.
    pub fn when<P>(guard: P, sub: &Order<T>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        if sub.is_empty() {
            return Self::new();
        }
        let guard: PredicateFn<T> = Arc::new(guard);
        Self {
            steps: sub.steps.iter().map(|step| step.guarded(&guard)).collect(),
        }
    }

    /// This order followed by `sub` guarded by `guard`. See [`Order::when`].
    ///
    /// The receiver's own steps stay unconditional.
    pub fn then_when<P>(&self, guard: P, sub: &Order<T>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.chain(Self::when(guard, sub).steps)
    }

    fn chain(&self, tail: Vec<Step<T>>) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + tail.len());
        steps.extend(self.steps.iter().cloned());
        steps.extend(tail);
        Self { steps }
    }

    /// Compares two elements.
    ///
    /// Steps run in order; a step whose predicate rejects either element is a tie.
    /// An order without steps reports every pair as equal.
    #[inline]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        self.steps
            .iter()
            .map(|step| step.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// A comparator closure borrowing this order, suitable for `slice::sort_by`.
    ///
    /// ```
    /// use orderly::Order;
    ///
    /// let order = Order::by(|v: &i32| v.abs());
    /// let mut values = vec![-3, 2, -1];
    /// values.sort_by(order.comparator());
    /// assert_eq!(values, vec![-1, 2, -3]);
    /// ```
    pub fn comparator(&self) -> impl Fn(&T, &T) -> Ordering + '_ {
        move |a, b| self.compare(a, b)
    }

    /// Returns a sorted copy of `items` using decorate-sort-undecorate.
    ///
    /// Each key is extracted once per element, and never for an element its
    /// step's predicate rejects. The sort is stable. `items` is not modified.
    pub fn sort(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        algo::sort(items, self)
    }

    /// The permutation that sorts `items`: position `i` of the result holds
    /// the input index of the element that belongs at `i`.
    pub fn sort_indices(&self, items: &[T]) -> Vec<usize> {
        algo::sort_indices(items, self)
    }

    /// Sorts `items` in place, with the same key budget as [`Order::sort`].
    pub fn sort_mut(&self, items: &mut [T]) {
        algo::sort_mut(items, self)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` when the order has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn steps(&self) -> &[Step<T>] {
        &self.steps
    }
}

impl<T: 'static> FromIterator<Order<T>> for Order<T> {
    fn from_iter<I: IntoIterator<Item = Order<T>>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().flat_map(|order| order.steps).collect(),
        }
    }
}
