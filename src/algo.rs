//! Bulk sorting (decorate-sort-undecorate).
//!
//! Instead of calling every key function once per *comparison*, the bulk sort:
//! - **Decorates**: extracts each step's key once per element into a column, and
//!   evaluates the step's predicate once per element into a match mask. Keys are
//!   only extracted for matched elements.
//! - **Sorts**: orders a vector of indices with a comparator that reads the columns.
//! - **Undecorates**: gathers the elements by the sorted indices.
//!
//! The index sort is [`stable_sort_by`], a stable merge sort that tolerates
//! comparators that are not total orders (which guarded steps can produce).
//!
//! The main entry points are [`sort`], [`sort_indices`] and [`sort_mut`].

use std::cmp::Ordering;

use tracing::trace;

use crate::core::Direction;
use crate::order::Order;
use crate::step::{KeyColumn, Step};

/// Runs shorter than this are sorted by insertion before merging.
const INSERTION_RUN: usize = 16;

/// The decorated form of one step.
struct Decorated {
    direction: Direction,
    matched: Option<Vec<bool>>,
    keys: Box<dyn KeyColumn>,
}

impl Decorated {
    fn new<T: 'static>(step: &Step<T>, items: &[T]) -> Self {
        let matched: Option<Vec<bool>> = step
            .predicate
            .as_ref()
            .map(|predicate| items.iter().map(|item| predicate(item)).collect());
        let keys = step.key.decorate(items, matched.as_deref());
        Self {
            direction: step.direction,
            matched,
            keys,
        }
    }

    #[inline(always)]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        if let Some(matched) = &self.matched {
            if !(matched[a] && matched[b]) {
                return Ordering::Equal;
            }
        }
        self.direction.apply(self.keys.compare(a, b))
    }
}

#[inline]
fn compare_decorated(columns: &[Decorated], a: usize, b: usize) -> Ordering {
    columns
        .iter()
        .map(|column| column.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Returns the indices that order `items` under `order`.
///
/// The input is not modified. Element `i` of the result is the input index of
/// the element that belongs at position `i`.
///
/// # Examples
///
/// ```
/// use orderly::{Order, sort_indices};
///
/// let data = vec!["banana", "apple", "cherry"];
/// let indices = sort_indices(&data, &Order::by(|s: &&str| *s));
///
/// assert_eq!(indices, vec![1, 0, 2]); // apple, banana, cherry
/// ```
pub fn sort_indices<T: 'static>(items: &[T], order: &Order<T>) -> Vec<usize> {
    let len = items.len();
    let steps = order.steps();
    trace!(len, steps = steps.len(), "bulk sort");

    let mut indices: Vec<usize> = (0..len).collect();
    if len <= 1 || steps.is_empty() {
        trace!(len, steps = steps.len(), "bulk sort short-circuits to identity");
        return indices;
    }

    let columns: Vec<Decorated> = steps
        .iter()
        .map(|step| Decorated::new(step, items))
        .collect();

    stable_sort_by(&mut indices, |&a, &b| compare_decorated(&columns, a, b));
    indices
}

/// Returns a sorted copy of `items`.
///
/// Equivalent to cloning `items` and sorting the clone with `order.comparator()`,
/// but each key is computed once per element rather than once per comparison.
///
/// # Examples
///
/// ```
/// use orderly::{Order, sort};
///
/// let data = vec![3, 1, 2];
/// let sorted = sort(&data, &Order::by(|v: &i32| *v).reverse());
///
/// assert_eq!(sorted, vec![3, 2, 1]);
/// assert_eq!(data, vec![3, 1, 2]);
/// ```
pub fn sort<T: Clone + 'static>(items: &[T], order: &Order<T>) -> Vec<T> {
    sort_indices(items, order)
        .into_iter()
        .map(|index| items[index].clone())
        .collect()
}

/// Sorts a mutable slice in place.
///
/// Computes the sorted indices and then applies the permutation with swaps, so
/// `T` needs no `Clone`.
///
/// # Examples
///
/// ```
/// use orderly::{Order, sort_mut};
///
/// let mut data = vec!["banana", "apple", "cherry"];
/// sort_mut(&mut data, &Order::by(|s: &&str| s.len()).then_by(|s: &&str| *s));
///
/// assert_eq!(data, vec!["apple", "banana", "cherry"]);
/// ```
pub fn sort_mut<T: 'static>(items: &mut [T], order: &Order<T>) {
    let indices = sort_indices(items, order);
    apply_permutation(items, indices);
}

fn apply_permutation<T>(data: &mut [T], mut indices: Vec<usize>) {
    for i in 0..data.len() {
        let mut current = i;
        while indices[current] != i {
            let next = indices[current];
            data.swap(current, next);
            indices[current] = current; // Mark as placed
            current = next;
        }
        indices[current] = current;
    }
}

/// Stable merge sort.
///
/// Short runs are insertion-sorted, then merged bottom-up
/// through an auxiliary buffer. Equal elements keep their relative order. The
/// result depends only on the outcomes of `compare`, and the sort never panics
/// when `compare` is not a total order.
///
/// [`Order::sort`] uses this routine on index vectors; calling it directly with
/// [`Order::comparator`] gives the same order.
///
/// # Examples
///
/// ```
/// use orderly::algo::stable_sort_by;
///
/// let mut pairs = vec![(1, 'b'), (0, 'z'), (1, 'a')];
/// stable_sort_by(&mut pairs, |x, y| x.0.cmp(&y.0));
///
/// assert_eq!(pairs, vec![(0, 'z'), (1, 'b'), (1, 'a')]);
/// ```
pub fn stable_sort_by<T, F>(v: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    v.chunks_mut(INSERTION_RUN)
        .for_each(|run| insertion_sort(run, &mut compare));
    if len <= INSERTION_RUN {
        return;
    }

    let mut buffer = v.to_vec();
    let mut in_buffer = false;
    let mut width = INSERTION_RUN;
    while width < len {
        if in_buffer {
            merge_pass(&buffer, v, width, &mut compare);
        } else {
            merge_pass(v, &mut buffer, width, &mut compare);
        }
        in_buffer = !in_buffer;
        width *= 2;
    }

    if in_buffer {
        v.clone_from_slice(&buffer);
    }
}

fn insertion_sort<T, F>(run: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..run.len() {
        let mut j = i;
        while j > 0 && compare(&run[j - 1], &run[i]) == Ordering::Greater {
            j -= 1;
        }
        run[j..=i].rotate_right(1);
    }
}

/// Merges adjacent sorted runs of `width` from `src` into `dst`.
fn merge_pass<T, F>(src: &[T], dst: &mut [T], width: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = src.len();
    let mut start = 0;
    while start < len {
        let mid = (start + width).min(len);
        let end = (start + 2 * width).min(len);
        merge(&src[start..mid], &src[mid..end], &mut dst[start..end], compare);
        start = end;
    }
}

fn merge<T, F>(left: &[T], right: &[T], dst: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in dst.iter_mut() {
        // Ties take from the left run.
        let take_left = j == right.len()
            || (i < left.len() && compare(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}
