//! Steps: the immutable ordering rules an [`Order`](crate::Order) is made of.
//!
//! A step pairs a type-erased key comparison ([`KeyCompare`]) with a direction
//! and an optional predicate. Composition never edits a step in place; it wraps
//! the shared key comparison in a new step.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::{CompareFn, Direction, PredicateFn};

/// Shared projection from a parent element to a nested value.
pub(crate) type ProjectFn<T, U> = Arc<dyn Fn(&T) -> U + Send + Sync>;

/// Key extraction plus key comparison, with the key type erased.
pub(crate) trait KeyCompare<T>: Send + Sync {
    /// Extracts both keys and compares them in ascending order.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Extracts the key of every element whose `matched` slot is set (or of
    /// every element when `matched` is `None`) into a column.
    fn decorate(&self, items: &[T], matched: Option<&[bool]>) -> Box<dyn KeyColumn>;

    /// Builds a column of `len` slots from owned values. `fetch` yields the
    /// value for a slot, or `None` when the slot is skipped.
    fn decorate_with(
        &self,
        len: usize,
        fetch: &mut dyn FnMut(usize) -> Option<T>,
    ) -> Box<dyn KeyColumn>;
}

/// Precomputed keys of one step, addressed by element index.
pub(crate) trait KeyColumn {
    /// Compares the stored keys at `a` and `b` in ascending order.
    ///
    /// Unused slots tie with everything.
    fn compare(&self, a: usize, b: usize) -> Ordering;
}

/// A key function and the comparator for its keys.
pub(crate) struct Keyed<F, K> {
    key: F,
    compare: CompareFn<K>,
}

impl<F, K> Keyed<F, K> {
    pub(crate) fn new(key: F, compare: CompareFn<K>) -> Self {
        Self { key, compare }
    }
}

impl<T, K, F> KeyCompare<T> for Keyed<F, K>
where
    F: Fn(&T) -> K + Send + Sync,
    K: 'static,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        let x = (self.key)(a);
        let y = (self.key)(b);
        (self.compare)(&x, &y)
    }

    fn decorate(&self, items: &[T], matched: Option<&[bool]>) -> Box<dyn KeyColumn> {
        let keys: Vec<Option<K>> = match matched {
            Some(matched) => items
                .iter()
                .zip(matched)
                .map(|(item, &hit)| hit.then(|| (self.key)(item)))
                .collect(),
            None => items.iter().map(|item| Some((self.key)(item))).collect(),
        };
        Box::new(Column {
            keys,
            compare: Arc::clone(&self.compare),
        })
    }

    fn decorate_with(
        &self,
        len: usize,
        fetch: &mut dyn FnMut(usize) -> Option<T>,
    ) -> Box<dyn KeyColumn> {
        let keys: Vec<Option<K>> = (0..len)
            .map(|slot| fetch(slot).map(|value| (self.key)(&value)))
            .collect();
        Box::new(Column {
            keys,
            compare: Arc::clone(&self.compare),
        })
    }
}

struct Column<K> {
    keys: Vec<Option<K>>,
    compare: CompareFn<K>,
}

impl<K> KeyColumn for Column<K> {
    #[inline]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        match (&self.keys[a], &self.keys[b]) {
            (Some(x), Some(y)) => (self.compare)(x, y),
            _ => Ordering::Equal,
        }
    }
}

/// A key comparison over nested values, lifted to the parent domain.
struct Projected<T, U> {
    outer: ProjectFn<T, U>,
    inner: Arc<dyn KeyCompare<U>>,
}

impl<T, U> KeyCompare<T> for Projected<T, U> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.inner.compare(&(self.outer)(a), &(self.outer)(b))
    }

    // Only matched elements are projected.
    fn decorate(&self, items: &[T], matched: Option<&[bool]>) -> Box<dyn KeyColumn> {
        let outer = &self.outer;
        let mut fetch = |slot: usize| {
            let hit = matched.is_none_or(|matched| matched[slot]);
            hit.then(|| outer(&items[slot]))
        };
        self.inner.decorate_with(items.len(), &mut fetch)
    }

    fn decorate_with(
        &self,
        len: usize,
        fetch: &mut dyn FnMut(usize) -> Option<T>,
    ) -> Box<dyn KeyColumn> {
        let outer = &self.outer;
        let mut nested = |slot: usize| fetch(slot).map(|parent| outer(&parent));
        self.inner.decorate_with(len, &mut nested)
    }
}

/// One ordering rule.
pub(crate) struct Step<T> {
    pub(crate) key: Arc<dyn KeyCompare<T>>,
    pub(crate) direction: Direction,
    pub(crate) predicate: Option<PredicateFn<T>>,
}

impl<T> Clone for Step<T> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
            direction: self.direction,
            predicate: self.predicate.clone(),
        }
    }
}

impl<T: 'static> Step<T> {
    /// `true` when the step applies to the pair.
    #[inline]
    pub(crate) fn accepts(&self, a: &T, b: &T) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(a) && predicate(b),
            None => true,
        }
    }

    /// Compares a pair under this step alone. Pairs the predicate rejects tie.
    #[inline]
    pub(crate) fn compare(&self, a: &T, b: &T) -> Ordering {
        if !self.accepts(a, b) {
            return Ordering::Equal;
        }
        self.direction.apply(self.key.compare(a, b))
    }

    pub(crate) fn reversed(&self) -> Self {
        Self {
            direction: self.direction.reverse(),
            ..self.clone()
        }
    }

    /// The same step, additionally requiring `guard` for both elements.
    pub(crate) fn guarded(&self, guard: &PredicateFn<T>) -> Self {
        let guard = Arc::clone(guard);
        let predicate: PredicateFn<T> = match &self.predicate {
            Some(existing) => {
                let existing = Arc::clone(existing);
                Arc::new(move |v: &T| existing(v) && guard(v))
            }
            None => guard,
        };
        Self {
            predicate: Some(predicate),
            ..self.clone()
        }
    }

    /// The same step applied to `outer(parent)`.
    pub(crate) fn lift<P: 'static>(&self, outer: &ProjectFn<P, T>) -> Step<P> {
        let predicate = self.predicate.as_ref().map(|predicate| {
            let predicate = Arc::clone(predicate);
            let outer = Arc::clone(outer);
            Arc::new(move |parent: &P| predicate(&outer(parent))) as PredicateFn<P>
        });
        Step {
            key: Arc::new(Projected {
                outer: Arc::clone(outer),
                inner: Arc::clone(&self.key),
            }),
            direction: self.direction,
            predicate,
        }
    }
}
