//! Shared vocabulary for orderings.
//!
//! This module defines:
//! - [`Direction`]: ascending or descending, applied after a key comparison.
//! - [`KeyOptions`]: the per-key configuration accepted by [`Order::by_with`](crate::Order::by_with)
//!   and [`comparators::by`](crate::comparators::by).
//! - The boxed callable aliases shared by both layers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// A shared two-argument comparator over keys.
pub type CompareFn<K> = Arc<dyn Fn(&K, &K) -> Ordering + Send + Sync>;

/// A shared one-argument predicate over elements.
pub type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Natural three-way comparison.
///
/// Pairs that `PartialOrd` cannot order (NaN against anything) are a tie.
#[inline(always)]
pub(crate) fn natural<K: PartialOrd + ?Sized>(a: &K, b: &K) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Sort direction of a single key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Smallest key first.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "asc", alias = "ascending"))]
    Ascending,
    /// Largest key first.
    #[cfg_attr(feature = "serde", serde(rename = "desc", alias = "descending"))]
    Descending,
}

impl Direction {
    /// The direction sign: `+1` for ascending, `-1` for descending.
    pub const fn sign(self) -> i8 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }

    /// The opposite direction.
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// Applies the direction to an ascending comparison result.
    #[inline(always)]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => f.write_str("asc"),
            Direction::Descending => f.write_str("desc"),
        }
    }
}

/// Returned when text does not name a [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort direction `{input}`, expected `asc` or `desc`")]
pub struct ParseDirectionError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

/// Configuration for one key: direction, key comparator and an optional predicate.
///
/// For keys that implement `PartialOrd`, start from [`KeyOptions::default`]. For any
/// other key type, start from [`KeyOptions::compare_by`].
///
/// # Examples
///
/// ```
/// use orderly::{KeyOptions, Order};
///
/// let by_len_desc = Order::by_with(
///     |s: &String| s.len(),
///     KeyOptions::default().descending(),
/// );
///
/// let mut words = vec!["a".to_string(), "ccc".to_string(), "bb".to_string()];
/// words.sort_by(by_len_desc.comparator());
/// assert_eq!(words, vec!["ccc", "bb", "a"]);
/// ```
pub struct KeyOptions<T, K> {
    pub(crate) direction: Direction,
    pub(crate) compare: CompareFn<K>,
    pub(crate) predicate: Option<PredicateFn<T>>,
}

impl<T, K: PartialOrd + 'static> Default for KeyOptions<T, K> {
    fn default() -> Self {
        Self {
            direction: Direction::Ascending,
            compare: Arc::new(natural::<K>),
            predicate: None,
        }
    }
}

impl<T, K> KeyOptions<T, K> {
    /// Options that compare keys with `compare` instead of `PartialOrd`.
    pub fn compare_by<C>(compare: C) -> Self
    where
        C: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        Self {
            direction: Direction::Ascending,
            compare: Arc::new(compare),
            predicate: None,
        }
    }

    /// Sets the direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Shorthand for `direction(Direction::Ascending)`.
    pub fn ascending(self) -> Self {
        self.direction(Direction::Ascending)
    }

    /// Shorthand for `direction(Direction::Descending)`.
    pub fn descending(self) -> Self {
        self.direction(Direction::Descending)
    }

    /// Replaces the key comparator.
    pub fn compare<C>(mut self, compare: C) -> Self
    where
        C: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        self.compare = Arc::new(compare);
        self
    }

    /// Restricts the key to pairs where both elements satisfy `predicate`.
    ///
    /// Pairs where either element fails are a tie for this key.
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }
}

impl<T, K> Clone for KeyOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            direction: self.direction,
            compare: Arc::clone(&self.compare),
            predicate: self.predicate.clone(),
        }
    }
}

impl<T, K> fmt::Debug for KeyOptions<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyOptions")
            .field("direction", &self.direction)
            .field("predicate", &self.predicate.is_some())
            .finish_non_exhaustive()
    }
}
