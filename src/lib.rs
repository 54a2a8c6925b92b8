//! # Orderly
//!
//! `orderly` is a small declarative ordering toolkit. You describe sort precedence as a
//! list of key-extraction steps, and get back an immutable, composable [`Order`] that can:
//!
//! - **Compare**: act as a plain two-argument comparator ([`Order::compare`],
//!   [`Order::comparator`]) for `slice::sort_by` and friends.
//! - **Bulk sort**: sort whole slices with decorate-sort-undecorate ([`Order::sort`]),
//!   extracting every key once per element instead of once per comparison.
//!
//! A second, lower-level layer in [`comparators`] builds and combines plain comparator
//! closures (`reverse`, `nulls_first`, `nans_last`, `by`, `order`, `map`, `when`, ...)
//! without an intermediate `Order`.
//!
//! ## Usage
//!
//! ### Building an order
//!
//! ```rust
//! use orderly::{KeyOptions, Order};
//!
//! #[derive(Clone, Debug)]
//! struct Player {
//!     name: &'static str,
//!     score: u32,
//! }
//!
//! let leaderboard = Order::by_with(|p: &Player| p.score, KeyOptions::default().descending())
//!     .then_by(|p: &Player| p.name);
//!
//! let players = vec![
//!     Player { name: "carol", score: 7 },
//!     Player { name: "alice", score: 9 },
//!     Player { name: "bob", score: 7 },
//! ];
//!
//! let ranked = leaderboard.sort(&players);
//! let names: Vec<_> = ranked.iter().map(|p| p.name).collect();
//! assert_eq!(names, ["alice", "bob", "carol"]);
//! ```
//!
//! ### Composition
//!
//! Every composition method returns a new [`Order`]; the receiver is never modified.
//!
//! ```rust
//! use orderly::Order;
//!
//! struct Team { rank: u8 }
//! struct Player { team: Team, name: &'static str, active: bool }
//!
//! let by_rank = Order::by(|t: &Team| t.rank);
//!
//! let order = Order::when(|p: &Player| p.active, &Order::by(|p: &Player| p.name))
//!     .then_map(|p: &Player| Team { rank: p.team.rank }, &by_rank.reverse());
//!
//! let a = Player { team: Team { rank: 1 }, name: "a", active: false };
//! let b = Player { team: Team { rank: 2 }, name: "b", active: true };
//!
//! // `a` is inactive, so the name step ties and the team rank (descending) decides.
//! assert!(order.compare(&a, &b).is_gt());
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Key calls**: `O(n · s)` for `n` elements and `s` steps, instead of `O(n log n · s)`
//!   when sorting through the comparator.
//! - **Comparisons**: `O(n log n)`, each doing at most `O(s)` work on precomputed keys.
//! - **Memory Overhead**: one key column per step, a match mask per guarded step, and
//!   the index vector.
//!
//! For short slices or trivially cheap keys, `slice::sort_by(order.comparator())` can be
//! faster; the bulk sort pays off when keys are expensive to compute.

pub mod algo;
pub mod comparators;
pub mod core;
mod order;
mod step;

pub use algo::{sort, sort_indices, sort_mut};
pub use crate::core::{CompareFn, Direction, KeyOptions, ParseDirectionError, PredicateFn};
pub use order::Order;

pub mod prelude {
    pub use crate::algo::{sort, sort_indices, sort_mut};
    pub use crate::comparators;
    pub use crate::core::{Direction, KeyOptions};
    pub use crate::order::Order;
}
