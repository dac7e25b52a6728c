//! Searches over a `(Dictionary, Guide)` pair.
//!
//! All searches share one engine: a depth-first walker
//! ([`dfs::DepthFirstWalker`]) that enumerates automaton paths in the
//! guide's order and hands every step to a delegate
//! ([`dfs::TraversalDelegate`]). The delegate owns whatever incremental
//! state the search needs (a dynamic-programming row per depth, usually),
//! decides per step whether the branch is worth descending into, and
//! decides when a visited key is a match worth surfacing.
//!
//! Three delegates are provided:
//!
//! - [`CompleteSearch`] — every key extending a prefix;
//! - [`LcsSearch`] — every key whose longest common subsequence with a query
//!   word reaches a minimum length, with the subsequence reconstructed;
//! - [`SimilarSearch`] — every key within a weighted edit-distance bound of
//!   a query word, with per-operation costs ([`Costs`]) and optional
//!   transposition, split and merge edits ([`EditOperations`]).
//!
//! Searches follow a `start`/`next` protocol: `start` installs a query and
//! clears (but keeps) the scratch buffers, `next` advances to the following
//! match and returns `false` once the walk is exhausted. Accessors such as
//! `key` and `value` are only meaningful after `next` returned `true`, and
//! only until the next call.

pub mod complete;
pub mod costs;
pub mod dfs;
pub mod lcs;
pub mod matrix;
pub mod similar;

#[cfg(test)]
pub(crate) mod testutil;

pub use complete::CompleteSearch;
pub use costs::{Cost, Costs, EditOperations};
pub use dfs::{DepthFirstWalker, Step, TraversalDelegate};
pub use lcs::LcsSearch;
pub use matrix::Matrix;
pub use similar::SimilarSearch;
