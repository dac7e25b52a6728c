//! # dawg-search
//!
//! Fast approximate string matching over dictionaries packed as
//! double-array DAWGs (minimal acyclic finite-state automata).
//!
//! A [`Dictionary`](dictionary::Dictionary) is a read-only array of 32-bit
//! units produced offline by a builder; transitions are addressed with XOR
//! arithmetic, so exact lookup costs one array probe per input byte. A
//! [`Guide`](dictionary::Guide) is a sidecar array giving each state its
//! first child label and next sibling label, which fixes a deterministic
//! enumeration order over all keys. On top of the two sit three searches:
//!
//! - [`CompleteSearch`](search::CompleteSearch) enumerates every key with a
//!   given prefix;
//! - [`LcsSearch`](search::LcsSearch) enumerates every key sharing a longest
//!   common subsequence of at least a given length with a query word;
//! - [`SimilarSearch`](search::SimilarSearch) enumerates every key within a
//!   weighted (Damerau-)Levenshtein cost bound of a query word, with
//!   branch-and-bound pruning against the running DP rows.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dawg_search::prelude::*;
//!
//! let bytes = std::fs::read("dictionary.dawg")?;
//! let (dict, rest) = Dictionary::map(&bytes)?;
//! let (guide, _) = Guide::map(rest)?;
//!
//! let mut search = SimilarSearch::new(&dict, &guide);
//! search.start(b"levenstein", 2);
//! while search.next() {
//!     println!("{:?} at cost {:?}", search.key(), search.cost());
//! }
//! ```
//!
//! Dictionaries and guides are immutable after construction and may be shared
//! freely across threads; each search instance owns its own scratch state and
//! serves one query at a time.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dictionary;
pub mod distance;
pub mod search;
pub mod serialization;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::dictionary::{Dictionary, DictionaryUnit, Guide, GuideUnit};
    pub use crate::search::{
        CompleteSearch, Cost, Costs, EditOperations, LcsSearch, SimilarSearch,
    };
    pub use crate::serialization::SerializationError;
}
