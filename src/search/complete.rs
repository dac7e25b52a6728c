//! Prefix completion over the guide's enumeration order.

use crate::dictionary::{Dictionary, Guide};
use crate::search::dfs::{DepthFirstWalker, Step, TraversalDelegate};

/// Emits every terminal state, exploring everything.
struct EnumerateAll;

impl TraversalDelegate for EnumerateAll {
    fn on_step(&mut self, _path: &[u8], is_terminal: bool) -> Step {
        Step {
            descend: true,
            emit: is_terminal,
        }
    }

    fn on_ascend(&mut self, _path: &[u8]) {}
}

/// Enumerates every key starting with a given prefix, in guide order.
///
/// The prefix itself is reported first when it is a key. An unmatched
/// prefix yields no results.
///
/// ```rust,ignore
/// let mut search = CompleteSearch::new(&dict, &guide);
/// search.start(b"car");
/// while search.next() {
///     println!("{:?} = {:?}", search.key(), search.value());
/// }
/// ```
pub struct CompleteSearch<'a> {
    dict: &'a Dictionary<'a>,
    walker: DepthFirstWalker<'a>,
    prefix: Vec<u8>,
    key: Vec<u8>,
    value: Option<i32>,
    pending_prefix: bool,
    anchor: u32,
    exhausted: bool,
}

impl<'a> CompleteSearch<'a> {
    /// Creates a search over a dictionary and its guide.
    pub fn new(dict: &'a Dictionary<'a>, guide: &'a Guide<'a>) -> Self {
        CompleteSearch {
            dict,
            walker: DepthFirstWalker::new(dict, guide),
            prefix: Vec::new(),
            key: Vec::new(),
            value: None,
            pending_prefix: false,
            anchor: 0,
            exhausted: true,
        }
    }

    /// Installs a query: enumerate every key extending `prefix` (the empty
    /// prefix enumerates the whole dictionary).
    pub fn start(&mut self, prefix: &[u8]) {
        self.prefix.clear();
        self.prefix.extend_from_slice(prefix);
        self.key.clear();
        self.value = None;
        match self.dict.follow_bytes(self.dict.root(), prefix) {
            Some(anchor) => {
                self.anchor = anchor;
                self.pending_prefix = self.dict.has_value(anchor);
                self.exhausted = false;
                self.walker.start_from(anchor, prefix.len() + 8);
            }
            None => {
                self.pending_prefix = false;
                self.exhausted = true;
            }
        }
    }

    /// Advances to the next completion; `false` when exhausted.
    pub fn next(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if self.pending_prefix {
            self.pending_prefix = false;
            self.key.clear();
            self.key.extend_from_slice(&self.prefix);
            self.value = self.dict.value(self.anchor);
            return true;
        }
        if self.walker.next(&mut EnumerateAll) {
            self.key.clear();
            self.key.extend_from_slice(&self.prefix);
            self.key.extend_from_slice(self.walker.path());
            self.value = self.walker.value();
            true
        } else {
            self.exhausted = true;
            false
        }
    }

    /// The completed key, prefix included. Valid until the next
    /// `next`/`start`.
    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The completed key's value.
    #[inline]
    pub fn value(&self) -> Option<i32> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testutil::tiny_fixture;

    fn collect(search: &mut CompleteSearch<'_>, prefix: &[u8]) -> Vec<(Vec<u8>, Option<i32>)> {
        search.start(prefix);
        let mut out = Vec::new();
        while search.next() {
            out.push((search.key().to_vec(), search.value()));
        }
        out
    }

    #[test]
    fn empty_prefix_enumerates_everything() {
        let (dict, guide) = tiny_fixture();
        let mut search = CompleteSearch::new(&dict, &guide);
        assert_eq!(
            collect(&mut search, b""),
            vec![(b"ab".to_vec(), Some(7)), (b"ac".to_vec(), Some(3))]
        );
    }

    #[test]
    fn prefix_narrows_the_enumeration() {
        let (dict, guide) = tiny_fixture();
        let mut search = CompleteSearch::new(&dict, &guide);
        assert_eq!(collect(&mut search, b"a"), vec![
            (b"ab".to_vec(), Some(7)),
            (b"ac".to_vec(), Some(3)),
        ]);
        assert_eq!(collect(&mut search, b"ab"), vec![(b"ab".to_vec(), Some(7))]);
    }

    #[test]
    fn unmatched_prefix_yields_nothing() {
        let (dict, guide) = tiny_fixture();
        let mut search = CompleteSearch::new(&dict, &guide);
        assert_eq!(collect(&mut search, b"zz"), vec![]);
        // The search remains usable afterwards.
        assert_eq!(collect(&mut search, b"ac"), vec![(b"ac".to_vec(), Some(3))]);
    }
}
