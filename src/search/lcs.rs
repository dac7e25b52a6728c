//! Longest-common-subsequence search.

use crate::dictionary::{Dictionary, Guide};
use crate::search::dfs::{DepthFirstWalker, Step, TraversalDelegate};
use crate::search::matrix::Matrix;

/// Enumerates every key whose longest common subsequence with a query word
/// reaches a minimum length, in guide order, reconstructing the subsequence
/// for each match.
///
/// The classic LCS table is computed incrementally: the walker's depth is
/// the row index, so entering a state fills exactly one row from the row
/// above, and retreating simply abandons rows. LCS length never shrinks as
/// the path grows, so there is no sound prune and every branch is explored.
///
/// ```rust,ignore
/// let mut search = LcsSearch::new(&dict, &guide);
/// search.start(b"cart", 3);
/// while search.next() {
///     println!("{:?} shares {:?}", search.key(), search.lcs());
/// }
/// ```
pub struct LcsSearch<'a> {
    walker: DepthFirstWalker<'a>,
    state: LcsState,
}

struct LcsState {
    word: Vec<u8>,
    table: Matrix<u32>,
    min_length: u32,
    result: Vec<u8>,
}

impl LcsState {
    /// Rebuilds `result` by walking the table back from `(path.len(), |word|)`.
    fn backtrack(&mut self, path: &[u8]) {
        let mut i = path.len();
        let mut j = self.table.columns() - 1;
        let expected = self.table.row(i)[j];

        self.result.clear();
        while i > 0 && j > 0 {
            if path[i - 1] == self.word[j - 1] {
                self.result.push(path[i - 1]);
                i -= 1;
                j -= 1;
            } else if self.table.row(i)[j - 1] > self.table.row(i - 1)[j] {
                j -= 1;
            } else {
                i -= 1;
            }
        }
        self.result.reverse();
        debug_assert_eq!(self.result.len() as u32, expected);
    }
}

impl TraversalDelegate for LcsState {
    fn on_step(&mut self, path: &[u8], is_terminal: bool) -> Step {
        let i = path.len();
        let a_i = path[i - 1];
        let columns = self.table.columns();

        self.table.allocate(i);
        let (before, row) = self.table.split_at_row(i);
        let row_prev = &before[(i - 1) * columns..];

        row[0] = 0;
        for j in 1..columns {
            row[j] = if a_i == self.word[j - 1] {
                row_prev[j - 1] + 1
            } else {
                row[j - 1].max(row_prev[j])
            };
        }
        let lcs_len = row[columns - 1];

        if is_terminal && lcs_len >= self.min_length {
            self.backtrack(path);
            return Step {
                descend: true,
                emit: true,
            };
        }
        Step {
            descend: true,
            emit: false,
        }
    }

    fn on_ascend(&mut self, _path: &[u8]) {}
}

impl<'a> LcsSearch<'a> {
    /// Creates a search over a dictionary and its guide.
    pub fn new(dict: &'a Dictionary<'a>, guide: &'a Guide<'a>) -> Self {
        LcsSearch {
            walker: DepthFirstWalker::new(dict, guide),
            state: LcsState {
                word: Vec::new(),
                table: Matrix::new(),
                min_length: 0,
                result: Vec::new(),
            },
        }
    }

    /// Installs a query: match every key sharing an LCS of at least
    /// `min_length` with `word`. Scratch buffers are cleared and reused.
    pub fn start(&mut self, word: &[u8], min_length: usize) {
        let state = &mut self.state;
        state.word.clear();
        state.word.extend_from_slice(word);
        state.min_length = u32::try_from(min_length).unwrap_or(u32::MAX);
        state.result.clear();
        state.result.reserve(word.len());

        state.table.set_columns(word.len() + 1);
        state.table.allocate(0).fill(0);

        self.walker.start(word.len() * 2 + 8);
    }

    /// Advances to the next match; `false` when exhausted.
    pub fn next(&mut self) -> bool {
        self.walker.next(&mut self.state)
    }

    /// The matched key. Valid until the next `next`/`start`.
    #[inline]
    pub fn key(&self) -> &[u8] {
        self.walker.path()
    }

    /// The matched key's value.
    #[inline]
    pub fn value(&self) -> Option<i32> {
        self.walker.value()
    }

    /// The longest common subsequence of the matched key and the query
    /// word. Valid until the next `next`/`start`.
    #[inline]
    pub fn lcs(&self) -> &[u8] {
        &self.state.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testutil::tiny_fixture;

    #[test]
    fn finds_keys_sharing_a_subsequence() {
        let (dict, guide) = tiny_fixture();
        let mut search = LcsSearch::new(&dict, &guide);

        search.start(b"ab", 2);
        assert!(search.next());
        assert_eq!(search.key(), b"ab");
        assert_eq!(search.lcs(), b"ab");
        assert_eq!(search.value(), Some(7));
        assert!(!search.next());
    }

    #[test]
    fn shorter_threshold_matches_more_keys() {
        let (dict, guide) = tiny_fixture();
        let mut search = LcsSearch::new(&dict, &guide);

        search.start(b"ab", 1);
        let mut seen = Vec::new();
        while search.next() {
            seen.push((search.key().to_vec(), search.lcs().to_vec()));
        }
        assert_eq!(
            seen,
            vec![
                (b"ab".to_vec(), b"ab".to_vec()),
                (b"ac".to_vec(), b"a".to_vec()),
            ]
        );
    }

    #[test]
    fn search_is_restartable() {
        let (dict, guide) = tiny_fixture();
        let mut search = LcsSearch::new(&dict, &guide);

        search.start(b"ab", 2);
        while search.next() {}

        search.start(b"ac", 2);
        assert!(search.next());
        assert_eq!(search.key(), b"ac");
        assert_eq!(search.lcs(), b"ac");
        assert!(!search.next());
    }
}
