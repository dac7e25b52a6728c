//! Weighted edit-distance search with branch-and-bound pruning.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::dictionary::{Dictionary, Guide};
use crate::search::costs::{Cost, Costs, EditOperations};
use crate::search::dfs::{DepthFirstWalker, Step, TraversalDelegate};
use crate::search::matrix::Matrix;

/// Enumerates every key within a weighted edit-distance bound of a query
/// word, in guide order.
///
/// The distance is generalized Damerau-Levenshtein: per-byte insertion,
/// deletion and replacement costs always apply, and transposition, split
/// (one key byte against two word bytes) and merge (two key bytes against
/// one word byte) can each be enabled independently. Costs come from a
/// [`Costs`] table; without one, every operation costs 1.
///
/// One DP row is computed per traversal depth. Because all costs are
/// non-negative, a row whose minimum already exceeds the bound proves that
/// no extension of the current path can come back under it, so the whole
/// branch is pruned.
///
/// ```rust,ignore
/// let mut search = SimilarSearch::new(&dict, &guide);
/// search.set_transpose_enabled(true);
/// search.start(b"freind", 2);
/// while search.next() {
///     println!("{:?} at cost {:?}", search.key(), search.cost());
/// }
/// ```
pub struct SimilarSearch<'a> {
    walker: DepthFirstWalker<'a>,
    state: SimilarState<'a>,
}

struct SimilarState<'a> {
    costs: Cow<'a, Costs>,
    word: Vec<u8>,
    cached_insert_cost: Vec<Cost>,
    distances: Matrix<Cost>,
    max_cost: Cost,
    found_cost: Option<Cost>,
    allow: EditOperations,
    /// Snapshot of `allow` taken at `start`; toggling mid-query must not
    /// desynchronize the rollback bookkeeping.
    active: EditOperations,
    /// Last row at which each byte was matched on the current path; the
    /// transposition recurrence reads it as `k`.
    da: Box<[u32; 256]>,
    /// Value displaced from `da` at each depth, restored on ascent.
    da_rollback: SmallVec<[u32; 32]>,
}

impl SimilarState<'_> {
    /// Fills DP row `i = path.len()` and judges the step.
    ///
    /// Monomorphized over the feature toggles so the per-cell loop carries
    /// no dead branches; `on_step` picks the variant once per step.
    fn compute_row<const TRANSPOSE: bool, const SPLIT_OR_MERGE: bool>(
        &mut self,
        path: &[u8],
        is_terminal: bool,
    ) -> Step {
        let i = path.len();
        let a_i = path[i - 1];
        let delete_a_i = self.costs.delete_cost(a_i);
        let columns = self.distances.columns();

        self.distances.allocate(i);
        let (before, row) = self.distances.split_at_row(i);
        let row_prev = &before[(i - 1) * columns..];

        row[0] = row_prev[0] + delete_a_i;

        // db: largest column of this row so far whose word byte equals a_i.
        let mut db = 0usize;
        let mut left = row[0];
        let mut smallest = left;

        for j in 1..columns {
            let b_j = self.word[j - 1];
            let l = db;

            let mut cost;
            if b_j != a_i {
                let replace = row_prev[j - 1] + self.costs.replace_cost(a_i, b_j);
                let insert = left + self.cached_insert_cost[j - 1];
                let delete = row_prev[j] + delete_a_i;
                cost = insert.min(delete).min(replace);
            } else {
                cost = row_prev[j - 1];
                if TRANSPOSE {
                    db = j;
                }
            }

            if TRANSPOSE && l >= 1 {
                let k = self.da[b_j as usize] as usize;
                if k >= 1 {
                    // d[k-1][l-1], plus deleting a[k+1..=i-1] and inserting
                    // w[l+1..=j-1]. The range sums collapse against column 0
                    // and row 0 of the matrix.
                    let diagonal = before[(k - 1) * columns + (l - 1)];
                    let deletes = row_prev[0] - before[k * columns];
                    let inserts = before[j - 1] - before[l];
                    let swap = self.costs.transpose_cost(path[k - 1], a_i);
                    cost = cost.min(diagonal + deletes + swap + inserts);
                }
            }

            if SPLIT_OR_MERGE && self.active.split && j > 1 {
                let split = row_prev[j - 2]
                    + self
                        .costs
                        .split_cost(a_i, self.word[j - 2], self.word[j - 1]);
                cost = cost.min(split);
            }

            if SPLIT_OR_MERGE && self.active.merge && i > 1 {
                let merge = before[(i - 2) * columns + (j - 1)]
                    + self.costs.merge_cost(path[i - 2], a_i, self.word[j - 1]);
                cost = cost.min(merge);
            }

            row[j] = cost;
            left = cost;
            smallest = smallest.min(cost);
        }

        let best = row[columns - 1];

        if TRANSPOSE {
            self.da_rollback.resize(i + 1, 0);
            self.da_rollback[i] = self.da[a_i as usize];
            self.da[a_i as usize] = i as u32;
        }

        let descend = smallest <= self.max_cost;
        if is_terminal && best <= self.max_cost {
            self.found_cost = Some(best);
            Step {
                descend,
                emit: true,
            }
        } else {
            self.found_cost = None;
            Step {
                descend,
                emit: false,
            }
        }
    }
}

impl TraversalDelegate for SimilarState<'_> {
    fn on_step(&mut self, path: &[u8], is_terminal: bool) -> Step {
        match (self.active.transpose, self.active.split || self.active.merge) {
            (true, true) => self.compute_row::<true, true>(path, is_terminal),
            (true, false) => self.compute_row::<true, false>(path, is_terminal),
            (false, true) => self.compute_row::<false, true>(path, is_terminal),
            (false, false) => self.compute_row::<false, false>(path, is_terminal),
        }
    }

    fn on_ascend(&mut self, path: &[u8]) {
        if self.active.transpose {
            let i = path.len();
            self.da[path[i - 1] as usize] = self.da_rollback[i];
        }
    }
}

impl<'a> SimilarSearch<'a> {
    /// Creates a search with unit costs for every operation.
    pub fn new(dict: &'a Dictionary<'a>, guide: &'a Guide<'a>) -> Self {
        SimilarSearch {
            walker: DepthFirstWalker::new(dict, guide),
            state: SimilarState {
                costs: Cow::Owned(Costs::new()),
                word: Vec::new(),
                cached_insert_cost: Vec::new(),
                distances: Matrix::new(),
                max_cost: 0,
                found_cost: None,
                allow: EditOperations::default(),
                active: EditOperations::default(),
                da: Box::new([0; 256]),
                da_rollback: SmallVec::new(),
            },
        }
    }

    /// Creates a search using a caller-owned cost table.
    pub fn with_costs(dict: &'a Dictionary<'a>, guide: &'a Guide<'a>, costs: &'a Costs) -> Self {
        let mut search = SimilarSearch::new(dict, guide);
        search.set_costs(costs);
        search
    }

    /// Replaces the cost table. Takes effect at the next `start`.
    pub fn set_costs(&mut self, costs: &'a Costs) {
        self.state.costs = Cow::Borrowed(costs);
    }

    /// Enables or disables adjacent transpositions (Damerau-Levenshtein).
    pub fn set_transpose_enabled(&mut self, enabled: bool) {
        self.state.allow.transpose = enabled;
    }

    /// Enables or disables split edits (one key byte, two word bytes).
    pub fn set_split_enabled(&mut self, enabled: bool) {
        self.state.allow.split = enabled;
    }

    /// Enables or disables merge edits (two key bytes, one word byte).
    pub fn set_merge_enabled(&mut self, enabled: bool) {
        self.state.allow.merge = enabled;
    }

    /// Enabled optional operations.
    pub fn operations(&self) -> EditOperations {
        self.state.allow
    }

    /// Installs a query: match every key whose weighted distance to `word`
    /// is at most `max_cost`. Scratch buffers are cleared and reused.
    pub fn start(&mut self, word: &[u8], max_cost: Cost) {
        let state = &mut self.state;
        state.word.clear();
        state.word.extend_from_slice(word);
        state.max_cost = max_cost;
        state.found_cost = None;
        state.active = state.allow;

        let expected_depth = word.len() * 2 + 1;
        state.distances.set_columns(word.len() + 1);
        state.distances.reserve_rows(expected_depth);

        // Row 0 holds cumulative insertion costs of word prefixes; the
        // per-byte costs are cached for the inner loop.
        state.cached_insert_cost.clear();
        state.cached_insert_cost.reserve(word.len());
        let row = state.distances.allocate(0);
        row[0] = 0;
        let mut acc = 0;
        for (j, &b) in state.word.iter().enumerate() {
            let ic = state.costs.insert_cost(b);
            state.cached_insert_cost.push(ic);
            acc += ic;
            row[j + 1] = acc;
        }

        if state.active.transpose {
            state.da.fill(0);
            state.da_rollback.clear();
            state.da_rollback.reserve(expected_depth);
        }

        self.walker.start(expected_depth);
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

    /// The matched key's distance to the query word.
    #[inline]
    pub fn cost(&self) -> Option<Cost> {
        self.state.found_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testutil::tiny_fixture;

    fn collect(search: &mut SimilarSearch<'_>, word: &[u8], max_cost: Cost) -> Vec<(Vec<u8>, Cost)> {
        search.start(word, max_cost);
        let mut out = Vec::new();
        while search.next() {
            out.push((
                search.key().to_vec(),
                search.cost().expect("cost set on match"),
            ));
        }
        out
    }

    #[test]
    fn exact_match_costs_nothing() {
        let (dict, guide) = tiny_fixture();
        let mut search = SimilarSearch::new(&dict, &guide);
        assert_eq!(collect(&mut search, b"ab", 0), vec![(b"ab".to_vec(), 0)]);
    }

    #[test]
    fn one_edit_reaches_the_sibling_key() {
        let (dict, guide) = tiny_fixture();
        let mut search = SimilarSearch::new(&dict, &guide);
        assert_eq!(
            collect(&mut search, b"ab", 1),
            vec![(b"ab".to_vec(), 0), (b"ac".to_vec(), 1)]
        );
    }

    #[test]
    fn bound_zero_excludes_neighbors() {
        let (dict, guide) = tiny_fixture();
        let mut search = SimilarSearch::new(&dict, &guide);
        assert_eq!(collect(&mut search, b"ac", 0), vec![(b"ac".to_vec(), 0)]);
    }

    #[test]
    fn empty_word_measures_key_length() {
        let (dict, guide) = tiny_fixture();
        let mut search = SimilarSearch::new(&dict, &guide);
        assert_eq!(
            collect(&mut search, b"", 2),
            vec![(b"ab".to_vec(), 2), (b"ac".to_vec(), 2)]
        );
        assert_eq!(collect(&mut search, b"", 1), vec![]);
    }

    #[test]
    fn costs_reference_survives_restart() {
        let (dict, guide) = tiny_fixture();
        let mut costs = Costs::new();
        costs.set_replace_cost(b'b', b'c', 0);
        let mut search = SimilarSearch::with_costs(&dict, &guide, &costs);

        // "ab" matched against word "ac": replacing 'b' with 'c' is free.
        assert_eq!(
            collect(&mut search, b"ac", 0),
            vec![(b"ab".to_vec(), 0), (b"ac".to_vec(), 0)]
        );
    }
}
