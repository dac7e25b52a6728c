//! Per-operation edit cost tables for the similarity search.

use rustc_hash::FxHashMap;

/// Scalar edit cost. Costs are non-negative integer weights; models with
/// fractional weights scale into integers.
pub type Cost = u32;

const DEFAULT_COST: Cost = 1;

/// Which optional edit operations a distance computation admits.
///
/// Insertion, deletion and replacement are always available; transposition
/// (adjacent swap), split (one byte matching two) and merge (two bytes
/// matching one) are opt-in, independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditOperations {
    /// Allow adjacent transpositions (Damerau-Levenshtein).
    pub transpose: bool,
    /// Allow one key byte to match two word bytes.
    pub split: bool,
    /// Allow two key bytes to match one word byte.
    pub merge: bool,
}

/// Costs keyed by a single byte, stored densely.
///
/// The table is grown lazily as specific entries are set; unset bytes fall
/// back to the scalar default.
#[derive(Clone, Debug)]
pub struct UnaryCosts {
    table: Vec<Cost>,
    default: Cost,
}

impl UnaryCosts {
    fn new() -> Self {
        UnaryCosts {
            table: Vec::new(),
            default: DEFAULT_COST,
        }
    }

    /// Cost for `key`.
    #[inline]
    pub fn get(&self, key: u8) -> Cost {
        self.table
            .get(key as usize)
            .copied()
            .unwrap_or(self.default)
    }

    /// Sets the cost for one byte.
    pub fn set(&mut self, key: u8, cost: Cost) {
        let key = key as usize;
        if key >= self.table.len() {
            let default = self.default;
            self.table.resize(key + 1, default);
        }
        self.table[key] = cost;
    }

    /// Sets the default and clears every specific entry.
    pub fn set_default(&mut self, cost: Cost) {
        self.table.clear();
        self.default = cost;
    }
}

impl Default for UnaryCosts {
    fn default() -> Self {
        UnaryCosts::new()
    }
}

/// Costs keyed by an ordered byte pair, stored sparsely.
#[derive(Clone, Debug)]
pub struct PairCosts {
    table: FxHashMap<u16, Cost>,
    default: Cost,
}

impl PairCosts {
    fn new() -> Self {
        PairCosts {
            table: FxHashMap::default(),
            default: DEFAULT_COST,
        }
    }

    #[inline]
    fn key(a: u8, b: u8) -> u16 {
        u16::from(a) << 8 | u16::from(b)
    }

    /// Cost for the pair `(a, b)`.
    #[inline]
    pub fn get(&self, a: u8, b: u8) -> Cost {
        if self.table.is_empty() {
            return self.default;
        }
        self.table
            .get(&Self::key(a, b))
            .copied()
            .unwrap_or(self.default)
    }

    /// Sets the cost for one pair.
    pub fn set(&mut self, a: u8, b: u8, cost: Cost) {
        self.table.insert(Self::key(a, b), cost);
    }

    /// Sets the default and clears every specific entry.
    pub fn set_default(&mut self, cost: Cost) {
        self.table.clear();
        self.default = cost;
    }
}

impl Default for PairCosts {
    fn default() -> Self {
        PairCosts::new()
    }
}

/// Costs keyed by an ordered byte triple, stored sparsely.
#[derive(Clone, Debug)]
pub struct TripleCosts {
    table: FxHashMap<u32, Cost>,
    default: Cost,
}

impl TripleCosts {
    fn new() -> Self {
        TripleCosts {
            table: FxHashMap::default(),
            default: DEFAULT_COST,
        }
    }

    #[inline]
    fn key(a: u8, b: u8, c: u8) -> u32 {
        u32::from(a) << 16 | u32::from(b) << 8 | u32::from(c)
    }

    /// Cost for the triple `(a, b, c)`.
    #[inline]
    pub fn get(&self, a: u8, b: u8, c: u8) -> Cost {
        if self.table.is_empty() {
            return self.default;
        }
        self.table
            .get(&Self::key(a, b, c))
            .copied()
            .unwrap_or(self.default)
    }

    /// Sets the cost for one triple.
    pub fn set(&mut self, a: u8, b: u8, c: u8, cost: Cost) {
        self.table.insert(Self::key(a, b, c), cost);
    }

    /// Sets the default and clears every specific entry.
    pub fn set_default(&mut self, cost: Cost) {
        self.table.clear();
        self.default = cost;
    }
}

impl Default for TripleCosts {
    fn default() -> Self {
        TripleCosts::new()
    }
}

/// The full cost model for [`SimilarSearch`](crate::search::SimilarSearch):
/// one table per edit operation, each defaulting to unit cost.
///
/// Insert and delete are keyed by the affected byte; replace and transpose
/// by the `(key byte, word byte)` pair; split by a key byte against two word
/// bytes; merge by two key bytes against one word byte.
#[derive(Clone, Debug, Default)]
pub struct Costs {
    insert: UnaryCosts,
    delete: UnaryCosts,
    replace: PairCosts,
    transpose: PairCosts,
    split: TripleCosts,
    merge: TripleCosts,
}

impl Costs {
    /// A cost model in which every operation costs 1.
    pub fn new() -> Self {
        Costs::default()
    }

    /// Cost of inserting `b` (a word byte unmatched by the key).
    #[inline]
    pub fn insert_cost(&self, b: u8) -> Cost {
        self.insert.get(b)
    }

    /// Cost of deleting `a` (a key byte unmatched by the word).
    #[inline]
    pub fn delete_cost(&self, a: u8) -> Cost {
        self.delete.get(a)
    }

    /// Cost of replacing key byte `a` with word byte `b`.
    #[inline]
    pub fn replace_cost(&self, a: u8, b: u8) -> Cost {
        self.replace.get(a, b)
    }

    /// Cost of transposing adjacent key bytes `a` then `b`.
    #[inline]
    pub fn transpose_cost(&self, a: u8, b: u8) -> Cost {
        self.transpose.get(a, b)
    }

    /// Cost of matching key byte `a` against word bytes `b1 b2`.
    #[inline]
    pub fn split_cost(&self, a: u8, b1: u8, b2: u8) -> Cost {
        self.split.get(a, b1, b2)
    }

    /// Cost of matching key bytes `a1 a2` against word byte `b`.
    #[inline]
    pub fn merge_cost(&self, a1: u8, a2: u8, b: u8) -> Cost {
        self.merge.get(a1, a2, b)
    }

    /// Sets the insertion cost for one byte.
    pub fn set_insert_cost(&mut self, b: u8, cost: Cost) {
        self.insert.set(b, cost);
    }

    /// Sets the default insertion cost, clearing per-byte entries.
    pub fn set_default_insert_cost(&mut self, cost: Cost) {
        self.insert.set_default(cost);
    }

    /// Sets the deletion cost for one byte.
    pub fn set_delete_cost(&mut self, a: u8, cost: Cost) {
        self.delete.set(a, cost);
    }

    /// Sets the default deletion cost, clearing per-byte entries.
    pub fn set_default_delete_cost(&mut self, cost: Cost) {
        self.delete.set_default(cost);
    }

    /// Sets the replacement cost for one `(key, word)` byte pair.
    pub fn set_replace_cost(&mut self, a: u8, b: u8, cost: Cost) {
        self.replace.set(a, b, cost);
    }

    /// Sets the default replacement cost, clearing per-pair entries.
    pub fn set_default_replace_cost(&mut self, cost: Cost) {
        self.replace.set_default(cost);
    }

    /// Sets the transposition cost for one adjacent key byte pair.
    pub fn set_transpose_cost(&mut self, a: u8, b: u8, cost: Cost) {
        self.transpose.set(a, b, cost);
    }

    /// Sets the default transposition cost, clearing per-pair entries.
    pub fn set_default_transpose_cost(&mut self, cost: Cost) {
        self.transpose.set_default(cost);
    }

    /// Sets the split cost for one key byte against two word bytes.
    pub fn set_split_cost(&mut self, a: u8, b1: u8, b2: u8, cost: Cost) {
        self.split.set(a, b1, b2, cost);
    }

    /// Sets the default split cost, clearing per-triple entries.
    pub fn set_default_split_cost(&mut self, cost: Cost) {
        self.split.set_default(cost);
    }

    /// Sets the merge cost for two key bytes against one word byte.
    pub fn set_merge_cost(&mut self, a1: u8, a2: u8, b: u8, cost: Cost) {
        self.merge.set(a1, a2, b, cost);
    }

    /// Sets the default merge cost, clearing per-triple entries.
    pub fn set_default_merge_cost(&mut self, cost: Cost) {
        self.merge.set_default(cost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_defaults_to_unit_cost() {
        let costs = Costs::new();
        assert_eq!(costs.insert_cost(b'x'), 1);
        assert_eq!(costs.delete_cost(b'x'), 1);
        assert_eq!(costs.replace_cost(b'a', b'b'), 1);
        assert_eq!(costs.transpose_cost(b'a', b'b'), 1);
        assert_eq!(costs.split_cost(b'a', b'b', b'c'), 1);
        assert_eq!(costs.merge_cost(b'a', b'b', b'c'), 1);
    }

    #[test]
    fn specific_entries_override_the_default() {
        let mut costs = Costs::new();
        costs.set_delete_cost(b't', 5);
        assert_eq!(costs.delete_cost(b't'), 5);
        assert_eq!(costs.delete_cost(b'u'), 1);

        costs.set_replace_cost(b'a', b'e', 0);
        assert_eq!(costs.replace_cost(b'a', b'e'), 0);
        assert_eq!(costs.replace_cost(b'e', b'a'), 1);
    }

    #[test]
    fn setting_a_default_clears_specific_entries() {
        let mut costs = Costs::new();
        costs.set_insert_cost(b'q', 9);
        costs.set_default_insert_cost(2);
        assert_eq!(costs.insert_cost(b'q'), 2);
        assert_eq!(costs.insert_cost(b'r'), 2);

        costs.set_split_cost(b'a', b'b', b'c', 7);
        costs.set_default_split_cost(3);
        assert_eq!(costs.split_cost(b'a', b'b', b'c'), 3);
    }

    #[test]
    fn unary_table_grows_lazily_with_current_default() {
        let mut unary = UnaryCosts::default();
        unary.set_default(4);
        unary.set(10, 2);
        assert_eq!(unary.get(10), 2);
        assert_eq!(unary.get(9), 4);
        assert_eq!(unary.get(200), 4);
    }
}
