//! Reference distance computations between two byte strings.
//!
//! These are straightforward full-table implementations, useful on their own
//! for one-off comparisons and used by the test suites as oracles for the
//! incremental engine in [`crate::search`]: the searches must agree with
//! these functions on every key they enumerate.

use crate::search::costs::{Cost, Costs, EditOperations};

/// Standard Levenshtein distance with unit costs.
///
/// # Example
///
/// ```rust
/// use dawg_search::distance::standard_distance;
///
/// assert_eq!(standard_distance(b"kitten", b"sitting"), 3);
/// assert_eq!(standard_distance(b"test", b"test"), 0);
/// ```
pub fn standard_distance(source: &[u8], target: &[u8]) -> usize {
    let m = source.len();
    let n = target.len();
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;
        for j in 1..=n {
            let cost = usize::from(source[i - 1] != target[j - 1]);
            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Levenshtein distance with adjacent transpositions (optimal string
/// alignment), unit costs.
///
/// Each adjacent pair is swapped at most once, so this can exceed the
/// unrestricted Damerau distance the similarity search computes (`"axb"` to
/// `"ba"` is 3 here but 2 there); for the engine's metric use
/// [`weighted_distance`] with transposition enabled.
///
/// # Example
///
/// ```rust
/// use dawg_search::distance::transposition_distance;
///
/// assert_eq!(transposition_distance(b"ab", b"ba"), 1);
/// assert_eq!(transposition_distance(b"test", b"tset"), 1);
/// ```
pub fn transposition_distance(source: &[u8], target: &[u8]) -> usize {
    let m = source.len();
    let n = target.len();
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // The swap candidate reads two rows back.
    let mut two_ago = vec![0; n + 1];
    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;
        for j in 1..=n {
            let cost = usize::from(source[i - 1] != target[j - 1]);
            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);

            if i > 1
                && j > 1
                && source[i - 1] == target[j - 2]
                && source[i - 2] == target[j - 1]
            {
                curr_row[j] = curr_row[j].min(two_ago[j - 2] + 1);
            }
        }
        std::mem::swap(&mut two_ago, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Length of the longest common subsequence of two byte strings.
///
/// # Example
///
/// ```rust
/// use dawg_search::distance::lcs_length;
///
/// assert_eq!(lcs_length(b"cart", b"cat"), 3);
/// assert_eq!(lcs_length(b"dog", b"cart"), 0);
/// ```
pub fn lcs_length(a: &[u8], b: &[u8]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let n = b.len();
    let mut prev_row = vec![0usize; n + 1];
    let mut curr_row = vec![0usize; n + 1];

    for &a_i in a {
        for j in 1..=n {
            curr_row[j] = if a_i == b[j - 1] {
                prev_row[j - 1] + 1
            } else {
                curr_row[j - 1].max(prev_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Generalized weighted (Damerau-)Levenshtein distance.
///
/// `source` plays the key role (its unmatched bytes are deleted), `target`
/// the query-word role (its unmatched bytes are inserted). Optional
/// operations are taken from `ops`; costs from `costs`.
///
/// This computes the full table with no pruning, making it the oracle the
/// engine's branch-and-bound traversal is validated against.
pub fn weighted_distance(source: &[u8], target: &[u8], costs: &Costs, ops: EditOperations) -> Cost {
    let m = source.len();
    let n = target.len();
    let cols = n + 1;
    let mut d = vec![0 as Cost; (m + 1) * cols];

    for j in 1..=n {
        d[j] = d[j - 1] + costs.insert_cost(target[j - 1]);
    }

    let mut da = [0usize; 256];
    for i in 1..=m {
        let a_i = source[i - 1];
        let delete_a_i = costs.delete_cost(a_i);
        d[i * cols] = d[(i - 1) * cols] + delete_a_i;

        let mut db = 0usize;
        for j in 1..=n {
            let b_j = target[j - 1];
            let l = db;

            let mut cost;
            if b_j != a_i {
                let replace = d[(i - 1) * cols + j - 1] + costs.replace_cost(a_i, b_j);
                let insert = d[i * cols + j - 1] + costs.insert_cost(b_j);
                let delete = d[(i - 1) * cols + j] + delete_a_i;
                cost = insert.min(delete).min(replace);
            } else {
                cost = d[(i - 1) * cols + j - 1];
                if ops.transpose {
                    db = j;
                }
            }

            if ops.transpose && l >= 1 {
                let k = da[b_j as usize];
                if k >= 1 {
                    let diagonal = d[(k - 1) * cols + l - 1];
                    let deletes = d[(i - 1) * cols] - d[k * cols];
                    let inserts = d[j - 1] - d[l];
                    let swap = costs.transpose_cost(source[k - 1], a_i);
                    cost = cost.min(diagonal + deletes + swap + inserts);
                }
            }

            if ops.split && j > 1 {
                let split = d[(i - 1) * cols + j - 2]
                    + costs.split_cost(a_i, target[j - 2], target[j - 1]);
                cost = cost.min(split);
            }

            if ops.merge && i > 1 {
                let merge = d[(i - 2) * cols + j - 1]
                    + costs.merge_cost(source[i - 2], a_i, target[j - 1]);
                cost = cost.min(merge);
            }

            d[i * cols + j] = cost;
        }

        if ops.transpose {
            da[a_i as usize] = i;
        }
    }

    d[m * cols + n]
}
