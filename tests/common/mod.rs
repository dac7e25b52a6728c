//! Shared fixture: a small offline builder producing double-array
//! dictionaries and guides in the serialized layout the crate consumes.
//!
//! The packing is deliberately simple (first-fit, no suffix sharing): each
//! trie node picks a base such that every child slot is free and no two
//! nodes share a base. Base uniqueness is what keeps the bare label check
//! sound; slot freeness is what keeps states from clobbering each other.
//! Enumeration order is ascending byte order, i.e. lexicographic keys.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet, VecDeque};

use dawg_search::dictionary::{Dictionary, DictionaryUnit, Guide, GuideUnit};

#[derive(Default)]
struct TrieNode {
    children: BTreeMap<u8, usize>,
    value: Option<i32>,
}

/// Builds a dictionary and matching guide from string keys.
pub fn build_dictionary(pairs: &[(&str, i32)]) -> (Dictionary<'static>, Guide<'static>) {
    build_from_bytes(pairs.iter().map(|&(k, v)| (k.as_bytes().to_vec(), v)))
}

/// Builds a dictionary and matching guide from byte-string keys.
pub fn build_from_bytes<I>(pairs: I) -> (Dictionary<'static>, Guide<'static>)
where
    I: IntoIterator<Item = (Vec<u8>, i32)>,
{
    // Trie over the key set; later keys overwrite earlier duplicates.
    let mut nodes: Vec<TrieNode> = vec![TrieNode::default()];
    for (key, value) in pairs {
        assert!(!key.is_empty(), "keys must be non-empty");
        assert!(!key.contains(&0), "keys must not contain NUL");
        let mut cur = 0usize;
        for &byte in &key {
            let next = nodes[cur].children.get(&byte).copied();
            cur = match next {
                Some(n) => n,
                None => {
                    let n = nodes.len();
                    nodes.push(TrieNode::default());
                    nodes[cur].children.insert(byte, n);
                    n
                }
            };
        }
        nodes[cur].value = Some(value);
    }

    // Pack into the double array, breadth-first.
    let mut units = vec![DictionaryUnit::default()];
    let mut used = vec![true];
    let mut bases_taken: HashSet<u32> = HashSet::new();
    let mut pos = vec![0u32; nodes.len()];

    let mut queue = VecDeque::from([0usize]);
    while let Some(t) = queue.pop_front() {
        let s = pos[t];
        let terminal = nodes[t].value.is_some();
        let mut labels: Vec<u8> = Vec::new();
        if terminal {
            labels.push(0);
        }
        labels.extend(nodes[t].children.keys().copied());
        if labels.is_empty() {
            continue;
        }

        let base = (1u32..)
            .find(|&base| {
                let offset = base ^ s;
                if offset == 0 || offset >= DictionaryUnit::OFFSET_MAX {
                    return false;
                }
                if bases_taken.contains(&base) {
                    return false;
                }
                labels.iter().all(|&c| {
                    let slot = base ^ u32::from(c);
                    slot != 0 && !used.get(slot as usize).copied().unwrap_or(false)
                })
            })
            .expect("no representable base");
        bases_taken.insert(base);
        assert!(units[s as usize].set_offset(base ^ s));
        if terminal {
            units[s as usize].set_has_leaf();
        }

        for &c in &labels {
            let slot = (base ^ u32::from(c)) as usize;
            if slot >= units.len() {
                units.resize(slot + 1, DictionaryUnit::default());
                used.resize(slot + 1, false);
            }
            used[slot] = true;
            if c == 0 {
                units[slot].set_value(nodes[t].value.expect("terminal node"));
            } else {
                units[slot].set_label(c);
            }
        }

        for (&c, &child) in &nodes[t].children {
            pos[child] = base ^ u32::from(c);
            queue.push_back(child);
        }
    }

    // Guide: first child label per state, next sibling label per child.
    let mut children = vec![0u8; units.len()];
    let mut siblings = vec![0u8; units.len()];
    for (t, node) in nodes.iter().enumerate() {
        let labels: Vec<u8> = node.children.keys().copied().collect();
        if let Some(&first) = labels.first() {
            children[pos[t] as usize] = first;
        }
        for pair in labels.windows(2) {
            let child = node.children[&pair[0]];
            siblings[pos[child] as usize] = pair[1];
        }
    }
    let guide_units = children
        .into_iter()
        .zip(siblings)
        .map(|(child, sibling)| GuideUnit::new(child, sibling))
        .collect();

    (Dictionary::from_units(units), Guide::from_units(guide_units))
}

/// The four-key dictionary used across the scenario tests.
pub fn sample_dictionary() -> (Dictionary<'static>, Guide<'static>) {
    build_dictionary(&[("cat", 1), ("car", 2), ("cart", 3), ("dog", 4)])
}

/// Runs a similarity search to exhaustion, returning `(key, cost)` pairs in
/// enumeration order.
pub fn drain_similar(
    search: &mut dawg_search::search::SimilarSearch<'_>,
    word: &[u8],
    max_cost: dawg_search::search::Cost,
) -> Vec<(Vec<u8>, dawg_search::search::Cost)> {
    search.start(word, max_cost);
    let mut out = Vec::new();
    while search.next() {
        out.push((search.key().to_vec(), search.cost().expect("cost on match")));
    }
    out
}

/// Runs an LCS search to exhaustion, returning `(key, lcs)` pairs in
/// enumeration order.
pub fn drain_lcs(
    search: &mut dawg_search::search::LcsSearch<'_>,
    word: &[u8],
    min_length: usize,
) -> Vec<(Vec<u8>, Vec<u8>)> {
    search.start(word, min_length);
    let mut out = Vec::new();
    while search.next() {
        out.push((search.key().to_vec(), search.lcs().to_vec()));
    }
    out
}
