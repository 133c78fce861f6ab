// File: crates/chartkit-core/src/join.rs
// Summary: Enter/update/exit reconciliation between a previous and a current keyed set.
//
// The diff knows nothing about surfaces: callers map `entered` onto new elements,
// `updated` onto elements they keep, and `exited` onto elements they remove.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Identity used to match a visual element with the record it was drawn from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Positional binding: element i belongs to record i.
    Index(usize),
    /// Binding by a record field, e.g. the category name.
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(n) => f.write_str(n),
        }
    }
}

/// Result of a three-way diff. All lists are disjoint and sorted by their own index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Join {
    /// Indices into `current` with no matching previous key.
    pub entered: Vec<usize>,
    /// `(previous index, current index)` pairs that share a key.
    pub updated: Vec<(usize, usize)>,
    /// Indices into `previous` whose key no longer appears.
    pub exited: Vec<usize>,
}

impl Join {
    pub fn is_unchanged(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Diff two keyed sequences.
///
/// Duplicate keys: only the first previous occurrence can be matched, later
/// previous duplicates exit. Once a previous key is matched, later current
/// duplicates enter.
pub fn diff<K: Eq + Hash>(previous: &[K], current: &[K]) -> Join {
    let mut by_key: HashMap<&K, usize> = HashMap::with_capacity(previous.len());
    let mut exited = Vec::new();
    for (i, k) in previous.iter().enumerate() {
        if by_key.contains_key(k) {
            exited.push(i);
        } else {
            by_key.insert(k, i);
        }
    }

    let mut entered = Vec::new();
    let mut updated = Vec::new();
    for (j, k) in current.iter().enumerate() {
        match by_key.remove(k) {
            Some(i) => updated.push((i, j)),
            None => entered.push(j),
        }
    }

    exited.extend(by_key.into_values());
    exited.sort_unstable();
    Join { entered, updated, exited }
}

/// Positional keys `0..n`, the binding used when no key function is given.
pub fn index_keys(n: usize) -> Vec<Key> {
    (0..n).map(Key::Index).collect()
}
