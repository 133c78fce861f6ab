// File: crates/chartkit-core/src/aggregate.rs
// Summary: Group-by + reduce (count, mean, sum) and simple summary helpers.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// How a group's values collapse to one number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reducer {
    /// Number of rows in the group, valid or not.
    Count,
    /// Mean of the finite values; NaN when the group has none.
    Mean,
    /// Sum of the finite values; 0 when the group has none.
    Sum,
}

impl Reducer {
    pub fn reduce(&self, values: &[f64]) -> f64 {
        match self {
            Reducer::Count => values.len() as f64,
            Reducer::Sum => values.iter().copied().filter(|v| v.is_finite()).sum(),
            Reducer::Mean => {
                let (sum, n) = values
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                if n == 0 { f64::NAN } else { sum / n as f64 }
            }
        }
    }
}

/// One group and its reduced value. Built per render pass and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregate<K> {
    pub key: K,
    pub value: f64,
}

/// Group `rows` by `key` and reduce `value` per group. Groups appear in first-seen order.
pub fn rollup<R, K, FK, FV>(rows: &[R], key: FK, value: FV, reducer: Reducer) -> Vec<Aggregate<K>>
where
    K: Eq + Hash + Clone,
    FK: Fn(&R) -> K,
    FV: Fn(&R) -> f64,
{
    group_by(rows, key)
        .into_iter()
        .map(|(k, members)| {
            let values: Vec<f64> = members.iter().map(|r| value(r)).collect();
            Aggregate { key: k, value: reducer.reduce(&values) }
        })
        .collect()
}

/// Rows per key, keys in first-seen order.
pub fn group_by<'a, R, K, FK>(rows: &'a [R], key: FK) -> Vec<(K, Vec<&'a R>)>
where
    K: Eq + Hash + Clone,
    FK: Fn(&R) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&R>)> = Vec::new();
    for row in rows {
        let k = key(row);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(row),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![row]));
            }
        }
    }
    groups
}

/// Largest finite value, if any.
pub fn max<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().filter(|v| v.is_finite()).fold(None, |m, v| Some(m.map_or(v, |m: f64| m.max(v))))
}

/// (min, max) of the finite values, if any.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}

/// Hashable wrapper for numeric group keys. All NaNs are one key, and so are 0 and -0.
#[derive(Clone, Copy, Debug)]
pub struct FloatKey(pub f64);

impl FloatKey {
    fn bits(&self) -> u64 {
        if self.0.is_nan() {
            f64::NAN.to_bits()
        } else if self.0 == 0.0 {
            0
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool { self.bits() == other.bits() }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) { self.bits().hash(state); }
}
