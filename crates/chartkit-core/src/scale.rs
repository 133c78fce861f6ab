// File: crates/chartkit-core/src/scale.rs
// Summary: Scale strategy trait with band (categorical) and linear (continuous) variants,
// plus an ordinal scale for categorical colors.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::ticks;

/// One axis tick: pixel position along the scale's range and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Domain -> pixel mapping shared by every positional scale.
pub trait Scale<T: ?Sized> {
    type Domain;

    fn domain(&self) -> &Self::Domain;
    fn set_domain(&mut self, domain: Self::Domain);
    fn range(&self) -> (f64, f64);
    fn set_range(&mut self, range: (f64, f64));
    /// Pixel for `value`, or `None` when the value lies outside what the scale can place
    /// (unknown category, non-finite number).
    fn map(&self, value: &T) -> Option<f64>;
    /// Tick positions and labels for an axis; `count` is a hint for continuous scales.
    fn ticks(&self, count: usize) -> Vec<Tick>;
}

/// Ordered categorical scale: equal-width bands with inner/outer padding.
#[derive(Clone, Debug)]
pub struct BandScale<K> {
    domain: Vec<K>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    // derived by `rescale`
    step: f64,
    bandwidth: f64,
    start: f64,
}

impl<K: Clone + Eq + Hash> BandScale<K> {
    pub fn new() -> Self {
        let mut s = Self {
            domain: Vec::new(),
            range: (0.0, 1.0),
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            step: 0.0,
            bandwidth: 0.0,
            start: 0.0,
        };
        s.rescale();
        s
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self.rescale();
        self
    }

    /// Set inner and outer padding together (fraction of the step).
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.set_padding(padding);
        self
    }

    pub fn with_domain<I: IntoIterator<Item = K>>(mut self, values: I) -> Self {
        self.assign_domain(values);
        self
    }

    /// Duplicates collapse; the first occurrence fixes each category's position.
    fn assign_domain<I: IntoIterator<Item = K>>(&mut self, values: I) {
        let mut seen = HashSet::new();
        self.domain = values.into_iter().filter(|v| seen.insert(v.clone())).collect();
        self.rescale();
    }

    pub fn set_padding(&mut self, padding: f64) {
        self.padding_inner = padding.min(1.0);
        self.padding_outer = padding;
        self.rescale();
    }

    pub fn padding_inner(&self) -> f64 { self.padding_inner }
    pub fn padding_outer(&self) -> f64 { self.padding_outer }

    /// Width of every band.
    pub fn bandwidth(&self) -> f64 { self.bandwidth }
    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 { self.step }

    fn index_of(&self, value: &K) -> Option<usize> {
        self.domain.iter().position(|d| d == value)
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let reverse = r1 < r0;
        let (mut start, stop) = if reverse { (r1, r0) } else { (r0, r1) };
        let step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        start += (stop - start - step * (n - self.padding_inner)) * self.align;
        self.step = step;
        self.bandwidth = step * (1.0 - self.padding_inner);
        self.start = if reverse { start + step * (n - 1.0).max(0.0) } else { start };
    }
}

impl<K: Clone + Eq + Hash> Default for BandScale<K> {
    fn default() -> Self { Self::new() }
}

impl<K: Clone + Eq + Hash + Display> Scale<K> for BandScale<K> {
    type Domain = Vec<K>;

    fn domain(&self) -> &Vec<K> { &self.domain }

    fn set_domain(&mut self, values: Vec<K>) {
        self.assign_domain(values);
    }

    fn range(&self) -> (f64, f64) { self.range }

    fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
        self.rescale();
    }

    fn map(&self, value: &K) -> Option<f64> {
        let i = self.index_of(value)? as f64;
        let reverse = self.range.1 < self.range.0;
        Some(if reverse { self.start - self.step * i } else { self.start + self.step * i })
    }

    /// One tick per category, centred in its band less the half-pixel the axis adds
    /// when it translates each tick.
    fn ticks(&self, _count: usize) -> Vec<Tick> {
        let offset = (self.bandwidth - 1.0).max(0.0) / 2.0;
        self.domain
            .iter()
            .filter_map(|d| self.map(d).map(|p| Tick { position: p + offset, label: d.to_string() }))
            .collect()
    }
}

/// Continuous scale mapping [d0, d1] linearly onto [r0, r1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self { domain: (0.0, 1.0), range: (0.0, 1.0) }
    }

    pub fn with_domain(mut self, d0: f64, d1: f64) -> Self {
        self.domain = (d0, d1);
        self
    }

    pub fn with_range(mut self, r0: f64, r1: f64) -> Self {
        self.range = (r0, r1);
        self
    }

    /// Extend the domain so both ends are round tick values.
    pub fn nice(mut self) -> Self {
        self.domain = ticks::nice(self.domain.0, self.domain.1, 10);
        self
    }

    /// Label formatter matching the spacing of `ticks(count)`.
    pub fn tick_format(&self, count: usize) -> impl Fn(f64) -> String {
        let step = ticks::tick_step(self.domain.0, self.domain.1, count);
        let precision = ticks::precision_fixed(step);
        move |v| ticks::format_grouped(v, precision)
    }

    /// Map without the finiteness check; degenerate domains map to the range midpoint.
    pub fn map_raw(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 || span.is_nan() { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }
}

impl Default for LinearScale {
    fn default() -> Self { Self::new() }
}

impl Scale<f64> for LinearScale {
    type Domain = (f64, f64);

    fn domain(&self) -> &(f64, f64) { &self.domain }
    fn set_domain(&mut self, domain: (f64, f64)) { self.domain = domain; }
    fn range(&self) -> (f64, f64) { self.range }
    fn set_range(&mut self, range: (f64, f64)) { self.range = range; }

    fn map(&self, value: &f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let px = self.map_raw(*value);
        px.is_finite().then_some(px)
    }

    fn ticks(&self, count: usize) -> Vec<Tick> {
        let fmt = self.tick_format(count);
        ticks::ticks(self.domain.0, self.domain.1, count)
            .into_iter()
            .map(|v| Tick { position: self.map_raw(v), label: fmt(v) })
            .collect()
    }
}

/// Categorical -> value lookup with an implicit, growing domain; the range cycles.
#[derive(Clone, Debug)]
pub struct OrdinalScale<K, V> {
    domain: Vec<K>,
    range: Vec<V>,
}

impl<K: Clone + Eq, V: Clone> OrdinalScale<K, V> {
    pub fn new(range: impl Into<Vec<V>>) -> Self {
        Self { domain: Vec::new(), range: range.into() }
    }

    pub fn with_domain<I: IntoIterator<Item = K>>(mut self, values: I) -> Self {
        for v in values {
            if !self.domain.contains(&v) {
                self.domain.push(v);
            }
        }
        self
    }

    pub fn domain(&self) -> &[K] { &self.domain }

    /// Value for `key`; unseen keys are appended to the domain.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if self.range.is_empty() {
            return None;
        }
        let i = match self.domain.iter().position(|d| d == key) {
            Some(i) => i,
            None => {
                self.domain.push(key.clone());
                self.domain.len() - 1
            }
        };
        self.range.get(i % self.range.len()).cloned()
    }
}
