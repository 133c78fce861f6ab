// File: crates/chartkit-core/src/transition.rs
// Summary: Timed, eased transitions recorded on surface nodes and sampled on demand.

use crate::geometry::{clamp, Rect};

/// Default transition length for bar updates.
pub const DEFAULT_DURATION_MS: f64 = 500.0;
/// Default per-element stagger for bar updates.
pub const DEFAULT_STAGGER_MS: f64 = 5.0;

/// Timing of one element's transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub delay_ms: f64,
    pub duration_ms: f64,
}

impl Transition {
    pub const fn new(delay_ms: f64, duration_ms: f64) -> Self {
        Self { delay_ms, duration_ms }
    }

    /// Transition for the `index`-th element of a staggered group.
    pub fn staggered(index: usize, stagger_ms: f64, duration_ms: f64) -> Self {
        Self::new(index as f64 * stagger_ms, duration_ms)
    }

    /// Time at which the element reaches its target.
    pub fn end_ms(&self) -> f64 { self.delay_ms + self.duration_ms }

    /// Eased progress in [0, 1] at `elapsed_ms` since the transition group started.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return if elapsed_ms >= self.delay_ms { 1.0 } else { 0.0 };
        }
        let t = clamp((elapsed_ms - self.delay_ms) / self.duration_ms, 0.0, 1.0);
        ease_cubic_in_out(t)
    }
}

/// Symmetric cubic easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Rectangle geometry moving from `from` to `to` under `transition`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: Rect,
    pub to: Rect,
    pub transition: Transition,
}

impl Tween {
    pub fn sample(&self, elapsed_ms: f64) -> Rect {
        self.from.lerp(&self.to, self.transition.progress(elapsed_ms))
    }
}
