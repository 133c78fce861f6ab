// File: crates/chartkit-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }

    /// Linear interpolation between two rectangles; `t` in [0, 1].
    pub fn lerp(&self, to: &Rect, t: f64) -> Rect {
        Rect {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            width: lerp(self.width, to.width, t),
            height: lerp(self.height, to.height, t),
        }
    }
}

/// 2D affine transform restricted to what the charts need: translate then rotate (degrees).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub translate: (f64, f64),
    pub rotate: f64,
}

impl Transform {
    pub const fn translate(x: f64, y: f64) -> Self {
        Self { translate: (x, y), rotate: 0.0 }
    }
    pub const fn rotate(degrees: f64) -> Self {
        Self { translate: (0.0, 0.0), rotate: degrees }
    }
    pub fn is_identity(&self) -> bool {
        self.translate == (0.0, 0.0) && self.rotate == 0.0
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Compact number formatting for SVG attributes and path data (no trailing `.0`).
pub fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.3}", v);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" { "0".to_string() } else { s.to_string() }
    }
}
