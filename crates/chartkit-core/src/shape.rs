// File: crates/chartkit-core/src/shape.rs
// Summary: Path generators for pie slices and polylines.

use std::f64::consts::{PI, TAU};

use crate::geometry::fmt_num as fmt;

/// Angular extent of one pie slice. Angles are radians, clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    /// Position of the value in the input.
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Lay out `values` around a full circle. Slices are placed in descending value order
/// (ties keep input order), but returned in input order.
pub fn pie(values: &[f64]) -> Vec<PieSlice> {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let sum: f64 = values.iter().copied().map(clean).sum();
    let k = if sum > 0.0 { TAU / sum } else { 0.0 };

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        clean(values[b]).partial_cmp(&clean(values[a])).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut slices = vec![PieSlice { index: 0, value: 0.0, start_angle: 0.0, end_angle: 0.0 }; values.len()];
    let mut a0 = 0.0;
    for i in order {
        let a1 = a0 + clean(values[i]) * k;
        slices[i] = PieSlice { index: i, value: values[i], start_angle: a0, end_angle: a1 };
        a0 = a1;
    }
    slices
}

/// Annular sector generator (inner radius 0 gives a pie wedge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Arc {
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self { inner_radius, outer_radius }
    }

    fn point(r: f64, angle: f64) -> (f64, f64) {
        (r * angle.sin(), -r * angle.cos())
    }

    /// SVG path for `slice`, centred on the origin.
    pub fn path(&self, slice: &PieSlice) -> String {
        let (r0, r1) = (self.inner_radius.max(0.0), self.outer_radius.max(0.0));
        let (a0, a1) = (slice.start_angle, slice.end_angle);
        let da = (a1 - a0).abs();
        if r1 <= 0.0 || da <= 1e-12 {
            return "M0,0Z".to_string();
        }
        let sweep = if a1 >= a0 { 1 } else { 0 };
        if da >= TAU - 1e-6 {
            let mut d = format!(
                "M0,{}A{},{},0,1,{},0,{}A{},{},0,1,{},0,{}",
                fmt(-r1), fmt(r1), fmt(r1), sweep, fmt(r1), fmt(r1), fmt(r1), sweep, fmt(-r1)
            );
            if r0 > 0.0 {
                d.push_str(&format!(
                    "M0,{}A{},{},0,1,{},0,{}A{},{},0,1,{},0,{}",
                    fmt(-r0), fmt(r0), fmt(r0), 1 - sweep, fmt(r0), fmt(r0), fmt(r0), 1 - sweep, fmt(-r0)
                ));
            }
            d.push('Z');
            return d;
        }
        let large = if da > PI { 1 } else { 0 };
        let (x0, y0) = Self::point(r1, a0);
        let (x1, y1) = Self::point(r1, a1);
        let mut d = format!(
            "M{},{}A{},{},0,{},{},{},{}",
            fmt(x0), fmt(y0), fmt(r1), fmt(r1), large, sweep, fmt(x1), fmt(y1)
        );
        if r0 > 0.0 {
            let (x2, y2) = Self::point(r0, a1);
            let (x3, y3) = Self::point(r0, a0);
            d.push_str(&format!(
                "L{},{}A{},{},0,{},{},{},{}",
                fmt(x2), fmt(y2), fmt(r0), fmt(r0), large, 1 - sweep, fmt(x3), fmt(y3)
            ));
        } else {
            d.push_str("L0,0");
        }
        d.push('Z');
        d
    }

    /// Midpoint of the slice at the mean radius; where slice labels go.
    pub fn centroid(&self, slice: &PieSlice) -> (f64, f64) {
        let r = (self.inner_radius + self.outer_radius) / 2.0;
        let a = (slice.start_angle + slice.end_angle) / 2.0 - PI / 2.0;
        (a.cos() * r, a.sin() * r)
    }
}

/// Polyline through `points`. Non-finite points split the line into separate runs.
pub fn line_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    let mut pen_down = false;
    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            pen_down = false;
            continue;
        }
        d.push(if pen_down { 'L' } else { 'M' });
        d.push_str(&fmt(x));
        d.push(',');
        d.push_str(&fmt(y));
        pen_down = true;
    }
    d
}
