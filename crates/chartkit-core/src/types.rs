// File: crates/chartkit-core/src/types.rs
// Summary: Shared types and constants (surface sizes, margins, text anchors).

/// Default surface width in pixels for the reusable bar chart.
pub const WIDTH: f64 = 1000.0;
/// Default surface height in pixels for the reusable bar chart.
pub const HEIGHT: f64 = 600.0;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Create new margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }

    /// Inner drawing area left after subtracting the margins from a container.
    pub fn inner_size(&self, container_width: f64, container_height: f64) -> (f64, f64) {
        (container_width - self.hsum(), container_height - self.vsum())
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(70.0, 50.0, 100.0, 50.0)
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}
