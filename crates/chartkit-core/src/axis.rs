// File: crates/chartkit-core/src/axis.rs
// Summary: Bottom/left axis renderer drawing a domain line plus one `g.tick` per scale tick.

use crate::geometry::fmt_num as fmt;
use crate::scale::Scale;
use crate::surface::{Element, NodeId, Surface};
use crate::theme::Color;
use crate::types::TextAnchor;

/// Axis placement relative to the plot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

/// Class on each tick group.
pub const TICK_CLASS: &str = "tick";
/// Class on the axis baseline path.
pub const DOMAIN_CLASS: &str = "domain";

#[derive(Clone, Debug)]
pub struct Axis {
    pub orient: Orient,
    pub tick_count: usize,
    pub tick_size_inner: f64,
    pub tick_size_outer: f64,
    pub tick_padding: f64,
    pub font_size: f64,
    pub color: Color,
    /// Rotation in degrees applied to tick labels, with the anchor to use when rotated.
    pub label_rotation: Option<(f64, TextAnchor)>,
}

impl Axis {
    pub fn new(orient: Orient) -> Self {
        Self {
            orient,
            tick_count: 10,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            font_size: 10.0,
            color: Color::BLACK,
            label_rotation: None,
        }
    }

    pub fn bottom() -> Self { Self::new(Orient::Bottom) }
    pub fn left() -> Self { Self::new(Orient::Left) }

    pub fn with_ticks(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    pub fn with_label_rotation(mut self, degrees: f64, anchor: TextAnchor) -> Self {
        self.label_rotation = Some((degrees, anchor));
        self
    }

    /// (Re)draw into `group`: previous domain/tick children are replaced, anything else
    /// (such as an axis title) is left alone.
    pub fn render<T, S>(&self, surface: &mut Surface, group: NodeId, scale: &S)
    where
        T: ?Sized,
        S: Scale<T>,
    {
        surface.remove_children_where(group, |n| n.has_class(TICK_CLASS) || n.has_class(DOMAIN_CLASS));

        let anchor = match self.orient {
            Orient::Bottom => TextAnchor::Middle,
            Orient::Left => TextAnchor::End,
        };
        if let Some(g) = surface.node_mut(group) {
            g.style.fill = Some(Color::TRANSPARENT);
            g.style.font_size = Some(self.font_size);
            g.style.anchor = Some(anchor);
        }

        let (r0, r1) = scale.range();
        let outer = self.tick_size_outer;
        let d = match self.orient {
            Orient::Bottom => format!("M{},{}V0.5H{}V{}", fmt(r0 + 0.5), fmt(outer), fmt(r1 + 0.5), fmt(outer)),
            Orient::Left => format!("M{},{}H0.5V{}H{}", fmt(-outer), fmt(r0 + 0.5), fmt(r1 + 0.5), fmt(-outer)),
        };
        surface.append(group, Element::path(d).class(DOMAIN_CLASS).stroke(self.color, 1.0));

        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        for tick in scale.ticks(self.tick_count) {
            let pos = tick.position + 0.5;
            let (tick_el, line, text) = match self.orient {
                Orient::Bottom => (
                    Element::group().class(TICK_CLASS).translate(pos, 0.0),
                    Element::line(0.0, 0.0, 0.0, self.tick_size_inner),
                    Element::text(0.0, spacing, tick.label).dy(0.71),
                ),
                Orient::Left => (
                    Element::group().class(TICK_CLASS).translate(0.0, pos),
                    Element::line(0.0, 0.0, -self.tick_size_inner, 0.0),
                    Element::text(-spacing, 0.0, tick.label).dy(0.32),
                ),
            };
            let Some(tick_id) = surface.append(group, tick_el) else { continue };
            surface.append(tick_id, line.stroke(self.color, 1.0));
            let mut text = text.fill(self.color);
            if let Some((degrees, rotated_anchor)) = self.label_rotation {
                text = text.rotate(degrees).anchor(rotated_anchor);
            }
            surface.append(tick_id, text);
        }
    }
}
