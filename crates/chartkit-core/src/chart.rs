// File: crates/chartkit-core/src/chart.rs
// Summary: Reusable bar chart: one-time setup of surface/scales/axes, then repeated
// update (rescale) and render (enter/update/exit of bars, axis redraw).

use serde::Deserialize;

use crate::aggregate::{self, Aggregate};
use crate::axis::Axis;
use crate::dataset::{lenient_f64, nan};
use crate::error::Result;
use crate::geometry::Rect;
use crate::join::{self, Key};
use crate::page::Page;
use crate::scale::{BandScale, LinearScale, Scale};
use crate::surface::{Element, NodeId, Shape, Surface};
use crate::theme::Color;
use crate::transition::{Transition, Tween, DEFAULT_DURATION_MS, DEFAULT_STAGGER_MS};
use crate::types::{Margin, TextAnchor, HEIGHT, WIDTH};

/// Class carried by every bar element.
pub const BAR_CLASS: &str = "bar";

/// A record the bar chart can draw: one category and one value.
pub trait BarDatum {
    fn category(&self) -> &str;
    fn value(&self) -> f64;
}

/// Row of the state drinking dataset (`state,percent`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StateRecord {
    pub state: String,
    #[serde(deserialize_with = "lenient_f64", default = "nan")]
    pub percent: f64,
}

impl BarDatum for StateRecord {
    fn category(&self) -> &str { &self.state }
    fn value(&self) -> f64 { self.percent }
}

impl BarDatum for Aggregate<String> {
    fn category(&self) -> &str { &self.key }
    fn value(&self) -> f64 { self.value }
}

/// How bars are matched to records between renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JoinKey {
    /// Bar i belongs to record i.
    #[default]
    Index,
    /// Bars follow their category.
    Category,
}

/// Chart configuration, fixed once the chart is built.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Selector of the host element on the page, e.g. `#chart`.
    pub parent: String,
    pub container_width: f64,
    pub container_height: f64,
    pub margin: Margin,
    pub x_title: String,
    pub y_title: String,
    pub bar_fill: Color,
    pub join_key: JoinKey,
    pub duration_ms: f64,
    pub stagger_ms: f64,
}

impl ChartConfig {
    pub fn new(parent: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            container_width: WIDTH,
            container_height: HEIGHT,
            margin: Margin::default(),
            x_title: "State".to_string(),
            y_title: "Percent Drinking".to_string(),
            bar_fill: Color::rgb(0x46, 0x82, 0xb4),
            join_key: JoinKey::Index,
            duration_ms: DEFAULT_DURATION_MS,
            stagger_ms: DEFAULT_STAGGER_MS,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.container_width = width;
        self.container_height = height;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_titles(mut self, x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        self.x_title = x_title.into();
        self.y_title = y_title.into();
        self
    }

    pub fn with_join_key(mut self, key: JoinKey) -> Self {
        self.join_key = key;
        self
    }
}

impl Default for ChartConfig {
    fn default() -> Self { Self::new("#chart") }
}

/// What one `render` pass did to the bar elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
    /// Record indices whose value could not be placed; their bars have zero height.
    pub invalid: Vec<usize>,
}

pub struct BarChart<R> {
    config: ChartConfig,
    data: Vec<R>,
    inner_width: f64,
    inner_height: f64,
    x_scale: BandScale<String>,
    y_scale: LinearScale,
    x_axis: Axis,
    y_axis: Axis,
    surface: Surface,
    chart: NodeId,
    x_axis_g: NodeId,
    y_axis_g: NodeId,
}

impl<R: BarDatum> BarChart<R> {
    /// Build and initialize a chart. Fails only when `config.parent` is not a host on `page`.
    pub fn new(config: ChartConfig, data: Vec<R>, page: &Page) -> Result<Self> {
        page.resolve(&config.parent)?;
        let surface = Surface::new(config.container_width, config.container_height);
        let root = surface.root();
        let mut chart = Self {
            config,
            data,
            inner_width: 0.0,
            inner_height: 0.0,
            x_scale: BandScale::new(),
            y_scale: LinearScale::new(),
            x_axis: Axis::bottom(),
            y_axis: Axis::left(),
            surface,
            chart: root,
            x_axis_g: root,
            y_axis_g: root,
        };
        chart.initialize();
        Ok(chart)
    }

    /// Build scales, axes and static structure. `new` already calls this; calling it
    /// again appends a second copy of the structure and later renders target the copy.
    pub fn initialize(&mut self) {
        let cfg = &self.config;
        let (w, h) = cfg.margin.inner_size(cfg.container_width, cfg.container_height);
        self.inner_width = w;
        self.inner_height = h;

        self.x_scale = BandScale::new().with_range((0.0, w)).with_padding(0.1);
        self.y_scale = LinearScale::new().with_range(h, 0.0);
        self.x_axis = Axis::bottom();
        self.y_axis = Axis::left();

        let root = self.surface.root();
        let chart = self
            .surface
            .append(root, Element::group().translate(cfg.margin.left, cfg.margin.top))
            .unwrap_or(root);
        let x_axis_g = self
            .surface
            .append(chart, Element::group().class("axis x-axis").translate(0.0, h))
            .unwrap_or(chart);
        self.surface.append(
            x_axis_g,
            Element::text(w / 2.0, 20.0, cfg.x_title.as_str())
                .dy(2.5)
                .fill(Color::BLACK)
                .class("axis-label x")
                .anchor(TextAnchor::Middle),
        );
        let y_axis_g = self.surface.append(chart, Element::group().class("axis y-axis")).unwrap_or(chart);
        self.surface.append(
            y_axis_g,
            Element::text(-h / 2.0, -cfg.margin.top + 20.0, cfg.y_title.as_str())
                .rotate(-90.0)
                .dy(1.0)
                .fill(Color::BLACK)
                .anchor(TextAnchor::Middle),
        );

        self.chart = chart;
        self.x_axis_g = x_axis_g;
        self.y_axis_g = y_axis_g;
    }

    /// Optionally swap in a new dataset, recompute both scale domains, then render.
    pub fn update(&mut self, data: Option<Vec<R>>) -> RenderReport {
        if let Some(data) = data {
            self.data = data;
        }
        let categories: Vec<String> = self.data.iter().map(|d| d.category().to_string()).collect();
        self.x_scale.set_domain(categories);
        let max = aggregate::max(self.data.iter().map(|d| d.value())).unwrap_or(0.0);
        self.y_scale.set_domain((0.0, max));
        self.render()
    }

    /// Reconcile bar elements with the current dataset and redraw both axes.
    pub fn render(&mut self) -> RenderReport {
        let existing = self.surface.select_class(self.chart, BAR_CLASS);
        let previous: Vec<Key> = existing
            .iter()
            .enumerate()
            .map(|(i, id)| self.surface.node(*id).and_then(|n| n.key.clone()).unwrap_or(Key::Index(i)))
            .collect();
        let current: Vec<Key> = match self.config.join_key {
            JoinKey::Index => join::index_keys(self.data.len()),
            JoinKey::Category => self.data.iter().map(|d| Key::Name(d.category().to_string())).collect(),
        };
        let diff = join::diff(&previous, &current);

        for &i in &diff.exited {
            self.surface.remove(existing[i]);
        }

        // (record index, node) for every bar that stays on screen, in record order
        let mut merged: Vec<(usize, NodeId)> = diff.updated.iter().map(|&(p, c)| (c, existing[p])).collect();
        for &c in &diff.entered {
            let el = Element::rect(Rect::default()).class(BAR_CLASS).fill(self.config.bar_fill);
            if let Some(id) = self.surface.append(self.chart, el) {
                merged.push((c, id));
            }
        }
        merged.sort_by_key(|(c, _)| *c);

        let mut report = RenderReport {
            entered: diff.entered.len(),
            updated: diff.updated.len(),
            exited: diff.exited.len(),
            invalid: Vec::new(),
        };

        for (c, id) in merged {
            let (target, valid) = self.bar_geometry(&self.data[c]);
            if !valid {
                report.invalid.push(c);
            }
            let transition = Transition::staggered(c, self.config.stagger_ms, self.config.duration_ms);
            if let Some(node) = self.surface.node_mut(id) {
                let prior = match node.shape {
                    Shape::Rect(r) => r,
                    _ => Rect::default(),
                };
                // x and width jump; y and height animate
                let from = Rect { x: target.x, width: target.width, ..prior };
                node.shape = Shape::Rect(target);
                node.key = Some(current[c].clone());
                node.tween = Some(Tween { from, to: target, transition });
            }
        }

        self.x_axis.render(&mut self.surface, self.x_axis_g, &self.x_scale);
        self.y_axis.render(&mut self.surface, self.y_axis_g, &self.y_scale);

        if !report.invalid.is_empty() {
            tracing::warn!(
                rows = ?report.invalid,
                "bars with missing or out-of-range values drawn at zero height"
            );
        }
        tracing::debug!(
            entered = report.entered,
            updated = report.updated,
            exited = report.exited,
            "rendered bar chart"
        );
        report
    }

    /// Final rectangle for one record, and whether its value was drawable.
    /// Non-finite and negative values collapse to a zero-height bar at the baseline.
    /// With an all-zero domain every drawable value is 0, so bars sit flat on the baseline.
    fn bar_geometry(&self, datum: &R) -> (Rect, bool) {
        let x = self.x_scale.map(&datum.category().to_string()).unwrap_or(0.0);
        let width = self.x_scale.bandwidth();
        let value = datum.value();
        if !(value.is_finite() && value >= 0.0) {
            return (Rect::from_xywh(x, self.inner_height, width, 0.0), false);
        }
        let (d0, d1) = *self.y_scale.domain();
        let y = if d1 == d0 { self.inner_height } else { self.y_scale.map_raw(value) };
        (Rect::from_xywh(x, y, width, self.inner_height - y), true)
    }

    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn data(&self) -> &[R] { &self.data }
    pub fn surface(&self) -> &Surface { &self.surface }
    pub fn x_scale(&self) -> &BandScale<String> { &self.x_scale }
    pub fn y_scale(&self) -> &LinearScale { &self.y_scale }

    /// Width and height of the plot area inside the margins.
    pub fn inner_size(&self) -> (f64, f64) { (self.inner_width, self.inner_height) }

    /// Group holding the bars and axes.
    pub fn chart_group(&self) -> NodeId { self.chart }

    /// Current bars in document order, with their final geometry.
    pub fn bars(&self) -> Vec<(NodeId, Rect)> {
        self.surface
            .select_class(self.chart, BAR_CLASS)
            .into_iter()
            .filter_map(|id| match self.surface.node(id)?.shape {
                Shape::Rect(r) => Some((id, r)),
                _ => None,
            })
            .collect()
    }

    /// Snapshot of the surface placed into the chart's host on `page`.
    pub fn mount(&self, page: &mut Page) -> Result<()> {
        page.mount(&self.config.parent, self.surface.clone())
    }
}
