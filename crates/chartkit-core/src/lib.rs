// File: crates/chartkit-core/src/lib.rs
// Summary: Core library entry point; exports scales, axes, the retained surface, the
// reusable bar chart and the SVG/PNG/HTML writers.

pub mod types;
pub mod geometry;
pub mod theme;
pub mod ticks;
pub mod scale;
pub mod axis;
pub mod shape;
pub mod join;
pub mod transition;
pub mod surface;
pub mod page;
pub mod error;
pub mod dataset;
pub mod aggregate;
pub mod chart;
pub mod text;
pub mod svg;
pub mod raster;
pub mod html;

pub use aggregate::{Aggregate, FloatKey, Reducer};
pub use axis::{Axis, Orient};
pub use chart::{BarChart, BarDatum, ChartConfig, JoinKey, RenderReport, StateRecord};
pub use dataset::{IngestReport, LoadPolicy, RawRow};
pub use error::{ChartError, Result};
pub use geometry::{Rect, Transform};
pub use join::{Join, Key};
pub use page::{Content, Host, Page, BODY};
pub use raster::{render_to_png, render_to_png_bytes, render_to_rgba8, RenderOptions};
pub use scale::{BandScale, LinearScale, OrdinalScale, Scale, Tick};
pub use shape::{Arc, PieSlice};
pub use surface::{Element, Node, NodeId, Shape, Style, Surface};
pub use svg::{to_svg_string, write_svg, SvgOptions};
pub use text::TextShaper;
pub use theme::{Color, Theme};
pub use transition::{Transition, Tween};
pub use types::{Margin, TextAnchor};
