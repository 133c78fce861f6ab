// File: crates/chartkit-pages/src/flights.rs
// Summary: Flight price pages: mean price per airline (bar), flights per stop count (pie),
// mean price by flight duration (line) and departure hour against price (scatter).

use chrono::{NaiveTime, Timelike};
use serde::Deserialize;

use chartkit_core::aggregate::{self, rollup, Aggregate, FloatKey, Reducer};
use chartkit_core::dataset::{lenient_f64, nan, time_of_day};
use chartkit_core::scale::{BandScale, LinearScale, OrdinalScale, Scale};
use chartkit_core::shape::{self, Arc};
use chartkit_core::theme::SCHEME_SET2;
use chartkit_core::{Axis, Color, Element, Margin, NodeId, Rect, Surface, TextAnchor};

pub const WIDTH: f64 = 600.0;
/// Height the axis pages compute their plot area from.
pub const LAYOUT_HEIGHT: f64 = 450.0;
/// The bar page's surface is taller than its layout to fit rotated airline names.
pub const BAR_SURFACE_HEIGHT: f64 = 500.0;

pub const BAR_MARGIN: Margin = Margin::new(60.0, 20.0, 90.0, 60.0);
pub const PLOT_MARGIN: Margin = Margin::new(60.0, 20.0, 70.0, 60.0);

pub const PIE_CENTER: (f64, f64) = (300.0, 250.0);
pub const PIE_RADIUS: f64 = 150.0;

const BAR_FILL: Color = Color::rgb(0x4e, 0x79, 0xa7);
const LINE_STROKE: Color = Color::rgb(0xe1, 0x57, 0x59);
const DOT_FILL: Color = Color::rgb(0x59, 0xa1, 0x4f);

pub const BAR_TITLE: &str = "Rata-Rata Harga Tiket per Maskapai";
pub const PIE_TITLE: &str = "Distribusi Jumlah Penerbangan berdasarkan Total Stops";
pub const LINE_TITLE: &str = "Rata-Rata Harga Tiket Berdasarkan Durasi Penerbangan (menit)";
pub const SCATTER_TITLE: &str = "Hubungan Jam Keberangkatan dan Harga Tiket";

/// Columns every flight page needs; the rest read as NaN when absent.
pub const COLUMNS: &[&str] = &["Airline", "Price"];

/// One row of `flight_dataset.csv`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FlightRecord {
    #[serde(rename = "Airline")]
    pub airline: String,
    #[serde(rename = "Price", deserialize_with = "lenient_f64", default = "nan")]
    pub price: f64,
    #[serde(rename = "Dep_hours", deserialize_with = "lenient_f64", default = "nan")]
    pub dep_hours: f64,
    #[serde(rename = "Dep_min", deserialize_with = "lenient_f64", default = "nan")]
    pub dep_min: f64,
    #[serde(rename = "Duration_hours", deserialize_with = "lenient_f64", default = "nan")]
    pub duration_hours: f64,
    #[serde(rename = "Duration_min", deserialize_with = "lenient_f64", default = "nan")]
    pub duration_min: f64,
    #[serde(rename = "Total_Stops", default)]
    pub total_stops: String,
}

impl FlightRecord {
    /// Departure clock time; `None` when either field is missing.
    pub fn departure(&self) -> Option<NaiveTime> {
        time_of_day(self.dep_hours, self.dep_min)
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_hours * 60.0 + self.duration_min
    }
}

pub fn mean_price_by_airline(rows: &[FlightRecord]) -> Vec<Aggregate<String>> {
    rollup(rows, |r| r.airline.clone(), |r| r.price, Reducer::Mean)
}

pub fn flights_per_stop(rows: &[FlightRecord]) -> Vec<Aggregate<String>> {
    rollup(rows, |r| r.total_stops.clone(), |_| 1.0, Reducer::Count)
}

/// Mean price per total duration, ascending by duration. Unknown durations are dropped.
pub fn mean_price_by_duration(rows: &[FlightRecord]) -> Vec<Aggregate<f64>> {
    let mut out: Vec<Aggregate<f64>> = rollup(rows, |r| FloatKey(r.duration_minutes()), |r| r.price, Reducer::Mean)
        .into_iter()
        .filter(|a| a.key.0.is_finite())
        .map(|a| Aggregate { key: a.key.0, value: a.value })
        .collect();
    out.sort_by(|a, b| a.key.total_cmp(&b.key));
    out
}

/// Surface with a margin-translated plot group; returns the group and the plot size.
fn plot_frame(surface_height: f64, margin: Margin) -> (Surface, NodeId, f64, f64) {
    let mut s = Surface::new(WIDTH, surface_height);
    let (w, h) = margin.inner_size(WIDTH, LAYOUT_HEIGHT);
    let root = s.root();
    let g = s.append(root, Element::group().translate(margin.left, margin.top)).unwrap_or(root);
    (s, g, w, h)
}

fn draw_axes<X: ?Sized, S: Scale<X>>(s: &mut Surface, g: NodeId, h: f64, x_axis: &Axis, x: &S, y: &LinearScale) {
    if let Some(yg) = s.append(g, Element::group().class("axis y-axis")) {
        Axis::left().render(s, yg, y);
    }
    if let Some(xg) = s.append(g, Element::group().class("axis x-axis").translate(0.0, h)) {
        x_axis.render(s, xg, x);
    }
}

fn title(s: &mut Surface, text: &str) {
    let root = s.root();
    s.append(
        root,
        Element::text(WIDTH / 2.0, 30.0, text).class("title").anchor(TextAnchor::Middle).font_size(20.0),
    );
}

fn axis_titles(s: &mut Surface, x_label: &str, y_label: &str) {
    let root = s.root();
    s.append(root, Element::text(WIDTH / 2.0, 440.0, x_label).class("axis-label x").anchor(TextAnchor::Middle));
    s.append(
        root,
        Element::text(-LAYOUT_HEIGHT / 2.0, 20.0, y_label)
            .rotate(-90.0)
            .class("axis-label y")
            .anchor(TextAnchor::Middle),
    );
}

fn y_scale(max: Option<f64>, h: f64) -> LinearScale {
    LinearScale::new().with_domain(0.0, max.unwrap_or(0.0)).with_range(h, 0.0).nice()
}

/// Mean ticket price per airline.
pub fn bar_chart(rows: &[FlightRecord]) -> Surface {
    let airlines = mean_price_by_airline(rows);
    let (mut s, g, w, h) = plot_frame(BAR_SURFACE_HEIGHT, BAR_MARGIN);

    let x = BandScale::new()
        .with_range((0.0, w))
        .with_padding(0.2)
        .with_domain(airlines.iter().map(|a| a.key.clone()));
    let y = y_scale(aggregate::max(airlines.iter().map(|a| a.value)), h);

    draw_axes(&mut s, g, h, &Axis::bottom().with_label_rotation(-45.0, TextAnchor::End), &x, &y);

    for a in &airlines {
        let (Some(bx), Some(by)) = (x.map(&a.key), y.map(&a.value)) else {
            tracing::warn!(airline = %a.key, "no usable price; airline left without a bar");
            continue;
        };
        let bar = Rect::from_xywh(bx, by, x.bandwidth(), (h - by).max(0.0));
        s.append(g, Element::rect(bar).class("bar").fill(BAR_FILL));
    }

    title(&mut s, BAR_TITLE);
    axis_titles(&mut s, "Maskapai", "Harga Rata-Rata (Rupee)");
    s
}

/// Share of flights per number of stops.
pub fn pie_chart(rows: &[FlightRecord]) -> Surface {
    let stops = flights_per_stop(rows);
    let mut s = Surface::new(WIDTH, LAYOUT_HEIGHT);
    let root = s.root();
    let g = s
        .append(root, Element::group().translate(PIE_CENTER.0, PIE_CENTER.1))
        .unwrap_or(root);

    let values: Vec<f64> = stops.iter().map(|a| a.value).collect();
    let slices = shape::pie(&values);
    let arc = Arc::new(0.0, PIE_RADIUS);
    let mut color = OrdinalScale::new(SCHEME_SET2);

    for (slice, stop) in slices.iter().zip(&stops) {
        let fill = color.get(&stop.key).unwrap_or(Color::BLACK);
        s.append(g, Element::path(arc.path(slice)).class("slice").fill(fill).stroke(Color::WHITE, 2.0));
    }
    for (slice, stop) in slices.iter().zip(&stops) {
        let (cx, cy) = arc.centroid(slice);
        s.append(
            g,
            Element::text(0.0, 0.0, stop.key.as_str())
                .translate(cx, cy)
                .class("slice-label")
                .anchor(TextAnchor::Middle)
                .font_size(12.0),
        );
    }

    title(&mut s, PIE_TITLE);
    s
}

/// Mean ticket price against flight duration in minutes.
pub fn line_chart(rows: &[FlightRecord]) -> Surface {
    let durations = mean_price_by_duration(rows);
    let (mut s, g, w, h) = plot_frame(LAYOUT_HEIGHT, PLOT_MARGIN);

    let (d0, d1) = aggregate::extent(durations.iter().map(|a| a.key)).unwrap_or((0.0, 0.0));
    let x = LinearScale::new().with_domain(d0, d1).with_range(0.0, w);
    let y = y_scale(aggregate::max(durations.iter().map(|a| a.value)), h);

    draw_axes(&mut s, g, h, &Axis::bottom(), &x, &y);

    let points: Vec<(f64, f64)> = durations
        .iter()
        .map(|a| (x.map_raw(a.key), y.map(&a.value).unwrap_or(f64::NAN)))
        .collect();
    s.append(
        g,
        Element::path(shape::line_path(&points)).class("line").fill(Color::TRANSPARENT).stroke(LINE_STROKE, 2.0),
    );

    title(&mut s, LINE_TITLE);
    axis_titles(&mut s, "Durasi (menit)", "Harga Rata-Rata (Rupee)");
    s
}

/// One dot per flight: departure hour against ticket price.
pub fn scatter_plot(rows: &[FlightRecord]) -> Surface {
    let (mut s, g, w, h) = plot_frame(LAYOUT_HEIGHT, PLOT_MARGIN);

    let x = LinearScale::new().with_domain(0.0, 24.0).with_range(0.0, w);
    let y = y_scale(aggregate::max(rows.iter().map(|r| r.price)), h);

    draw_axes(&mut s, g, h, &Axis::bottom().with_ticks(24), &x, &y);

    let mut skipped = 0usize;
    for r in rows {
        let hour = r.departure().map(|t| f64::from(t.hour()));
        let (Some(cx), Some(cy)) = (hour.and_then(|hr| x.map(&hr)), y.map(&r.price)) else {
            skipped += 1;
            continue;
        };
        s.append(g, Element::circle(cx, cy, 4.0).class("dot").fill(DOT_FILL).opacity(0.7));
    }
    if skipped > 0 {
        tracing::warn!(skipped, "flights without a departure time or price left off the scatter plot");
    }

    title(&mut s, SCATTER_TITLE);
    axis_titles(&mut s, "Jam Keberangkatan (0-24)", "Harga Tiket (Rupee)");
    s
}
