// File: crates/chartkit-pages/tests/flights.rs
// Purpose: Flight pages: per-airline means, stop counts, duration line and the
// scatter plot's handling of rows without a time or price.

use chartkit_core::dataset::read_records_from;
use chartkit_core::{Color, Shape, Surface};
use chartkit_pages::flights::{self, FlightRecord};

const CSV: &str = "\
Airline,Price,Dep_hours,Dep_min,Duration_hours,Duration_min,Total_Stops
IndiGo,4000,10,30,2,0,non-stop
Air India,6000,5,15,1,30,1 stop
IndiGo,5000,23,0,2,0,non-stop
Vistara,,7,0,abc,10,2 stops
SpiceJet,3000,,,1,30,1 stop
";

fn rows() -> Vec<FlightRecord> {
    read_records_from(CSV.as_bytes()).expect("parse").0
}

fn texts(s: &Surface, class: &str) -> Vec<String> {
    s.select_class(s.root(), class)
        .into_iter()
        .filter_map(|id| match &s.node(id)?.shape {
            Shape::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn records_parse_leniently() {
    let rows = rows();
    assert_eq!(rows.len(), 5);
    assert!(rows[3].price.is_nan());
    assert!(rows[3].duration_minutes().is_nan());
    assert_eq!(rows[0].departure().map(|t| t.to_string()), Some("10:30:00".to_string()));
    assert_eq!(rows[4].departure(), None);
    assert_eq!(rows[1].duration_minutes(), 90.0);
}

#[test]
fn mean_price_per_airline_in_first_seen_order() {
    let means = flights::mean_price_by_airline(&rows());
    let keys: Vec<&str> = means.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, ["IndiGo", "Air India", "Vistara", "SpiceJet"]);
    assert_eq!(means[0].value, 4500.0);
    assert!(means[2].value.is_nan());
}

#[test]
fn bar_chart_skips_airlines_without_prices() {
    let s = flights::bar_chart(&rows());
    assert_eq!((s.width(), s.height()), (flights::WIDTH, flights::BAR_SURFACE_HEIGHT));
    let bars = s.select_class(s.root(), "bar");
    assert_eq!(bars.len(), 3);
    for id in bars {
        let node = s.node(id).unwrap();
        assert_eq!(node.style.fill, Some(Color::rgb(0x4e, 0x79, 0xa7)));
    }
    assert_eq!(texts(&s, "title"), [flights::BAR_TITLE]);
}

#[test]
fn pie_has_a_slice_per_stop_count() {
    let stops = flights::flights_per_stop(&rows());
    let counts: Vec<(&str, f64)> = stops.iter().map(|a| (a.key.as_str(), a.value)).collect();
    assert_eq!(counts, [("non-stop", 2.0), ("1 stop", 2.0), ("2 stops", 1.0)]);

    let s = flights::pie_chart(&rows());
    assert_eq!(s.select_class(s.root(), "slice").len(), 3);
    assert_eq!(texts(&s, "slice-label"), ["non-stop", "1 stop", "2 stops"]);
}

#[test]
fn line_follows_ascending_duration() {
    let durations = flights::mean_price_by_duration(&rows());
    let keys: Vec<f64> = durations.iter().map(|a| a.key).collect();
    assert_eq!(keys, [90.0, 120.0]);
    assert_eq!(durations[0].value, 4500.0);

    let s = flights::line_chart(&rows());
    let line = s.select_class(s.root(), "line")[0];
    let Shape::Path(d) = &s.node(line).unwrap().shape else { panic!("line is a path") };
    assert!(d.starts_with('M'));
    assert_eq!(d.matches('L').count(), 1);
}

#[test]
fn scatter_skips_rows_without_time_or_price() {
    let s = flights::scatter_plot(&rows());
    assert_eq!(s.select_class(s.root(), "dot").len(), 3);
}

#[test]
fn empty_dataset_still_draws_frames() {
    let s = flights::bar_chart(&[]);
    assert!(s.select_class(s.root(), "bar").is_empty());
    assert_eq!(s.select_class(s.root(), "y-axis").len(), 1);
    let s = flights::pie_chart(&[]);
    assert!(s.select_class(s.root(), "slice").is_empty());
}
