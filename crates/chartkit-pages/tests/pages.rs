// File: crates/chartkit-pages/tests/pages.rs
// Purpose: State page mounting, page dispatch from a CSV file and load policy handling.

use std::path::PathBuf;

use chartkit_core::dataset::read_records_from;
use chartkit_core::{ChartError, LoadPolicy, StateRecord};
use chartkit_pages::{build_page, states, PageKind};
use clap::ValueEnum;

const STATES: &str = "state,percent\nAlabama,0.42\nAlaska,0.55\nArizona,\n";

fn write_tmp(name: &str, body: &str) -> PathBuf {
    let dir = PathBuf::from("target/test_out");
    std::fs::create_dir_all(&dir).expect("create test dir");
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write csv");
    path
}

#[test]
fn state_page_mounts_one_chart() {
    let rows: Vec<StateRecord> = read_records_from(STATES.as_bytes()).unwrap().0;
    let page = states::page(rows).unwrap();
    let host = page.resolve(states::HOST).unwrap();
    let surfaces: Vec<_> = host.surfaces().collect();
    assert_eq!(surfaces.len(), 1);
    let s = surfaces[0];
    assert_eq!(s.select_class(s.root(), "bar").len(), 3);
}

#[test]
fn render_reports_invalid_rows() {
    let rows: Vec<StateRecord> = read_records_from(STATES.as_bytes()).unwrap().0;
    let page = chartkit_core::Page::new("t").with_host(states::HOST);
    let chart = states::render(rows, &page).unwrap();
    assert_eq!(chart.bars().len(), 3);
    assert_eq!(chart.bars()[2].1.height, 0.0);
}

#[test]
fn build_page_reads_the_file() {
    let path = write_tmp("pages_states.csv", STATES);
    let page = build_page(PageKind::States, &path).unwrap();
    assert_eq!(page.surfaces().count(), 1);

    let path = write_tmp("pages_sandwiches.csv", "name,price,size\nClub,6.5,large\n");
    let page = build_page(PageKind::Sandwiches, &path).unwrap();
    assert_eq!(page.resolve("#chart").unwrap().surfaces().count(), 1);
}

#[test]
fn missing_file_follows_load_policy() {
    let path = PathBuf::from("target/test_out/does_not_exist.csv");
    let err = build_page(PageKind::FlightsBar, &path).err().expect("missing file");
    assert!(matches!(err, ChartError::Csv { .. }));

    let quiet = LoadPolicy::Lenient.resolve("flights", build_page(PageKind::FlightsBar, &path)).unwrap();
    assert!(quiet.is_none());
    assert!(LoadPolicy::Strict.resolve("flights", build_page(PageKind::FlightsBar, &path)).is_err());
}

#[test]
fn slugs_match_cli_names() {
    for kind in PageKind::value_variants() {
        let name = kind.to_possible_value().expect("visible variant");
        assert_eq!(name.get_name(), kind.slug());
    }
}

#[test]
fn header_without_key_column_is_rejected() {
    let path = write_tmp("pages_no_state.csv", "name,percent\nOhio,0.4\n");
    let err = build_page(PageKind::States, &path).err().expect("missing column");
    assert!(matches!(err, ChartError::MissingColumn(ref c) if c == "state"));

    let path = write_tmp("pages_no_airline.csv", "Price,Total_Stops\n4000,non-stop\n");
    let err = build_page(PageKind::FlightsPie, &path).err().expect("missing column");
    assert!(matches!(err, ChartError::MissingColumn(ref c) if c == "Airline"));
}
