// File: crates/chartkit-pages/src/lib.rs
// Summary: One-shot chart pages built on chartkit-core, and the dispatcher the CLI uses.

pub mod cities;
pub mod flights;
pub mod sandwiches;
pub mod states;

use std::path::Path;

use chartkit_core::dataset::read_records_requiring;
use chartkit_core::{Page, Result, Surface};

/// Every page the CLI can build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PageKind {
    States,
    FlightsBar,
    FlightsPie,
    FlightsLine,
    FlightsScatter,
    Sandwiches,
    Cities,
}

impl PageKind {
    /// Short name used in logs and output file names.
    pub fn slug(&self) -> &'static str {
        match self {
            PageKind::States => "states",
            PageKind::FlightsBar => "flights-bar",
            PageKind::FlightsPie => "flights-pie",
            PageKind::FlightsLine => "flights-line",
            PageKind::FlightsScatter => "flights-scatter",
            PageKind::Sandwiches => "sandwiches",
            PageKind::Cities => "cities",
        }
    }
}

/// Page with a single `#chart` host holding `surface`.
pub fn chart_page(title: &str, surface: Surface) -> Result<Page> {
    let mut page = Page::new(title).with_host("#chart");
    page.mount("#chart", surface)?;
    Ok(page)
}

/// Load `csv` and build `kind`'s page from it. A header without the page's key
/// columns fails with `MissingColumn`.
pub fn build_page(kind: PageKind, csv: &Path) -> Result<Page> {
    use flights::FlightRecord;
    match kind {
        PageKind::States => states::page(read_records_requiring(csv, states::COLUMNS)?.0),
        PageKind::FlightsBar => {
            let (rows, _) = read_records_requiring::<FlightRecord>(csv, flights::COLUMNS)?;
            chart_page(flights::BAR_TITLE, flights::bar_chart(&rows))
        }
        PageKind::FlightsPie => {
            let (rows, _) = read_records_requiring::<FlightRecord>(csv, flights::COLUMNS)?;
            chart_page(flights::PIE_TITLE, flights::pie_chart(&rows))
        }
        PageKind::FlightsLine => {
            let (rows, _) = read_records_requiring::<FlightRecord>(csv, flights::COLUMNS)?;
            chart_page(flights::LINE_TITLE, flights::line_chart(&rows))
        }
        PageKind::FlightsScatter => {
            let (rows, _) = read_records_requiring::<FlightRecord>(csv, flights::COLUMNS)?;
            chart_page(flights::SCATTER_TITLE, flights::scatter_plot(&rows))
        }
        PageKind::Sandwiches => {
            let (rows, _) = read_records_requiring::<sandwiches::SandwichRecord>(csv, sandwiches::COLUMNS)?;
            chart_page("Sandwiches", sandwiches::bubble_chart(&rows))
        }
        PageKind::Cities => {
            let (rows, _) = read_records_requiring::<cities::CityRecord>(csv, cities::COLUMNS)?;
            cities::page(&rows)
        }
    }
}
