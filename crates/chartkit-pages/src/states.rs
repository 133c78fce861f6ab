// File: crates/chartkit-pages/src/states.rs
// Summary: State drinking page: `state,percent` rows drawn by the reusable bar chart.

use chartkit_core::{BarChart, ChartConfig, Page, Result, StateRecord};

/// Host the chart mounts into.
pub const HOST: &str = "#chart";

/// Columns a state dataset must carry.
pub const COLUMNS: &[&str] = &["state", "percent"];

/// Build the chart with the default configuration and draw it once.
pub fn render(rows: Vec<StateRecord>, page: &Page) -> Result<BarChart<StateRecord>> {
    let mut chart = BarChart::new(ChartConfig::new(HOST), rows, page)?;
    let report = chart.update(None);
    tracing::info!(bars = report.entered + report.updated, invalid = report.invalid.len(), "drew state chart");
    Ok(chart)
}

pub fn page(rows: Vec<StateRecord>) -> Result<Page> {
    let mut page = Page::new("Percent drinking by state").with_host(HOST);
    let chart = render(rows, &page)?;
    chart.mount(&mut page)?;
    Ok(page)
}
