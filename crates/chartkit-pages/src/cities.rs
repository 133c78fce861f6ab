// File: crates/chartkit-pages/src/cities.rs
// Summary: EU city map: keep EU members, count them, and plot each city at its
// precomputed (x, y) with big cities marked and named.

use serde::Deserialize;

use chartkit_core::dataset::{lenient_f64, nan};
use chartkit_core::{Color, Element, Page, Result, Surface, BODY};

pub const WIDTH: f64 = 700.0;
pub const HEIGHT: f64 = 550.0;
pub const BIG_CITY: f64 = 1_000_000.0;

pub const COLUMNS: &[&str] = &["city", "population", "x", "y", "eu"];

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CityRecord {
    pub city: String,
    #[serde(deserialize_with = "lenient_f64", default = "nan")]
    pub population: f64,
    #[serde(deserialize_with = "lenient_f64", default = "nan")]
    pub x: f64,
    #[serde(deserialize_with = "lenient_f64", default = "nan")]
    pub y: f64,
    #[serde(default)]
    pub eu: String,
}

impl CityRecord {
    pub fn is_eu(&self) -> bool { self.eu == "true" }
    pub fn is_big(&self) -> bool { self.population >= BIG_CITY }
}

pub fn eu_cities(rows: &[CityRecord]) -> Vec<&CityRecord> {
    let eu: Vec<&CityRecord> = rows.iter().filter(|r| r.is_eu()).collect();
    if eu.is_empty() {
        tracing::warn!(rows = rows.len(), "no EU cities in dataset");
    }
    eu
}

pub fn city_map(cities: &[&CityRecord]) -> Surface {
    let mut s = Surface::new(WIDTH, HEIGHT);
    let root = s.root();
    let placed: Vec<&&CityRecord> = cities.iter().filter(|c| c.x.is_finite() && c.y.is_finite()).collect();
    if placed.len() < cities.len() {
        tracing::debug!(unplaced = cities.len() - placed.len(), "cities without coordinates not drawn");
    }

    for c in &placed {
        let r = if c.is_big() { 8.0 } else { 4.0 };
        s.append(root, Element::circle(c.x, c.y, r).class("city").fill(Color::YELLOW).stroke(Color::BLACK, 1.0));
    }
    for c in &placed {
        let label = if c.is_big() { c.city.as_str() } else { "" };
        s.append(root, Element::text(c.x, c.y - 10.0, label).class("city-label"));
    }
    s
}

/// The map plus the city count paragraph, both in the page body.
pub fn page(rows: &[CityRecord]) -> Result<Page> {
    let eu = eu_cities(rows);
    let mut page = Page::new("EU cities");
    page.mount(BODY, city_map(&eu))?;
    page.append_paragraph(BODY, format!("Number of cities: {}", eu.len()))?;
    Ok(page)
}
