// File: crates/chartkit-pages/src/sandwiches.rs
// Summary: Sandwich bubble row: one circle per sandwich, sized by portion and colored by price.

use serde::Deserialize;

use chartkit_core::dataset::{lenient_f64, nan};
use chartkit_core::scale::{BandScale, OrdinalScale, Scale};
use chartkit_core::{Color, Element, Surface, TextAnchor};

pub const WIDTH: f64 = 600.0;
pub const HEIGHT: f64 = 300.0;

pub const RADIUS_SMALL: f64 = 20.0;
pub const RADIUS_LARGE: f64 = RADIUS_SMALL * 2.0;
/// Sandwiches cheaper than this are drawn green.
pub const PRICE_THRESHOLD: f64 = 7.0;

const CHEAP: Color = Color::rgb(0x4c, 0xaf, 0x50);
const PRICEY: Color = Color::rgb(0xff, 0xa5, 0x00);

pub const COLUMNS: &[&str] = &["name", "price", "size"];

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SandwichRecord {
    pub name: String,
    #[serde(deserialize_with = "lenient_f64", default = "nan")]
    pub price: f64,
    #[serde(default)]
    pub size: String,
}

impl SandwichRecord {
    pub fn radius(&self) -> f64 {
        if self.size == "large" { RADIUS_LARGE } else { RADIUS_SMALL }
    }

    /// A missing price never counts as cheap.
    pub fn is_cheap(&self) -> bool {
        self.price < PRICE_THRESHOLD
    }
}

pub fn bubble_chart(rows: &[SandwichRecord]) -> Surface {
    let mut s = Surface::new(WIDTH, HEIGHT);
    let root = s.root();

    let x = BandScale::new()
        .with_range((50.0, WIDTH - 50.0))
        .with_padding(0.5)
        .with_domain(rows.iter().map(|r| r.name.clone()));
    let mut color = OrdinalScale::new([CHEAP, PRICEY]).with_domain([true, false]);

    for r in rows {
        let Some(cx) = x.map(&r.name) else { continue };
        let fill = color.get(&r.is_cheap()).unwrap_or(PRICEY);
        s.append(
            root,
            Element::circle(cx, 100.0, r.radius()).class("sandwich").fill(fill).stroke(Color::BLACK, 1.0),
        );
    }
    for r in rows {
        let Some(lx) = x.map(&r.name) else { continue };
        s.append(
            root,
            Element::text(lx, 170.0, r.name.as_str())
                .class("sandwich-label")
                .anchor(TextAnchor::Middle)
                .font_size(12.0)
                .fill(Color::BLACK),
        );
    }
    s
}
