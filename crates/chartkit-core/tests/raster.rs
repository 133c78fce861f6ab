// File: crates/chartkit-core/tests/raster.rs
// Purpose: Skia raster output: PNG bytes/files, RGBA buffer shape and a few pixels,
// and a golden pixel snapshot with bless flow.

use chartkit_core::raster::{render_to_png, render_to_png_bytes, render_to_rgba8, RenderOptions};
use chartkit_core::{BarChart, ChartConfig, Color, Element, Page, Rect, StateRecord, Surface, Theme};

fn no_labels() -> RenderOptions {
    RenderOptions { draw_labels: false, ..RenderOptions::default() }
}

fn pixel(px: &[u8], stride: usize, x: usize, y: usize) -> [u8; 4] {
    let i = y * stride + x * 4;
    [px[i], px[i + 1], px[i + 2], px[i + 3]]
}

fn bar_chart_surface() -> Surface {
    let page = Page::new("raster").with_host("chart");
    let data = (0..5)
        .map(|i| StateRecord { state: format!("S{i}"), percent: 0.2 + i as f64 * 0.1 })
        .collect();
    let mut chart = BarChart::new(ChartConfig::new("chart").with_size(400.0, 300.0), data, &page).unwrap();
    chart.update(None);
    let mut s = chart.surface().clone();
    s.settle();
    s
}

#[test]
fn render_smoke_png() {
    let surface = bar_chart_surface();
    let out = std::path::PathBuf::from("target/test_out/bars.png");
    render_to_png(&surface, &RenderOptions::default(), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = render_to_png_bytes(&surface, &no_labels()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!((img.width(), img.height()), (400, 300));
}

#[test]
fn render_rgba8_buffer() {
    let mut s = Surface::new(40.0, 30.0);
    let root = s.root();
    s.append(root, Element::rect(Rect::from_xywh(10.0, 10.0, 20.0, 10.0)).fill(Color::rgb(255, 0, 0)));
    let g = s.append(root, Element::group().translate(0.0, 25.0)).unwrap();
    s.append(g, Element::rect(Rect::from_xywh(0.0, 0.0, 5.0, 5.0)).fill(Color::TRANSPARENT));

    let (px, w, h, stride) = render_to_rgba8(&s, &no_labels()).expect("rgba render");
    assert_eq!((w, h), (40, 30));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    assert_eq!(pixel(&px, stride, 0, 0), [255, 255, 255, 255]);
    assert_eq!(pixel(&px, stride, 20, 15), [255, 0, 0, 255]);
    // transparent fill paints nothing
    assert_eq!(pixel(&px, stride, 2, 27), [255, 255, 255, 255]);
}

#[test]
fn dark_theme_background() {
    let s = Surface::new(8.0, 8.0);
    let opts = RenderOptions { theme: Theme::dark(), draw_labels: false, background: None };
    let (px, _, _, stride) = render_to_rgba8(&s, &opts).unwrap();
    assert_eq!(pixel(&px, stride, 4, 4), [18, 18, 20, 255]);
}

#[test]
fn golden_bar_chart_png() {
    let bytes = render_to_png_bytes(&bar_chart_surface(), &no_labels()).expect("render");
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("bar_chart.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
