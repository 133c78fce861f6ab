// File: crates/chartkit-examples/src/bin/bar_walkthrough.rs
// Summary: Drives one bar chart through full data, a shrink and a reordering update,
// writing an animated SVG and a few PNG frames per step.

use std::path::Path;

use anyhow::{Context, Result};
use chartkit_core::{
    render_to_png, write_svg, BarChart, ChartConfig, JoinKey, Page, RenderOptions, StateRecord, SvgOptions,
};
use tracing_subscriber::EnvFilter;

const HOST: &str = "#chart";

fn rec(state: &str, percent: f64) -> StateRecord {
    StateRecord { state: state.to_string(), percent }
}

fn full() -> Vec<StateRecord> {
    vec![
        rec("Alabama", 0.42),
        rec("Alaska", 0.55),
        rec("Arizona", 0.50),
        rec("Arkansas", 0.39),
        rec("California", 0.53),
        rec("Colorado", 0.61),
    ]
}

fn write_step(chart: &BarChart<StateRecord>, out: &Path, step: &str) -> Result<()> {
    let surface = chart.surface();
    let svg_path = out.join(format!("{step}.svg"));
    write_svg(surface, &SvgOptions { animate: true, background: None }, &svg_path)
        .with_context(|| format!("writing {}", svg_path.display()))?;

    let end = surface.transition_end_ms();
    let opts = RenderOptions { draw_labels: true, ..RenderOptions::default() };
    for (i, t) in [0.0, end / 2.0, end].into_iter().enumerate() {
        let png_path = out.join(format!("{step}_frame{i}.png"));
        render_to_png(&surface.frame_at(t), &opts, &png_path)
            .with_context(|| format!("writing {}", png_path.display()))?;
    }
    tracing::info!(step, end_ms = end, "wrote step");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out = Path::new("target/out/walkthrough");
    let page = Page::new("walkthrough").with_host(HOST);

    // Index join: bars are matched by position.
    let mut chart = BarChart::new(ChartConfig::new(HOST), full(), &page)?;
    let report = chart.update(None);
    tracing::info!(?report, "full dataset");
    write_step(&chart, out, "index_full")?;

    let report = chart.update(Some(full().into_iter().take(3).collect()));
    tracing::info!(?report, "shrunk to three states");
    write_step(&chart, out, "index_shrink")?;

    // Category join: bars follow their state across reorderings.
    let cfg = ChartConfig::new(HOST).with_join_key(JoinKey::Category);
    let mut chart = BarChart::new(cfg, full(), &page)?;
    chart.update(None);
    let mut reordered = full();
    reordered.reverse();
    reordered.retain(|r| r.state != "Alaska");
    let report = chart.update(Some(reordered));
    tracing::info!(?report, "reversed without Alaska");
    write_step(&chart, out, "category_reorder")?;

    println!("Wrote {}", out.display());
    Ok(())
}
