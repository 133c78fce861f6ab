// File: crates/chartkit-pages/src/main.rs
// Summary: CLI that loads one CSV, builds the requested chart page and writes it as SVG, PNG or HTML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chartkit_core::{html, raster, svg, LoadPolicy, RenderOptions, SvgOptions};
use chartkit_pages::{build_page, PageKind};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the output files are written to.
    #[arg(short, long, default_value = "target/out")]
    out: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Fail when the dataset cannot be loaded (default in debug builds).
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// Log a dataset load failure and exit cleanly (default in release builds).
    #[arg(long)]
    lenient: bool,

    /// Emit SMIL animations for pending bar transitions (SVG and HTML output).
    #[arg(long)]
    animate: bool,

    /// Page to build.
    #[arg(value_enum)]
    page: PageKind,

    /// CSV file with the page's dataset.
    csv: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Png,
    Html,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let policy = if cli.strict {
        LoadPolicy::Strict
    } else if cli.lenient {
        LoadPolicy::Lenient
    } else {
        LoadPolicy::for_build()
    };

    let (path, used_alt) = resolve_path(&cli.csv);
    tracing::info!(input = %path.display(), page = cli.page.slug(), ?policy, "building page");
    if used_alt {
        tracing::info!("extension swapped between .csv/.cvs");
    }

    let loaded = policy
        .resolve(cli.page.slug(), build_page(cli.page, &path))
        .with_context(|| format!("failed to build '{}' from '{}'", cli.page.slug(), path.display()))?;
    let Some(page) = loaded else {
        return Ok(());
    };

    let svg_opts = SvgOptions { animate: cli.animate, background: None };
    match cli.format {
        Format::Html => {
            let out = out_name_with(&cli.out, &path, cli.page.slug(), 0, "html");
            html::write_html(&page, &svg_opts, &out).with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        Format::Svg | Format::Png => {
            let opts = RenderOptions::default();
            for (i, surface) in page.surfaces().enumerate() {
                let ext = if cli.format == Format::Svg { "svg" } else { "png" };
                let out = out_name_with(&cli.out, &path, cli.page.slug(), i, ext);
                let written = if cli.format == Format::Svg {
                    svg::write_svg(surface, &svg_opts, &out)
                } else {
                    raster::render_to_png(surface, &opts, &out)
                };
                written.with_context(|| format!("writing {}", out.display()))?;
                println!("Wrote {}", out.display());
            }
        }
    }
    Ok(())
}

/// Resolve path, trying a .csv/.cvs swap when the given file is missing.
/// Returns (path_to_use, used_alt); a missing file is left for the loader to report.
fn resolve_path(raw: &str) -> (PathBuf, bool) {
    let p = Path::new(raw);
    if p.exists() {
        return (p.to_path_buf(), false);
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return (alt, true);
        }
    }
    (p.to_path_buf(), false)
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let ext = p.extension()?.to_str()?.to_ascii_lowercase();
    let new_ext = match ext.as_str() {
        "csv" => "cvs",
        "cvs" => "csv",
        _ => return None,
    };
    Some(p.with_extension(new_ext))
}

/// Output file name like <out>/chart_<stem>_<page>.<ext>, numbered after the first surface.
fn out_name_with(out_dir: &Path, input: &Path, page: &str, index: usize, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let name = if index == 0 {
        format!("chart_{stem}_{page}.{ext}")
    } else {
        format!("chart_{stem}_{page}_{index}.{ext}")
    };
    out_dir.join(name)
}
