// File: crates/chartkit-core/src/html.rs
// Summary: Write a page as a single HTML document with each host's inline SVGs and paragraphs.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::page::{Content, Page, BODY};
use crate::svg::{escape, to_svg_string, SvgOptions};

pub fn to_html_string(page: &Page, opts: &SvgOptions) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n",
        escape(&page.title)
    );
    for host in page.hosts() {
        let nested = host.id != BODY;
        if nested {
            let _ = writeln!(out, "<div id=\"{}\">", escape(&host.id));
        }
        for content in &host.content {
            match content {
                Content::Surface(s) => out.push_str(&to_svg_string(s, opts)),
                Content::Paragraph(p) => {
                    let _ = write!(out, "<p>{}</p>", escape(p));
                }
            }
            out.push('\n');
        }
        if nested {
            out.push_str("</div>\n");
        }
    }
    out.push_str("</body>\n</html>\n");
    out
}

pub fn write_html(page: &Page, opts: &SvgOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_html_string(page, opts))?;
    Ok(())
}
