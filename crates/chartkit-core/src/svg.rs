// File: crates/chartkit-core/src/svg.rs
// Summary: Serialize a retained surface to standalone SVG text, optionally with SMIL
// animations for pending bar transitions.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::geometry::{fmt_num, Transform};
use crate::surface::{Node, NodeId, Shape, Style, Surface};
use crate::theme::Color;

#[derive(Clone, Copy, Debug, Default)]
pub struct SvgOptions {
    /// Emit `<animate>` elements for pending tweens instead of only the final state.
    pub animate: bool,
    /// Paint a full-surface background rectangle.
    pub background: Option<Color>,
}

/// Render `surface` as an SVG document.
pub fn to_svg_string(surface: &Surface, opts: &SvgOptions) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = fmt_num(surface.width()),
        h = fmt_num(surface.height()),
    );
    if let Some(bg) = opts.background {
        let _ = write!(out, "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", bg.to_css());
    }
    for child in surface.children(surface.root()) {
        write_node(&mut out, surface, *child, opts);
    }
    out.push_str("</svg>");
    out
}

/// Write the SVG document for `surface` to `path`, creating parent directories.
pub fn write_svg(surface: &Surface, opts: &SvgOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg_string(surface, opts))?;
    Ok(())
}

fn write_node(out: &mut String, surface: &Surface, id: NodeId, opts: &SvgOptions) {
    let Some(node) = surface.node(id) else { return };
    let attrs = common_attrs(node);
    match &node.shape {
        Shape::Group => {
            let _ = write!(out, "<g{attrs}>");
            for child in &node.children {
                write_node(out, surface, *child, opts);
            }
            out.push_str("</g>");
        }
        Shape::Rect(r) => match node.tween.filter(|_| opts.animate) {
            Some(tween) => {
                let (from, to, t) = (tween.from, tween.to, tween.transition);
                let _ = write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}>",
                    fmt_num(to.x), fmt_num(from.y), fmt_num(to.width), fmt_num(from.height),
                );
                for (attr, a, b) in [("y", from.y, to.y), ("height", from.height, to.height)] {
                    let _ = write!(
                        out,
                        "<animate attributeName=\"{attr}\" from=\"{}\" to=\"{}\" begin=\"{}ms\" dur=\"{}ms\" \
                         fill=\"freeze\" calcMode=\"spline\" keyTimes=\"0;1\" keySplines=\"0.65 0 0.35 1\"/>",
                        fmt_num(a), fmt_num(b), fmt_num(t.delay_ms), fmt_num(t.duration_ms),
                    );
                }
                out.push_str("</rect>");
            }
            None => {
                let _ = write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
                    fmt_num(r.x), fmt_num(r.y), fmt_num(r.width), fmt_num(r.height),
                );
            }
        },
        Shape::Circle { cx, cy, r } => {
            let _ = write!(out, "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{attrs}/>", fmt_num(*cx), fmt_num(*cy), fmt_num(*r));
        }
        Shape::Line { x1, y1, x2, y2 } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{attrs}/>",
                fmt_num(*x1), fmt_num(*y1), fmt_num(*x2), fmt_num(*y2),
            );
        }
        Shape::Path(d) => {
            let _ = write!(out, "<path d=\"{}\"{attrs}/>", escape(d));
        }
        Shape::Text { x, y, dy, content } => {
            let _ = write!(out, "<text x=\"{}\" y=\"{}\"", fmt_num(*x), fmt_num(*y));
            if *dy != 0.0 {
                let _ = write!(out, " dy=\"{}em\"", fmt_num(*dy));
            }
            let _ = write!(out, "{attrs}>{}</text>", escape(content));
        }
    }
}

fn common_attrs(node: &Node) -> String {
    let mut a = String::new();
    if !node.classes.is_empty() {
        let _ = write!(a, " class=\"{}\"", escape(&node.classes.join(" ")));
    }
    if let Some(t) = transform_attr(&node.transform) {
        let _ = write!(a, " transform=\"{t}\"");
    }
    style_attrs(&mut a, &node.style);
    a
}

fn transform_attr(t: &Transform) -> Option<String> {
    if t.is_identity() {
        return None;
    }
    let mut parts = Vec::new();
    if t.translate != (0.0, 0.0) {
        parts.push(format!("translate({},{})", fmt_num(t.translate.0), fmt_num(t.translate.1)));
    }
    if t.rotate != 0.0 {
        parts.push(format!("rotate({})", fmt_num(t.rotate)));
    }
    Some(parts.join(" "))
}

fn style_attrs(a: &mut String, s: &Style) {
    if let Some(c) = s.fill {
        let _ = write!(a, " fill=\"{}\"", c.to_css());
    }
    if let Some(c) = s.stroke {
        let _ = write!(a, " stroke=\"{}\"", c.to_css());
    }
    if let Some(w) = s.stroke_width {
        let _ = write!(a, " stroke-width=\"{}\"", fmt_num(w));
    }
    if let Some(o) = s.opacity {
        let _ = write!(a, " opacity=\"{}\"", fmt_num(o));
    }
    if let Some(size) = s.font_size {
        let _ = write!(a, " font-size=\"{}\"", fmt_num(size));
    }
    if let Some(anchor) = s.anchor {
        let _ = write!(a, " text-anchor=\"{}\"", anchor.as_str());
    }
}

/// Escape text for use in XML character data and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
