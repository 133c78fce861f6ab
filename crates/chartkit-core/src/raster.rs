// File: crates/chartkit-core/src/raster.rs
// Summary: Headless PNG/RGBA rendering of a retained surface using Skia CPU raster surfaces.

use std::path::Path;

use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::surface::{NodeId, Shape, Surface};
use crate::text::TextShaper;
use crate::theme::{Color, Theme};
use crate::types::TextAnchor;

pub struct RenderOptions {
    /// Clear color; `None` uses the theme background.
    pub background: Option<Color>,
    /// Turn off to keep pixels independent of installed fonts.
    pub draw_labels: bool,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { background: None, draw_labels: true, theme: Theme::default() }
    }
}

/// Paint state inherited down the tree.
#[derive(Clone, Copy)]
struct Inherited {
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    opacity: f32,
    font_size: f32,
    anchor: TextAnchor,
}

struct Painter<'a> {
    surface: &'a Surface,
    shaper: Option<TextShaper>,
}

/// Render the surface to PNG bytes.
pub fn render_to_png_bytes(surface: &Surface, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut target = rasterize(surface, opts)?;
    let image = target.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| ChartError::Render("encode PNG failed".into()))?;
    Ok(data.as_bytes().to_vec())
}

/// Render the surface to a PNG file, creating parent directories.
pub fn render_to_png(surface: &Surface, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
    let bytes = render_to_png_bytes(surface, opts)?;
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Render to an unpremultiplied RGBA8 buffer; returns (pixels, width, height, row bytes).
pub fn render_to_rgba8(surface: &Surface, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
    let mut target = rasterize(surface, opts)?;
    let (w, h) = (target.width(), target.height());
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    if !target.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(ChartError::Render("read pixels failed".into()));
    }
    Ok((pixels, w, h, row_bytes))
}

fn rasterize(surface: &Surface, opts: &RenderOptions) -> Result<skia::Surface> {
    let w = surface.width().ceil().max(1.0) as i32;
    let h = surface.height().ceil().max(1.0) as i32;
    let mut target = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| ChartError::Render("failed to create raster surface".into()))?;
    let canvas = target.canvas();
    canvas.clear(opts.background.unwrap_or(opts.theme.background).to_skia());

    let painter = Painter { surface, shaper: opts.draw_labels.then(TextShaper::new) };
    let base = Inherited {
        fill: opts.theme.text,
        stroke: Color::TRANSPARENT,
        stroke_width: 1.0,
        opacity: 1.0,
        font_size: 16.0,
        anchor: TextAnchor::Start,
    };
    painter.paint(canvas, surface.root(), base);
    Ok(target)
}

impl Painter<'_> {
    fn paint(&self, canvas: &skia::Canvas, id: NodeId, parent: Inherited) {
        let Some(node) = self.surface.node(id) else { return };
        let s = &node.style;
        let st = Inherited {
            fill: s.fill.unwrap_or(parent.fill),
            stroke: s.stroke.unwrap_or(parent.stroke),
            stroke_width: s.stroke_width.map_or(parent.stroke_width, |w| w as f32),
            opacity: parent.opacity * s.opacity.map_or(1.0, |o| o.clamp(0.0, 1.0) as f32),
            font_size: s.font_size.map_or(parent.font_size, |f| f as f32),
            anchor: s.anchor.unwrap_or(parent.anchor),
        };

        canvas.save();
        let (tx, ty) = node.transform.translate;
        canvas.translate((tx as f32, ty as f32));
        if node.transform.rotate != 0.0 {
            canvas.rotate(node.transform.rotate as f32, None);
        }

        match &node.shape {
            Shape::Group => {
                for child in &node.children {
                    self.paint(canvas, *child, st);
                }
            }
            Shape::Rect(r) => {
                let rect = skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32);
                if let Some(p) = fill_paint(&st) { canvas.draw_rect(rect, &p); }
                if let Some(p) = stroke_paint(&st) { canvas.draw_rect(rect, &p); }
            }
            Shape::Circle { cx, cy, r } => {
                let c = (*cx as f32, *cy as f32);
                if let Some(p) = fill_paint(&st) { canvas.draw_circle(c, *r as f32, &p); }
                if let Some(p) = stroke_paint(&st) { canvas.draw_circle(c, *r as f32, &p); }
            }
            Shape::Line { x1, y1, x2, y2 } => {
                if let Some(p) = stroke_paint(&st) {
                    canvas.draw_line((*x1 as f32, *y1 as f32), (*x2 as f32, *y2 as f32), &p);
                }
            }
            Shape::Path(d) => match skia::Path::from_svg(d) {
                Some(path) => {
                    if let Some(p) = fill_paint(&st) { canvas.draw_path(&path, &p); }
                    if let Some(p) = stroke_paint(&st) { canvas.draw_path(&path, &p); }
                }
                None => tracing::debug!(path = %d, "skipping unparsable path"),
            },
            Shape::Text { x, y, dy, content } => {
                if let Some(shaper) = &self.shaper {
                    if st.fill.a > 0 {
                        let baseline = (*y as f32) + (*dy as f32) * st.font_size;
                        let color = with_opacity(st.fill, st.opacity);
                        shaper.draw(canvas, content, (*x as f32, baseline), st.font_size, color, st.anchor);
                    }
                }
            }
        }
        canvas.restore();
    }
}

fn with_opacity(color: Color, opacity: f32) -> skia::Color {
    let a = (color.a as f32 * opacity).round().clamp(0.0, 255.0) as u8;
    skia::Color::from_argb(a, color.r, color.g, color.b)
}

fn fill_paint(st: &Inherited) -> Option<skia::Paint> {
    if st.fill.a == 0 {
        return None;
    }
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(with_opacity(st.fill, st.opacity));
    Some(paint)
}

fn stroke_paint(st: &Inherited) -> Option<skia::Paint> {
    if st.stroke.a == 0 || st.stroke_width <= 0.0 {
        return None;
    }
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(st.stroke_width);
    paint.set_color(with_opacity(st.stroke, st.opacity));
    Some(paint)
}
