use image::RgbaImage;

use crate::{
    foundation::{
        color::{Rgba8, WHITE},
        error::{WidgetError, WidgetResult},
    },
    imaging::ops::unpremultiply_rgba8_in_place,
    text::engine::{FontAsset, TextBrushRgba8},
};

/// Extra pixels around each rasterized line so glyph overhang is not cut off.
const RASTER_PAD: u32 = 4;

/// Positioned, multi-line text drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Font size in points.
    pub size: f64,
    /// Dots per inch; at 72 DPI one point is one pixel.
    pub dpi: f64,
    /// Line height as a multiple of the font size.
    pub spacing: f64,
    /// Left edge of every line, in canvas pixels.
    pub x: i64,
    /// Top of the text block, in canvas pixels.
    pub y: i64,
    /// Lines rendered top to bottom.
    pub lines: Vec<String>,
    /// Solid fill color.
    pub color: Rgba8,
}

impl Label {
    /// Label at the origin with the widget defaults (25pt, 72 DPI, 1.25 spacing, white).
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            size: 25.0,
            dpi: 72.0,
            spacing: 1.25,
            x: 0,
            y: 0,
            lines: lines.into_iter().map(Into::into).collect(),
            color: WHITE,
        }
    }

    /// Move the label's top-left anchor.
    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Override the font size in points.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Override the fill color.
    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    /// Font size converted to pixels for the label's DPI.
    pub fn size_px(&self) -> f64 {
        self.size * self.dpi / 72.0
    }
}

/// Where a drawn label ended, so callers can position elements below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelExtent {
    /// Character count of the last line.
    pub last_line_chars: usize,
    /// Advance width of the last line in pixels, rounded up.
    pub last_line_width: u32,
    /// Vertical cursor after the last line, rounded up.
    pub end_y: i64,
}

/// Draw `label` onto `canvas` in place.
///
/// The first baseline sits at `label.y + floor(size_px)`; the cursor then advances by
/// `size_px * spacing` per line in 26.6 fixed point. Hinting is disabled so output does not
/// depend on grid-fitting. Pixels outside the canvas are clipped before rasterization, so
/// lines of any length are accepted; only canvases wider or taller than 65535 pixels are a
/// [`WidgetError::Render`].
pub fn draw_label(
    canvas: &mut RgbaImage,
    font: &FontAsset,
    label: &Label,
) -> WidgetResult<LabelExtent> {
    let size_px = label.size_px();
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(WidgetError::render(format!(
            "label size must be finite and > 0, got {size_px}"
        )));
    }
    if !label.spacing.is_finite() || label.spacing < 0.0 {
        return Err(WidgetError::render(format!(
            "label spacing must be finite and >= 0, got {}",
            label.spacing
        )));
    }

    let brush = TextBrushRgba8::from(label.color);
    let advance_fx = (size_px * label.spacing * 64.0).round() as i64;
    let mut baseline_fx = (label.y + size_px.floor() as i64) * 64;
    let mut extent = LabelExtent::default();

    for line in &label.lines {
        extent.last_line_chars = line.chars().count();
        extent.last_line_width = 0;
        if !line.is_empty() {
            let baseline_y = baseline_fx as f64 / 64.0;
            extent.last_line_width =
                draw_line(canvas, font, line, size_px as f32, brush, label.x, baseline_y)?;
        }
        baseline_fx += advance_fx;
    }

    extent.end_y = (baseline_fx + 63).div_euclid(64);
    Ok(extent)
}

fn draw_line(
    canvas: &mut RgbaImage,
    font: &FontAsset,
    text: &str,
    size_px: f32,
    brush: TextBrushRgba8,
    x: i64,
    baseline_y: f64,
) -> WidgetResult<u32> {
    let layout = font.layout_line(text, size_px, brush)?;
    let first_baseline = layout
        .lines()
        .next()
        .map(|l| f64::from(l.metrics().baseline))
        .ok_or_else(|| WidgetError::render(format!("no line produced for {text:?}")))?;

    let width = f64::from(layout.width()).ceil().max(0.0) as u32;
    let height = f64::from(layout.height()).ceil().max(0.0) as u32;
    let top = baseline_y - first_baseline;

    // Only the part of the line that lands on the canvas is rasterized.
    let pad = i64::from(RASTER_PAD);
    let left = (x - pad).max(0);
    let right = (x + i64::from(width) + pad).min(i64::from(canvas.width()));
    let upper = (top.floor() as i64 - pad).max(0);
    let lower = (top.ceil() as i64 + i64::from(height) + pad).min(i64::from(canvas.height()));
    if right <= left || lower <= upper {
        return Ok(width);
    }

    let pix_w: u16 = (right - left)
        .try_into()
        .map_err(|_| WidgetError::render("canvas wider than glyph raster limit"))?;
    let pix_h: u16 = (lower - upper)
        .try_into()
        .map_err(|_| WidgetError::render("canvas taller than glyph raster limit"))?;

    let mut ctx = vello_cpu::RenderContext::new(pix_w, pix_h);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        (x - left) as f64,
        top - upper as f64,
    )));

    let mut drawn = 0usize;
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let style_brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                style_brush.r,
                style_brush.g,
                style_brush.b,
                style_brush.a,
            ));

            let mut pen_x = run.offset();
            let baseline = run.baseline();
            let glyphs: Vec<vello_cpu::Glyph> = run
                .glyphs()
                .map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: pen_x + g.x,
                        y: baseline - g.y,
                    };
                    pen_x += g.advance;
                    glyph
                })
                .collect();
            drawn += glyphs.len();

            ctx.glyph_run(font.raster_font())
                .font_size(run.run().font_size())
                .hint(false)
                .fill_glyphs(glyphs.into_iter());
        }
    }

    if drawn == 0 {
        return Err(WidgetError::render(format!(
            "font '{}' produced no glyphs for {text:?}",
            font.family()
        )));
    }

    let mut pixmap = vello_cpu::Pixmap::new(pix_w, pix_h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let coverage = unpremultiply(pixmap.data_as_u8_slice(), pix_w, pix_h)?;
    image::imageops::overlay(canvas, &coverage, left, upper);

    Ok(width)
}

fn unpremultiply(premul: &[u8], width: u16, height: u16) -> WidgetResult<RgbaImage> {
    let mut straight = premul.to_vec();
    unpremultiply_rgba8_in_place(&mut straight);
    RgbaImage::from_raw(u32::from(width), u32::from(height), straight)
        .ok_or_else(|| WidgetError::render("glyph raster size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/text/label.rs"]
mod tests;
