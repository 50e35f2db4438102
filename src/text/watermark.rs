use image::RgbaImage;

use crate::{
    foundation::{
        color::WHITE,
        error::{WidgetError, WidgetResult},
    },
    text::{
        engine::FontAsset,
        label::{Label, draw_label},
    },
};

/// Horizontal cell reserved for one watermark stamp, in pixels.
pub const WATERMARK_WIDTH: i64 = 200;
/// Resolution the watermark text is set at.
pub const WATERMARK_DPI: f64 = 100.0;
/// Gap between stamps and around the image border, in pixels.
pub const WATERMARK_MARGIN: i64 = 150;
/// Watermark point size.
pub const WATERMARK_SIZE: f64 = 10.0;

/// Stamp `text` over a copy of `img` in opaque white, tiled across the image.
///
/// Stamps start `WATERMARK_MARGIN` pixels in from the top-left corner and repeat every
/// `WATERMARK_WIDTH + WATERMARK_MARGIN` pixels horizontally and every line height plus
/// `WATERMARK_MARGIN` vertically. Images smaller than the margin get a single stamp at the
/// origin. Empty text returns an unchanged copy.
pub fn watermark(img: &RgbaImage, font: &FontAsset, text: &str) -> WidgetResult<RgbaImage> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(WidgetError::dimension("cannot watermark an empty image"));
    }
    let mut out = img.clone();
    if text.trim().is_empty() {
        return Ok(out);
    }

    let mut stamp = Label::new([text]).with_size(WATERMARK_SIZE).with_color(WHITE);
    stamp.dpi = WATERMARK_DPI;
    let line_h = (stamp.size_px() * stamp.spacing).ceil() as i64;

    let (w, h) = (i64::from(w), i64::from(h));
    let start_x = if w > WATERMARK_MARGIN { WATERMARK_MARGIN } else { 0 };
    let start_y = if h > WATERMARK_MARGIN { WATERMARK_MARGIN } else { 0 };

    let mut stamps = 0usize;
    let mut y = start_y;
    while y < h {
        let mut x = start_x;
        while x < w {
            draw_label(&mut out, font, &stamp.clone().at(x, y))?;
            stamps += 1;
            x += WATERMARK_WIDTH + WATERMARK_MARGIN;
        }
        y += line_h + WATERMARK_MARGIN;
    }

    tracing::debug!(stamps, width = w, height = h, "watermark applied");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/text/watermark.rs"]
mod tests;
