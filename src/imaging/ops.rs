use image::{RgbaImage, imageops::FilterType};

use crate::{
    codec::convert::decode,
    foundation::{
        color::Rgba8,
        error::{WidgetError, WidgetResult},
    },
};

/// Decode `bytes` and scale + center-crop the result to exactly `width × height`.
pub fn resize_and_crop(bytes: &[u8], width: u32, height: u32) -> WidgetResult<RgbaImage> {
    check_target(width, height)?;
    let img = decode(bytes)?;
    fill_crop(&img, width, height)
}

/// Center-crop `img` to the aspect ratio of `width × height`, then scale the crop to exactly
/// that size. Aspect ratio is preserved; the image is never stretched.
///
/// Cropping happens before scaling, so intermediate buffers never exceed the source or
/// target size, whatever the source aspect ratio.
pub fn fill_crop(img: &RgbaImage, width: u32, height: u32) -> WidgetResult<RgbaImage> {
    check_target(width, height)?;
    let (sw, sh) = img.dimensions();
    if sw == 0 || sh == 0 {
        return Err(WidgetError::dimension("source image is empty"));
    }
    if (sw, sh) == (width, height) {
        return Ok(img.clone());
    }

    let (crop_w, crop_h) = cover_region(sw, sh, width, height);
    let x = (sw - crop_w) / 2;
    let y = (sh - crop_h) / 2;
    let region = image::imageops::crop_imm(img, x, y, crop_w, crop_h).to_image();
    if (crop_w, crop_h) == (width, height) {
        return Ok(region);
    }
    Ok(image::imageops::resize(
        &region,
        width,
        height,
        FilterType::Lanczos3,
    ))
}

/// Largest `sw × sh` sub-rectangle with the aspect ratio of `tw × th`.
fn cover_region(sw: u32, sh: u32, tw: u32, th: u32) -> (u32, u32) {
    let (sw64, sh64, tw64, th64) = (u64::from(sw), u64::from(sh), u64::from(tw), u64::from(th));
    if sw64 * th64 > sh64 * tw64 {
        let w = ((sh64 * tw64 + th64 / 2) / th64).clamp(1, sw64);
        (w as u32, sh)
    } else {
        let h = ((sw64 * th64 + tw64 / 2) / tw64).clamp(1, sh64);
        (sw, h as u32)
    }
}

/// Downscale by an integer divisor with bilinear filtering.
///
/// Output is `floor(w / factor) × floor(h / factor)`; a factor of 1 returns an exact copy.
pub fn resize(img: &RgbaImage, factor: u32) -> WidgetResult<RgbaImage> {
    if factor == 0 {
        return Err(WidgetError::dimension("resize factor must be > 0"));
    }
    let (w, h) = img.dimensions();
    let (nw, nh) = (w / factor, h / factor);
    if nw == 0 || nh == 0 {
        return Err(WidgetError::dimension(format!(
            "resize factor {factor} collapses {w}x{h} to {nw}x{nh}"
        )));
    }
    if factor == 1 {
        return Ok(img.clone());
    }
    Ok(image::imageops::resize(img, nw, nh, FilterType::Triangle))
}

/// Overwrite every pixel of `canvas` with `color`.
pub fn fill(canvas: &mut RgbaImage, color: Rgba8) {
    for px in canvas.pixels_mut() {
        *px = color;
    }
}

/// Paste `img` at `(x, y)` replacing destination pixels, alpha included.
///
/// Only the overlapping region is written; offsets may be negative or past the edge.
pub fn copy_into(canvas: &mut RgbaImage, x: i64, y: i64, img: &RgbaImage) {
    image::imageops::replace(canvas, img, x, y);
}

/// Composite `img` over `canvas` at `(x, y)` (source-over, straight alpha), clipped.
pub fn blend_over(canvas: &mut RgbaImage, x: i64, y: i64, img: &RgbaImage) {
    image::imageops::overlay(canvas, img, x, y);
}

/// Convert premultiplied RGBA8 bytes (as produced by the vector rasterizers) to straight alpha.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn check_target(width: u32, height: u32) -> WidgetResult<()> {
    if width == 0 || height == 0 {
        return Err(WidgetError::dimension(format!(
            "target dimensions must be > 0, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/ops.rs"]
mod tests;
