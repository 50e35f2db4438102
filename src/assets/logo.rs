use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::{
    codec::convert::decode,
    foundation::error::{WidgetError, WidgetResult},
    imaging::ops::{fill_crop, unpremultiply_rgba8_in_place},
};

/// Read a logo file and pre-scale it to `size × size`.
pub fn load_logo(path: impl AsRef<Path>, size: u32) -> WidgetResult<RgbaImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("read logo file '{}'", path.display()))
        .map_err(|e| WidgetError::asset(format!("{e:#}")))?;
    prepare_logo(&bytes, size)
        .map_err(|e| WidgetError::asset(format!("logo '{}': {e}", path.display())))
}

/// Decode raster or SVG logo bytes and fit them to a `size × size` square.
pub fn prepare_logo(bytes: &[u8], size: u32) -> WidgetResult<RgbaImage> {
    if size == 0 {
        return Err(WidgetError::dimension("logo size must be > 0"));
    }
    if looks_like_svg(bytes) {
        return rasterize_svg(bytes, size);
    }
    fill_crop(&decode(bytes)?, size, size)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

fn rasterize_svg(bytes: &[u8], size: u32) -> WidgetResult<RgbaImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| WidgetError::decode(format!("parse svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| WidgetError::dimension("failed to allocate svg pixmap"))?;

    // Uniform scale, centered, so non-square viewboxes are letterboxed rather than stretched.
    let tree_size = tree.size();
    let scale = f32::min(
        size as f32 / tree_size.width(),
        size as f32 / tree_size.height(),
    );
    let dx = (size as f32 - tree_size.width() * scale) / 2.0;
    let dy = (size as f32 - tree_size.height() * scale) / 2.0;
    let xform = resvg::tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut rgba = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    RgbaImage::from_raw(size, size, rgba)
        .ok_or_else(|| WidgetError::decode("svg raster size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/logo.rs"]
mod tests;
