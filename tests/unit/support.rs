use std::path::PathBuf;

use crate::text::engine::FontAsset;

/// Vendored test font (Tuffy, public domain), overridable with `FATES_WIDGET_TEST_FONT`.
pub(crate) fn font_path() -> PathBuf {
    let path = std::env::var_os("FATES_WIDGET_TEST_FONT")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/Tuffy.ttf")
        });
    assert!(path.is_file(), "missing test font '{}'", path.display());
    path
}

pub(crate) fn font() -> FontAsset {
    FontAsset::load(font_path()).unwrap()
}

pub(crate) fn solid(w: u32, h: u32, rgba: [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(w, h, image::Rgba(rgba))
}

pub(crate) fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
