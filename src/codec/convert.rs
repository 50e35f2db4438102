use std::io::Cursor;

use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::{
    codec::format::{ImageKind, OutputFormat, detect},
    foundation::error::{WidgetError, WidgetResult},
};

const JPEG_QUALITY: u8 = 90;

/// Decode an image buffer into straight RGBA8.
///
/// The container is identified by [`detect`] first, so empty or unknown buffers fail with
/// [`WidgetError::Decode`] before any decoder runs. GIF input yields its first frame.
pub fn decode(bytes: &[u8]) -> WidgetResult<RgbaImage> {
    if bytes.is_empty() {
        return Err(WidgetError::decode("image buffer is empty"));
    }
    let kind = detect(bytes).map_err(|_| {
        WidgetError::decode(format!(
            "unrecognized image header ({} bytes)",
            bytes.len()
        ))
    })?;

    let img = image::load_from_memory_with_format(bytes, kind.image_format())
        .map_err(|e| WidgetError::decode(format!("decode {kind}: {e}")))?;
    Ok(img.to_rgba8())
}

/// Encode an RGBA8 image. PNG and WebP output are lossless.
pub fn encode(img: &RgbaImage, format: OutputFormat) -> WidgetResult<Vec<u8>> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(WidgetError::dimension(format!(
            "cannot encode an empty {width}x{height} image"
        )));
    }

    let mut buf = Vec::new();
    match format {
        OutputFormat::Png => {
            image::codecs::png::PngEncoder::new(Cursor::new(&mut buf))
                .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| WidgetError::conversion(format!("encode png: {e}")))?;
        }
        OutputFormat::WebP => {
            image::codecs::webp::WebPEncoder::new_lossless(Cursor::new(&mut buf))
                .encode(img.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| WidgetError::conversion(format!("encode webp: {e}")))?;
        }
        OutputFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            image::codecs::jpeg::JpegEncoder::new_with_quality(
                Cursor::new(&mut buf),
                JPEG_QUALITY,
            )
            .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| WidgetError::conversion(format!("encode jpeg: {e}")))?;
        }
    }
    Ok(buf)
}

/// Re-encode an image buffer into another container.
///
/// GIF is input-only; asking for a GIF target is a [`WidgetError::Conversion`].
pub fn convert(bytes: &[u8], target: ImageKind) -> WidgetResult<Vec<u8>> {
    let format = OutputFormat::try_from(target)?;
    let img = decode(bytes)?;
    tracing::debug!(
        to = %target,
        width = img.width(),
        height = img.height(),
        "converting image"
    );
    encode(&img, format)
}

/// Wrap a raw, tightly packed RGBA8 buffer.
pub fn decode_raw_rgba8(width: u32, height: u32, data: Vec<u8>) -> WidgetResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(WidgetError::dimension(format!(
            "raw buffer dimensions must be > 0, got {width}x{height}"
        )));
    }
    let expected = width as usize * height as usize * 4;
    let actual = data.len();
    RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        WidgetError::dimension(format!(
            "raw buffer length mismatch: expected {expected} bytes for {width}x{height}, got {actual}"
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/codec/convert.rs"]
mod tests;
