use image::RgbaImage;

use crate::foundation::color::Rgba8;

/// Threshold below which [`replace_color`] treats two colors as the same.
pub const DEFAULT_COLOR_THRESHOLD: u32 = 100;

/// Sum of absolute RGB differences in 16-bit channel space (`c * 257`). Alpha is ignored.
pub fn color_distance(a: Rgba8, b: Rgba8) -> u32 {
    a.0[..3]
        .iter()
        .zip(&b.0[..3])
        .map(|(&ca, &cb)| (u32::from(ca) * 257).abs_diff(u32::from(cb) * 257))
        .sum()
}

/// [`replace_color_with_threshold`] with [`DEFAULT_COLOR_THRESHOLD`].
pub fn replace_color(img: &RgbaImage, target: Rgba8, replacement: Rgba8) -> RgbaImage {
    replace_color_with_threshold(img, target, replacement, DEFAULT_COLOR_THRESHOLD)
}

/// Copy of `img` where every pixel closer than `threshold` to `target` becomes `replacement`.
///
/// Replacing a color with itself leaves the image untouched.
pub fn replace_color_with_threshold(
    img: &RgbaImage,
    target: Rgba8,
    replacement: Rgba8,
    threshold: u32,
) -> RgbaImage {
    let mut out = img.clone();
    if target == replacement {
        return out;
    }
    for px in out.pixels_mut() {
        if color_distance(*px, target) < threshold {
            *px = replacement;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/color_key.rs"]
mod tests;
