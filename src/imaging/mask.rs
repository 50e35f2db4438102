use image::{Pixel as _, RgbaImage};

use crate::foundation::color::{Rgba8, TRANSPARENT};

/// Per-pixel circular coverage function.
///
/// A pixel at integer `(x, y)` is covered iff
/// `(x - cx + 0.5)² + (y - cy + 0.5)² < radius²`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircularMask {
    /// Center column.
    pub cx: i64,
    /// Center row.
    pub cy: i64,
    /// Radius in pixels.
    pub radius: i64,
}

impl CircularMask {
    /// Circle inscribed in a `width × height` box: center `(width/2, height/2)`,
    /// radius `min(width, height) / 2`.
    pub fn inscribed(width: u32, height: u32) -> Self {
        Self {
            cx: i64::from(width / 2),
            cy: i64::from(height / 2),
            radius: i64::from(width.min(height) / 2),
        }
    }

    /// Whether the pixel at `(x, y)` lies inside the circle.
    pub fn covers(&self, x: i64, y: i64) -> bool {
        let dx = (x - self.cx) as f64 + 0.5;
        let dy = (y - self.cy) as f64 + 0.5;
        let r = self.radius as f64;
        dx * dx + dy * dy < r * r
    }
}

/// Crop `src` to its inscribed circle; everything outside becomes fully transparent.
pub fn circle_mask(src: &RgbaImage) -> RgbaImage {
    circle_mask_with_edge(src, TRANSPARENT)
}

/// Crop `src` to its inscribed circle over a solid `edge` color.
///
/// The output is filled with `edge`, then `src` is composited over it wherever the mask
/// covers.
pub fn circle_mask_with_edge(src: &RgbaImage, edge: Rgba8) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mask = CircularMask::inscribed(w, h);

    RgbaImage::from_fn(w, h, |x, y| {
        if !mask.covers(i64::from(x), i64::from(y)) {
            return edge;
        }
        let src_px = *src.get_pixel(x, y);
        if edge[3] == 0 || src_px[3] == 255 {
            return src_px;
        }
        let mut px = edge;
        px.blend(&src_px);
        px
    })
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/mask.rs"]
mod tests;
