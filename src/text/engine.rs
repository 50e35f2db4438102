use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use anyhow::Context;
use sha2::Digest as _;

use crate::foundation::error::{WidgetError, WidgetResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<image::Rgba<u8>> for TextBrushRgba8 {
    fn from(c: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = c.0;
        Self { r, g, b, a }
    }
}

/// Stateful helper that shapes single lines of text with one registered font.
///
/// The font bytes are registered with Parley once, at construction; every layout after that
/// resolves against the same family.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and build fresh Parley contexts around it.
    pub fn new(font_bytes: &[u8]) -> WidgetResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| WidgetError::asset("no font families registered from font bytes"))?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WidgetError::asset("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name resolved from the registered font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape and lay out one unwrapped line of plain text.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> WidgetResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WidgetError::render("text size must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Immutable parsed font face shared by every render.
///
/// Shaping goes through an internal lock that is held only while one line is laid out;
/// glyph rasterization runs outside of it.
pub struct FontAsset {
    bytes: Arc<Vec<u8>>,
    family: String,
    raster_font: vello_cpu::peniko::FontData,
    engine: Mutex<TextLayoutEngine>,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("family", &self.family)
            .field("font_bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontAsset {
    /// Parse a TrueType/OpenType font from memory.
    pub fn from_bytes(bytes: Vec<u8>) -> WidgetResult<Self> {
        if bytes.is_empty() {
            return Err(WidgetError::asset("font file is empty"));
        }
        let engine = TextLayoutEngine::new(&bytes)?;
        let family = engine.family_name().to_string();
        let raster_font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);

        Ok(Self {
            bytes: Arc::new(bytes),
            family,
            raster_font,
            engine: Mutex::new(engine),
        })
    }

    /// Read and parse a font file.
    pub fn load(path: impl AsRef<Path>) -> WidgetResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))
            .map_err(|e| WidgetError::asset(format!("{e:#}")))?;
        Self::from_bytes(bytes)
    }

    /// Font family name as registered with the shaper.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Hex-encoded SHA-256 of the font bytes, for diagnostics.
    pub fn sha256_hex(&self) -> String {
        let digest = sha2::Sha256::digest(self.bytes.as_slice());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }

    pub(crate) fn raster_font(&self) -> &vello_cpu::peniko::FontData {
        &self.raster_font
    }

    pub(crate) fn layout_line(
        &self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> WidgetResult<parley::Layout<TextBrushRgba8>> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| WidgetError::render("text layout engine lock poisoned"))?;
        engine.layout_line(text, size_px, brush)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
