use std::{fmt, str::FromStr};

use crate::foundation::error::{WidgetError, WidgetResult};

/// Container formats recognized on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// Portable Network Graphics.
    Png,
    /// JPEG / JFIF.
    Jpeg,
    /// GIF; only the first frame is ever decoded.
    Gif,
    /// RIFF WebP (lossy or lossless).
    WebP,
}

impl ImageKind {
    /// Short lowercase name, as used in query strings and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::WebP => "webp",
        }
    }

    /// MIME type for HTTP responses.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
        }
    }

    /// Preferred file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::WebP => "webp",
        }
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Gif => image::ImageFormat::Gif,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageKind {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            "webp" => Ok(Self::WebP),
            other => Err(WidgetError::conversion(format!(
                "unsupported image format: {other}"
            ))),
        }
    }
}

/// Identify the container format from the buffer header without decoding pixel data.
pub fn detect(bytes: &[u8]) -> WidgetResult<ImageKind> {
    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    if bytes.starts_with(PNG_MAGIC) {
        return Ok(ImageKind::Png);
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Ok(ImageKind::Jpeg);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Ok(ImageKind::Gif);
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Ok(ImageKind::WebP);
    }
    Err(WidgetError::UnrecognizedFormat)
}

/// Formats a finished widget can be encoded to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Lossless PNG.
    Png,
    /// Lossless WebP. The default response format.
    #[default]
    WebP,
    /// JPEG, alpha dropped.
    Jpeg,
}

impl OutputFormat {
    /// Resolve the `format` query parameter of the widget route: `png` selects PNG and any
    /// other value (including none) selects WebP.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("png") => Self::Png,
            _ => Self::WebP,
        }
    }

    /// `Content-Type` header value.
    pub fn content_type(self) -> &'static str {
        self.kind().mime()
    }

    /// Preferred file extension (without the dot).
    pub fn extension(self) -> &'static str {
        self.kind().extension()
    }

    /// Matching input container kind.
    pub fn kind(self) -> ImageKind {
        match self {
            Self::Png => ImageKind::Png,
            Self::WebP => ImageKind::WebP,
            Self::Jpeg => ImageKind::Jpeg,
        }
    }
}

impl TryFrom<ImageKind> for OutputFormat {
    type Error = WidgetError;

    fn try_from(kind: ImageKind) -> Result<Self, Self::Error> {
        match kind {
            ImageKind::Png => Ok(Self::Png),
            ImageKind::WebP => Ok(Self::WebP),
            ImageKind::Jpeg => Ok(Self::Jpeg),
            ImageKind::Gif => Err(WidgetError::conversion(
                "gif is accepted as input only; encode to png, webp or jpeg",
            )),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.parse::<ImageKind>()?)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/format.rs"]
mod tests;
