/// Convenience result type used across the widget renderer.
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Error taxonomy for the rendering core.
///
/// Every failure inside a render aborts the whole pipeline and surfaces here; nothing is
/// swallowed into zero-valued results.
#[derive(thiserror::Error, Debug)]
pub enum WidgetError {
    /// Input bytes are not a supported image, or decoding them failed.
    #[error("decode error: {0}")]
    Decode(String),

    /// Requested target dimensions are non-positive or degenerate.
    #[error("dimension error: {0}")]
    Dimension(String),

    /// No known container signature matched the input header.
    #[error("unrecognized image format")]
    UnrecognizedFormat,

    /// Conversion between the requested container types is not supported or failed.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// Text layout or glyph rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Shared assets (font, logo) could not be loaded or parsed.
    #[error("asset error: {0}")]
    Asset(String),

    /// Invalid renderer configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WidgetError {
    /// Build a [`WidgetError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WidgetError::Dimension`] value.
    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::Dimension(msg.into())
    }

    /// Build a [`WidgetError::Conversion`] value.
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// Build a [`WidgetError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WidgetError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`WidgetError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
