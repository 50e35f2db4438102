use image::RgbaImage;

use crate::{
    assets::logo::load_logo,
    foundation::{color::Rgba8, config::RenderConfig, error::WidgetResult},
    render::pool::{CanvasPool, PoolStats},
    text::engine::FontAsset,
    widget::compose::{CANVAS_HEIGHT, CANVAS_WIDTH},
};

/// Shared, read-only render resources plus the optional canvas pool.
///
/// Construct one per process and pass `&RenderContext` to every render; it is `Send + Sync`
/// and never mutated after construction (the pool synchronizes itself).
#[derive(Debug)]
pub struct RenderContext {
    font: FontAsset,
    logo: RgbaImage,
    text_color: Rgba8,
    pool: CanvasPool,
}

impl RenderContext {
    /// Load the font and logo named by `config`.
    ///
    /// Missing or unparsable files are fatal: the error is returned and no context exists.
    #[tracing::instrument(skip_all, fields(font = %config.font_path.display(), logo = %config.logo_path.display()))]
    pub fn load(config: &RenderConfig) -> WidgetResult<Self> {
        config.validate()?;
        let font = FontAsset::load(&config.font_path)?;
        let logo = load_logo(&config.logo_path, config.logo_size)?;
        tracing::info!(
            family = font.family(),
            logo_size = config.logo_size,
            pool_capacity = config.canvas_pool_capacity,
            "render assets loaded"
        );
        Ok(Self::from_parts(font, logo, config.canvas_pool_capacity)
            .with_text_color(config.text_color.to_rgba8()))
    }

    /// Assemble a context from already-loaded assets. The logo is used at its own size.
    pub fn from_parts(font: FontAsset, logo: RgbaImage, pool_capacity: usize) -> Self {
        Self {
            font,
            logo,
            text_color: crate::foundation::color::WHITE,
            pool: CanvasPool::new(CANVAS_WIDTH, CANVAS_HEIGHT, pool_capacity),
        }
    }

    /// Override the label color (white by default).
    pub fn with_text_color(mut self, color: Rgba8) -> Self {
        self.text_color = color;
        self
    }

    /// Shared font face.
    pub fn font(&self) -> &FontAsset {
        &self.font
    }

    /// Pre-scaled logo icon.
    pub fn logo(&self) -> &RgbaImage {
        &self.logo
    }

    /// Color used for the title and username labels.
    pub fn text_color(&self) -> Rgba8 {
        self.text_color
    }

    /// Canvas pool counters.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub(crate) fn pool(&self) -> &CanvasPool {
        &self.pool
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/context.rs"]
mod tests;
