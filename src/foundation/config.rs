use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    color::{ColorDef, WHITE},
    error::{WidgetError, WidgetResult},
};

/// Environment variable overriding [`RenderConfig::font_path`].
pub const ENV_FONT: &str = "FATES_WIDGET_FONT";
/// Environment variable overriding [`RenderConfig::logo_path`].
pub const ENV_LOGO: &str = "FATES_WIDGET_LOGO";
/// Environment variable overriding [`RenderConfig::logo_size`].
pub const ENV_LOGO_SIZE: &str = "FATES_WIDGET_LOGO_SIZE";
/// Environment variable overriding [`RenderConfig::canvas_pool_capacity`].
pub const ENV_CANVAS_POOL: &str = "FATES_WIDGET_CANVAS_POOL";

/// Startup configuration for the shared render assets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// TrueType/OpenType font used for every label.
    pub font_path: PathBuf,
    /// Logo icon (PNG, JPEG, WebP, GIF or SVG).
    pub logo_path: PathBuf,
    /// Edge length the logo is pre-scaled to, in pixels.
    pub logo_size: u32,
    /// Number of canvases kept for reuse between renders. `0` allocates a fresh canvas per
    /// render.
    pub canvas_pool_capacity: usize,
    /// Color of the title and username labels.
    pub text_color: ColorDef,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("assets/font.ttf"),
            logo_path: PathBuf::from("assets/listicon.png"),
            logo_size: 24,
            canvas_pool_capacity: 0,
            text_color: ColorDef::from(WHITE),
        }
    }
}

impl RenderConfig {
    /// Defaults overlaid with `FATES_WIDGET_*` environment variables.
    pub fn from_env() -> WidgetResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Read a JSON config file; missing fields keep their defaults.
    pub fn from_json_path(path: impl AsRef<Path>) -> WidgetResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            WidgetError::config(format!("parse render config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `FATES_WIDGET_*` environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> WidgetResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> WidgetResult<Self> {
        if let Some(v) = lookup(ENV_FONT).filter(|v| !v.is_empty()) {
            self.font_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_LOGO).filter(|v| !v.is_empty()) {
            self.logo_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_LOGO_SIZE) {
            self.logo_size = v
                .trim()
                .parse()
                .map_err(|_| WidgetError::config(format!("{ENV_LOGO_SIZE}={v:?} is not a u32")))?;
        }
        if let Some(v) = lookup(ENV_CANVAS_POOL) {
            self.canvas_pool_capacity = v.trim().parse().map_err(|_| {
                WidgetError::config(format!("{ENV_CANVAS_POOL}={v:?} is not a usize"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject configurations no render could succeed with.
    pub fn validate(&self) -> WidgetResult<()> {
        if self.logo_size == 0 {
            return Err(WidgetError::config("logo_size must be > 0"));
        }
        if self.font_path.as_os_str().is_empty() {
            return Err(WidgetError::config("font_path must be non-empty"));
        }
        if self.logo_path.as_os_str().is_empty() {
            return Err(WidgetError::config("logo_path must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
