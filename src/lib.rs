//! Bot profile card ("widget") renderer for Fates List.
//!
//! Given a [`WidgetUser`] (id, username, decoded avatar) and [`WidgetOptions`], the renderer
//! composes a fixed 640×480 card: background, list logo, "Fates List" title, a circular
//! avatar in the center and the username under it. The result is encoded to PNG or WebP.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`RenderContext::load`] reads the font and logo once per process.
//! 2. **Decode**: [`WidgetUser::from_avatar_bytes`] detects and decodes the avatar.
//! 3. **Compose**: [`RenderContext::draw_widget`] draws onto a fresh (or pooled) canvas.
//! 4. **Encode**: [`RenderContext::render_widget`] hands back an [`EncodedWidget`].
//!
//! Rendering is synchronous and CPU-bound. A single `RenderContext` can be shared across
//! threads; every render owns its canvas for its whole duration.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod codec;
mod foundation;
mod imaging;
mod render;
mod text;
mod widget;

pub use assets::context::RenderContext;
pub use assets::logo::{load_logo, prepare_logo};
pub use codec::convert::{convert, decode, decode_raw_rgba8, encode};
pub use codec::format::{ImageKind, OutputFormat, detect};
pub use foundation::color::{
    BLACK, ColorDef, Rgba8, TRANSPARENT, WHITE, color_or_default, parse_color,
};
pub use foundation::config::{
    ENV_CANVAS_POOL, ENV_FONT, ENV_LOGO, ENV_LOGO_SIZE, RenderConfig,
};
pub use foundation::error::{WidgetError, WidgetResult};
pub use imaging::color_key::{
    DEFAULT_COLOR_THRESHOLD, color_distance, replace_color, replace_color_with_threshold,
};
pub use imaging::mask::{CircularMask, circle_mask, circle_mask_with_edge};
pub use imaging::ops::{blend_over, copy_into, fill, fill_crop, resize, resize_and_crop};
pub use render::pool::{CanvasPool, PoolStats};
pub use text::engine::{FontAsset, TextBrushRgba8, TextLayoutEngine};
pub use text::label::{Label, LabelExtent, draw_label};
pub use text::watermark::{
    WATERMARK_DPI, WATERMARK_MARGIN, WATERMARK_SIZE, WATERMARK_WIDTH, watermark,
};
pub use widget::compose::{
    AVATAR_NORMALIZED_SIZE, AVATAR_SIZE, CANVAS_HEIGHT, CANVAS_WIDTH, DPI, EXTRA_TOP_INDENT,
    EncodedWidget, SPACING, TEXT_INDENT, TITLE, TITLE_SIZE,
};
pub use widget::model::{WidgetOptions, WidgetUser};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
