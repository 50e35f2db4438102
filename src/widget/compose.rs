use image::RgbaImage;

use crate::{
    assets::context::RenderContext,
    codec::{convert::encode, format::OutputFormat},
    foundation::error::WidgetResult,
    imaging::{
        mask::circle_mask_with_edge,
        ops::{copy_into, fill_crop},
    },
    text::label::{Label, draw_label},
    widget::model::{WidgetOptions, WidgetUser},
};

/// Widget canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 640;
/// Widget canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 480;
/// Point size of the title and username labels.
pub const TITLE_SIZE: f64 = 25.0;
/// Left margin of the logo and gap between logo and title.
pub const TEXT_INDENT: i64 = 10;
/// Additional bottom margin under the logo.
pub const EXTRA_TOP_INDENT: i64 = 8;
/// Text resolution; 72 maps points to pixels one to one.
pub const DPI: f64 = 72.0;
/// Line height multiplier.
pub const SPACING: f64 = 1.25;
/// Avatars are first normalized to this square size.
pub const AVATAR_NORMALIZED_SIZE: u32 = 512;
/// Edge length of the circular avatar on the card.
pub const AVATAR_SIZE: u32 = 128;
/// Text drawn next to the logo.
pub const TITLE: &str = "Fates List";

/// An encoded widget image ready to be served.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedWidget {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Container the bytes are encoded in.
    pub format: OutputFormat,
}

impl EncodedWidget {
    /// MIME type for the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

impl RenderContext {
    /// Compose the bot card for `user`.
    ///
    /// The returned canvas is owned by the caller; hand it back with [`RenderContext::recycle`]
    /// when a canvas pool is configured.
    #[tracing::instrument(skip_all, fields(user_id = %user.id))]
    pub fn draw_widget(&self, user: &WidgetUser, opts: &WidgetOptions) -> WidgetResult<RgbaImage> {
        let background = opts.background();
        let mut canvas = self.pool().checkout(background);

        match self.compose(&mut canvas, user, background) {
            Ok(()) => {
                tracing::debug!(username = %user.username, "widget drawn");
                Ok(canvas)
            }
            Err(e) => {
                tracing::debug!(error = %e, "widget draw failed");
                Err(e)
            }
        }
    }

    /// Compose and encode the bot card. The canvas goes back to the pool after encoding.
    #[tracing::instrument(skip_all, fields(user_id = %user.id, format = %format))]
    pub fn render_widget(
        &self,
        user: &WidgetUser,
        opts: &WidgetOptions,
        format: OutputFormat,
    ) -> WidgetResult<EncodedWidget> {
        let canvas = self.draw_widget(user, opts)?;
        let encoded = encode(&canvas, format);
        self.recycle(canvas);
        Ok(EncodedWidget {
            bytes: encoded?,
            format,
        })
    }

    /// Return a canvas from [`RenderContext::draw_widget`] for reuse.
    pub fn recycle(&self, canvas: RgbaImage) {
        self.pool().release(canvas);
    }

    fn compose(
        &self,
        canvas: &mut RgbaImage,
        user: &WidgetUser,
        background: image::Rgba<u8>,
    ) -> WidgetResult<()> {
        let canvas_h = i64::from(canvas.height());
        let canvas_w = i64::from(canvas.width());

        let logo = self.logo();
        let logo_w = i64::from(logo.width());
        let logo_h = i64::from(logo.height());
        let logo_y = canvas_h - logo_h - TEXT_INDENT - EXTRA_TOP_INDENT;
        copy_into(canvas, TEXT_INDENT, logo_y, logo);

        let title = self.label([TITLE]).at(TEXT_INDENT + logo_w + TEXT_INDENT, logo_y - logo_h / 8);
        draw_label(canvas, self.font(), &title)?;

        let normalized = fill_crop(&user.avatar, AVATAR_NORMALIZED_SIZE, AVATAR_NORMALIZED_SIZE)?;
        let avatar = fill_crop(&normalized, AVATAR_SIZE, AVATAR_SIZE)?;
        let avatar = circle_mask_with_edge(&avatar, background);

        let avatar_x = (canvas_w - i64::from(avatar.width())) / 2;
        let avatar_y = (canvas_h - i64::from(avatar.height())) / 2;
        copy_into(canvas, avatar_x, avatar_y, &avatar);

        let name = self
            .label([user.username.as_str()])
            .at(avatar_x, avatar_y + i64::from(avatar.height()));
        draw_label(canvas, self.font(), &name)?;
        Ok(())
    }

    fn label<const N: usize>(&self, lines: [&str; N]) -> Label {
        let mut label = Label::new(lines)
            .with_size(TITLE_SIZE)
            .with_color(self.text_color());
        label.dpi = DPI;
        label.spacing = SPACING;
        label
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/compose.rs"]
mod tests;
