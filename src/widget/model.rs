use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::{
    codec::convert::decode,
    foundation::{
        color::{BLACK, Rgba8, color_or_default},
        error::WidgetResult,
    },
};

/// Entity the widget is rendered for.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetUser {
    /// Bot, server or user id; carried into tracing spans.
    pub id: String,
    /// Display name drawn under the avatar.
    pub username: String,
    /// Decoded avatar of any size.
    pub avatar: RgbaImage,
}

impl WidgetUser {
    /// Build a user from already-decoded avatar pixels.
    pub fn new(id: impl Into<String>, username: impl Into<String>, avatar: RgbaImage) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            avatar,
        }
    }

    /// Detect and decode downloaded avatar bytes (PNG, JPEG, GIF or WebP).
    pub fn from_avatar_bytes(
        id: impl Into<String>,
        username: impl Into<String>,
        bytes: &[u8],
    ) -> WidgetResult<Self> {
        Ok(Self::new(id, username, decode(bytes)?))
    }
}

/// Per-request rendering options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Background color; black when absent or unparsable.
    pub bgcolor: Option<String>,
}

impl WidgetOptions {
    /// Options with an explicit background color.
    pub fn with_bgcolor(bgcolor: impl Into<String>) -> Self {
        Self {
            bgcolor: Some(bgcolor.into()),
        }
    }

    /// Resolved background color.
    pub fn background(&self) -> Rgba8 {
        color_or_default(self.bgcolor.as_deref(), BLACK)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/model.rs"]
mod tests;
