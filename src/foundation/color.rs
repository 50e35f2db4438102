use serde::{Deserialize, Serialize};

use crate::foundation::error::{WidgetError, WidgetResult};

/// Straight (non-premultiplied) RGBA8 color.
pub type Rgba8 = image::Rgba<u8>;

/// Opaque black, the default widget background.
pub const BLACK: Rgba8 = image::Rgba([0, 0, 0, 255]);
/// Opaque white, the default label color.
pub const WHITE: Rgba8 = image::Rgba([255, 255, 255, 255]);
/// Fully transparent black.
pub const TRANSPARENT: Rgba8 = image::Rgba([0, 0, 0, 0]);

/// Parse a color string.
///
/// Accepted forms (case-insensitive, surrounding whitespace ignored):
///
/// - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (the `#` is optional)
/// - functional: `rgb(r, g, b)` and `rgba(r, g, b, a)` with 0..=255 channels; alpha is
///   either a 0..=1 fraction or a 0..=255 integer
/// - CSS basic named colors plus `orange` and `transparent`
pub fn parse_color(s: &str) -> WidgetResult<Rgba8> {
    let s = s.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err(WidgetError::config("color string must be non-empty"));
    }

    if let Some(c) = named_color(&s) {
        return Ok(c);
    }
    if let Some(args) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_functional(args);
    }

    parse_hex(&s).map_err(WidgetError::config)
}

/// Resolve an optional color string, falling back to `default` when absent or unparseable.
pub fn color_or_default(s: Option<&str>, default: Rgba8) -> Rgba8 {
    let Some(raw) = s.filter(|v| !v.trim().is_empty()) else {
        return default;
    };
    match parse_color(raw) {
        Ok(c) => c,
        Err(err) => {
            tracing::debug!(color = raw, %err, "unrecognized color, using default");
            default
        }
    }
}

fn named_color(s: &str) -> Option<Rgba8> {
    let rgb = match s {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "lime" => [0, 255, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" | "aqua" => [0, 255, 255],
        "magenta" | "fuchsia" => [255, 0, 255],
        "gray" | "grey" => [128, 128, 128],
        "silver" => [192, 192, 192],
        "maroon" => [128, 0, 0],
        "olive" => [128, 128, 0],
        "purple" => [128, 0, 128],
        "teal" => [0, 128, 128],
        "navy" => [0, 0, 128],
        "orange" => [255, 165, 0],
        "transparent" => return Some(TRANSPARENT),
        _ => return None,
    };
    Some(image::Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

fn parse_functional(args: &str) -> WidgetResult<Rgba8> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(WidgetError::config(
            "rgb()/rgba() takes 3 or 4 comma-separated components",
        ));
    }

    let channel = |p: &str| -> WidgetResult<u8> {
        p.parse::<u8>()
            .map_err(|_| WidgetError::config(format!("invalid color channel \"{p}\"")))
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;

    let a = match parts.get(3) {
        None => 255,
        Some(p) if p.contains('.') => {
            let f: f64 = p
                .parse()
                .map_err(|_| WidgetError::config(format!("invalid alpha \"{p}\"")))?;
            if !(0.0..=1.0).contains(&f) {
                return Err(WidgetError::config(format!("alpha out of range \"{p}\"")));
            }
            (f * 255.0).round() as u8
        }
        Some(p) => channel(p)?,
    };

    Ok(image::Rgba([r, g, b, a]))
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    let (r, g, b, a) = match s.len() {
        3 | 4 => {
            let r = hex_nibble(&s[0..1])?;
            let g = hex_nibble(&s[1..2])?;
            let b = hex_nibble(&s[2..3])?;
            let a = if s.len() == 4 {
                hex_nibble(&s[3..4])?
            } else {
                255
            };
            (r, g, b, a)
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 {
                hex_byte(&s[6..8])?
            } else {
                255
            };
            (r, g, b, a)
        }
        _ => {
            return Err(format!(
                "unrecognized color \"{s}\" (expected a name, rgb()/rgba() or #RGB/#RRGGBB[AA])"
            ));
        }
    };

    Ok(image::Rgba([r, g, b, a]))
}

/// Color value as written in configuration files: a color string or an `[r, g, b(, a)]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorDef(pub [u8; 4]);

impl ColorDef {
    /// Convert into an [`Rgba8`] pixel.
    pub fn to_rgba8(self) -> Rgba8 {
        image::Rgba(self.0)
    }
}

impl From<Rgba8> for ColorDef {
    fn from(c: Rgba8) -> Self {
        Self(c.0)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => parse_color(&s)
                .map(Self::from)
                .map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self([*r, *g, *b, 255])),
                [r, g, b, a] => Ok(Self([*r, *g, *b, *a])),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
