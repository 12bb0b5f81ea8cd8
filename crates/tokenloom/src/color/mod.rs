//! Color conversion between the host's RGBA records and CSS color notations.
//!
//! The host document stores colors as floating point channels in `[0, 1]`.
//! This module turns those into the textual forms that end up in exported
//! artifacts, and re-renders textual colors in a caller-selected format:
//!
//! | Format  | Output                          |
//! |---------|---------------------------------|
//! | `hex`   | `#1e90ff` (or `rgba(...)` when translucent) |
//! | `rgb`   | `rgb(30, 144, 255)`             |
//! | `rgba`  | `rgba(30, 144, 255, 1.000)`     |
//! | `hsl`   | `hsl(210, 100%, 56%)`           |
//! | `hsla`  | `hsla(210, 100%, 56%, 1)`       |
//! | `oklch` | `oklch(65.20% 0.1902 253.21)`   |
//!
//! There is no 8-digit hex output: translucent colors always render as
//! `rgba(...)` from [`rgba_to_hex`].
//!
//! # Example
//!
//! ```rust
//! use tokenloom::color::{format_color, hex_to_rgba, ColorFormat};
//!
//! let rgba = hex_to_rgba("#ff0000").unwrap();
//! assert_eq!(rgba.to_hex(), "#ff0000");
//!
//! assert_eq!(format_color("#ff0000", ColorFormat::Rgb), "rgb(255, 0, 0)");
//! // References are never converted
//! assert_eq!(format_color("{brand.primary}", ColorFormat::Rgb), "{brand.primary}");
//! ```

mod parse;
mod space;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};
use crate::token::is_reference;
use crate::util::{format_decimal, to_byte};

pub use parse::parse_color;
pub use space::{rgb_to_hsl, rgb_to_oklch, rgba_to_oklch, Hsl, Oklch};

/// An RGBA color with channels in `[0, 1]`.
///
/// This matches the shape of the host's color records (`{r, g, b, a?}`),
/// where a missing alpha means fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    /// Creates a color from channels in `[0, 1]`.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Creates a color from 8-bit channels and a `[0, 1]` alpha.
    pub fn from_bytes(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, a)
    }

    /// Returns true if alpha is 1 (or above).
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Canonical textual form: 6-digit hex when opaque, `rgba(...)` otherwise.
    pub fn to_hex(&self) -> String {
        rgba_to_hex(self.r, self.g, self.b, self.a)
    }

    fn bytes(&self) -> (u8, u8, u8) {
        (to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }
}

/// Renders RGBA channels as `#rrggbb`, or as `rgba(R, G, B, A)` when `a < 1`.
///
/// Channels are rounded to 8 bits; alpha is printed with exactly three
/// decimals.
pub fn rgba_to_hex(r: f64, g: f64, b: f64, a: f64) -> String {
    let color = Rgba::new(r, g, b, a);
    if !color.is_opaque() {
        return rgba_string(&color);
    }
    let (r, g, b) = color.bytes();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parses a 6- or 8-digit hex color, with or without a leading `#`.
///
/// # Errors
///
/// Returns [`TokenError::InvalidHex`] for any other length or for
/// non-hexadecimal digits.
pub fn hex_to_rgba(hex: &str) -> Result<Rgba> {
    let digits = hex.trim().trim_start_matches('#');
    if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TokenError::InvalidHex(hex.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| TokenError::InvalidHex(hex.to_string()))
    };

    let alpha = if digits.len() == 8 {
        channel(6)? as f64 / 255.0
    } else {
        1.0
    };
    Ok(Rgba::from_bytes(channel(0)?, channel(2)?, channel(4)?, alpha))
}

fn rgb_string(color: &Rgba) -> String {
    let (r, g, b) = color.bytes();
    format!("rgb({}, {}, {})", r, g, b)
}

/// `rgba(R, G, B, A)` with 8-bit channels and a three-decimal alpha.
pub(crate) fn rgba_string(color: &Rgba) -> String {
    let (r, g, b) = color.bytes();
    format!("rgba({}, {}, {}, {:.3})", r, g, b, color.a)
}

fn hsl_string(color: &Rgba, with_alpha: bool) -> String {
    let hsl = rgb_to_hsl(color.r, color.g, color.b);
    // A hue just under 360 rounds onto the 0 end of the wheel
    let (h, s, l) = (hsl.h.round() % 360.0, (hsl.s * 100.0).round(), (hsl.l * 100.0).round());
    if with_alpha {
        format!("hsla({}, {}%, {}%, {})", h, s, l, format_decimal(color.a, 3))
    } else {
        format!("hsl({}, {}%, {}%)", h, s, l)
    }
}

// ─── ColorFormat ────────────────────────────────────────────────────────────

/// Target notation for exported color values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Oklch,
}

impl ColorFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFormat::Hex => "hex",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Rgba => "rgba",
            ColorFormat::Hsl => "hsl",
            ColorFormat::Hsla => "hsla",
            ColorFormat::Oklch => "oklch",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(ColorFormat::Hex),
            "rgb" => Ok(ColorFormat::Rgb),
            "rgba" => Ok(ColorFormat::Rgba),
            "hsl" => Ok(ColorFormat::Hsl),
            "hsla" => Ok(ColorFormat::Hsla),
            "oklch" => Ok(ColorFormat::Oklch),
            other => Err(format!("unknown color format: {}", other)),
        }
    }
}

/// Re-renders a textual color in the requested format.
///
/// References (`{path}`) are returned unchanged, as is anything that does not
/// parse as a hex or `rgb()`/`rgba()` color.
pub fn format_color(value: &str, format: ColorFormat) -> String {
    if is_reference(value.trim()) {
        return value.to_string();
    }
    let Some(color) = parse_color(value) else {
        return value.to_string();
    };

    match format {
        ColorFormat::Hex => color.to_hex(),
        ColorFormat::Rgb => rgb_string(&color),
        ColorFormat::Rgba => rgba_string(&color),
        ColorFormat::Hsl => hsl_string(&color, false),
        ColorFormat::Hsla => hsl_string(&color, true),
        ColorFormat::Oklch => rgba_to_oklch(color.r, color.g, color.b, color.a),
    }
}

/// Like [`format_color`], but takes the format by name.
///
/// An unrecognized format name leaves the value untouched.
pub fn format_color_named(value: &str, format: &str) -> String {
    match format.parse::<ColorFormat>() {
        Ok(format) => format_color(value, format),
        Err(_) => value.to_string(),
    }
}
