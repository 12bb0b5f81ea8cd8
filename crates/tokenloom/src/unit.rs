//! Numeric → CSS length rendering.
//!
//! ```rust
//! use tokenloom::unit::{format_unit, Unit};
//! use tokenloom::TokenValue;
//!
//! assert_eq!(format_unit(&TokenValue::Number(8.0), &Unit::Rem, 16.0), "0.5rem");
//! assert_eq!(format_unit(&TokenValue::Number(8.0), &Unit::Px, 16.0), "8px");
//! assert_eq!(format_unit(&TokenValue::Number(50.0), &"%".parse().unwrap(), 16.0), "50%");
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::token::TokenValue;
use crate::util::format_decimal;

/// Root font size used for `rem`/`em` conversion when none is configured.
pub const DEFAULT_BASE_FONT_SIZE: f64 = 16.0;

/// Decimal places kept for relative units.
const RELATIVE_PRECISION: usize = 4;

/// Output unit for numeric tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    #[default]
    Px,
    Rem,
    Em,
    /// Bare number, no suffix.
    None,
    /// Any other unit (`%`, `vw`, `pt`, ...), appended verbatim.
    Other(String),
}

impl Unit {
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Px => "px",
            Unit::Rem => "rem",
            Unit::Em => "em",
            Unit::None => "none",
            Unit::Other(s) => s,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_ascii_lowercase().as_str() {
            "px" => Unit::Px,
            "rem" => Unit::Rem,
            "em" => Unit::Em,
            "" | "none" => Unit::None,
            _ => Unit::Other(s.to_string()),
        })
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

/// Renders a numeric value with a unit.
///
/// - `px` appends the suffix
/// - `rem`/`em` divide by `base_font_size` (non-positive falls back to 16)
///   and keep up to 4 decimals
/// - `none` passes the number through
/// - anything else is appended verbatim
///
/// Text values are parsed as numbers first; if that fails they are returned
/// unchanged.
pub fn format_unit(value: &TokenValue, unit: &Unit, base_font_size: f64) -> String {
    let number = match value {
        TokenValue::Number(n) => *n,
        TokenValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return s.clone(),
        },
    };

    let base = if base_font_size > 0.0 {
        base_font_size
    } else {
        DEFAULT_BASE_FONT_SIZE
    };

    match unit {
        Unit::Px => format!("{}px", number),
        Unit::Rem => format!("{}rem", format_decimal(number / base, RELATIVE_PRECISION)),
        Unit::Em => format!("{}em", format_decimal(number / base, RELATIVE_PRECISION)),
        Unit::None => number.to_string(),
        Unit::Other(suffix) => format!("{}{}", number, suffix),
    }
}
