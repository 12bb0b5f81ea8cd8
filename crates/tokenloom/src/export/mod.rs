//! Export rendering: collection detail tables → text artifacts.
//!
//! [`render`] turns the variable rows of one collection into one of four
//! formats, with one section per requested mode:
//!
//! | Format | Shape                                                     |
//! |--------|-----------------------------------------------------------|
//! | `css`  | `/* Mode: Light */` + `:root { --name: value; }` blocks   |
//! | `scss` | `// Mode: Light` + `$name: value;` lines                  |
//! | `json` | `{ "light": { "dot.name": "value" } }`                    |
//! | `dtcg` | `{ "$modes": { "light": { nested: { "$value": .. } } } }` |
//!
//! Per-value rendering lives in [`value`]; the line-oriented formats are
//! driven by MiniJinja templates ([`template`], [`text`]) and the object
//! formats are built with `serde_json` ([`structured`]).
//!
//! ```rust
//! use tokenloom::export::{render, ExportFormat, ExportOptions};
//! use tokenloom::source::Mode;
//!
//! let options = ExportOptions::new(ExportFormat::Css, vec![Mode::new("m1", "Light")]);
//! let css = render(&[], &options, "Theme").unwrap();
//! assert_eq!(css, "/* Mode: Light */\n:root {\n}");
//! ```

pub mod structured;
pub mod template;
pub mod text;
pub mod value;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::ColorFormat;
use crate::detail::CollectionVariableDetail;
use crate::error::Result;
use crate::source::Mode;
use crate::unit::{Unit, DEFAULT_BASE_FONT_SIZE};

pub use value::{dash_slug, dot_slug, render_value, RenderedValue};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Css,
    Scss,
    Json,
    Dtcg,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::Scss => "scss",
            ExportFormat::Json => "json",
            ExportFormat::Dtcg => "dtcg",
        }
    }

    /// Conventional file extension for the artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::Scss => "scss",
            ExportFormat::Json => "json",
            ExportFormat::Dtcg => "tokens.json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(ExportFormat::Css),
            "scss" => Ok(ExportFormat::Scss),
            "json" => Ok(ExportFormat::Json),
            "dtcg" => Ok(ExportFormat::Dtcg),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

/// Whether aliases are exported as their resolved primitive or as a
/// format-specific reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasMode {
    #[default]
    Resolved,
    Alias,
}

impl AliasMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AliasMode::Resolved => "resolved",
            AliasMode::Alias => "alias",
        }
    }
}

impl fmt::Display for AliasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AliasMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resolved" => Ok(AliasMode::Resolved),
            "alias" => Ok(AliasMode::Alias),
            other => Err(format!("unknown alias mode: {}", other)),
        }
    }
}

/// Everything [`render`] needs besides the variables themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Modes to export, in output order.
    pub modes: Vec<Mode>,
    pub alias_mode: AliasMode,
    pub color_format: ColorFormat,
    pub unit_format: Unit,
    pub base_font_size: f64,
    /// Variable id → unit, overriding `unit_format`.
    pub unit_per_variable: HashMap<String, Unit>,
}

impl ExportOptions {
    /// Options with resolved aliases, hex colors and px units.
    pub fn new(format: ExportFormat, modes: Vec<Mode>) -> Self {
        Self {
            format,
            modes,
            alias_mode: AliasMode::default(),
            color_format: ColorFormat::default(),
            unit_format: Unit::default(),
            base_font_size: DEFAULT_BASE_FONT_SIZE,
            unit_per_variable: HashMap::new(),
        }
    }

    pub fn with_alias_mode(mut self, alias_mode: AliasMode) -> Self {
        self.alias_mode = alias_mode;
        self
    }

    pub fn with_color_format(mut self, color_format: ColorFormat) -> Self {
        self.color_format = color_format;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit_format = unit;
        self
    }

    pub fn with_base_font_size(mut self, base_font_size: f64) -> Self {
        self.base_font_size = base_font_size;
        self
    }

    pub fn with_variable_unit(mut self, variable_id: impl Into<String>, unit: Unit) -> Self {
        self.unit_per_variable.insert(variable_id.into(), unit);
        self
    }

    /// The unit for a variable: its override if present, else the global one.
    pub fn unit_for(&self, variable_id: &str) -> &Unit {
        self.unit_per_variable
            .get(variable_id)
            .unwrap_or(&self.unit_format)
    }
}

/// Renders `variables` in the format and modes selected by `options`.
///
/// `collection_name` only labels diagnostics; it does not appear in the
/// output.
pub fn render(
    variables: &[CollectionVariableDetail],
    options: &ExportOptions,
    collection_name: &str,
) -> Result<String> {
    debug!(
        collection = %collection_name,
        format = %options.format,
        alias_mode = %options.alias_mode,
        variables = variables.len(),
        modes = options.modes.len(),
        "rendering export"
    );

    match options.format {
        ExportFormat::Css => text::render_css(variables, options),
        ExportFormat::Scss => text::render_scss(variables, options),
        ExportFormat::Json => structured::render_json(variables, options),
        ExportFormat::Dtcg => structured::render_dtcg(variables, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_and_display() {
        assert_eq!("DTCG".parse::<ExportFormat>().unwrap(), ExportFormat::Dtcg);
        assert_eq!(ExportFormat::Scss.to_string(), "scss");
        assert!("yaml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Dtcg.extension(), "tokens.json");
    }

    #[test]
    fn test_alias_mode_parse() {
        assert_eq!("alias".parse::<AliasMode>().unwrap(), AliasMode::Alias);
        assert_eq!(AliasMode::default(), AliasMode::Resolved);
        assert!("both".parse::<AliasMode>().is_err());
    }

    #[test]
    fn test_unit_override_lookup() {
        let options = ExportOptions::new(ExportFormat::Css, vec![])
            .with_unit(Unit::Rem)
            .with_variable_unit("V:1", Unit::Px);
        assert_eq!(options.unit_for("V:1"), &Unit::Px);
        assert_eq!(options.unit_for("V:2"), &Unit::Rem);
    }

    #[test]
    fn test_render_dispatches_by_format() {
        let modes = vec![Mode::new("m", "Light")];
        let scss = render(&[], &ExportOptions::new(ExportFormat::Scss, modes.clone()), "C").unwrap();
        assert_eq!(scss, "// Mode: Light");
        let json = render(&[], &ExportOptions::new(ExportFormat::Json, modes), "C").unwrap();
        assert_eq!(json, "{\n  \"light\": {}\n}");
    }
}
