//! Rendering of a single variable value for one mode.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use super::{AliasMode, ExportFormat, ExportOptions};
use crate::color::format_color;
use crate::detail::CollectionVariableDetail;
use crate::token::{reference_target, TokenType, TokenValue};
use crate::unit::format_unit;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// The rendered form of one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedValue {
    /// Final text: a formatted primitive or an inline reference
    /// (`var(--x)`, `$x`, `{x}`).
    Text(String),
    /// A DTCG reference object pointing at a dot path.
    Reference(String),
    /// No value for the mode, or an alias that did not resolve.
    Null,
}

impl RenderedValue {
    /// JSON form: strings, `{"$ref": path}`, or `null`.
    pub fn to_json(&self) -> Value {
        match self {
            RenderedValue::Text(text) => Value::String(text.clone()),
            RenderedValue::Reference(path) => json!({ "$ref": path }),
            RenderedValue::Null => Value::Null,
        }
    }
}

impl fmt::Display for RenderedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedValue::Text(text) => f.write_str(text),
            RenderedValue::Reference(path) => write!(f, "{{{}}}", path),
            RenderedValue::Null => f.write_str("null"),
        }
    }
}

/// `Brand/Primary Color` → `brand-primary-color`.
pub fn dash_slug(name: &str) -> String {
    WHITESPACE
        .replace_all(&name.to_lowercase().replace('/', "-"), "-")
        .into_owned()
}

/// `Brand/Primary Color` → `brand.primary-color`.
pub fn dot_slug(name: &str) -> String {
    WHITESPACE
        .replace_all(&name.to_lowercase().replace('/', "."), "-")
        .into_owned()
}

/// Key for a single name segment (mode names, DTCG path segments):
/// lowercased, whitespace runs → `-`.
pub fn segment_slug(segment: &str) -> String {
    WHITESPACE
        .replace_all(&segment.to_lowercase(), "-")
        .into_owned()
}

fn reference(target: &str, format: ExportFormat) -> RenderedValue {
    match format {
        ExportFormat::Css => RenderedValue::Text(format!("var(--{})", dash_slug(target))),
        ExportFormat::Scss => RenderedValue::Text(format!("${}", dash_slug(target))),
        ExportFormat::Json => RenderedValue::Text(format!("{{{}}}", dot_slug(target))),
        ExportFormat::Dtcg => RenderedValue::Reference(dot_slug(target)),
    }
}

/// Renders `variable`'s value for `mode_id`.
///
/// In alias mode a `{name}` direct value becomes a reference in the output
/// format's syntax. Otherwise the resolved primitive (falling back to the
/// direct value) is formatted by type: colors through the color converter,
/// everything else through the unit converter with the variable's unit. A
/// reference left unresolved in resolved mode renders as null.
pub fn render_value(
    variable: &CollectionVariableDetail,
    mode_id: &str,
    options: &ExportOptions,
) -> RenderedValue {
    let Some(token) = variable.token(mode_id) else {
        return RenderedValue::Null;
    };

    let candidate: &TokenValue = match (options.alias_mode, &token.resolved_value) {
        (AliasMode::Resolved, Some(resolved)) => resolved,
        _ => &token.value,
    };

    if let Some(target) = candidate.as_text().and_then(reference_target) {
        return match options.alias_mode {
            AliasMode::Alias => reference(target, options.format),
            AliasMode::Resolved => RenderedValue::Null,
        };
    }

    let text = match variable.token_type {
        TokenType::Color => format_color(&candidate.to_string(), options.color_format),
        kind if kind.is_numeric_family() => {
            format_unit(candidate, options.unit_for(&variable.id), options.base_font_size)
        }
        _ => candidate.to_string(),
    };
    RenderedValue::Text(text)
}
