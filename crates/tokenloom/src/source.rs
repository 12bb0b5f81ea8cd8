//! The host document boundary.
//!
//! The core never talks to the design tool directly. It reads raw records
//! through [`DocumentSource`], a synchronous request/response contract: each
//! call returns a complete snapshot of one record kind. [`DocumentSnapshot`]
//! is the in-memory implementation, deserializable from the JSON the host
//! produces:
//!
//! ```json
//! {
//!   "paintStyles": [
//!     { "id": "S:1", "name": "Blue/500", "paints": [
//!       { "type": "SOLID", "color": { "r": 0.23, "g": 0.51, "b": 0.96 } }
//!     ] }
//!   ],
//!   "collections": [
//!     { "id": "C:1", "name": "Theme", "defaultModeId": "1:0",
//!       "modes": [ { "modeId": "1:0", "name": "Light" } ] }
//!   ],
//!   "variables": [
//!     { "id": "V:1", "name": "text/primary", "resolvedType": "COLOR",
//!       "variableCollectionId": "C:1",
//!       "valuesByMode": { "1:0": { "type": "VARIABLE_ALIAS", "id": "V:2" } } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Result, TokenError};
use crate::token::{TokenType, TokenValue};

// ─── Raw records ────────────────────────────────────────────────────────────

/// Marker for the `type` field of alias pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasKind {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// `{type: "VARIABLE_ALIAS", id}`: a pointer to another variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub kind: AliasKind,
    pub id: String,
}

impl VariableAlias {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: AliasKind::VariableAlias,
            id: id.into(),
        }
    }
}

/// A variable's value for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Alias(VariableAlias),
    Color(Rgba),
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl RawValue {
    pub fn alias(id: impl Into<String>) -> Self {
        RawValue::Alias(VariableAlias::new(id))
    }

    pub fn as_alias(&self) -> Option<&VariableAlias> {
        match self {
            RawValue::Alias(alias) => Some(alias),
            _ => None,
        }
    }

    /// Converts a non-alias value to a token primitive. Colors become their
    /// canonical hex/rgba text, booleans become `"true"`/`"false"`.
    pub fn to_primitive(&self) -> Option<TokenValue> {
        match self {
            RawValue::Alias(_) => None,
            RawValue::Color(color) => Some(TokenValue::Text(color.to_hex())),
            RawValue::Number(n) => Some(TokenValue::Number(*n)),
            RawValue::Boolean(b) => Some(TokenValue::Text(b.to_string())),
            RawValue::Text(s) => Some(TokenValue::Text(s.clone())),
        }
    }
}

/// The host's native value kind for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
    #[serde(other)]
    Other,
}

impl ResolvedType {
    /// Fixed mapping onto the token vocabulary. Names are not consulted.
    pub fn token_type(&self) -> TokenType {
        match self {
            ResolvedType::Color => TokenType::Color,
            ResolvedType::Float => TokenType::Number,
            ResolvedType::String => TokenType::Typography,
            ResolvedType::Boolean | ResolvedType::Other => TokenType::Number,
        }
    }
}

/// A variable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub resolved_type: ResolvedType,
    pub variable_collection_id: String,
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, RawValue>,
}

/// A named mode of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

impl Mode {
    pub fn new(mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode_id: mode_id.into(),
            name: name.into(),
        }
    }
}

/// A variable collection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
    pub default_mode_id: String,
}

impl Collection {
    pub fn mode(&self, mode_id: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.mode_id == mode_id)
    }

    /// The mode with the given display name (exact match).
    pub fn mode_named(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }

    /// The default mode id, falling back to the first declared mode.
    pub fn default_mode(&self) -> Option<&str> {
        self.mode(&self.default_mode_id)
            .or_else(|| self.modes.first())
            .map(|m| m.mode_id.as_str())
    }
}

/// An RGB triple without alpha, as found on paints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// One paint layer of a paint style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default = "visible", skip_serializing_if = "is_visible")]
    pub visible: bool,
}

fn visible() -> bool {
    true
}

fn is_visible(v: &bool) -> bool {
    *v
}

impl Paint {
    /// The paint as RGBA if it is a visible solid fill.
    pub fn solid_color(&self) -> Option<Rgba> {
        if self.kind != "SOLID" || !self.visible {
            return None;
        }
        let color = self.color?;
        Some(Rgba::new(color.r, color.g, color.b, self.opacity.unwrap_or(1.0)))
    }
}

/// A paint style record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub paints: Vec<Paint>,
}

impl PaintStyle {
    /// The first visible solid paint, if any.
    pub fn solid_color(&self) -> Option<Rgba> {
        self.paints.iter().find_map(Paint::solid_color)
    }
}

// ─── DocumentSource ─────────────────────────────────────────────────────────

/// Read access to the host document's style and variable store.
///
/// Every call is a full snapshot; there is no streaming or partial result.
pub trait DocumentSource {
    fn paint_styles(&self) -> Result<Vec<PaintStyle>>;

    fn variables(&self) -> Result<Vec<Variable>>;

    fn collections(&self) -> Result<Vec<Collection>>;
}

/// An in-memory record set implementing [`DocumentSource`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    #[serde(default)]
    pub paint_styles: Vec<PaintStyle>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl DocumentSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a snapshot from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TokenError::Source(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }
}

impl DocumentSource for DocumentSnapshot {
    fn paint_styles(&self) -> Result<Vec<PaintStyle>> {
        Ok(self.paint_styles.clone())
    }

    fn variables(&self) -> Result<Vec<Variable>> {
        Ok(self.variables.clone())
    }

    fn collections(&self) -> Result<Vec<Collection>> {
        Ok(self.collections.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_variants_deserialize() {
        let alias: RawValue =
            serde_json::from_str(r#"{"type": "VARIABLE_ALIAS", "id": "V:2"}"#).unwrap();
        assert_eq!(alias, RawValue::alias("V:2"));

        let color: RawValue = serde_json::from_str(r#"{"r": 1, "g": 0, "b": 0}"#).unwrap();
        assert_eq!(color, RawValue::Color(Rgba::opaque(1.0, 0.0, 0.0)));

        let number: RawValue = serde_json::from_str("12").unwrap();
        assert_eq!(number, RawValue::Number(12.0));

        let boolean: RawValue = serde_json::from_str("true").unwrap();
        assert_eq!(boolean, RawValue::Boolean(true));

        let text: RawValue = serde_json::from_str(r#""Inter""#).unwrap();
        assert_eq!(text, RawValue::Text("Inter".into()));
    }

    #[test]
    fn test_raw_value_to_primitive() {
        assert_eq!(
            RawValue::Color(Rgba::new(0.0, 0.0, 1.0, 0.5)).to_primitive(),
            Some(TokenValue::from("rgba(0, 0, 255, 0.500)"))
        );
        assert_eq!(RawValue::Boolean(false).to_primitive(), Some("false".into()));
        assert_eq!(RawValue::alias("x").to_primitive(), None);
    }

    #[test]
    fn test_resolved_type_mapping() {
        assert_eq!(ResolvedType::Color.token_type(), TokenType::Color);
        assert_eq!(ResolvedType::Float.token_type(), TokenType::Number);
        assert_eq!(ResolvedType::String.token_type(), TokenType::Typography);
        assert_eq!(ResolvedType::Boolean.token_type(), TokenType::Number);

        let other: ResolvedType = serde_json::from_str(r#""GRADIENT""#).unwrap();
        assert_eq!(other, ResolvedType::Other);
    }

    #[test]
    fn test_collection_default_mode_fallback() {
        let collection = Collection {
            id: "C:1".into(),
            name: "Theme".into(),
            modes: vec![Mode::new("1:0", "Light"), Mode::new("1:1", "Dark")],
            default_mode_id: "missing".into(),
        };
        assert_eq!(collection.default_mode(), Some("1:0"));
        assert_eq!(collection.mode_named("Dark").unwrap().mode_id, "1:1");
    }

    #[test]
    fn test_paint_style_solid_color() {
        let style: PaintStyle = serde_json::from_str(
            r#"{
                "id": "S:1",
                "name": "Overlay",
                "paints": [
                    { "type": "GRADIENT_LINEAR" },
                    { "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0 }, "visible": false },
                    { "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0 }, "opacity": 0.4 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(style.solid_color(), Some(Rgba::new(0.0, 0.0, 0.0, 0.4)));
    }

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = DocumentSnapshot::from_json(
            r#"{
                "collections": [
                    { "id": "C:1", "name": "Theme", "defaultModeId": "1:0",
                      "modes": [ { "modeId": "1:0", "name": "Light" } ] }
                ],
                "variables": [
                    { "id": "V:1", "name": "text/primary", "resolvedType": "COLOR",
                      "variableCollectionId": "C:1",
                      "valuesByMode": { "1:0": { "type": "VARIABLE_ALIAS", "id": "V:2" } } }
                ]
            }"#,
        )
        .unwrap();
        assert!(snapshot.paint_styles.is_empty());
        assert_eq!(snapshot.variables().unwrap().len(), 1);
        assert_eq!(
            snapshot.variables[0].values_by_mode["1:0"],
            RawValue::alias("V:2")
        );
    }

    #[test]
    fn test_snapshot_from_missing_file() {
        let err = DocumentSnapshot::from_file("/nonexistent/snapshot.json").unwrap_err();
        assert!(matches!(err, TokenError::Source(_)));
    }
}
