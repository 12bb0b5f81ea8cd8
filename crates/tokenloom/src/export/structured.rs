//! Plain JSON and W3C design token (DTCG) output.
//!
//! Both formats are built as `serde_json` values and pretty-printed. Keys keep
//! insertion order, so modes and variables appear in the order requested.

use serde_json::{json, Map, Value};

use super::value::{dot_slug, render_value, segment_slug};
use super::ExportOptions;
use crate::detail::CollectionVariableDetail;
use crate::error::Result;

/// `{ "<mode>": { "<dot.name>": value, ... }, ... }`.
pub fn render_json(variables: &[CollectionVariableDetail], options: &ExportOptions) -> Result<String> {
    let mut root = Map::new();
    for mode in &options.modes {
        let entries: Map<String, Value> = variables
            .iter()
            .map(|variable| {
                (
                    dot_slug(&variable.name),
                    render_value(variable, &mode.mode_id, options).to_json(),
                )
            })
            .collect();
        root.insert(segment_slug(&mode.name), Value::Object(entries));
    }
    Ok(serde_json::to_string_pretty(&Value::Object(root))?)
}

/// `{ "$modes": { "<mode>": { nested: { "$type", "$description", "$value" } } } }`.
///
/// Names are split on `/` and each segment slugged on its own.
pub fn render_dtcg(variables: &[CollectionVariableDetail], options: &ExportOptions) -> Result<String> {
    let mut modes = Map::new();
    for mode in &options.modes {
        let mut tree = Map::new();
        for variable in variables {
            let segments: Vec<String> = variable.name.split('/').map(segment_slug).collect();
            let leaf = json!({
                "$type": variable.token_type.as_str(),
                "$description": variable.description.clone().unwrap_or_default(),
                "$value": render_value(variable, &mode.mode_id, options).to_json(),
            });
            insert_nested(&mut tree, &segments, leaf);
        }
        modes.insert(segment_slug(&mode.name), Value::Object(tree));
    }
    let root = json!({ "$modes": Value::Object(modes) });
    Ok(serde_json::to_string_pretty(&root)?)
}

/// Places `leaf` at `path`, creating objects on the way down. An
/// intermediate key holding a non-object is replaced; objects are descended
/// into as-is.
fn insert_nested(map: &mut Map<String, Value>, path: &[String], leaf: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = map;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(next) => next,
            _ => return,
        };
    }
    current.insert(last.clone(), leaf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{AliasMode, ExportFormat};
    use crate::source::Mode;
    use crate::token::{Token, TokenType};
    use std::collections::BTreeMap;

    fn row(name: &str, description: Option<&str>, tokens: Vec<(&str, Token)>) -> CollectionVariableDetail {
        CollectionVariableDetail {
            id: name.into(),
            name: name.into(),
            description: description.map(String::from),
            token_type: TokenType::Color,
            is_alias: tokens.iter().any(|(_, t)| t.is_reference()),
            values_by_mode: tokens
                .into_iter()
                .map(|(m, t)| (m.to_string(), t))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn rows() -> Vec<CollectionVariableDetail> {
        vec![
            row(
                "Brand/Primary",
                Some("Main"),
                vec![
                    ("l", Token::new("#0000ff", TokenType::Color).with_resolved(Some("#0000ff".into()))),
                    ("d", Token::new("#ffffff", TokenType::Color).with_resolved(Some("#ffffff".into()))),
                ],
            ),
            row(
                "Text/Link Color",
                None,
                vec![(
                    "l",
                    Token::new("{Brand/Primary}", TokenType::Color)
                        .with_resolved(Some("#0000ff".into())),
                )],
            ),
        ]
    }

    fn modes() -> Vec<Mode> {
        vec![Mode::new("l", "Light Mode"), Mode::new("d", "Dark")]
    }

    // =========================================================================
    // JSON
    // =========================================================================

    #[test]
    fn test_json_alias_mode() {
        let options = ExportOptions::new(ExportFormat::Json, modes()).with_alias_mode(AliasMode::Alias);
        let out: Value = serde_json::from_str(&render_json(&rows(), &options).unwrap()).unwrap();
        assert_eq!(out["light-mode"]["brand.primary"], "#0000ff");
        assert_eq!(out["light-mode"]["text.link-color"], "{brand.primary}");
        assert_eq!(out["dark"]["text.link-color"], Value::Null);
    }

    #[test]
    fn test_json_preserves_mode_order() {
        let options = ExportOptions::new(ExportFormat::Json, modes());
        let text = render_json(&rows(), &options).unwrap();
        assert!(text.find("light-mode").unwrap() < text.find("\"dark\"").unwrap());
    }

    // =========================================================================
    // DTCG
    // =========================================================================

    #[test]
    fn test_dtcg_nests_segments() {
        let options = ExportOptions::new(ExportFormat::Dtcg, modes());
        let out: Value = serde_json::from_str(&render_dtcg(&rows(), &options).unwrap()).unwrap();
        let leaf = &out["$modes"]["light-mode"]["brand"]["primary"];
        assert_eq!(leaf["$type"], "color");
        assert_eq!(leaf["$description"], "Main");
        assert_eq!(leaf["$value"], "#0000ff");

        // Resolved mode never emits reference objects
        let link = &out["$modes"]["light-mode"]["text"]["link-color"];
        assert_eq!(link["$value"], "#0000ff");
        assert_eq!(link["$description"], "");
    }

    #[test]
    fn test_dtcg_alias_mode_emits_ref() {
        let options = ExportOptions::new(ExportFormat::Dtcg, modes()).with_alias_mode(AliasMode::Alias);
        let out: Value = serde_json::from_str(&render_dtcg(&rows(), &options).unwrap()).unwrap();
        assert_eq!(
            out["$modes"]["light-mode"]["text"]["link-color"]["$value"],
            json!({ "$ref": "brand.primary" })
        );
    }

    #[test]
    fn test_insert_nested_overwrites_non_object() {
        let mut map = Map::new();
        map.insert("a".into(), json!("scalar"));
        insert_nested(&mut map, &["a".into(), "b".into()], json!(1));
        assert_eq!(Value::Object(map), json!({ "a": { "b": 1 } }));
    }

    #[test]
    fn test_insert_nested_descends_into_existing_objects() {
        let mut map = Map::new();
        insert_nested(&mut map, &["a".into()], json!({ "$value": 1 }));
        insert_nested(&mut map, &["a".into(), "b".into()], json!(2));
        assert_eq!(Value::Object(map), json!({ "a": { "$value": 1, "b": 2 } }));
    }
}
