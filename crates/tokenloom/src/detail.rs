//! Per-collection detail tables.
//!
//! A [`CollectionDetail`] is the flat view of one collection: every variable
//! with a [`Token`] per mode. The token's `value` is the direct value (an
//! alias shows as `{target name}`), its `resolved_value` the fully
//! dereferenced primitive. This is the input of the export renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::alias::{resolve, VariableIndex, Visited};
use crate::error::{Result, TokenError};
use crate::source::{Collection, DocumentSource, Mode, RawValue, Variable};
use crate::token::{Token, TokenType, TokenValue};

/// Lightweight index entry for a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteCollection {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
    /// Member variables, in source order.
    pub variable_ids: Vec<String>,
}

impl LiteCollection {
    fn from_index(collection: &Collection, index: &VariableIndex<'_>) -> Self {
        Self {
            id: collection.id.clone(),
            name: collection.name.clone(),
            modes: collection.modes.clone(),
            variable_ids: index
                .variables_in(&collection.id)
                .into_iter()
                .map(|v| v.id.clone())
                .collect(),
        }
    }

    /// The mode with the given name, compared case-insensitively.
    pub fn mode_named(&self, name: &str) -> Option<&Mode> {
        self.modes
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

/// One variable's row in a [`CollectionDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionVariableDetail {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Mode id → token. Modes without a value are absent.
    pub values_by_mode: BTreeMap<String, Token>,
    /// True if the direct value is an alias in at least one mode.
    pub is_alias: bool,
}

impl CollectionVariableDetail {
    pub fn token(&self, mode_id: &str) -> Option<&Token> {
        self.values_by_mode.get(mode_id)
    }
}

/// The detail table of one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetail {
    pub collection: LiteCollection,
    pub variables: Vec<CollectionVariableDetail>,
}

impl CollectionDetail {
    pub fn variable(&self, id: &str) -> Option<&CollectionVariableDetail> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn alias_count(&self) -> usize {
        self.variables.iter().filter(|v| v.is_alias).count()
    }
}

/// Finds a collection by id, then by name.
pub fn find_collection<'a>(
    collections: &'a [LiteCollection],
    key: &str,
) -> Option<&'a LiteCollection> {
    collections
        .iter()
        .find(|c| c.id == key)
        .or_else(|| collections.iter().find(|c| c.name == key))
}

// ─── Builders ───────────────────────────────────────────────────────────────

/// Builds the lightweight index of every collection.
pub fn list_collections<S: DocumentSource + ?Sized>(source: &S) -> Result<Vec<LiteCollection>> {
    let variables = source.variables()?;
    let collections = source.collections()?;
    let index = VariableIndex::new(&variables, &collections);
    Ok(index
        .collections()
        .map(|c| LiteCollection::from_index(c, &index))
        .collect())
}

/// Builds the detail table of the collection with id `collection_id`.
///
/// # Errors
///
/// [`TokenError::CollectionNotFound`] if no such collection exists.
pub fn build_detail<S: DocumentSource + ?Sized>(
    source: &S,
    collection_id: &str,
) -> Result<CollectionDetail> {
    let variables = source.variables()?;
    let collections = source.collections()?;
    let index = VariableIndex::new(&variables, &collections);
    detail_from_index(&index, collection_id)
}

/// Builds the detail table of every collection, in source order.
pub fn build_all_details<S: DocumentSource + ?Sized>(source: &S) -> Result<Vec<CollectionDetail>> {
    let variables = source.variables()?;
    let collections = source.collections()?;
    let index = VariableIndex::new(&variables, &collections);
    index
        .collections()
        .map(|c| detail_from_index(&index, &c.id))
        .collect()
}

/// Builds a detail table from an already-built index.
pub fn detail_from_index(
    index: &VariableIndex<'_>,
    collection_id: &str,
) -> Result<CollectionDetail> {
    let collection = index
        .collection(collection_id)
        .ok_or_else(|| TokenError::CollectionNotFound(collection_id.to_string()))?;

    let variables: Vec<_> = index
        .variables_in(&collection.id)
        .into_iter()
        .map(|v| variable_detail(v, collection, index))
        .collect();

    debug!(
        collection = %collection.name,
        variables = variables.len(),
        modes = collection.modes.len(),
        "built collection detail"
    );

    Ok(CollectionDetail {
        collection: LiteCollection::from_index(collection, index),
        variables,
    })
}

fn variable_detail(
    variable: &Variable,
    collection: &Collection,
    index: &VariableIndex<'_>,
) -> CollectionVariableDetail {
    let token_type = variable.resolved_type.token_type();
    let mut values_by_mode = BTreeMap::new();
    let mut is_alias = false;

    for mode in &collection.modes {
        let Some(raw) = variable.values_by_mode.get(&mode.mode_id) else {
            continue;
        };
        is_alias |= raw.as_alias().is_some();

        let Some(direct) = direct_value(variable, raw, index) else {
            continue;
        };
        let resolved = resolve(variable, &mode.mode_id, collection, index, &mut Visited::new());
        let token = Token::new(direct, token_type)
            .with_resolved(resolved)
            .with_description(variable.description.clone());
        values_by_mode.insert(mode.mode_id.clone(), token);
    }

    CollectionVariableDetail {
        id: variable.id.clone(),
        name: variable.name.clone(),
        description: variable.description.clone().filter(|d| !d.is_empty()),
        token_type,
        values_by_mode,
        is_alias,
    }
}

/// The value shown for a raw mode value: `{target name}` for aliases, the
/// converted primitive otherwise. A dangling alias shows the target id.
fn direct_value(variable: &Variable, raw: &RawValue, index: &VariableIndex<'_>) -> Option<TokenValue> {
    match raw {
        RawValue::Alias(alias) => {
            let name = match index.variable(&alias.id) {
                Some(target) => target.name.as_str(),
                None => {
                    warn!(variable = %variable.name, target = %alias.id, "broken alias");
                    alias.id.as_str()
                }
            };
            Some(TokenValue::Text(format!("{{{}}}", name)))
        }
        primitive => primitive.to_primitive(),
    }
}
