//! The token data model: leaves, nested sets, and the categorized tree.
//!
//! A [`TokenSet`] maps path segments to either a nested set or a leaf
//! [`Token`], expressed as the tagged union [`TokenNode`] so traversal stays
//! exhaustive. [`DesignTokens`] is the top-level tree with its four reserved
//! categories.
//!
//! ```text
//! DesignTokens
//! ├── primitives
//! │   └── color
//! │       └── blue
//! │           └── 500: Token { value: "#3b82f6", type: color }
//! ├── semantic
//! │   └── color
//! │       └── text
//! │           └── primary: Token { value: "{color.blue.500}", resolvedValue: "#3b82f6" }
//! ├── components
//! └── uncategorized
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::Category;

/// Returns true if `value` has the reference shape `{<path>}`.
pub fn is_reference(value: &str) -> bool {
    reference_target(value).is_some()
}

/// Extracts `path` from a `{path}` reference.
pub fn reference_target(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains(['{', '}']) {
        return None;
    }
    Some(inner)
}

// ─── Values and types ───────────────────────────────────────────────────────

/// A primitive token value: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(f64),
    Text(String),
}

impl TokenValue {
    /// Returns the string content if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            TokenValue::Number(_) => None,
        }
    }

    /// Returns true if this is a `{path}` reference string.
    pub fn is_reference(&self) -> bool {
        self.as_text().is_some_and(is_reference)
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        TokenValue::Number(n)
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::Text(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        TokenValue::Text(s)
    }
}

/// The token type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Spacing,
    Typography,
    BorderRadius,
    Number,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Spacing => "spacing",
            TokenType::Typography => "typography",
            TokenType::BorderRadius => "borderRadius",
            TokenType::Number => "number",
        }
    }

    /// Types rendered through the unit converter.
    pub fn is_numeric_family(&self) -> bool {
        matches!(
            self,
            TokenType::Number | TokenType::Spacing | TokenType::BorderRadius | TokenType::Typography
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Token ──────────────────────────────────────────────────────────────────

/// Provenance of a token in the host document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

/// A leaf in the token tree.
///
/// When `value` is a `{path}` reference the token is an alias and
/// `resolved_value` holds the dereferenced primitive (absent if resolution
/// failed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub value: TokenValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_value: Option<TokenValue>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "$extensions", default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<TokenExtensions>,
}

impl Token {
    pub fn new(value: impl Into<TokenValue>, token_type: TokenType) -> Self {
        Self {
            value: value.into(),
            resolved_value: None,
            token_type,
            description: None,
            extensions: None,
        }
    }

    pub fn with_resolved(mut self, resolved: Option<TokenValue>) -> Self {
        self.resolved_value = resolved;
        self
    }

    /// Sets the description; empty strings are treated as absent.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    pub fn with_extensions(mut self, extensions: TokenExtensions) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Returns true if the direct value is a `{path}` reference.
    pub fn is_reference(&self) -> bool {
        self.value.is_reference()
    }
}

// ─── TokenSet ───────────────────────────────────────────────────────────────

/// A node in the tree: a leaf token or a nested set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    Token(Token),
    Set(TokenSet),
}

/// Mapping from path segment to node. Keys are kept sorted so serialized
/// output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet(BTreeMap<String, TokenNode>);

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenNode)> {
        self.0.iter()
    }

    /// Looks up a node by path.
    pub fn get(&self, path: &[&str]) -> Option<&TokenNode> {
        let (head, rest) = path.split_first()?;
        let node = self.0.get(*head)?;
        if rest.is_empty() {
            return Some(node);
        }
        match node {
            TokenNode::Set(set) => set.get(rest),
            TokenNode::Token(_) => None,
        }
    }

    /// Looks up a leaf token by path.
    pub fn token(&self, path: &[&str]) -> Option<&Token> {
        match self.get(path)? {
            TokenNode::Token(token) => Some(token),
            TokenNode::Set(_) => None,
        }
    }

    /// Inserts `token` at `path`, creating intermediate sets.
    ///
    /// A key holds exactly one node kind: if a segment already holds the other
    /// kind it is replaced. Returns true when such a replacement happened. An
    /// empty path inserts nothing.
    pub fn insert(&mut self, path: &[String], token: Token) -> bool {
        let Some((head, rest)) = path.split_first() else {
            return false;
        };

        if rest.is_empty() {
            let previous = self.0.insert(head.clone(), TokenNode::Token(token));
            return matches!(previous, Some(TokenNode::Set(_)));
        }

        let node = self
            .0
            .entry(head.clone())
            .or_insert_with(|| TokenNode::Set(TokenSet::new()));
        let mut replaced = false;
        if !matches!(node, TokenNode::Set(_)) {
            *node = TokenNode::Set(TokenSet::new());
            replaced = true;
        }
        match node {
            TokenNode::Set(set) => set.insert(rest, token) || replaced,
            TokenNode::Token(_) => replaced,
        }
    }

    /// Collects every leaf with its dotted path, prefixed by `prefix`.
    fn collect<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Token)>) {
        for (key, node) in &self.0 {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match node {
                TokenNode::Token(token) => out.push((path, token)),
                TokenNode::Set(set) => set.collect(&path, out),
            }
        }
    }

    /// Every leaf token with its dotted path relative to this set.
    pub fn tokens(&self) -> Vec<(String, &Token)> {
        let mut out = Vec::new();
        self.collect("", &mut out);
        out
    }
}

// ─── DesignTokens ───────────────────────────────────────────────────────────

/// The categorized token tree.
///
/// Additional top-level keys beyond the four reserved categories are kept in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignTokens {
    #[serde(default)]
    pub primitives: TokenSet,
    #[serde(default)]
    pub semantic: TokenSet,
    #[serde(default)]
    pub components: TokenSet,
    #[serde(default)]
    pub uncategorized: TokenSet,
    #[serde(flatten)]
    pub extra: BTreeMap<String, TokenSet>,
}

impl DesignTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: Category) -> &TokenSet {
        match category {
            Category::Primitives => &self.primitives,
            Category::Semantic => &self.semantic,
            Category::Components => &self.components,
            Category::Uncategorized => &self.uncategorized,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut TokenSet {
        match category {
            Category::Primitives => &mut self.primitives,
            Category::Semantic => &mut self.semantic,
            Category::Components => &mut self.components,
            Category::Uncategorized => &mut self.uncategorized,
        }
    }

    /// Every leaf with its dotted path, category first
    /// (e.g. `primitives.color.blue.500`).
    pub fn tokens(&self) -> Vec<(String, &Token)> {
        let mut out = Vec::new();
        for category in Category::ALL {
            self.category(category).collect(category.as_str(), &mut out);
        }
        for (key, set) in &self.extra {
            set.collect(key, &mut out);
        }
        out
    }

    pub fn token_count(&self) -> usize {
        self.tokens().len()
    }
}
