//! Token tree assembly and the scan entry point.
//!
//! [`scan`] reads every paint style and variable from a [`DocumentSource`]
//! and places each one in the categorized [`DesignTokens`] tree:
//!
//! - paint styles become color tokens from their first visible solid paint
//! - variables are valued at their collection's default mode; aliases become
//!   `{dot.path}` references with the dereferenced primitive attached
//!
//! The tree is rebuilt from scratch on every scan.

use tracing::{debug, warn};

use crate::alias::{resolve, VariableIndex, Visited};
use crate::error::Result;
use crate::path::{categorize, token_path, Category};
use crate::source::{DocumentSource, PaintStyle, RawValue, ResolvedType, Variable};
use crate::token::{DesignTokens, Token, TokenExtensions, TokenType, TokenValue};

const SPACING_HINTS: &[&str] = &["spacing", "space", "gap", "padding", "margin"];
const RADIUS_HINTS: &[&str] = &["radius", "corner"];
const TYPOGRAPHY_HINTS: &[&str] = &["font", "line", "letter", "size", "weight"];

/// Accumulates tokens into a [`DesignTokens`] tree.
#[derive(Debug, Default)]
pub struct TokenTreeBuilder {
    tokens: DesignTokens,
    added: usize,
    collisions: usize,
}

impl TokenTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `token` at `path` under `category`. Later insertions win.
    pub fn add(&mut self, category: Category, path: &[String], token: Token) {
        if path.is_empty() {
            debug!(%category, "skipping token with empty path");
            return;
        }
        if self.tokens.category_mut(category).insert(path, token) {
            self.collisions += 1;
            warn!(
                path = %path.join("."),
                %category,
                "token replaced a node of the other kind"
            );
        }
        self.added += 1;
    }

    /// Categorizes `name` and inserts `token` at its parsed path. Color
    /// tokens land under a `color` segment.
    pub fn add_named(&mut self, name: &str, collection: Option<&str>, token: Token) {
        let category = categorize(name, collection);
        let path = token_path(name, token.token_type == TokenType::Color);
        self.add(category, &path, token);
    }

    /// Number of tokens inserted so far.
    pub fn len(&self) -> usize {
        self.added
    }

    pub fn is_empty(&self) -> bool {
        self.added == 0
    }

    /// Number of insertions that replaced a node of the other kind.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn build(self) -> DesignTokens {
        self.tokens
    }
}

/// Token type for a variable, refined by name hints for floats.
pub fn variable_token_type(variable: &Variable) -> TokenType {
    match variable.resolved_type {
        ResolvedType::Float => {
            let name = variable.name.to_lowercase();
            if contains_any(&name, SPACING_HINTS) {
                TokenType::Spacing
            } else if contains_any(&name, RADIUS_HINTS) {
                TokenType::BorderRadius
            } else if contains_any(&name, TYPOGRAPHY_HINTS) {
                TokenType::Typography
            } else {
                TokenType::Number
            }
        }
        other => other.token_type(),
    }
}

fn contains_any(name: &str, hints: &[&str]) -> bool {
    hints.iter().any(|h| name.contains(h))
}

fn style_token(style: &PaintStyle) -> Option<Token> {
    let color = style.solid_color()?;
    Some(
        Token::new(color.to_hex(), TokenType::Color)
            .with_description(style.description.clone())
            .with_extensions(TokenExtensions {
                source_id: Some(style.id.clone()),
                original_path: Some(style.name.clone()),
                collection: None,
            }),
    )
}

/// Token for a variable at its collection's default mode, or `None` if the
/// variable has no collection or no value there.
fn variable_token(variable: &Variable, index: &VariableIndex<'_>) -> Option<Token> {
    let Some(collection) = index.collection_of(variable) else {
        warn!(
            variable = %variable.name,
            collection = %variable.variable_collection_id,
            "variable belongs to an unknown collection"
        );
        return None;
    };
    let mode_id = collection.default_mode()?;
    let raw = variable.values_by_mode.get(mode_id)?;

    let (value, resolved) = match raw {
        RawValue::Alias(alias) => {
            let reference = match index.variable(&alias.id) {
                Some(target) => {
                    let is_color = variable_token_type(target) == TokenType::Color;
                    format!("{{{}}}", token_path(&target.name, is_color).join("."))
                }
                None => {
                    warn!(variable = %variable.name, target = %alias.id, "broken alias");
                    format!("{{{}}}", alias.id)
                }
            };
            let resolved = resolve(variable, mode_id, collection, index, &mut Visited::new());
            (TokenValue::Text(reference), resolved)
        }
        primitive => (primitive.to_primitive()?, None),
    };

    Some(
        Token::new(value, variable_token_type(variable))
            .with_resolved(resolved)
            .with_description(variable.description.clone())
            .with_extensions(TokenExtensions {
                source_id: Some(variable.id.clone()),
                original_path: Some(variable.name.clone()),
                collection: Some(collection.name.clone()),
            }),
    )
}

/// Reads the whole document and returns a fresh token tree.
pub fn scan<S: DocumentSource + ?Sized>(source: &S) -> Result<DesignTokens> {
    let styles = source.paint_styles()?;
    let variables = source.variables()?;
    let collections = source.collections()?;
    let index = VariableIndex::new(&variables, &collections);

    let mut builder = TokenTreeBuilder::new();

    for style in &styles {
        match style_token(style) {
            Some(token) => builder.add_named(&style.name, None, token),
            None => debug!(style = %style.name, "paint style has no visible solid paint"),
        }
    }

    for variable in &variables {
        let Some(token) = variable_token(variable, &index) else {
            debug!(variable = %variable.name, "variable has no default-mode value");
            continue;
        };
        let collection = index.collection_of(variable).map(|c| c.name.as_str());
        builder.add_named(&variable.name, collection, token);
    }

    debug!(
        styles = styles.len(),
        variables = variables.len(),
        tokens = builder.len(),
        collisions = builder.collisions(),
        "scan complete"
    );
    Ok(builder.build())
}
