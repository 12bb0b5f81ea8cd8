//! Alias resolution across variables, collections, and modes.
//!
//! Variables may point at other variables (`{type: "VARIABLE_ALIAS", id}`),
//! possibly in another collection with its own set of modes. The alias graph
//! is keyed by `(variable id, mode id)` and may be malformed: targets can be
//! missing and chains can loop.
//!
//! Resolution walks the chain with an explicit visited set:
//!
//! 1. If `(variable, mode)` was already visited, stop: cycle.
//! 2. Record it and read the raw value for the mode.
//! 3. Alias: look up the target (missing target = broken link). Pick the
//!    target's mode by matching the current mode's *name* against the target
//!    collection's modes, falling back to the target's first mode. Recurse
//!    with the same visited set, so cycles spanning collections are caught.
//! 4. Color: canonical hex/rgba text.
//! 5. Anything else: the primitive as-is.
//!
//! The walk visits each `(variable, mode)` pair at most once, so it always
//! terminates. Failures are data: [`resolve`] yields `None`,
//! [`resolve_traced`] yields an [`AliasIssue`] describing the chain.
//!
//! The visited set must be fresh for every top-level resolution. Sharing one
//! across independent calls reports false cycles.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, warn};

use crate::source::{Collection, RawValue, Variable};
use crate::token::TokenValue;

/// A `(variable id, mode id)` pair.
pub type ModeKey = (String, String);

/// Pairs already visited during one resolution.
pub type Visited = HashSet<ModeKey>;

/// Why an alias chain did not reach a primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasIssue {
    /// An alias points at a variable or collection that does not exist.
    #[error("'{from}' aliases missing variable '{to}'")]
    BrokenLink { from: String, to: String },

    /// A variable in the chain has no value for the mode being resolved.
    #[error("'{variable}' has no value for mode '{mode_id}'")]
    MissingValue { variable: String, mode_id: String },

    /// The chain revisits a `(variable, mode)` pair.
    #[error("cycle detected in aliases: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },
}

// ─── VariableIndex ──────────────────────────────────────────────────────────

/// Lookup maps over a snapshot of variables and collections.
///
/// Borrowed from the records; iteration preserves source order.
#[derive(Debug, Clone)]
pub struct VariableIndex<'a> {
    variables: Vec<&'a Variable>,
    collections: Vec<&'a Collection>,
    variables_by_id: HashMap<&'a str, &'a Variable>,
    collections_by_id: HashMap<&'a str, &'a Collection>,
}

impl<'a> VariableIndex<'a> {
    pub fn new(variables: &'a [Variable], collections: &'a [Collection]) -> Self {
        Self {
            variables: variables.iter().collect(),
            collections: collections.iter().collect(),
            variables_by_id: variables.iter().map(|v| (v.id.as_str(), v)).collect(),
            collections_by_id: collections.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    pub fn variable(&self, id: &str) -> Option<&'a Variable> {
        self.variables_by_id.get(id).copied()
    }

    pub fn collection(&self, id: &str) -> Option<&'a Collection> {
        self.collections_by_id.get(id).copied()
    }

    /// The collection a variable belongs to.
    pub fn collection_of(&self, variable: &Variable) -> Option<&'a Collection> {
        self.collection(&variable.variable_collection_id)
    }

    pub fn variables(&self) -> impl Iterator<Item = &'a Variable> + '_ {
        self.variables.iter().copied()
    }

    pub fn collections(&self) -> impl Iterator<Item = &'a Collection> + '_ {
        self.collections.iter().copied()
    }

    /// Variables belonging to `collection_id`, in source order.
    pub fn variables_in(&self, collection_id: &str) -> Vec<&'a Variable> {
        self.variables
            .iter()
            .copied()
            .filter(|v| v.variable_collection_id == collection_id)
            .collect()
    }
}

// ─── Resolution ─────────────────────────────────────────────────────────────

/// Picks the mode to use in `target` when following an alias out of
/// `current` at `mode_id`.
///
/// Matches by mode name; if the current mode is unknown or the target has no
/// mode of that name, the target's first declared mode is used. The fallback
/// is a positional approximation, not a statement that the first mode is the
/// intended default.
pub fn match_mode(current: &Collection, mode_id: &str, target: &Collection) -> Option<String> {
    current
        .mode(mode_id)
        .and_then(|mode| target.mode_named(&mode.name))
        .or_else(|| target.modes.first())
        .map(|mode| mode.mode_id.clone())
}

/// Resolves `variable` at `mode_id` to a primitive, following aliases.
///
/// `collection` is the variable's own collection (used to name the current
/// mode). Returns `None` for broken links, missing values and cycles.
pub fn resolve(
    variable: &Variable,
    mode_id: &str,
    collection: &Collection,
    index: &VariableIndex<'_>,
    visited: &mut Visited,
) -> Option<TokenValue> {
    let mut trail = Vec::new();
    walk(variable, mode_id, collection, index, visited, &mut trail).ok()
}

/// Resolves with a fresh visited set, looking up the variable's collection.
pub fn resolve_value(
    variable: &Variable,
    mode_id: &str,
    index: &VariableIndex<'_>,
) -> Option<TokenValue> {
    resolve_traced(variable, mode_id, index).ok()
}

/// Like [`resolve_value`], but reports why resolution failed.
pub fn resolve_traced(
    variable: &Variable,
    mode_id: &str,
    index: &VariableIndex<'_>,
) -> Result<TokenValue, AliasIssue> {
    let collection = index
        .collection_of(variable)
        .ok_or_else(|| AliasIssue::BrokenLink {
            from: variable.name.clone(),
            to: variable.variable_collection_id.clone(),
        })?;
    let mut visited = Visited::new();
    let mut trail = Vec::new();
    walk(variable, mode_id, collection, index, &mut visited, &mut trail)
}

fn walk(
    variable: &Variable,
    mode_id: &str,
    collection: &Collection,
    index: &VariableIndex<'_>,
    visited: &mut Visited,
    trail: &mut Vec<String>,
) -> Result<TokenValue, AliasIssue> {
    trail.push(variable.name.clone());

    if !visited.insert((variable.id.clone(), mode_id.to_string())) {
        debug!(path = %trail.join(" -> "), "alias cycle");
        return Err(AliasIssue::CycleDetected {
            path: trail.clone(),
        });
    }

    let raw = variable
        .values_by_mode
        .get(mode_id)
        .ok_or_else(|| AliasIssue::MissingValue {
            variable: variable.name.clone(),
            mode_id: mode_id.to_string(),
        })?;

    let alias = match raw {
        RawValue::Alias(alias) => alias,
        primitive => {
            return primitive.to_primitive().ok_or_else(|| AliasIssue::MissingValue {
                variable: variable.name.clone(),
                mode_id: mode_id.to_string(),
            })
        }
    };

    let broken = || AliasIssue::BrokenLink {
        from: variable.name.clone(),
        to: alias.id.clone(),
    };
    let target = index.variable(&alias.id).ok_or_else(broken)?;
    let target_collection = index.collection_of(target).ok_or_else(broken)?;
    let target_mode =
        match_mode(collection, mode_id, target_collection).ok_or_else(|| AliasIssue::MissingValue {
            variable: target.name.clone(),
            mode_id: String::new(),
        })?;

    walk(target, &target_mode, target_collection, index, visited, trail)
}

/// Checks every aliased `(variable, mode)` pair and reports the ones that do
/// not resolve.
pub fn validate_aliases(index: &VariableIndex<'_>) -> Vec<AliasIssue> {
    let mut issues = Vec::new();
    for variable in index.variables() {
        for (mode_id, raw) in &variable.values_by_mode {
            if raw.as_alias().is_none() {
                continue;
            }
            if let Err(issue) = resolve_traced(variable, mode_id, index) {
                warn!(variable = %variable.name, mode = %mode_id, "{}", issue);
                issues.push(issue);
            }
        }
    }
    issues
}
