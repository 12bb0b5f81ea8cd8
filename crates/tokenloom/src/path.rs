//! Path categorization: raw style/variable names → category + path segments.
//!
//! Names in the host document are free-form (`"Blue/500"`,
//! `"text/primary"`, `"Brand/Primary Color"`). Two pure heuristics turn them
//! into tree coordinates:
//!
//! - [`categorize`] picks one of the four top-level categories from keyword
//!   and naming-pattern checks on `"<collection>/<name>"`.
//! - [`parse_path`] splits on `/`, `.` and `-` and camel-cases each segment.
//!
//! Both are total: nothing here fails, unmatched names land in
//! [`Category::Uncategorized`].
//!
//! ```rust
//! use tokenloom::path::{categorize, parse_path, Category};
//!
//! assert_eq!(categorize("Blue/500", None), Category::Primitives);
//! assert_eq!(categorize("text/primary", None), Category::Semantic);
//! assert_eq!(parse_path("Brand/Primary Color"), vec!["brand", "primaryColor"]);
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Substrings marking a name as a primitive (raw palette/scale) token.
pub const PRIMITIVE_KEYWORDS: &[&str] = &[
    "primitive",
    "primitives",
    "palette",
    "core",
    "scale",
    "base",
    "ref",
    "reference",
];

/// Substrings marking a name as a semantic (purpose-named) token.
pub const SEMANTIC_KEYWORDS: &[&str] = &[
    "semantic", "system", "usage", "alias", "light", "dark", "mode",
];

/// Leading segments typical of semantic token names.
pub const SEMANTIC_PREFIXES: &[&str] = &[
    "text",
    "bg",
    "background",
    "surface",
    "border",
    "fg",
    "foreground",
];

/// Segment prepended to every color token path.
pub const COLOR_SEGMENT: &str = "color";

static TRAILING_SCALE_STEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2,3}$").unwrap());
static PATH_DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/.\-]+").unwrap());

/// Top-level category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Primitives,
    Semantic,
    Components,
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Primitives,
        Category::Semantic,
        Category::Components,
        Category::Uncategorized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Primitives => "primitives",
            Category::Semantic => "semantic",
            Category::Components => "components",
            Category::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chooses a category for `name`, optionally in the context of its
/// collection's name.
///
/// Checks run in order and the first hit wins:
///
/// 1. `"<collection>/<name>"` (lowercased) contains a [`PRIMITIVE_KEYWORDS`] entry
/// 2. ... contains a [`SEMANTIC_KEYWORDS`] entry
/// 3. the trimmed name ends in a 2–3 digit scale step (`500`)
/// 4. the name starts with a [`SEMANTIC_PREFIXES`] entry
/// 5. otherwise uncategorized
pub fn categorize(name: &str, collection: Option<&str>) -> Category {
    let haystack = format!("{}/{}", collection.unwrap_or_default(), name).to_lowercase();

    if PRIMITIVE_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        return Category::Primitives;
    }
    if SEMANTIC_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        return Category::Semantic;
    }

    let trimmed = name.trim();
    if TRAILING_SCALE_STEP.is_match(trimmed) {
        return Category::Primitives;
    }

    let lowered = trimmed.to_lowercase();
    if SEMANTIC_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return Category::Semantic;
    }

    Category::Uncategorized
}

/// Splits a raw name into camel-cased path segments.
///
/// Runs of `/`, `.` and `-` separate segments; empty segments are dropped.
pub fn parse_path(name: &str) -> Vec<String> {
    PATH_DELIMITERS
        .split(name)
        .map(camel_case)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Camel-cases one segment: the first word character is lowercased, the
/// first character of every later word is uppercased, whitespace is removed.
/// Characters inside a word keep their case.
fn camel_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut seen_word = false;
    let mut at_boundary = true;

    for c in segment.chars() {
        if c.is_whitespace() {
            at_boundary = true;
            continue;
        }
        let is_word = c.is_alphanumeric() || c == '_';
        if !is_word {
            out.push(c);
            at_boundary = true;
            continue;
        }
        if !seen_word {
            out.extend(c.to_lowercase());
            seen_word = true;
        } else if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = false;
    }

    out
}

/// Path segments for a token of the given kind: color tokens always live
/// under a leading `color` segment.
pub fn token_path(name: &str, is_color: bool) -> Vec<String> {
    let mut segments = parse_path(name);
    if is_color && segments.first().map(String::as_str) != Some(COLOR_SEGMENT) {
        segments.insert(0, COLOR_SEGMENT.to_string());
    }
    segments
}
