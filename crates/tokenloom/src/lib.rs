//! # Tokenloom - design tokens from style and variable stores
//!
//! Tokenloom reads the paint styles and variables of a design document and
//! turns them into design tokens: a categorized tree, per-collection value
//! tables, and export artifacts.
//!
//! ## Pipeline
//!
//! ```text
//! DocumentSource ──► path::categorize / parse_path ──► tree::scan ──► DesignTokens
//!        │                                                              │
//!        └──► alias::resolve ──► detail::build_detail ──► export::render ──► CSS / SCSS / JSON / DTCG
//! ```
//!
//! - [`source`]: the host document boundary ([`DocumentSource`], [`DocumentSnapshot`])
//! - [`path`]: name → category and path segments
//! - [`alias`]: cycle-safe alias resolution across collections and modes
//! - [`tree`]: the categorized [`DesignTokens`] tree
//! - [`detail`]: per-collection, per-mode value tables
//! - [`color`] and [`unit`]: value conversion
//! - [`export`]: text artifacts
//! - [`store`]: caching the last scan in a key-value store
//! - [`config`]: YAML export settings
//!
//! ## Quick start
//!
//! ```rust
//! use tokenloom::prelude::*;
//!
//! let snapshot = DocumentSnapshot::from_json(r#"{
//!     "collections": [
//!         { "id": "C:1", "name": "Theme", "defaultModeId": "m:1",
//!           "modes": [ { "modeId": "m:1", "name": "Light" } ] }
//!     ],
//!     "variables": [
//!         { "id": "V:1", "name": "space/sm", "resolvedType": "FLOAT",
//!           "variableCollectionId": "C:1", "valuesByMode": { "m:1": 8 } }
//!     ]
//! }"#).unwrap();
//!
//! let detail = build_detail(&snapshot, "C:1").unwrap();
//! let options = ExportOptions::new(ExportFormat::Css, detail.collection.modes.clone())
//!     .with_unit(Unit::Rem);
//! let css = render(&detail.variables, &options, &detail.collection.name).unwrap();
//! assert_eq!(css, "/* Mode: Light */\n:root {\n  --space-sm: 0.5rem;\n}");
//! ```
//!
//! Everything here is synchronous. The only I/O happens behind
//! [`DocumentSource`] and [`store::KeyValueStore`].

pub mod alias;
pub mod color;
pub mod config;
pub mod detail;
mod error;
pub mod export;
pub mod path;
pub mod prelude;
pub mod source;
pub mod store;
pub mod token;
pub mod tree;
pub mod unit;
mod util;

pub use error::{Result, TokenError};

pub use alias::{resolve, resolve_traced, resolve_value, validate_aliases, AliasIssue, VariableIndex};
pub use color::{
    format_color, hex_to_rgba, rgb_to_hsl, rgba_to_hex, rgba_to_oklch, ColorFormat, Rgba,
};
pub use config::ExportSettings;
pub use detail::{
    build_all_details, build_detail, list_collections, CollectionDetail, CollectionVariableDetail,
    LiteCollection,
};
pub use export::{render, AliasMode, ExportFormat, ExportOptions};
pub use path::{categorize, parse_path, Category};
pub use source::{DocumentSnapshot, DocumentSource};
pub use store::{FileStore, KeyValueStore, MemoryStore, SyncMetadata, TokenCache};
pub use token::{DesignTokens, Token, TokenSet, TokenType, TokenValue};
pub use tree::{scan, TokenTreeBuilder};
pub use unit::{format_unit, Unit, DEFAULT_BASE_FONT_SIZE};
