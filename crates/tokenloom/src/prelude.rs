//! Common imports.
//!
//! ```rust
//! use tokenloom::prelude::*;
//!
//! let tokens = scan(&DocumentSnapshot::default()).unwrap();
//! assert_eq!(tokens.token_count(), 0);
//! ```

pub use crate::alias::{resolve_value, validate_aliases, AliasIssue, VariableIndex};
pub use crate::color::{format_color, ColorFormat};
pub use crate::config::ExportSettings;
pub use crate::detail::{build_all_details, build_detail, list_collections, CollectionDetail};
pub use crate::error::{Result, TokenError};
pub use crate::export::{render, AliasMode, ExportFormat, ExportOptions};
pub use crate::source::{DocumentSnapshot, DocumentSource, Mode};
pub use crate::store::{FileStore, KeyValueStore, MemoryStore, TokenCache};
pub use crate::token::{DesignTokens, Token, TokenType, TokenValue};
pub use crate::tree::scan;
pub use crate::unit::{format_unit, Unit};
