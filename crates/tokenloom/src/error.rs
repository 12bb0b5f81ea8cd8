//! Error types for token scanning, storage, and export.
//!
//! This module provides [`TokenError`], the error type returned by every
//! fallible operation in the crate. Alias problems (dangling references and
//! cycles) are not errors; resolution reports them as data via
//! [`AliasIssue`](crate::alias::AliasIssue).

use thiserror::Error;

/// Error type for tokenloom operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// A collection id was requested that the source does not contain.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// A hex color string had the wrong length or non-hex digits.
    #[error("invalid hex color '{0}' (expected 6 or 8 hex digits)")]
    InvalidHex(String),

    /// The host document could not provide its records.
    #[error("document source error: {0}")]
    Source(String),

    /// The key-value store failed to read or write an entry.
    #[error("store error: {0}")]
    Store(String),

    /// Template compilation or rendering failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error (e.g., reading a settings file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tokenloom operations.
pub type Result<T> = std::result::Result<T, TokenError>;
