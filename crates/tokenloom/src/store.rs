//! Persistence of the last scanned token tree.
//!
//! Storage is an external collaborator reached through [`KeyValueStore`], a
//! plain get/set/delete contract over string values. [`TokenCache`] layers
//! the token tree and its [`SyncMetadata`] on top of any store.
//!
//! Two stores ship with the crate: [`MemoryStore`] for tests and embedding,
//! and [`FileStore`], which keeps one JSON file per key in a directory.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TokenError};
use crate::token::DesignTokens;

/// Version stamped into cache metadata. Entries written with any other
/// version are ignored on load.
pub const CACHE_VERSION: u32 = 1;

/// Key holding the serialized token tree.
pub const TOKENS_KEY: &str = "design-tokens";

/// Key holding the [`SyncMetadata`] record.
pub const METADATA_KEY: &str = "sync-metadata";

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

// ─── MemoryStore ────────────────────────────────────────────────────────────

/// In-process store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.remove(key);
        Ok(())
    }
}

// ─── FileStore ──────────────────────────────────────────────────────────────

/// Directory-backed store: each key is a `<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    fn path_for_key(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for_key(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TokenError::Store(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for_key(key);
        fs::write(&path, value)
            .map_err(|e| TokenError::Store(format!("failed to write {}: {}", path.display(), e)))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for_key(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenError::Store(format!(
                "failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

// ─── TokenCache ─────────────────────────────────────────────────────────────

/// Bookkeeping stored next to the cached tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    pub version: u32,
    /// Milliseconds since the Unix epoch.
    pub last_synced: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_file_id: Option<String>,
}

impl SyncMetadata {
    /// Metadata stamped with the current time and [`CACHE_VERSION`].
    pub fn now(external_file_id: Option<&str>) -> Self {
        Self {
            version: CACHE_VERSION,
            last_synced: now_millis(),
            external_file_id: external_file_id.map(String::from),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A cache hit: the stored tree and its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedTokens {
    pub tokens: DesignTokens,
    pub metadata: SyncMetadata,
}

/// Stores the last scanned tree in a [`KeyValueStore`].
#[derive(Debug)]
pub struct TokenCache<S> {
    store: S,
}

impl<S: KeyValueStore> TokenCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes `tokens` and fresh metadata, replacing any previous entry.
    pub fn save(&self, tokens: &DesignTokens, external_file_id: Option<&str>) -> Result<SyncMetadata> {
        let metadata = SyncMetadata::now(external_file_id);
        self.store.set(TOKENS_KEY, &serde_json::to_string(tokens)?)?;
        self.store
            .set(METADATA_KEY, &serde_json::to_string(&metadata)?)?;
        debug!(tokens = tokens.token_count(), "saved token cache");
        Ok(metadata)
    }

    /// The stored metadata, if present and readable.
    pub fn metadata(&self) -> Result<Option<SyncMetadata>> {
        let Some(raw) = self.store.get(METADATA_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable cache metadata");
                Ok(None)
            }
        }
    }

    /// The cached tree, or `None` when absent, unreadable, or written by a
    /// different cache version.
    pub fn load(&self) -> Result<Option<CachedTokens>> {
        let Some(metadata) = self.metadata()? else {
            return Ok(None);
        };
        if metadata.version != CACHE_VERSION {
            debug!(
                found = metadata.version,
                expected = CACHE_VERSION,
                "ignoring cache from another version"
            );
            return Ok(None);
        }
        let Some(raw) = self.store.get(TOKENS_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(tokens) => Ok(Some(CachedTokens { tokens, metadata })),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable cached tokens");
                Ok(None)
            }
        }
    }

    /// Removes the tree and its metadata.
    pub fn clear(&self) -> Result<()> {
        self.store.delete(TOKENS_KEY)?;
        self.store.delete(METADATA_KEY)
    }
}
