//! Read-only commands: scan, collections, detail, validate

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use tokenloom::alias::{validate_aliases, VariableIndex};
use tokenloom::detail::{build_detail, find_collection, list_collections};
use tokenloom::{scan as scan_tokens, FileStore, TokenCache, TokenError};

use super::load_snapshot;

pub fn scan(
    snapshot: &Path,
    cache_dir: Option<&Path>,
    file_id: Option<&str>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot)?;
    let tokens = scan_tokens(&snapshot)?;

    if let Some(dir) = cache_dir {
        TokenCache::new(FileStore::new(dir))
            .save(&tokens, file_id)
            .with_context(|| format!("failed to write cache in {}", dir.display()))?;
        tracing::info!(dir = %dir.display(), tokens = tokens.token_count(), "cached tokens");
    }

    writeln!(out, "{}", serde_json::to_string_pretty(&tokens)?)?;
    Ok(())
}

pub fn collections(snapshot: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot)?;
    for collection in list_collections(&snapshot)? {
        let modes: Vec<&str> = collection.modes.iter().map(|m| m.name.as_str()).collect();
        writeln!(
            out,
            "{}\t{}\t[{}]\t{} variables",
            collection.id,
            collection.name,
            modes.join(", "),
            collection.variable_ids.len()
        )?;
    }
    Ok(())
}

pub fn detail(snapshot: &Path, collection: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot)?;
    let collections = list_collections(&snapshot)?;
    let lite = find_collection(&collections, collection)
        .ok_or_else(|| TokenError::CollectionNotFound(collection.to_string()))?;
    let detail = build_detail(&snapshot, &lite.id)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&detail)?)?;
    Ok(())
}

/// Prints one line per alias problem; fails if there are any.
pub fn validate(snapshot: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot)?;
    let index = VariableIndex::new(&snapshot.variables, &snapshot.collections);
    let issues = validate_aliases(&index);

    if issues.is_empty() {
        writeln!(out, "all aliases resolve")?;
        return Ok(());
    }
    for issue in &issues {
        writeln!(out, "{}", issue)?;
    }
    bail!("{} alias issue(s) found", issues.len())
}
