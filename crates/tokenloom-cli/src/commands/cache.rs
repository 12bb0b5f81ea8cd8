//! CLI commands for the token cache directory

use std::io::Write;
use std::path::Path;

use tokenloom::{FileStore, TokenCache};

pub fn show(dir: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    let cache = TokenCache::new(FileStore::new(dir));
    match cache.load()? {
        Some(hit) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&hit.metadata)?)?;
            writeln!(out, "{} tokens", hit.tokens.token_count())?;
        }
        None => writeln!(out, "no cached tokens in {}", dir.display())?,
    }
    Ok(())
}

pub fn clear(dir: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    TokenCache::new(FileStore::new(dir)).clear()?;
    writeln!(out, "cleared {}", dir.display())?;
    Ok(())
}
