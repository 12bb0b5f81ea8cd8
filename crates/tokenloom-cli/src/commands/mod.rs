pub mod cache;
pub mod export;
pub mod inspect;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use tokenloom::DocumentSnapshot;

pub use export::ExportArgs;

#[derive(Subcommand)]
pub enum Commands {
    /// Build the categorized token tree from a snapshot
    Scan {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Also store the tree in this cache directory
        #[arg(long)]
        cache: Option<PathBuf>,

        /// External file id recorded in the cache metadata
        #[arg(long, requires = "cache")]
        file_id: Option<String>,
    },

    /// List the variable collections of a snapshot
    Collections {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },

    /// Show one collection's per-mode value table
    Detail {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Collection id or name
        collection: String,
    },

    /// Export a collection as CSS, SCSS, JSON, or DTCG
    Export(ExportArgs),

    /// Report broken and cyclic aliases
    Validate {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },

    /// Inspect or clear a token cache directory
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Print the cached tree's metadata and size
    Show {
        /// Cache directory
        #[arg(long)]
        dir: PathBuf,
    },

    /// Delete the cached tree
    Clear {
        /// Cache directory
        #[arg(long)]
        dir: PathBuf,
    },
}

impl Commands {
    pub fn execute(self, out: &mut dyn Write) -> anyhow::Result<()> {
        match self {
            Commands::Scan {
                snapshot,
                cache,
                file_id,
            } => inspect::scan(&snapshot, cache.as_deref(), file_id.as_deref(), out),
            Commands::Collections { snapshot } => inspect::collections(&snapshot, out),
            Commands::Detail {
                snapshot,
                collection,
            } => inspect::detail(&snapshot, &collection, out),
            Commands::Export(args) => export::execute(&args, out),
            Commands::Validate { snapshot } => inspect::validate(&snapshot, out),
            Commands::Cache { action } => match action {
                CacheAction::Show { dir } => cache::show(&dir, out),
                CacheAction::Clear { dir } => cache::clear(&dir, out),
            },
        }
    }
}

pub(crate) fn load_snapshot(path: &Path) -> anyhow::Result<DocumentSnapshot> {
    DocumentSnapshot::from_file(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::path::PathBuf;

    use tempfile::TempDir;

    pub const SNAPSHOT: &str = r#"{
        "paintStyles": [
            { "id": "S:1", "name": "Brand/Red",
              "paints": [ { "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0 } } ] }
        ],
        "collections": [
            { "id": "C:1", "name": "Theme", "defaultModeId": "m:l",
              "modes": [ { "modeId": "m:l", "name": "Light" }, { "modeId": "m:d", "name": "Dark" } ] }
        ],
        "variables": [
            { "id": "V:1", "name": "Accent", "resolvedType": "COLOR",
              "variableCollectionId": "C:1",
              "valuesByMode": { "m:l": { "r": 1, "g": 0, "b": 0 }, "m:d": { "r": 0, "g": 0, "b": 1 } } },
            { "id": "V:2", "name": "Text/Link", "resolvedType": "COLOR",
              "variableCollectionId": "C:1",
              "valuesByMode": {
                "m:l": { "type": "VARIABLE_ALIAS", "id": "V:1" },
                "m:d": { "type": "VARIABLE_ALIAS", "id": "V:1" } } },
            { "id": "V:3", "name": "Radius", "resolvedType": "FLOAT",
              "variableCollectionId": "C:1",
              "valuesByMode": { "m:l": 8, "m:d": 8 } }
        ]
    }"#;

    /// Writes the snapshot into a fresh temp dir.
    pub fn snapshot_file() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, SNAPSHOT).unwrap();
        (dir, path)
    }

    pub fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }
}
