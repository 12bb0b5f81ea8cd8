//! Export settings files.
//!
//! An [`ExportSettings`] document describes an export the way a user writes
//! it: modes and per-variable units by *name*. [`ExportSettings::to_options`]
//! binds it to a concrete collection, producing [`ExportOptions`].
//!
//! ```yaml
//! format: css
//! aliasMode: alias
//! colorFormat: oklch
//! unitFormat: rem
//! baseFontSize: 16
//! modes: [Light, Dark]
//! unitPerVariable:
//!   font/weight/bold: none
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::ColorFormat;
use crate::detail::{CollectionDetail, LiteCollection};
use crate::error::Result;
use crate::export::{AliasMode, ExportFormat, ExportOptions};
use crate::unit::{Unit, DEFAULT_BASE_FONT_SIZE};

/// User-facing export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    pub alias_mode: AliasMode,
    pub color_format: ColorFormat,
    pub unit_format: Unit,
    pub base_font_size: f64,
    /// Mode names to export, in order. Empty exports every mode.
    pub modes: Vec<String>,
    /// Variable name or id → unit.
    pub unit_per_variable: HashMap<String, Unit>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            alias_mode: AliasMode::default(),
            color_format: ColorFormat::default(),
            unit_format: Unit::default(),
            base_font_size: DEFAULT_BASE_FONT_SIZE,
            modes: Vec::new(),
            unit_per_variable: HashMap::new(),
        }
    }
}

impl ExportSettings {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Binds the settings to `collection`.
    ///
    /// Mode names match case-insensitively; unknown names are skipped with a
    /// warning. Unit overrides keyed by variable name are translated to ids
    /// using `detail` when given; keys are otherwise taken as ids.
    pub fn to_options(
        &self,
        collection: &LiteCollection,
        detail: Option<&CollectionDetail>,
    ) -> ExportOptions {
        let modes = if self.modes.is_empty() {
            collection.modes.clone()
        } else {
            self.modes
                .iter()
                .filter_map(|name| {
                    let mode = collection.mode_named(name);
                    if mode.is_none() {
                        warn!(mode = %name, collection = %collection.name, "unknown mode");
                    }
                    mode.cloned()
                })
                .collect()
        };

        let unit_per_variable = self
            .unit_per_variable
            .iter()
            .map(|(key, unit)| {
                let id = detail
                    .and_then(|d| d.variables.iter().find(|v| v.name == *key))
                    .map(|v| v.id.clone())
                    .unwrap_or_else(|| key.clone());
                (id, unit.clone())
            })
            .collect();

        ExportOptions {
            format: self.format,
            modes,
            alias_mode: self.alias_mode,
            color_format: self.color_format,
            unit_format: self.unit_format.clone(),
            base_font_size: self.base_font_size,
            unit_per_variable,
        }
    }
}
