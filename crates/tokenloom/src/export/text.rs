//! CSS custom properties and SCSS variables.

use super::template::{Block, Entry, ExportTemplates, CSS_BLOCK, SCSS_BLOCK};
use super::value::{dash_slug, render_value};
use super::ExportOptions;
use crate::detail::CollectionVariableDetail;
use crate::error::Result;

fn blocks(variables: &[CollectionVariableDetail], options: &ExportOptions) -> Vec<Block> {
    options
        .modes
        .iter()
        .map(|mode| Block {
            mode: mode.name.clone(),
            entries: variables
                .iter()
                .map(|variable| Entry {
                    name: dash_slug(&variable.name),
                    value: render_value(variable, &mode.mode_id, options).to_string(),
                })
                .collect(),
        })
        .collect()
}

/// One `:root { --name: value; }` block per mode.
pub fn render_css(variables: &[CollectionVariableDetail], options: &ExportOptions) -> Result<String> {
    ExportTemplates::new()?.render_blocks(CSS_BLOCK, &blocks(variables, options))
}

/// One `// Mode:` section of `$name: value;` lines per mode.
pub fn render_scss(variables: &[CollectionVariableDetail], options: &ExportOptions) -> Result<String> {
    ExportTemplates::new()?.render_blocks(SCSS_BLOCK, &blocks(variables, options))
}
