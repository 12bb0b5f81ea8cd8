//! MiniJinja templates for the line-oriented export formats.
//!
//! Each mode renders as one block from a named template; the caller joins
//! blocks with a blank line. Templates are registered once per
//! [`ExportTemplates`] and rendered with a [`Block`] context.

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::error::Result;

/// Template name for one CSS `:root` block.
pub const CSS_BLOCK: &str = "css_block";

/// Template name for one SCSS variable section.
pub const SCSS_BLOCK: &str = "scss_block";

const CSS_BLOCK_SOURCE: &str = "/* Mode: {{ mode }} */
:root {
{%- for entry in entries %}
  --{{ entry.name }}: {{ entry.value }};
{%- endfor %}
}";

const SCSS_BLOCK_SOURCE: &str = "// Mode: {{ mode }}
{%- for entry in entries %}
${{ entry.name }}: {{ entry.value }};
{%- endfor %}";

/// One `name: value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub value: String,
}

/// Context for one mode block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub mode: String,
    pub entries: Vec<Entry>,
}

/// A MiniJinja environment holding the export block templates.
pub struct ExportTemplates {
    env: Environment<'static>,
}

impl ExportTemplates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(CSS_BLOCK, CSS_BLOCK_SOURCE)?;
        env.add_template(SCSS_BLOCK, SCSS_BLOCK_SOURCE)?;
        Ok(Self { env })
    }

    /// Registers or replaces a named template.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Renders `block` with the template registered as `name`.
    pub fn render_block(&self, name: &str, block: &Block) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(Value::from_serialize(block))?)
    }

    /// Renders every block and joins them with a blank line.
    pub fn render_blocks(&self, name: &str, blocks: &[Block]) -> Result<String> {
        let rendered = blocks
            .iter()
            .map(|block| self.render_block(name, block))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join("\n\n"))
    }
}
