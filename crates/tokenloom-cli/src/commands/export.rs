//! CLI command for exporting a collection

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tokenloom::detail::{build_detail, find_collection, list_collections};
use tokenloom::{render, AliasMode, ColorFormat, ExportFormat, ExportSettings, TokenError, Unit};

use super::load_snapshot;

#[derive(Args)]
pub struct ExportArgs {
    /// Snapshot JSON file
    pub snapshot: PathBuf,

    /// Collection id or name
    pub collection: String,

    /// Output format: css, scss, json, dtcg
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Render aliases as references (alias) or primitives (resolved)
    #[arg(long)]
    pub alias_mode: Option<AliasMode>,

    /// Color notation: hex, rgb, rgba, hsl, hsla, oklch
    #[arg(long)]
    pub color_format: Option<ColorFormat>,

    /// Unit for numeric values (px, rem, em, none, or any CSS unit)
    #[arg(short, long)]
    pub unit: Option<Unit>,

    /// Root font size for rem/em conversion
    #[arg(long)]
    pub base_font_size: Option<f64>,

    /// Mode to export (repeatable; default: all modes)
    #[arg(short, long = "mode")]
    pub modes: Vec<String>,

    /// YAML export settings; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Settings from the config file (or defaults) with flags applied.
    fn settings(&self) -> anyhow::Result<ExportSettings> {
        let mut settings = match &self.config {
            Some(path) => ExportSettings::from_file(path)
                .with_context(|| format!("failed to load settings {}", path.display()))?,
            None => ExportSettings::default(),
        };

        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(alias_mode) = self.alias_mode {
            settings.alias_mode = alias_mode;
        }
        if let Some(color_format) = self.color_format {
            settings.color_format = color_format;
        }
        if let Some(unit) = &self.unit {
            settings.unit_format = unit.clone();
        }
        if let Some(base_font_size) = self.base_font_size {
            settings.base_font_size = base_font_size;
        }
        if !self.modes.is_empty() {
            settings.modes = self.modes.clone();
        }
        Ok(settings)
    }
}

pub fn execute(args: &ExportArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let settings = args.settings()?;

    let collections = list_collections(&snapshot)?;
    let lite = find_collection(&collections, &args.collection)
        .ok_or_else(|| TokenError::CollectionNotFound(args.collection.clone()))?;
    let detail = build_detail(&snapshot, &lite.id)?;

    let options = settings.to_options(&detail.collection, Some(&detail));
    if options.modes.is_empty() && !settings.modes.is_empty() {
        bail!(
            "none of the requested modes ({}) exist in '{}'",
            settings.modes.join(", "),
            detail.collection.name
        );
    }

    let text = render(&detail.variables, &options, &detail.collection.name)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", text))
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(
                out,
                "Exported {} variables ({} modes) to {}",
                detail.variables.len(),
                options.modes.len(),
                path.display()
            )?;
        }
        None => writeln!(out, "{}", text)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixture::{output, snapshot_file};

    fn args(path: PathBuf, collection: &str) -> ExportArgs {
        ExportArgs {
            snapshot: path,
            collection: collection.into(),
            format: None,
            alias_mode: None,
            color_format: None,
            unit: None,
            base_font_size: None,
            modes: Vec::new(),
            config: None,
            output: None,
        }
    }

    #[test]
    fn test_export_css_alias_mode_to_stdout() {
        let (_dir, path) = snapshot_file();
        let mut a = args(path, "Theme");
        a.alias_mode = Some(AliasMode::Alias);
        a.modes = vec!["Light".into()];

        let mut buf = Vec::new();
        execute(&a, &mut buf).unwrap();
        assert_eq!(
            output(buf),
            "/* Mode: Light */\n:root {\n  --accent: #ff0000;\n  --text-link: var(--accent);\n  --radius: 8px;\n}\n"
        );
    }

    #[test]
    fn test_flags_override_config() {
        let (dir, path) = snapshot_file();
        let config = dir.path().join("export.yaml");
        fs::write(&config, "format: json\nunitFormat: rem\nmodes: [Dark]\n").unwrap();

        let mut a = args(path, "C:1");
        a.config = Some(config);
        a.unit = Some(Unit::None);

        let mut buf = Vec::new();
        execute(&a, &mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output(buf)).unwrap();
        assert_eq!(json["dark"]["radius"], "8");
        assert_eq!(json["dark"]["text.link"], "#0000ff");
        assert!(json.get("light").is_none());
    }

    #[test]
    fn test_export_to_file() {
        let (dir, path) = snapshot_file();
        let target = dir.path().join("tokens.scss");
        let mut a = args(path, "Theme");
        a.format = Some(ExportFormat::Scss);
        a.output = Some(target.clone());

        let mut buf = Vec::new();
        execute(&a, &mut buf).unwrap();
        assert!(output(buf).starts_with("Exported 3 variables (2 modes)"));
        let written = fs::read_to_string(target).unwrap();
        assert!(written.starts_with("// Mode: Light\n$accent: #ff0000;"));
        assert!(written.ends_with(";\n"));
    }

    #[test]
    fn test_unknown_modes_fail() {
        let (_dir, path) = snapshot_file();
        let mut a = args(path, "Theme");
        a.modes = vec!["Sepia".into()];
        let err = execute(&a, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Sepia"));
    }
}
