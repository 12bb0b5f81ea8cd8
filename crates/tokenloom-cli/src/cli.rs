use std::io;

use clap::Parser;
use tracing::Level;

use crate::commands::Commands;

#[derive(Parser)]
#[command(name = "tokenloom")]
#[command(about = "Scan, inspect, and export design tokens", long_about = None, version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the tokenloom CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the artifact
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli.command.execute(&mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_export_flags() {
        let cli = Cli::try_parse_from([
            "tokenloom",
            "-v",
            "export",
            "snap.json",
            "Theme",
            "--format",
            "dtcg",
            "--mode",
            "Light",
            "--mode",
            "Dark",
            "--unit",
            "rem",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["tokenloom", "export", "s.json", "C", "--format", "pdf"]).is_err());
    }
}
