//! tokenloom - scan, inspect, and export design tokens from document snapshots

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    cli::run_cli()
}
