//! Distpack CLI - export a project tree into a zip archive, honoring
//! ignore rules, with optional instructor-redaction.

mod cli;
mod output;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use distpack_core::ExportConfig;
use distpack_core::export_archive;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = ExportConfig::new(&cli.base_dir, &cli.output_dir)
        .with_archive_name(&cli.archive_name)
        .with_redact(cli.redact)
        .with_compression_level(cli.level);

    let report = export_archive(&config)
        .with_context(|| format!("failed to export {}", cli.base_dir.display()))?;

    output::render(&report, cli.json, cli.quiet);
    Ok(())
}
