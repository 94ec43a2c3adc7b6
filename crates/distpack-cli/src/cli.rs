//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Export a project tree into a zip archive, honoring `.gitignore` rules
/// and optionally redacting instructor-only marked regions.
#[derive(Parser)]
#[command(name = "distpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base directory to export
    #[arg(value_name = "BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Output directory for the archive (created if missing)
    #[arg(short, long, value_name = "DIR", default_value = "dist")]
    pub output_dir: PathBuf,

    /// Archive file name inside the output directory
    #[arg(short = 'n', long, value_name = "NAME", default_value = "export.zip")]
    pub archive_name: String,

    /// Strip marked regions from source files and remove the
    /// redaction flag from the build descriptor
    #[arg(long)]
    pub redact: bool,

    /// Compression level (0 = stored, 1-9 = deflate)
    #[arg(short = 'l', long, default_value = "6", value_parser = clap::value_parser!(u8).range(0..=9))]
    pub level: u8,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
