//! Result rendering: styled human text or one JSON object.

use console::style;
use distpack_core::ExportReport;
use serde::Serialize;

/// JSON projection of an export report.
#[derive(Serialize)]
struct JsonReport<'a> {
    archive: String,
    files_added: usize,
    files_redacted: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: &'a [String],
}

/// Prints the report for a successful export.
pub fn render(report: &ExportReport, json: bool, quiet: bool) {
    if json {
        let out = JsonReport {
            archive: report.archive_path.display().to_string(),
            files_added: report.files_added,
            files_redacted: report.files_redacted,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: &report.warnings,
        };
        // Serialization of this struct cannot fail.
        if let Ok(line) = serde_json::to_string(&out) {
            println!("{line}");
        }
        return;
    }

    for warning in &report.warnings {
        eprintln!("{} {warning}", style("warning:").yellow().bold());
    }

    if quiet {
        return;
    }

    println!(
        "{} {} ({} files, {} redacted, {} bytes)",
        style("created").green().bold(),
        report.archive_path.display(),
        report.files_added,
        report.files_redacted,
        report.bytes_written,
    );
}
