//! Export operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of one completed export.
///
/// Returned only when the whole archive was written successfully; a
/// failed export produces an error and no report.
///
/// # Examples
///
/// ```
/// use distpack_core::ExportReport;
///
/// let mut report = ExportReport::default();
/// report.files_added = 3;
/// report.add_warning("unterminated redaction marker in src/lib.rs");
/// assert!(report.has_warnings());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Path of the archive that was produced.
    pub archive_path: PathBuf,

    /// Number of entries written.
    pub files_added: usize,

    /// Number of entries whose content was changed by a redaction
    /// transform.
    pub files_redacted: usize,

    /// Total uncompressed bytes written into entries.
    pub bytes_written: u64,

    /// Duration of the export.
    pub duration: Duration,

    /// Non-fatal notices gathered during the export, such as
    /// unterminated redaction markers.
    pub warnings: Vec<String>,
}

impl ExportReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a non-fatal warning.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
