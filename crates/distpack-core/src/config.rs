//! Configuration for export operations.

use crate::ExportError;
use crate::Result;
use std::path::PathBuf;

/// Default archive file name.
pub const DEFAULT_ARCHIVE_NAME: &str = "export.zip";

/// Redaction token configuration.
///
/// Holds the fixed sentinel strings the redaction transforms operate on.
/// These are plain values rather than compiled-in literals so the marker
/// stripper and the archive assembler stay testable in isolation.
///
/// # Examples
///
/// ```
/// use distpack_core::RedactionTokens;
///
/// let tokens = RedactionTokens::default();
/// assert_eq!(tokens.region_start, "//[[");
/// assert_eq!(tokens.region_end, "//]]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionTokens {
    /// Start sentinel of a redacted region in source text.
    pub region_start: String,

    /// End sentinel of a redacted region in source text.
    pub region_end: String,

    /// File extensions (without dot) treated as source files and run
    /// through the marker stripper when redaction is enabled.
    pub source_extensions: Vec<String>,

    /// File name of the build descriptor subject to flag removal.
    pub descriptor_name: String,

    /// Exact substring removed from the build descriptor so the
    /// redaction-enablement flag itself does not ship in the export.
    pub descriptor_flag: String,
}

impl Default for RedactionTokens {
    fn default() -> Self {
        Self {
            region_start: "//[[".to_string(),
            region_end: "//]]".to_string(),
            source_extensions: vec!["rs".to_string()],
            descriptor_name: "Cargo.toml".to_string(),
            descriptor_flag: "redact = true".to_string(),
        }
    }
}

/// Configuration for one export invocation.
///
/// # Examples
///
/// ```
/// use distpack_core::ExportConfig;
///
/// let config = ExportConfig::new("/home/user/project", "/home/user/project/dist")
///     .with_archive_name("handout.zip")
///     .with_redact(true);
/// assert_eq!(config.archive_name, "handout.zip");
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Root of the tree to export. Must exist and be a directory.
    pub base_dir: PathBuf,

    /// Destination directory for the archive, created if absent.
    ///
    /// Anything under this directory is unconditionally excluded from
    /// enumeration so the archive never tries to include itself or
    /// previous build output.
    pub output_dir: PathBuf,

    /// File name of the archive inside `output_dir`.
    ///
    /// Default: `export.zip`.
    pub archive_name: String,

    /// Enable the marker stripper and build-descriptor flag removal.
    ///
    /// Default: `false` (every file is copied byte-for-byte).
    pub redact: bool,

    /// Deflate level 1-9, or 0 for stored (no compression).
    ///
    /// Default: 6.
    pub compression_level: u8,

    /// Sentinel strings driving the redaction transforms.
    pub tokens: RedactionTokens,
}

impl ExportConfig {
    /// Creates a config for the given base and output directories with
    /// default settings otherwise.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            output_dir: output_dir.into(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            redact: false,
            compression_level: 6,
            tokens: RedactionTokens::default(),
        }
    }

    /// Sets the archive file name.
    #[must_use]
    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = name.into();
        self
    }

    /// Enables or disables redaction.
    #[must_use]
    pub fn with_redact(mut self, redact: bool) -> Self {
        self.redact = redact;
        self
    }

    /// Sets the compression level (0 = stored, 1-9 = deflate).
    ///
    /// # Panics
    ///
    /// Panics if the level is greater than 9.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!(level <= 9, "compression level must be 0-9");
        self.compression_level = level;
        self
    }

    /// Replaces the redaction token configuration.
    #[must_use]
    pub fn with_tokens(mut self, tokens: RedactionTokens) -> Self {
        self.tokens = tokens;
        self
    }

    /// Full path of the archive this config will produce.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.archive_name)
    }

    /// Validates the configuration before any I/O begins.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory is missing or is not a
    /// directory.
    pub fn validate(&self) -> Result<()> {
        if !self.base_dir.exists() {
            return Err(ExportError::BaseDirMissing {
                path: self.base_dir.clone(),
            });
        }
        if !self.base_dir.is_dir() {
            return Err(ExportError::BaseDirNotDirectory {
                path: self.base_dir.clone(),
            });
        }
        Ok(())
    }
}
