//! Ignore-aware project export with instructor-redaction.
//!
//! `distpack-core` packages a project working tree into a single zip
//! archive, excluding files matched by hierarchical `.gitignore`-style
//! rules and optionally redacting instructor-only marked regions and the
//! build-descriptor redaction flag before entries are written.
//!
//! # Examples
//!
//! ```no_run
//! use distpack_core::ExportConfig;
//! use distpack_core::export_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExportConfig::new("./project", "./project/dist").with_redact(true);
//! let report = export_archive(&config)?;
//! println!("archive at {}", report.archive_path.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod ignore;
pub mod report;
pub mod strip;
pub mod walker;

// Re-export main API types
pub use archive::export_archive;
pub use config::DEFAULT_ARCHIVE_NAME;
pub use config::ExportConfig;
pub use config::RedactionTokens;
pub use error::ExportError;
pub use error::Result;
pub use report::ExportReport;

// Re-export the building blocks for callers composing their own pipeline
pub use ignore::IgnoreChecker;
pub use strip::StripOutcome;
pub use strip::strip_marked_regions;
pub use walker::CandidateFile;
pub use walker::collect_candidates;
