//! Error types for export operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExportError`.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while exporting a project tree.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The configured base directory does not exist.
    #[error("base directory does not exist: {path}")]
    BaseDirMissing {
        /// The configured base directory.
        path: PathBuf,
    },

    /// The configured base directory exists but is not a directory.
    #[error("base directory is not a directory: {path}")]
    BaseDirNotDirectory {
        /// The configured base directory.
        path: PathBuf,
    },

    /// Reading a file from the tree failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O cause.
        source: std::io::Error,
    },

    /// Writing to the archive stream failed.
    #[error("failed to write archive entry for {path}: {source}")]
    Write {
        /// The entry being written when the failure occurred.
        path: PathBuf,
        /// Underlying I/O cause.
        source: std::io::Error,
    },

    /// The zip layer rejected an operation.
    #[error("archive error for {path}: {source}")]
    Archive {
        /// The entry or archive file involved.
        path: PathBuf,
        /// Underlying zip error.
        source: zip::result::ZipError,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        /// The output directory.
        path: PathBuf,
        /// Underlying I/O cause.
        source: std::io::Error,
    },

    /// Directory traversal failed (unreadable directory, permission error).
    #[error("directory walk failed: {source}")]
    Walk {
        /// Underlying walkdir error.
        source: walkdir::Error,
    },

    /// A file enumerated as existing vanished before it could be read.
    ///
    /// This is an internal-consistency violation (a race with the
    /// filesystem during the walk), never silently skipped.
    #[error("file vanished during export: {path}")]
    Vanished {
        /// The path that disappeared.
        path: PathBuf,
    },

    /// An entry path cannot be represented as UTF-8 in the archive.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// A file selected for a text transform is not valid UTF-8.
    #[error("file selected for redaction is not valid UTF-8: {path}: {source}")]
    NonUtf8Content {
        /// The offending file.
        path: PathBuf,
        /// Underlying I/O cause.
        source: std::io::Error,
    },
}

impl ExportError {
    /// Returns `true` if this error was detected before any I/O began.
    ///
    /// # Examples
    ///
    /// ```
    /// use distpack_core::ExportError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExportError::BaseDirMissing {
    ///     path: PathBuf::from("/nonexistent"),
    /// };
    /// assert!(err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::BaseDirMissing { .. } | Self::BaseDirNotDirectory { .. }
        )
    }

    /// Returns the filesystem path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::BaseDirMissing { path }
            | Self::BaseDirNotDirectory { path }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Archive { path, .. }
            | Self::CreateOutputDir { path, .. }
            | Self::Vanished { path }
            | Self::NonUtf8Path { path }
            | Self::NonUtf8Content { path, .. } => Some(path),
            Self::Walk { source } => source.path(),
        }
    }
}
