//! Ignore-aware enumeration of exportable files.

use crate::ExportError;
use crate::Result;
use crate::ignore::IgnoreChecker;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A file selected for export, with its archive entry name.
///
/// Created transiently during the walk and consumed once by the archive
/// assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute filesystem path of the file.
    pub path: PathBuf,

    /// Base-relative entry name: forward-slash separators, no leading
    /// slash, never above the base directory.
    pub archive_name: String,
}

/// Walks the base directory and collects every non-excluded regular file.
///
/// Directories the checker excludes are pruned whole; their contents are
/// never visited, so a deeper negation cannot re-include them (gitignore
/// semantics). Ignore files themselves are ordinary candidates unless a
/// rule excludes them. Symlinks are not followed and not yielded. Entries
/// are sorted by file name for a deterministic order within one run.
///
/// # Errors
///
/// - [`ExportError::Walk`] if a directory cannot be read. Unreadable
///   entries are fatal, never silently skipped.
/// - [`ExportError::Vanished`] if a discovered file no longer exists as a
///   regular file at yield time (a race with the filesystem).
/// - [`ExportError::NonUtf8Path`] if an entry name cannot be expressed in
///   the archive.
pub fn collect_candidates(
    base_dir: &Path,
    checker: &mut IgnoreChecker,
) -> Result<Vec<CandidateFile>> {
    let mut candidates = Vec::new();

    let mut walk = WalkDir::new(base_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walk.next() {
        let entry = entry.map_err(|source| ExportError::Walk { source })?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            if path != base_dir && checker.is_excluded(path, true) {
                walk.skip_current_dir();
                continue;
            }
            // Pick up a nested ignore file before visiting the contents.
            checker.load_dir(path)?;
            continue;
        }

        if !entry.file_type().is_file() {
            // Symlinks and special files are not packaged.
            continue;
        }

        if checker.is_excluded(path, false) {
            continue;
        }

        confirm_still_a_file(path)?;

        candidates.push(CandidateFile {
            path: path.to_path_buf(),
            archive_name: archive_entry_name(path, base_dir)?,
        });
    }

    Ok(candidates)
}

/// Re-checks that an enumerated path still exists as a regular file.
///
/// A path that vanished between discovery and yield indicates a race with
/// the filesystem during the walk and fails the export.
fn confirm_still_a_file(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(ExportError::Vanished {
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(ExportError::Vanished {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(ExportError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Computes the normalized base-relative entry name for a path.
fn archive_entry_name(path: &Path, base_dir: &Path) -> Result<String> {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);

    let name = relative.to_str().ok_or_else(|| ExportError::NonUtf8Path {
        path: path.to_path_buf(),
    })?;

    // Zip entry names use forward slashes on every platform.
    #[cfg(windows)]
    let name = name.replace('\\', "/");
    #[cfg(not(windows))]
    let name = name.to_string();

    Ok(name)
}
