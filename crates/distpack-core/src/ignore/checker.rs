//! Tree-wide ignore checking over layered ignore files.

use crate::Result;
use crate::ignore::parser::IgnoreFile;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

/// Name of the ignore pattern file recognized in each directory.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Version-control metadata directory, never exported.
const VCS_METADATA_DIR: &str = ".git";

/// Decides whether candidate paths are excluded from export.
///
/// Parsers are loaded per directory as the walker enters it
/// ([`IgnoreChecker::load_dir`]) and evaluated root-to-deepest along the
/// candidate's ancestor chain, so deeper ignore files override shallower
/// ones and later lines override earlier ones. Two exclusions apply
/// unconditionally, ignore files or not: anything under the output
/// directory (the export must never include its own output) and the
/// `.git` metadata directory.
///
/// # Examples
///
/// ```no_run
/// use distpack_core::ignore::IgnoreChecker;
/// use std::path::Path;
///
/// let mut checker = IgnoreChecker::new("/project", "/project/dist");
/// checker.load_dir(Path::new("/project"))?;
/// assert!(checker.is_excluded(Path::new("/project/dist/export.zip"), false));
/// # Ok::<(), distpack_core::ExportError>(())
/// ```
#[derive(Debug)]
pub struct IgnoreChecker {
    base_dir: PathBuf,
    output_dir: PathBuf,
    parsers: HashMap<PathBuf, IgnoreFile>,
}

impl IgnoreChecker {
    /// Creates a checker for the given base directory and output target.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            output_dir: output_dir.into(),
            parsers: HashMap::new(),
        }
    }

    /// Loads the ignore file of `dir`, if one exists.
    ///
    /// Called by the walker for every directory it enters, parents before
    /// children, which keeps the parser map complete for every path the
    /// walk can reach.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExportError::Read`] if an ignore file exists but
    /// cannot be read. A missing ignore file is not an error.
    pub fn load_dir(&mut self, dir: &Path) -> Result<()> {
        let ignore_path = dir.join(IGNORE_FILE_NAME);
        if ignore_path.is_file() {
            let parser = IgnoreFile::from_file(&ignore_path)?;
            self.parsers.insert(dir.to_path_buf(), parser);
        }
        Ok(())
    }

    /// Returns `true` if `path` is excluded from the export.
    ///
    /// `path` must be absolute or expressed the same way as the base
    /// directory so prefix checks line up. The last matching rule across
    /// all applicable ignore files decides; no match means included.
    #[must_use]
    pub fn is_excluded(&self, path: &Path, is_dir: bool) -> bool {
        // The archive must never try to include itself or prior output.
        if path.starts_with(&self.output_dir) {
            return true;
        }

        if path
            .file_name()
            .is_some_and(|name| name == VCS_METADATA_DIR)
        {
            return true;
        }

        let mut decision = None;
        for (dir, parser) in self.applicable_parsers(path) {
            let relative = path.strip_prefix(dir).unwrap_or(path);
            if let Some(matched) = parser.match_decision(relative, is_dir) {
                decision = Some(matched);
            }
        }

        decision.unwrap_or(false)
    }

    /// Collects parsers along the ancestor chain, ordered root to
    /// deepest so later entries override earlier ones.
    fn applicable_parsers<'a>(&'a self, path: &'a Path) -> Vec<(&'a Path, &'a IgnoreFile)> {
        let mut found = Vec::new();
        let mut current = path.parent();

        while let Some(dir) = current {
            if let Some(parser) = self.parsers.get(dir) {
                found.push((dir, parser));
            }
            if dir == self.base_dir {
                break;
            }
            current = dir.parent();
        }

        found.reverse();
        found
    }
}
