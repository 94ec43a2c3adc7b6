//! Ignore file parsing with gitignore pattern syntax.

use crate::ExportError;
use crate::Result;
use glob::MatchOptions;
use glob::Pattern;
use std::path::Path;
use std::path::PathBuf;
use tracing::warn;

/// A single compiled pattern from an ignore file.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The original pattern line, for diagnostics.
    pub original: String,
    /// The compiled glob pattern.
    pattern: Pattern,
    /// Negation pattern (`!` prefix): a match re-includes the path.
    pub negated: bool,
    /// Pattern is anchored to the ignore file's directory (contains a
    /// non-trailing slash).
    pub anchored: bool,
    /// Pattern only matches directories (trailing slash).
    pub dir_only: bool,
}

/// Match options for anchored full-path matching.
///
/// `*` and `?` must not cross path separators; `**` still does.
fn path_match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

impl CompiledPattern {
    /// Checks this pattern against a path relative to the ignore file's
    /// directory, expressed with forward-slash separators.
    #[must_use]
    pub fn matches(&self, relative: &Path, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }

        if self.anchored {
            let Some(rel_str) = path_to_slash(relative) else {
                return false;
            };
            return self.pattern.matches_with(&rel_str, path_match_options());
        }

        // Non-anchored patterns match the basename at any depth. Matching
        // every component also covers paths whose ancestor directory the
        // pattern names.
        relative.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|s| self.pattern.matches(s))
        })
    }
}

/// One parsed ignore file and the directory it governs.
#[derive(Debug, Clone)]
pub struct IgnoreFile {
    patterns: Vec<CompiledPattern>,
    base_dir: PathBuf,
}

impl IgnoreFile {
    /// Parses an ignore file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Read`] if the file cannot be read. Invalid
    /// pattern lines are logged and skipped, never fatal.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        Ok(Self::from_content(&content, base_dir))
    }

    /// Parses ignore file content for the given directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use distpack_core::ignore::IgnoreFile;
    /// use std::path::{Path, PathBuf};
    ///
    /// let file = IgnoreFile::from_content("*.tmp\n!keep.tmp\n", PathBuf::new());
    /// assert_eq!(file.match_decision(Path::new("scratch.tmp"), false), Some(true));
    /// assert_eq!(file.match_decision(Path::new("keep.tmp"), false), Some(false));
    /// assert_eq!(file.match_decision(Path::new("main.rs"), false), None);
    /// ```
    #[must_use]
    pub fn from_content(content: &str, base_dir: PathBuf) -> Self {
        let mut patterns = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            match parse_line(line) {
                Ok(Some(pattern)) => patterns.push(pattern),
                Ok(None) => {} // blank line or comment
                Err(e) => {
                    warn!(
                        line = line_num + 1,
                        pattern = line,
                        error = %e,
                        "skipping invalid ignore pattern"
                    );
                }
            }
        }

        Self { patterns, base_dir }
    }

    /// Evaluates all patterns against a path relative to this file's
    /// directory.
    ///
    /// Returns `Some(true)` if the last matching pattern excludes the
    /// path, `Some(false)` if it re-includes it, and `None` if no pattern
    /// matched at all so shallower rules keep their say.
    #[must_use]
    pub fn match_decision(&self, relative: &Path, is_dir: bool) -> Option<bool> {
        let mut decision = None;

        // Patterns apply in file order; the last match wins.
        for pattern in &self.patterns {
            if pattern.matches(relative, is_dir) {
                decision = Some(!pattern.negated);
            }
        }

        decision
    }

    /// The directory whose subtree these patterns govern.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the file contained no usable patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Parses one ignore file line into a compiled pattern.
fn parse_line(line: &str) -> std::result::Result<Option<CompiledPattern>, glob::PatternError> {
    // Only trailing whitespace is insignificant; leading spaces are
    // literal pattern text.
    let line = line.trim_end();

    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (negated, rest) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    if rest.is_empty() {
        return Ok(None);
    }

    // Trailing slash restricts the pattern to directories.
    let (dir_only, rest) = match rest.strip_suffix('/') {
        Some(stripped) => (true, stripped),
        None => (false, rest),
    };

    // A leading slash anchors without contributing to the pattern text.
    let (leading_slash, rest) = match rest.strip_prefix('/') {
        Some(stripped) => (true, stripped),
        None => (false, rest),
    };

    if rest.is_empty() {
        return Ok(None);
    }

    // Anchored when a slash appears anywhere but the end (gitignore rule).
    let anchored = leading_slash || rest.contains('/');

    let compiled = Pattern::new(rest)?;

    Ok(Some(CompiledPattern {
        original: line.to_string(),
        pattern: compiled,
        negated,
        anchored,
        dir_only,
    }))
}

/// Converts a path to a forward-slash string for glob matching.
fn path_to_slash(path: &Path) -> Option<String> {
    let s = path.to_str()?;
    if std::path::MAIN_SEPARATOR == '/' {
        Some(s.to_string())
    } else {
        Some(s.replace(std::path::MAIN_SEPARATOR, "/"))
    }
}
