//! Hierarchical ignore-rule evaluation with gitignore semantics.
//!
//! Ignore files found anywhere under the base directory are parsed into
//! compiled patterns and layered: a pattern in a deeper directory, or a
//! later line within the same file, overrides an earlier, shallower one,
//! and `!` negation re-includes a previously excluded path. No repository
//! needs to exist on disk; evaluation runs purely against the working
//! tree.

pub mod checker;
pub mod parser;

pub use checker::IGNORE_FILE_NAME;
pub use checker::IgnoreChecker;
pub use parser::IgnoreFile;
