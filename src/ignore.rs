//! # Ignore Module
//!
//! Decides which directory entries the walker skips.
//!
//! Two rule sets apply to every entry:
//! - Version control and dependency directories listed in
//!   [`ALWAYS_IGNORED`], matched by base name.
//! - User patterns from `--ignore` or the config file, compiled into
//!   [`GlobSet`]s that only look at the tree below the project root.
//!
//! An ignored directory is never descended into.

use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::ConfigError;
use crate::verbose_log;

/// Base names skipped wherever they appear in the tree.
pub const ALWAYS_IGNORED: &[&str] = &[".git", ".hg", ".svn", ".bzr", "node_modules"];

/// Compiled user ignore patterns.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
///
/// use licensor::ignore::IgnoreManager;
///
/// let manager = IgnoreManager::new(&["vendor".to_string(), "*.min.js".to_string()]).unwrap();
///
/// assert!(manager.is_ignored(Path::new("proj/vendor"), Path::new("vendor")));
/// assert!(manager.is_ignored(Path::new("proj/web/app.min.js"), Path::new("web/app.min.js")));
/// assert!(!manager.is_ignored(Path::new("proj/main.go"), Path::new("main.go")));
/// ```
#[derive(Debug, Clone)]
pub struct IgnoreManager {
  /// Expanded patterns, matched against the path relative to the project root.
  relative_set: GlobSet,
  /// Patterns as given, matched against the walked path.
  walked_set: GlobSet,
  pattern_count: usize,
}

impl IgnoreManager {
  /// Compiles the user patterns.
  ///
  /// Each pattern is expanded so it matches wherever it appears below the
  /// project root:
  /// - `dir/` matches the directory `dir` at any depth and everything below it
  /// - a plain name or path matches itself at any depth and everything below it
  /// - a wildcard pattern matches as given and at any depth
  ///
  /// The pattern as given also matches the walked path itself (for example
  /// `./proj/gen` when the project path is `./proj`). Directories above the
  /// project root never take part in matching.
  ///
  /// Backslashes are treated as path separators.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::InvalidIgnorePattern`] for the first pattern that
  /// is not a valid glob.
  pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
    let mut relative = GlobSetBuilder::new();
    let mut walked = GlobSetBuilder::new();

    for original in patterns {
      let pattern = original.replace('\\', "/");
      let invalid = |source: globset::Error| ConfigError::InvalidIgnorePattern {
        pattern: original.clone(),
        source,
      };

      let mut add_relative = |p: &str| -> Result<(), ConfigError> {
        relative.add(Glob::new(p).map_err(invalid)?);
        Ok(())
      };

      let literal = if let Some(dir_pattern) = pattern.strip_suffix('/') {
        add_relative(dir_pattern)?;
        add_relative(&format!("{dir_pattern}/**"))?;
        add_relative(&format!("**/{dir_pattern}"))?;
        add_relative(&format!("**/{dir_pattern}/**"))?;
        dir_pattern
      } else if !pattern.contains(['*', '?', '[']) {
        add_relative(&pattern)?;
        add_relative(&format!("**/{pattern}"))?;
        add_relative(&format!("{pattern}/**"))?;
        add_relative(&format!("**/{pattern}/**"))?;
        pattern.as_str()
      } else {
        add_relative(&pattern)?;
        if !pattern.starts_with("**/") && !pattern.starts_with('/') {
          add_relative(&format!("**/{pattern}"))?;
        }
        pattern.as_str()
      };

      // Neither `**` nor a separator-crossing `*` may reach the directories
      // above the project root.
      if !literal.starts_with("**") {
        let glob = GlobBuilder::new(literal)
          .literal_separator(true)
          .build()
          .map_err(invalid)?;
        walked.add(glob);
      }
    }

    let build = |builder: GlobSetBuilder| {
      builder.build().map_err(|source| ConfigError::InvalidIgnorePattern {
        pattern: patterns.join(", "),
        source,
      })
    };

    Ok(Self {
      relative_set: build(relative)?,
      walked_set: build(walked)?,
      pattern_count: patterns.len(),
    })
  }

  /// Whether no user patterns were given.
  pub const fn is_empty(&self) -> bool {
    self.pattern_count == 0
  }

  /// Checks an entry against the user patterns.
  ///
  /// `path` is the entry as reached from the project path and `relative` is
  /// the same entry relative to the project root. The any-depth expansions
  /// only see `relative`; `path` only has to equal a pattern as given.
  pub fn is_ignored(&self, path: &Path, relative: &Path) -> bool {
    if self.is_empty() {
      return false;
    }

    if self.relative_set.is_match(relative) || self.walked_set.is_match(path) {
      verbose_log!("Skipping: {} (matches ignore pattern)", path.display());
      return true;
    }
    false
  }
}

/// Whether a base name is one of the [`ALWAYS_IGNORED`] directories.
pub fn is_always_ignored(name: &str) -> bool {
  ALWAYS_IGNORED.contains(&name)
}
