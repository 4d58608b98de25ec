//! # File Collector Module
//!
//! Lazy depth-first traversal of the project tree.
//!
//! Directories are expanded on demand from an explicit stack, so files are
//! yielded (and processed) while the walk is still in progress. Entries of a
//! directory are visited in file-name order.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{Result, io_err};
use crate::ignore::{IgnoreManager, is_always_ignored};

/// Iterator over the regular files under a project root.
///
/// Skips symlinks, always-ignored directories and anything matching the
/// user ignore patterns. Yields an error and stops at the first directory
/// that cannot be listed.
pub struct FileCollector<'a> {
  root: PathBuf,
  ignore_manager: &'a IgnoreManager,
  stack: Vec<Pending>,
  failed: bool,
}

enum Pending {
  Dir(PathBuf),
  File(PathBuf),
}

impl<'a> FileCollector<'a> {
  /// Starts a walk at `root`. The root itself is never subject to ignore
  /// rules.
  pub fn new(root: &Path, ignore_manager: &'a IgnoreManager) -> Self {
    Self {
      root: root.to_path_buf(),
      ignore_manager,
      stack: vec![Pending::Dir(root.to_path_buf())],
      failed: false,
    }
  }

  fn expand(&mut self, dir: &Path) -> Result<()> {
    let mut children = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
      let entry = entry.map_err(|e| io_err(dir, e))?;
      let path = entry.path();
      let name = entry.file_name();

      if is_always_ignored(&name.to_string_lossy()) {
        trace!("Skipping: {} (always ignored)", path.display());
        continue;
      }

      let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
      if file_type.is_symlink() {
        trace!("Skipping: {} (symlink)", path.display());
        continue;
      }

      let relative = path.strip_prefix(&self.root).unwrap_or(path.as_path());
      if self.ignore_manager.is_ignored(&path, relative) {
        continue;
      }

      if file_type.is_dir() {
        children.push((name, Pending::Dir(path)));
      } else if file_type.is_file() {
        children.push((name, Pending::File(path)));
      }
    }

    children.sort_by(|(a, _), (b, _)| a.cmp(b));
    // Reversed so the smallest name is popped first.
    self.stack.extend(children.into_iter().rev().map(|(_, pending)| pending));
    Ok(())
  }
}

impl Iterator for FileCollector<'_> {
  type Item = Result<PathBuf>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }

    while let Some(pending) = self.stack.pop() {
      match pending {
        Pending::File(path) => return Some(Ok(path)),
        Pending::Dir(dir) => {
          trace!("Scanning directory: {}", dir.display());
          if let Err(e) = self.expand(&dir) {
            self.failed = true;
            return Some(Err(e));
          }
        }
      }
    }
    None
  }
}
