//! # Output Module
//!
//! This module centralizes all user-facing output for licensor.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! - Progress lines (one path per visited file) and results go to stdout so
//!   they can be piped.
//! - `-q` silences everything here except the list of changed files in check
//!   mode, which is printed as bare paths for scripting.
//! - `-v` lifts the truncation limit on file lists.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::processor::Progress;
use crate::report::{FileAction, FileReport, RunSummary};

/// Symbols used in output
pub mod symbols {
  /// Nothing to do
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header inserted
  pub const INSERTED: &str = "+";
  /// Header replaced
  pub const REPLACED: &str = "\u{21bb}"; // ↻
  /// Header removed
  pub const REMOVED: &str = "\u{2717}"; // ✗
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// What a run is doing, for the start message and hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMode {
  pub remove: bool,
  pub check_only: bool,
}

/// Print the initial message naming the project and the operation.
pub fn print_start_message(project: &Path, mode: RunMode) {
  if is_quiet() {
    return;
  }

  let verb = match (mode.check_only, mode.remove) {
    (true, false) => "Checking license headers in",
    (true, true) => "Checking for license headers to remove in",
    (false, false) => "Adding license headers in",
    (false, true) => "Removing license headers from",
  };
  println!("{} {}...", verb, project.display());
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Prints the path of every candidate file as it is visited.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
  fn visiting(&mut self, path: &Path) {
    if !is_quiet() {
      println!("{}", path.display());
    }
  }
}

/// Print one group of changed files.
///
/// Shows up to `DEFAULT_FILE_LIST_LIMIT` files; in verbose mode, shows all.
fn print_file_group(title: &str, symbol: &str, files: &[&FileReport], project: &Path) {
  if files.is_empty() {
    return;
  }

  let count = files.len();
  println!(
    "{} {} {} {}:",
    symbol.if_supports_color(Stream::Stdout, |s| s.green()),
    title,
    count,
    if count == 1 { "file" } else { "files" }
  );

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, project));
  }

  if !show_all && count > limit {
    println!(
      "  {} more (use -v to see all)",
      format!("... and {}", count - limit).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the changed files, grouped by what happened to them.
///
/// In quiet mode only check-mode results are printed, as bare relative paths.
pub fn print_changed_files(summary: &RunSummary, project: &Path, check_only: bool) {
  let changed: Vec<&FileReport> = summary.changed_files().collect();

  if is_quiet() {
    if check_only {
      for file in &changed {
        println!("{}", make_relative_path(&file.path, project));
      }
    }
    return;
  }

  let group = |action: FileAction| -> Vec<&FileReport> {
    changed.iter().copied().filter(|report| report.action == action).collect()
  };

  let groups = [
    (FileAction::Inserted, symbols::INSERTED, "Header added to", "Header missing in"),
    (FileAction::Replaced, symbols::REPLACED, "Header replaced in", "Header outdated in"),
    (FileAction::Removed, symbols::REMOVED, "Header removed from", "Header to remove in"),
  ];

  let mut first = true;
  for (action, symbol, done_title, check_title) in groups {
    let files = group(action);
    if files.is_empty() {
      continue;
    }
    if !first {
      println!();
    }
    first = false;
    print_file_group(if check_only { check_title } else { done_title }, symbol, &files, project);
  }
}

/// Print the success message when nothing needed to change.
pub fn print_all_files_ok(remove: bool) {
  if is_quiet() {
    return;
  }

  let message = if remove {
    "No license headers to remove."
  } else {
    "All files have up-to-date license headers."
  };
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

/// Print the run summary.
///
/// Format: "Summary: N files, X inserted, Y replaced, Z removed, W unchanged"
pub fn print_summary(summary: &RunSummary) {
  if is_quiet() {
    return;
  }

  let counts = &summary.summary;
  println!(
    "Summary: {} {}, {} inserted, {} replaced, {} removed, {} unchanged",
    counts.visited,
    if counts.visited == 1 { "file" } else { "files" },
    counts.inserted.if_supports_color(Stream::Stdout, |s| s.cyan()),
    counts.replaced.if_supports_color(Stream::Stdout, |s| s.cyan()),
    counts.removed.if_supports_color(Stream::Stdout, |s| s.cyan()),
    counts.skipped.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to the project root for display.
pub fn make_relative_path(path: &Path, project: &Path) -> String {
  match pathdiff::diff_paths(path, project) {
    Some(relative) if !relative.as_os_str().is_empty() && !relative.starts_with("..") => {
      relative.to_string_lossy().to_string()
    }
    _ => path.to_string_lossy().to_string(),
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_make_relative_path_under_project() {
    let path = PathBuf::from("/workspace/project/src/main.go");
    let root = PathBuf::from("/workspace/project");
    assert_eq!(make_relative_path(&path, &root), "src/main.go");
  }

  #[test]
  fn test_make_relative_path_with_relative_project() {
    let path = PathBuf::from("./proj/a/b.go");
    assert_eq!(make_relative_path(&path, Path::new("./proj")), "a/b.go");
  }

  #[test]
  fn test_make_relative_path_outside_project() {
    let path = PathBuf::from("/elsewhere/main.go");
    let root = PathBuf::from("/workspace/project");
    assert_eq!(make_relative_path(&path, &root), "/elsewhere/main.go");
  }
}
