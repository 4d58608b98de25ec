//! # Diff Module
//!
//! Renders line diffs between a file's current bytes and the bytes licensor
//! would write, so `--show-diff` can show every change before (or instead of,
//! with `--check`) writing it.

use std::io::Write as _;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Builds and prints diffs for changed files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffManager {
  /// Whether diffs are printed to stderr.
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Renders the diff as text, one `+`, `-` or ` ` prefixed line per change.
  ///
  /// Content that is not valid UTF-8 is converted lossily for display only.
  pub fn render(path: &Path, original: &[u8], new: &[u8]) -> String {
    let original = String::from_utf8_lossy(original);
    let new = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(original.as_ref(), new.as_ref());

    let mut rendered = format!("Diff for {}:\n", path.display());
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      rendered.push_str(sign);
      rendered.push_str(change.value());
      if change.missing_newline() {
        rendered.push('\n');
      }
    }
    rendered
  }

  /// Prints the diff to stderr when enabled. Added lines are green and
  /// removed lines red if stderr supports color.
  pub fn display_diff(&self, path: &Path, original: &[u8], new: &[u8]) {
    if !self.show_diff {
      return;
    }

    let rendered = Self::render(path, original, new);
    let mut stderr = std::io::stderr().lock();
    for line in rendered.lines() {
      let result = if line.starts_with('+') {
        writeln!(stderr, "{}", line.if_supports_color(Stream::Stderr, |l| l.green()))
      } else if line.starts_with('-') {
        writeln!(stderr, "{}", line.if_supports_color(Stream::Stderr, |l| l.red()))
      } else {
        writeln!(stderr, "{line}")
      };
      if result.is_err() {
        return;
      }
    }
    let _ = writeln!(stderr);
  }
}
