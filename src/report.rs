//! # Report Module
//!
//! Per-file outcomes of a run and their aggregate counts, with a JSON
//! rendering for `--report-json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, io_err};
use crate::reconcile::{Action, SkipReason};

/// What happened to a single visited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
  /// A header was added.
  Inserted,
  /// An outdated header was rewritten.
  Replaced,
  /// A header was stripped.
  Removed,
  /// The header already matched the current license.
  UpToDate,
  /// Removal was requested but the file had no header.
  NoHeader,
}

impl FileAction {
  /// Whether this outcome changes (or in check mode, would change) the file.
  pub const fn is_change(self) -> bool {
    matches!(self, Self::Inserted | Self::Replaced | Self::Removed)
  }

  /// Short label used in console output.
  pub const fn label(self) -> &'static str {
    match self {
      Self::Inserted => "inserted",
      Self::Replaced => "replaced",
      Self::Removed => "removed",
      Self::UpToDate => "up to date",
      Self::NoHeader => "no header",
    }
  }
}

impl From<&Action> for FileAction {
  fn from(action: &Action) -> Self {
    match action {
      Action::Insert { .. } => Self::Inserted,
      Action::Replace { .. } => Self::Replaced,
      Action::Remove { .. } => Self::Removed,
      Action::Skip(SkipReason::UpToDate) => Self::UpToDate,
      Action::Skip(SkipReason::NothingToRemove) => Self::NoHeader,
    }
  }
}

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  pub action: FileAction,
}

impl FileReport {
  pub fn new(path: impl Into<PathBuf>, action: FileAction) -> Self {
    Self {
      path: path.into(),
      action,
    }
  }
}

mod path_serialization {
  use std::path::{Path, PathBuf};

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounts {
  /// Candidate files visited (after ignore and extension filtering).
  pub visited: usize,
  pub inserted: usize,
  pub replaced: usize,
  pub removed: usize,
  /// Files left as they were.
  pub skipped: usize,
}

/// Everything a run did, in visit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
  pub summary: SummaryCounts,
  pub files: Vec<FileReport>,
}

impl RunSummary {
  /// Records the outcome for one file.
  pub fn record(&mut self, report: FileReport) {
    let counts = &mut self.summary;
    counts.visited += 1;
    match report.action {
      FileAction::Inserted => counts.inserted += 1,
      FileAction::Replaced => counts.replaced += 1,
      FileAction::Removed => counts.removed += 1,
      FileAction::UpToDate | FileAction::NoHeader => counts.skipped += 1,
    }
    self.files.push(report);
  }

  /// Number of files changed, or that would change in check mode.
  pub const fn files_changed(&self) -> usize {
    self.summary.inserted + self.summary.replaced + self.summary.removed
  }

  /// Reports for changed files only.
  pub fn changed_files(&self) -> impl Iterator<Item = &FileReport> {
    self.files.iter().filter(|report| report.action.is_change())
  }

  /// Renders the summary as pretty-printed JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Writes the JSON report to `path`, replacing any existing file.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization or the write fails.
  pub fn write_json(&self, path: &Path) -> Result<()> {
    let json = self.to_json()?;
    fs::write(path, json).map_err(|e| io_err(path, e))
  }
}
