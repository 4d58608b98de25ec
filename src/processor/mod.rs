//! # Processor Module
//!
//! Walks a project tree and reconciles the license header of every file with
//! a configured extension.
//!
//! The module is organized into submodules:
//! - [`file_io`] - Whole-file reads and truncate-and-rewrite writes
//! - [`file_collector`] - Lazy depth-first traversal with ignore rules
//!
//! The [`Processor`] owns the validated [`RunConfig`] and one rendered
//! [`HeaderTemplate`] per extension. Files are handled one at a time, in
//! traversal order, and the first error stops the run.

mod file_collector;
mod file_io;

use std::collections::BTreeMap;
use std::path::Path;

pub use file_collector::FileCollector;
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::comment::comment_delims;
use crate::config::RunConfig;
use crate::diff::DiffManager;
use crate::error::{ConfigError, Error, Result};
use crate::ignore::IgnoreManager;
use crate::reconcile::{HeaderTemplate, plan};
use crate::report::{FileAction, FileReport, RunSummary};
use crate::template::render;

/// Receives per-file events while a run is in progress.
///
/// Both methods default to doing nothing.
pub trait Progress {
  /// Called before a candidate file is read.
  fn visiting(&mut self, _path: &Path) {}

  /// Called after a file has been handled (and written, unless checking).
  fn finished(&mut self, _report: &FileReport) {}
}

/// A [`Progress`] that ignores every event.
pub struct NoProgress;

impl Progress for NoProgress {}

/// Processor for reconciling license headers across a project.
pub struct Processor {
  config: RunConfig,

  /// Rendered header per configured extension.
  headers: BTreeMap<String, HeaderTemplate>,

  ignore_manager: IgnoreManager,

  diff_manager: DiffManager,
}

impl Processor {
  /// Renders the license once and prepares a header for every configured
  /// extension.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  /// - a placeholder in the license has no template value
  /// - an extension has no comment delimiters
  /// - the rendered license contains the comment postfix of any configured
  ///   extension
  /// - an ignore pattern is not a valid glob
  pub fn new(config: RunConfig) -> Result<Self> {
    let rendered = render(config.license(), config.template_vars())?;
    debug!("Rendered license: {} bytes", rendered.len());

    let mut headers = BTreeMap::new();
    for extension in config.extensions() {
      let delims = comment_delims(extension)?;
      let header = HeaderTemplate::new(delims, &rendered);
      if header.body_contains_postfix() {
        return Err(
          ConfigError::LicenseContainsPostfix {
            extension: extension.clone(),
            postfix: delims.postfix,
          }
          .into(),
        );
      }
      headers.insert(extension.clone(), header);
    }

    let ignore_manager = IgnoreManager::new(config.ignore_patterns())?;

    Ok(Self {
      config,
      headers,
      ignore_manager,
      diff_manager: DiffManager::default(),
    })
  }

  /// Replaces the diff manager used for `--show-diff`.
  #[must_use]
  pub fn with_diff_manager(mut self, diff_manager: DiffManager) -> Self {
    self.diff_manager = diff_manager;
    self
  }

  pub const fn config(&self) -> &RunConfig {
    &self.config
  }

  /// The header for a lowercase extension, if it is configured.
  pub fn header_for(&self, extension: &str) -> Option<&HeaderTemplate> {
    self.headers.get(extension)
  }

  /// Runs without progress reporting.
  ///
  /// # Errors
  ///
  /// See [`Processor::run_with`].
  pub fn run(&self) -> Result<RunSummary> {
    self.run_with(&mut NoProgress)
  }

  /// Walks the project and reconciles every candidate file.
  ///
  /// # Errors
  ///
  /// Returns the first I/O failure or malformed header. Files handled before
  /// the failure keep their new content.
  pub fn run_with(&self, progress: &mut dyn Progress) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let root = self.config.project_path();
    debug!("Walking {}", root.display());

    for entry in FileCollector::new(root, &self.ignore_manager) {
      let path = entry?;

      let Some(header) = file_extension(&path).and_then(|ext| self.header_for(&ext)) else {
        trace!("Skipping: {} (extension not configured)", path.display());
        continue;
      };

      progress.visiting(&path);
      let report = self.process_file(&path, header)?;
      progress.finished(&report);
      summary.record(report);
    }

    debug!(
      "Visited {} files, {} changed",
      summary.summary.visited,
      summary.files_changed()
    );
    Ok(summary)
  }

  /// Reconciles a single file against `header`.
  ///
  /// # Errors
  ///
  /// Returns [`Error::MalformedHeader`] if the marker is present without a
  /// closing postfix, or [`Error::Io`] if the file cannot be read or written.
  pub fn process_file(&self, path: &Path, header: &HeaderTemplate) -> Result<FileReport> {
    let content = FileIO::read_full_content(path)?;

    let action = plan(&content, header, self.config.remove()).map_err(|source| Error::MalformedHeader {
      path: path.to_path_buf(),
      source,
    })?;
    let file_action = FileAction::from(&action);
    trace!("{}: {}", path.display(), file_action.label());

    if let Some(new_content) = action.apply(&content, header) {
      self.diff_manager.display_diff(path, &content, &new_content);
      if self.config.check_only() {
        debug!("Would write {} (check mode)", path.display());
      } else {
        FileIO::write_file(path, &new_content)?;
      }
    }

    Ok(FileReport::new(path, file_action))
  }
}

/// Lowercase extension of `path` without the dot.
fn file_extension(path: &Path) -> Option<String> {
  path.extension().map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}
