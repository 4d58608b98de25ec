//! # Error Module
//!
//! Error types for every stage of a licensor run. Each concern has its own
//! enum, and [`Error`] aggregates them for the processor and the CLI.
//!
//! Every error is fatal: the run stops at the first one and nothing is
//! retried or collected.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the run configuration. These are detected before any file
/// is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The project path does not exist.
  #[error("project path '{0}' does not exist")]
  ProjectNotFound(PathBuf),

  /// The project path exists but is not a directory.
  #[error("{0} is not a directory")]
  NotADirectory(PathBuf),

  /// No extensions were given on the command line or in the config file.
  #[error("you must provide at least one extension to --ext")]
  NoExtensions,

  /// A required flag was not given.
  #[error("missing required argument: {0}")]
  MissingArgument(&'static str),

  /// The `--template` value is not a JSON object of strings.
  #[error("invalid template JSON: {0}")]
  InvalidTemplate(#[source] serde_json::Error),

  /// An ignore pattern is not a valid glob.
  #[error("invalid ignore pattern '{pattern}': {source}")]
  InvalidIgnorePattern {
    pattern: String,
    #[source]
    source: globset::Error,
  },

  /// The rendered license body contains a comment terminator, which would
  /// truncate the header span on the next run.
  #[error("license text contains '{postfix}', which terminates comments in .{extension} files")]
  LicenseContainsPostfix { extension: String, postfix: &'static str },

  /// The config file could not be read.
  #[error("failed to read config file '{path}': {source}")]
  ReadError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The config file contains invalid TOML.
  #[error("failed to parse config file '{path}': {source}")]
  ParseError {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

/// Failures while acquiring the license text.
#[derive(Debug, Error)]
pub enum SourceError {
  /// Neither a local file nor an http(s) URL.
  #[error("{0} is neither a valid path nor a valid url")]
  Unresolvable(String),

  #[error("failed to read license file '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to fetch license from {url}: {reason}")]
  Fetch { url: String, reason: String },

  #[error("license text from {0} is not valid UTF-8")]
  NotUtf8(String),
}

/// Failures while rendering the license template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
  /// A `{{name}}` placeholder has no value.
  #[error("{0} is not defined in template")]
  UndefinedVariable(String),
}

/// Failures while locating an existing header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
  /// The marker is present but the comment is never closed.
  #[error("license marker at byte {start} has no closing '{postfix}'")]
  Malformed { start: usize, postfix: &'static str },
}

/// Top-level error for a licensor run.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// An extension with no entry in the comment table.
  #[error("unsupported extension '{0}'")]
  UnsupportedExtension(String),

  #[error(transparent)]
  LicenseSource(#[from] SourceError),

  #[error(transparent)]
  Template(#[from] TemplateError),

  /// An existing header could not be delimited; the file is left untouched.
  #[error("malformed license header in {path}: {source}")]
  MalformedHeader {
    path: PathBuf,
    #[source]
    source: HeaderError,
  },

  /// Any read, write or stat failure.
  #[error("I/O error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Report serialization failure.
  #[error("report JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Convenience constructor for [`Error::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> Error {
  Error::Io {
    path: path.into(),
    source,
  }
}
