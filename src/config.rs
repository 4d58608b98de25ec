//! # Configuration Module
//!
//! Builds the immutable [`RunConfig`] that drives a run, and loads the
//! optional `licensor.toml` file that supplies defaults for it.
//!
//! The config file is discovered in this order:
//! 1. Path given with `--config`
//! 2. Path in the `LICENSOR_CONFIG` environment variable
//! 3. `licensor.toml` in the project directory
//!
//! Values given on the command line take precedence over the file.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::comment::is_supported;
use crate::error::{ConfigError, Error, Result};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = "licensor.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSOR_CONFIG";

/// Everything a run needs, validated and frozen.
///
/// Build one with [`RunConfig::builder`]. The processor owns it for the
/// duration of the run.
#[derive(Debug, Clone)]
pub struct RunConfig {
  project_path: PathBuf,
  extensions: BTreeSet<String>,
  license: String,
  ignore_patterns: Vec<String>,
  template_vars: HashMap<String, String>,
  remove: bool,
  check_only: bool,
}

impl RunConfig {
  /// Starts an empty builder.
  pub fn builder() -> RunConfigBuilder {
    RunConfigBuilder::default()
  }

  /// Root directory of the walk.
  pub fn project_path(&self) -> &Path {
    &self.project_path
  }

  /// Lowercase extensions without the leading dot.
  pub const fn extensions(&self) -> &BTreeSet<String> {
    &self.extensions
  }

  /// Raw license text, before template rendering.
  pub fn license(&self) -> &str {
    &self.license
  }

  /// Glob patterns for paths to skip.
  pub fn ignore_patterns(&self) -> &[String] {
    &self.ignore_patterns
  }

  /// Values for `{{name}}` placeholders.
  pub const fn template_vars(&self) -> &HashMap<String, String> {
    &self.template_vars
  }

  /// Strip headers instead of inserting or updating them.
  pub const fn remove(&self) -> bool {
    self.remove
  }

  /// Compute actions without writing any file.
  pub const fn check_only(&self) -> bool {
    self.check_only
  }
}

/// Builder for [`RunConfig`].
#[derive(Debug, Default, Clone)]
pub struct RunConfigBuilder {
  project_path: Option<PathBuf>,
  extensions: Vec<String>,
  license: Option<String>,
  ignore_patterns: Vec<String>,
  template_vars: HashMap<String, String>,
  remove: bool,
  check_only: bool,
}

impl RunConfigBuilder {
  /// Seeds the builder with the values from a config file.
  #[must_use]
  pub fn file_defaults(mut self, file: &FileConfig) -> Self {
    if let Some(project) = &file.project {
      self.project_path = Some(project.clone());
    }
    if !file.extensions.is_empty() {
      self.extensions = file.extensions.clone();
    }
    self.ignore_patterns.extend(file.ignore.iter().cloned());
    self
      .template_vars
      .extend(file.template.iter().map(|(k, v)| (k.clone(), v.clone())));
    self
  }

  #[must_use]
  pub fn project_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.project_path = Some(path.into());
    self
  }

  /// Replaces the extension list. An empty list keeps the current one.
  #[must_use]
  pub fn extensions<I, S>(mut self, extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
    if !extensions.is_empty() {
      self.extensions = extensions;
    }
    self
  }

  #[must_use]
  pub fn license(mut self, text: impl Into<String>) -> Self {
    self.license = Some(text.into());
    self
  }

  /// Adds ignore patterns.
  #[must_use]
  pub fn ignore_patterns<I, S>(mut self, patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.ignore_patterns.extend(patterns.into_iter().map(Into::into));
    self
  }

  /// Adds template variables, overriding existing keys.
  #[must_use]
  pub fn template_vars(mut self, vars: HashMap<String, String>) -> Self {
    self.template_vars.extend(vars);
    self
  }

  #[must_use]
  pub fn remove(mut self, remove: bool) -> Self {
    self.remove = remove;
    self
  }

  #[must_use]
  pub fn check_only(mut self, check_only: bool) -> Self {
    self.check_only = check_only;
    self
  }

  /// Validates and freezes the configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  /// - the project path or license is missing
  /// - no extensions were given
  /// - the project path does not exist or is not a directory
  /// - an extension has no comment style
  pub fn build(self) -> Result<RunConfig> {
    let project_path = self.project_path.ok_or(ConfigError::MissingArgument("--project"))?;
    let license = self.license.ok_or(ConfigError::MissingArgument("--license"))?;

    let extensions: BTreeSet<String> = self
      .extensions
      .iter()
      .map(|ext| normalize_extension(ext))
      .filter(|ext| !ext.is_empty())
      .collect();
    if extensions.is_empty() {
      return Err(ConfigError::NoExtensions.into());
    }

    let metadata = std::fs::metadata(&project_path).map_err(|_missing| ConfigError::ProjectNotFound(project_path.clone()))?;
    if !metadata.is_dir() {
      return Err(ConfigError::NotADirectory(project_path).into());
    }

    if let Some(unsupported) = extensions.iter().find(|ext| !is_supported(ext)) {
      return Err(Error::UnsupportedExtension(unsupported.clone()));
    }

    Ok(RunConfig {
      project_path,
      extensions,
      license,
      ignore_patterns: self.ignore_patterns,
      template_vars: self.template_vars,
      remove: self.remove,
      check_only: self.check_only,
    })
  }
}

/// Lowercases an extension and strips surrounding whitespace and a leading
/// dot.
pub fn normalize_extension(extension: &str) -> String {
  let trimmed = extension.trim();
  trimmed.strip_prefix('.').unwrap_or(trimmed).to_lowercase()
}

/// Parses the `--template` JSON object.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTemplate`] if the input is not a JSON object
/// whose values are all strings.
pub fn parse_template_json(json: &str) -> Result<HashMap<String, String>, ConfigError> {
  serde_json::from_str(json).map_err(ConfigError::InvalidTemplate)
}

/// Contents of a `licensor.toml` file.
///
/// ```toml
/// extensions = ["go", "js"]
/// license = "LICENSE.tmpl"
/// ignore = ["vendor", "**/*_test.go"]
///
/// [template]
/// owner = "Ada Lovelace"
/// year = "2024"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
  /// Project directory, relative to the config file.
  #[serde(default)]
  pub project: Option<PathBuf>,

  /// Extensions to process.
  #[serde(default, alias = "ext")]
  pub extensions: Vec<String>,

  /// License path (relative to the config file) or URL.
  #[serde(default)]
  pub license: Option<String>,

  /// Ignore patterns. Patterns given on the command line are added to these.
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Template variables; command-line values win on conflict.
  #[serde(default)]
  pub template: HashMap<String, String>,
}

impl FileConfig {
  /// Load configuration from a file.
  ///
  /// Relative `project` and `license` paths are resolved against the
  /// directory containing the file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or is not valid TOML for
  /// this schema.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_relative_to(base_dir))
  }

  fn resolve_relative_to(self, base_dir: &Path) -> Self {
    let project = self
      .project
      .map(|p| if p.is_absolute() { p } else { base_dir.join(p) });

    let license = self.license.map(|location| {
      let lower = location.to_ascii_lowercase();
      if lower.starts_with("http://") || lower.starts_with("https://") || Path::new(&location).is_absolute() {
        location
      } else {
        base_dir.join(&location).to_string_lossy().into_owned()
      }
    });

    Self {
      project,
      license,
      ..self
    }
  }
}

/// Discover the configuration file path.
///
/// An explicit path is returned as is, so a missing file surfaces as a read
/// error. The environment variable and the project default are only used
/// when the file exists.
pub fn discover_config_path(explicit_path: Option<&Path>, project_dir: Option<&Path>) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.is_file() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  if let Some(dir) = project_dir {
    let project_config = dir.join(DEFAULT_CONFIG_FILENAME);
    if project_config.is_file() {
      verbose_log!("Using project config: {}", project_config.display());
      return Some(project_config);
    }
  }

  verbose_log!("No config file found");
  None
}

/// Load the config file if one is found.
///
/// # Errors
///
/// Returns an error if a discovered file cannot be read or parsed.
pub fn load_config(
  explicit_path: Option<&Path>,
  project_dir: Option<&Path>,
  no_config: bool,
) -> Result<Option<FileConfig>, ConfigError> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  discover_config_path(explicit_path, project_dir)
    .map(|path| FileConfig::load(&path))
    .transpose()
}
