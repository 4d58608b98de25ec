//! # License Source Module
//!
//! Resolves the `--license` argument into license text: a local file first,
//! then an HTTP(S) URL if no such file exists.

use std::fs;
use std::io::Read as _;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::SourceError;

/// Timeout for fetching a remote license.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the license text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseSource {
  File(std::path::PathBuf),
  Url(String),
}

impl LicenseSource {
  /// Classifies `location` as a local file or a URL.
  ///
  /// # Errors
  ///
  /// Returns [`SourceError::Unresolvable`] if there is no file at that path
  /// and it is not an http(s) URL.
  pub fn parse(location: &str) -> Result<Self, SourceError> {
    let path = Path::new(location);
    if path.is_file() {
      return Ok(Self::File(path.to_path_buf()));
    }

    if is_http_url(location) {
      return Ok(Self::Url(location.to_string()));
    }

    Err(SourceError::Unresolvable(location.to_string()))
  }

  /// Reads or downloads the license text.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, the request fails or
  /// returns a non-success status, or the text is not UTF-8.
  pub fn fetch(&self) -> Result<String, SourceError> {
    match self {
      Self::File(path) => {
        debug!("Reading license from {}", path.display());
        let bytes = fs::read(path).map_err(|source| SourceError::Read {
          path: path.clone(),
          source,
        })?;
        String::from_utf8(bytes).map_err(|_utf8| SourceError::NotUtf8(path.display().to_string()))
      }
      Self::Url(url) => {
        debug!("Fetching license from {}", url);
        let agent = ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build();
        let response = agent.get(url).call().map_err(|e| SourceError::Fetch {
          url: url.clone(),
          reason: e.to_string(),
        })?;

        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes).map_err(|e| SourceError::Fetch {
          url: url.clone(),
          reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|_utf8| SourceError::NotUtf8(url.clone()))
      }
    }
  }
}

/// Resolves and fetches the license text in one step.
///
/// # Errors
///
/// See [`LicenseSource::parse`] and [`LicenseSource::fetch`].
pub fn load_license(location: &str) -> Result<String, SourceError> {
  LicenseSource::parse(location)?.fetch()
}

fn is_http_url(location: &str) -> bool {
  let lower = location.to_ascii_lowercase();
  lower.starts_with("http://") || lower.starts_with("https://")
}
