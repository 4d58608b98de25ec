//! # File I/O Module
//!
//! Whole-file reads and writes for the processor.

use std::fs;
use std::path::Path;

use crate::error::{Result, io_err};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the complete file as raw bytes. Content need not be UTF-8.
  pub fn read_full_content(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| io_err(path, e))
  }

  /// Truncates the file and writes `content` in its place.
  ///
  /// This is not atomic: an interrupted write can leave the file truncated.
  pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).map_err(|e| io_err(path, e))
  }
}
