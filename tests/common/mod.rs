#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use assert_cmd::Command;
use tempfile::TempDir;

pub const MARKER: &str = "License generated by licensor(https://github.com/Marvin9/licensor).";

/// A scratch project: a temp dir holding a `proj/` tree and a license file
/// next to it, so the license is never walked.
pub struct TestProject {
  temp_dir: TempDir,
}

impl TestProject {
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("create temp dir");
    fs::create_dir_all(temp_dir.path().join("proj")).expect("create project dir");
    Self { temp_dir }
  }

  /// The directory passed as `--project`.
  pub fn root(&self) -> PathBuf {
    self.temp_dir.path().join("proj")
  }

  /// The directory containing `proj/` and the license file.
  pub fn outer(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Writes a file under the project, creating parent directories.
  pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = self.root().join(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, content).expect("write file");
    path
  }

  pub fn read(&self, relative: &str) -> String {
    fs::read_to_string(self.root().join(relative)).expect("read file")
  }

  pub fn read_bytes(&self, relative: &str) -> Vec<u8> {
    fs::read(self.root().join(relative)).expect("read file")
  }

  /// Sets the modification time of a project file.
  pub fn set_modified(&self, relative: &str, time: SystemTime) {
    let file = fs::File::options()
      .write(true)
      .open(self.root().join(relative))
      .expect("open file");
    file.set_modified(time).expect("set mtime");
  }

  pub fn modified(&self, relative: &str) -> SystemTime {
    fs::metadata(self.root().join(relative))
      .and_then(|meta| meta.modified())
      .expect("read mtime")
  }

  /// Writes the license text outside the project and returns its path.
  pub fn license(&self, text: &str) -> PathBuf {
    let path = self.temp_dir.path().join("LICENSE.tmpl");
    fs::write(&path, text).expect("write license");
    path
  }
}

/// The exact header licensor writes for a C-style file.
pub fn c_header(body: &str) -> String {
  let indented: String = body.split('\n').map(|line| format!("\n {line}")).collect();
  format!("/* {MARKER}\n{indented}\n*/")
}

/// The licensor binary, with config discovery and color disabled.
pub fn licensor() -> Command {
  let mut cmd = Command::cargo_bin("licensor").expect("binary exists");
  cmd.env_remove("LICENSOR_CONFIG").env_remove("LICENSOR_LOG").arg("--colors=never");
  cmd
}
