//! # licensor
//!
//! Inserts, updates or removes generated license headers across a project.

mod cli;

use std::process::ExitCode;

use crate::cli::{Cli, run};

fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run(cli) {
    Ok(code) => code,
    Err(e) => {
      eprintln!("ERROR: {e:#}");
      ExitCode::FAILURE
    }
  }
}
