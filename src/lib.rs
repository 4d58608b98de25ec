//! # licensor
//!
//! Injects, updates and removes license headers across a project tree.
//!
//! Every header licensor writes starts with a fixed marker line, so later runs
//! can find it again: an unchanged header is left alone, an outdated one is
//! replaced in place and `--remove` strips it cleanly. Files without the
//! marker get a fresh header at the top (after a shebang, XML declaration or
//! similar first line).
//!
//! ## Features
//!
//! * Block-comment headers chosen by file extension
//! * `{{name}}` placeholders in the license text, filled from a JSON object
//! * License text from a local file or an http(s) URL
//! * Ignore patterns, plus built-in skipping of VCS and `node_modules`
//!   directories
//! * Check mode, diffs and JSON reports for CI
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use licensor::config::RunConfig;
//! use licensor::processor::Processor;
//!
//! fn main() -> licensor::error::Result<()> {
//!     let config = RunConfig::builder()
//!         .project_path("./my-project")
//!         .extensions(["go", "js"])
//!         .license("Copyright 2024 ACME")
//!         .build()?;
//!
//!     let summary = Processor::new(config)?.run()?;
//!     println!("{} files changed", summary.files_changed());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Directory walk and per-file orchestration
//! * [`reconcile`] - Header detection and the insert/replace/remove decision
//! * [`template`] - Placeholder rendering and indentation
//! * [`comment`] - Comment delimiters per extension
//! * [`config`] - Validated run configuration and `licensor.toml`
//! * [`logging`] - Logging utilities for verbose output

pub mod comment;
pub mod config;
pub mod diff;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod output;
pub mod processor;
pub mod reconcile;
pub mod report;
pub mod source;
pub mod template;
