//! # Run Command
//!
//! Wires the parsed arguments into a [`RunConfig`], runs the [`Processor`]
//! and prints the results.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use licensor::config::{RunConfig, load_config, parse_template_json};
use licensor::diff::DiffManager;
use licensor::error::ConfigError;
use licensor::logging::{init_tracing, set_quiet, set_verbose};
use licensor::output::{
  ConsoleProgress, RunMode, print_all_files_ok, print_blank_line, print_changed_files, print_hint,
  print_start_message, print_summary,
};
use licensor::processor::Processor;
use licensor::source::load_license;
use licensor::template::placeholders;
use licensor::{info_log, verbose_log};
use tracing::{debug, warn};

use super::Cli;

/// Run licensor with the given arguments.
///
/// Returns a failing exit code (without an error) when `--check` finds files
/// that would change.
pub fn run(args: Cli) -> Result<ExitCode> {
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let file_config = load_config(args.config.as_deref(), args.project.as_deref(), args.no_config)?;

  let mut builder = RunConfig::builder();
  if let Some(ref file_config) = file_config {
    debug!("Applying config file defaults");
    builder = builder.file_defaults(file_config);
  }
  if let Some(project) = args.project {
    builder = builder.project_path(project);
  }

  let license_location = args
    .license
    .or_else(|| file_config.as_ref().and_then(|c| c.license.clone()))
    .ok_or(ConfigError::MissingArgument("--license"))?;
  let license_text =
    load_license(&license_location).with_context(|| format!("Failed to load license from {license_location}"))?;
  verbose_log!("Loaded license from {} ({} bytes)", license_location, license_text.len());

  let template_vars = match args.template {
    Some(ref json) => parse_template_json(json)?,
    None => Default::default(),
  };
  let used = placeholders(&license_text);
  for key in template_vars.keys().filter(|key| !used.contains(&key.as_str())) {
    warn!("Template key '{}' is not used by the license", key);
  }

  let config = builder
    .extensions(args.ext)
    .license(license_text)
    .ignore_patterns(args.ignore)
    .template_vars(template_vars)
    .remove(args.remove)
    .check_only(args.check)
    .build()?;

  let mode = RunMode {
    remove: config.remove(),
    check_only: config.check_only(),
  };
  let project = config.project_path().to_path_buf();

  let processor = Processor::new(config)?.with_diff_manager(DiffManager::new(args.show_diff));

  print_start_message(&project, mode);
  let start_time = Instant::now();
  let summary = processor.run_with(&mut ConsoleProgress)?;
  debug!("Run finished in {:.2}s", start_time.elapsed().as_secs_f64());

  print_blank_line();
  if summary.files_changed() == 0 {
    print_all_files_ok(mode.remove);
  } else {
    print_changed_files(&summary, &project, mode.check_only);
  }
  print_blank_line();
  print_summary(&summary);

  if let Some(ref output_path) = args.report_json {
    summary
      .write_json(output_path)
      .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  if mode.check_only && summary.files_changed() > 0 {
    print_blank_line();
    print_hint(if mode.remove {
      "Run without --check to remove these headers."
    } else {
      "Run without --check to update these headers."
    });
    return Ok(ExitCode::FAILURE);
  }

  Ok(ExitCode::SUCCESS)
}
