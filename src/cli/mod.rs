//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing. The historical single-dash spellings
//! (`-project`, `-ext`, ...) are rewritten to their `--` forms before clap
//! sees them.

mod run;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{ArgAction, Parser};
use licensor::logging::ColorMode;
pub use run::run;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

/// Flags that historically took a single dash.
const LEGACY_FLAGS: &[&str] = &["project", "ext", "license", "ignore", "template", "remove"];

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "licensor",
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add or update headers in every Go and JavaScript file
  licensor --project . --ext go js --license LICENSE.tmpl --template '{\"year\":\"2024\",\"owner\":\"ACME\"}'

  # Fetch the license text over HTTP and skip generated code
  licensor --project . --ext go --license https://example.com/LICENSE --ignore vendor '*.pb.go'

  # Strip previously generated headers
  licensor --project . --ext go --license LICENSE.tmpl --remove

  # Verify headers in CI without writing (exit code 1 if anything would change)
  licensor --project . --ext go --license LICENSE.tmpl --check --show-diff
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// Project directory to walk
  #[arg(long, value_name = "PATH")]
  pub project: Option<PathBuf>,

  /// File extensions to process, without the dot and matched case-insensitively (e.g. --ext go js html)
  #[arg(long, value_name = "EXT", num_args = 1.., action = ArgAction::Append)]
  pub ext: Vec<String>,

  /// License text: a local file path, or an http(s) URL
  #[arg(long, value_name = "PATH|URL")]
  pub license: Option<String>,

  /// Paths or glob patterns to skip (matched anywhere in the tree)
  #[arg(long, value_name = "PATTERN", num_args = 1.., action = ArgAction::Append)]
  pub ignore: Vec<String>,

  /// JSON object of values for {{name}} placeholders in the license
  #[arg(long, value_name = "JSON")]
  pub template: Option<String>,

  /// Remove previously generated headers instead of adding them
  #[arg(long)]
  pub remove: bool,

  /// Report what would change without writing; exit 1 if anything would
  #[arg(long)]
  pub check: bool,

  /// Print a diff of every change to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Path to config file (default: licensor.toml in the project directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Write a JSON report of every visited file to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl Cli {
  /// Parse CLI arguments from the process, accepting legacy flag spellings.
  ///
  /// Help and version requests exit 0. Usage errors are printed and exit 1.
  pub fn parse_args() -> Self {
    match Self::try_parse_from(normalize_legacy_args(std::env::args_os())) {
      Ok(cli) => cli,
      Err(e) if e.use_stderr() => {
        let _ = e.print();
        std::process::exit(1);
      }
      Err(e) => e.exit(),
    }
  }
}

/// Rewrites `-project`, `-ext`, `-license`, `-ignore`, `-template` and
/// `-remove` (and their `-flag=value` forms) to the double-dash spelling.
/// The first item (the program name) is passed through.
pub fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
  I: IntoIterator<Item = OsString>,
{
  args
    .into_iter()
    .enumerate()
    .map(|(index, arg)| {
      if index == 0 {
        return arg;
      }
      match arg.to_str() {
        Some(token) if is_legacy_flag(token) => OsString::from(format!("-{token}")),
        _ => arg,
      }
    })
    .collect()
}

fn is_legacy_flag(token: &str) -> bool {
  let Some(rest) = token.strip_prefix('-') else {
    return false;
  };
  if rest.starts_with('-') {
    return false;
  }
  let name = rest.split_once('=').map_or(rest, |(name, _)| name);
  LEGACY_FLAGS.contains(&name)
}
