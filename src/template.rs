//! # Template Module
//!
//! Renders raw license text into the body of a header comment.
//!
//! Rendering happens once per run, before the walk begins:
//! 1. [`render`] substitutes `{{name}}` placeholders from the template
//!    variables.
//! 2. [`indent`] prefixes every line with a line break and a single space so
//!    the text sits inside the comment block.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use licensor::template::render;
//!
//! let vars = HashMap::from([("name".to_string(), "Ada".to_string())]);
//! assert_eq!(render("{{name}} says hi", &vars).unwrap(), "Ada says hi");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::TemplateError;

/// Placeholder names are ASCII letters only; `{{first_name}}` or `{{v2}}` are
/// left as literal text.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{\{([A-Za-z]+)\}\}").expect("placeholder regex must compile"));

/// Substitutes every `{{name}}` placeholder in `license` with its value.
///
/// Matches are non-overlapping and replaced left to right. Each occurrence is
/// looked up on its own, and substituted values are never rescanned.
///
/// # Errors
///
/// Returns [`TemplateError::UndefinedVariable`] naming the first placeholder
/// without an entry in `vars`.
pub fn render(license: &str, vars: &HashMap<String, String>) -> Result<String, TemplateError> {
  let mut undefined = None;

  let rendered = PLACEHOLDER_REGEX.replace_all(license, |caps: &Captures| {
    let name = &caps[1];
    match vars.get(name) {
      Some(value) => value.clone(),
      None => {
        undefined.get_or_insert_with(|| name.to_string());
        String::new()
      }
    }
  });

  if let Some(name) = undefined {
    return Err(TemplateError::UndefinedVariable(name));
  }

  Ok(rendered.into_owned())
}

/// Indents rendered text for embedding inside a comment block.
///
/// Every line, including empty leading and trailing ones, is emitted as a
/// line break followed by one space and the line itself.
pub fn indent(text: &str) -> String {
  let mut indented = String::with_capacity(text.len() + text.len() / 16 + 2);
  for line in text.split('\n') {
    indented.push_str("\n ");
    indented.push_str(line);
  }
  indented
}

/// Lists the distinct placeholder names in `license`, in order of first
/// appearance.
pub fn placeholders(license: &str) -> Vec<&str> {
  let mut names: Vec<&str> = Vec::new();
  for caps in PLACEHOLDER_REGEX.captures_iter(license) {
    if let Some(name) = caps.get(1).map(|m| m.as_str())
      && !names.contains(&name)
    {
      names.push(name);
    }
  }
  names
}
