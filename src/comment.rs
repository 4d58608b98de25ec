//! # Comment Module
//!
//! Maps file extensions to the block-comment delimiters that wrap an injected
//! license header.
//!
//! Delimiters are chosen by extension only; file content is never sniffed.
//! The table is fixed and fails closed: an extension without an entry is a
//! configuration error for the whole run.
//!
//! ## Example
//!
//! ```rust
//! use licensor::comment::comment_delims;
//!
//! let delims = comment_delims("go").unwrap();
//! assert_eq!(delims.prefix, "/* ");
//! assert_eq!(delims.postfix, "*/");
//!
//! assert!(comment_delims("exe").is_err());
//! ```

use crate::error::{Error, Result};

/// Prefix/postfix pair wrapping a header block.
///
/// The prefix opens the comment and is immediately followed by the marker on
/// the same line. The postfix closes the comment on a line of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentDelims {
  /// Opens the comment (e.g. `"/* "`).
  pub prefix: &'static str,
  /// Closes the comment (e.g. `"*/"`).
  pub postfix: &'static str,
}

impl CommentDelims {
  const fn new(prefix: &'static str, postfix: &'static str) -> Self {
    Self { prefix, postfix }
  }
}

const C_STYLE: CommentDelims = CommentDelims::new("/* ", "*/");
const MARKUP: CommentDelims = CommentDelims::new("<!-- ", "-->");
const RUBY: CommentDelims = CommentDelims::new("=begin ", "=end");
const ML: CommentDelims = CommentDelims::new("(* ", "*)");
const HASKELL: CommentDelims = CommentDelims::new("{- ", "-}");

/// Every extension with a comment table entry, sorted.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
  "c", "cc", "cpp", "cs", "css", "go", "h", "hpp", "hs", "htm", "html", "java", "js", "jsx", "kt", "mjs", "ml", "mli",
  "php", "rb", "rs", "scala", "scss", "svg", "swift", "ts", "tsx", "vue", "xml",
];

fn lookup(extension: &str) -> Option<CommentDelims> {
  match extension {
    "go" | "c" | "h" | "cpp" | "cc" | "hpp" | "cs" | "java" | "js" | "jsx" | "mjs" | "ts" | "tsx" | "css" | "scss"
    | "rs" | "swift" | "kt" | "scala" | "php" => Some(C_STYLE),
    "html" | "htm" | "xml" | "vue" | "svg" => Some(MARKUP),
    // `=begin` and `=end` must start a line, which the header layout guarantees.
    "rb" => Some(RUBY),
    "ml" | "mli" => Some(ML),
    "hs" => Some(HASKELL),
    _ => None,
  }
}

/// Returns the comment delimiters for a lowercase extension without the
/// leading dot.
///
/// # Errors
///
/// Returns [`Error::UnsupportedExtension`] if the extension has no entry.
pub fn comment_delims(extension: &str) -> Result<CommentDelims> {
  lookup(extension).ok_or_else(|| Error::UnsupportedExtension(extension.to_string()))
}

/// Whether the extension has a comment table entry.
pub fn is_supported(extension: &str) -> bool {
  lookup(extension).is_some()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_c_family_uses_block_comments() {
    for ext in ["go", "c", "cpp", "js", "css"] {
      let delims = comment_delims(ext).expect("supported");
      assert_eq!(delims.prefix, "/* ", "prefix for {ext}");
      assert_eq!(delims.postfix, "*/", "postfix for {ext}");
    }
  }

  #[test]
  fn test_markup_uses_html_comments() {
    let delims = comment_delims("html").expect("supported");
    assert_eq!(delims, CommentDelims::new("<!-- ", "-->"));
  }

  #[test]
  fn test_ruby_uses_embedded_documents() {
    let delims = comment_delims("rb").expect("supported");
    assert_eq!(delims.prefix, "=begin ");
    assert_eq!(delims.postfix, "=end");
  }

  #[test]
  fn test_unsupported_extension_fails_closed() {
    let err = comment_delims("py").expect_err("python has no block comment entry");
    assert!(matches!(err, Error::UnsupportedExtension(ref ext) if ext == "py"));
    assert!(!is_supported("py"));
    assert!(!is_supported(""));
  }

  #[test]
  fn test_lookup_is_case_sensitive() {
    // Callers normalize to lowercase before lookup.
    assert!(!is_supported("GO"));
  }

  #[test]
  fn test_supported_list_matches_table() {
    for ext in SUPPORTED_EXTENSIONS {
      assert!(is_supported(ext), "{ext} listed but not mapped");
    }
    let mut sorted = SUPPORTED_EXTENSIONS.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, SUPPORTED_EXTENSIONS);
  }
}
