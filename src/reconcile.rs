//! # Reconcile Module
//!
//! Decides what to do with one file's header and computes the new file bytes.
//!
//! Both halves are pure so they can be tested without touching the
//! filesystem:
//! - [`plan`] inspects the current bytes and returns an [`Action`]
//! - [`Action::apply`] turns the bytes and the action into new bytes
//!
//! An existing header is found by its signature (the comment prefix followed
//! by [`MARKER`]). Its span runs from the signature start to the end of the
//! first comment postfix after the signature. Files without the signature
//! have no header, whatever other comments they carry.
//!
//! ## Layout
//!
//! ```text
//! <prefix><MARKER>
//!
//!  <license line 1>
//!  <license line 2>
//! <postfix>
//!
//! <original content>
//! ```

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::comment::CommentDelims;
use crate::error::HeaderError;
use crate::template::indent;

/// Identifies headers written by this tool. Changing it breaks update and
/// removal of every header injected before the change.
pub const MARKER: &str = "License generated by licensor(https://github.com/Marvin9/licensor).";

/// Separates an inserted header from the content below it.
const SEPARATOR: &[u8] = b"\n\n";

static WHITESPACE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex must compile"));

/// The complete header for one comment style, rendered once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
  delims: CommentDelims,
  signature: Vec<u8>,
  body: Vec<u8>,
  rendered: Vec<u8>,
  normalized_body: Vec<u8>,
}

impl HeaderTemplate {
  /// Builds the header from template-rendered (not yet indented) license
  /// text.
  pub fn new(delims: CommentDelims, license_text: &str) -> Self {
    let body = indent(license_text).into_bytes();
    let signature = [delims.prefix.as_bytes(), MARKER.as_bytes()].concat();

    let mut rendered = Vec::with_capacity(signature.len() + body.len() + delims.postfix.len() + 2);
    rendered.extend_from_slice(&signature);
    rendered.push(b'\n');
    rendered.extend_from_slice(&body);
    rendered.push(b'\n');
    rendered.extend_from_slice(delims.postfix.as_bytes());

    let normalized_body = strip_whitespace(&body);

    Self {
      delims,
      signature,
      body,
      rendered,
      normalized_body,
    }
  }

  /// The delimiters this header was built with.
  pub const fn delims(&self) -> CommentDelims {
    self.delims
  }

  /// Comment prefix followed by the marker.
  pub fn signature(&self) -> &[u8] {
    &self.signature
  }

  /// The indented license body between the marker line and the postfix.
  pub fn body(&self) -> &[u8] {
    &self.body
  }

  /// The full header block, from prefix to postfix, without the trailing
  /// separator.
  pub fn as_bytes(&self) -> &[u8] {
    &self.rendered
  }

  /// Whether the body contains the comment postfix. Such a header would be
  /// cut short the next time it is detected.
  pub fn body_contains_postfix(&self) -> bool {
    find(&self.body, self.delims.postfix.as_bytes()).is_some()
  }
}

/// Byte range of an existing header: from the signature start up to and
/// excluding `end`, which is just past the postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
  pub start: usize,
  pub end: usize,
}

/// Why a file is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The existing header matches the desired one modulo whitespace.
  UpToDate,
  /// Remove mode, and the file has no header.
  NothingToRemove,
}

/// Outcome of reconciling one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// No header yet; insert one at byte offset `at`.
  Insert { at: usize },
  /// The header differs; replace the span with the new header.
  Replace { span: HeaderSpan },
  /// Remove mode; delete the span.
  Remove { span: HeaderSpan },
  /// Leave the file untouched.
  Skip(SkipReason),
}

impl Action {
  /// Whether carrying out this action rewrites the file.
  pub const fn writes(&self) -> bool {
    !matches!(self, Action::Skip(_))
  }

  /// Produces the new file bytes, or `None` when nothing changes.
  ///
  /// Bytes outside the reconciled span are preserved exactly, with two
  /// exceptions: an insert after a preamble without a trailing newline adds
  /// one, and a remove also drops a blank-line pair directly after the span.
  pub fn apply(&self, content: &[u8], header: &HeaderTemplate) -> Option<Vec<u8>> {
    match *self {
      Action::Insert { at } => {
        let (before, after) = content.split_at(at);
        let mut out = Vec::with_capacity(content.len() + header.as_bytes().len() + 3);
        out.extend_from_slice(before);
        if !before.is_empty() && !before.ends_with(b"\n") {
          out.push(b'\n');
        }
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(SEPARATOR);
        out.extend_from_slice(after);
        Some(out)
      }
      Action::Replace { span } => {
        let mut out = Vec::with_capacity(content.len() + header.as_bytes().len());
        out.extend_from_slice(&content[..span.start]);
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&content[span.end..]);
        Some(out)
      }
      Action::Remove { span } => {
        let rest = &content[span.end..];
        let rest = rest.strip_prefix(SEPARATOR).unwrap_or(rest);
        let mut out = Vec::with_capacity(span.start + rest.len());
        out.extend_from_slice(&content[..span.start]);
        out.extend_from_slice(rest);
        Some(out)
      }
      Action::Skip(_) => None,
    }
  }
}

/// Decides the action for one file.
///
/// # Errors
///
/// Returns [`HeaderError::Malformed`] when the signature is present but no
/// postfix follows it. The caller must abort rather than guess where the
/// header ends.
pub fn plan(content: &[u8], header: &HeaderTemplate, remove: bool) -> Result<Action, HeaderError> {
  let Some(span) = find_header(content, header)? else {
    return Ok(if remove {
      Action::Skip(SkipReason::NothingToRemove)
    } else {
      Action::Insert {
        at: preamble_len(content),
      }
    });
  };

  if remove {
    return Ok(Action::Remove { span });
  }

  let postfix_len = header.delims().postfix.len();
  let old_body = &content[span.start + header.signature().len()..span.end - postfix_len];
  if strip_whitespace(old_body) == header.normalized_body {
    Ok(Action::Skip(SkipReason::UpToDate))
  } else {
    Ok(Action::Replace { span })
  }
}

/// Locates the first injected header in `content`.
///
/// # Errors
///
/// Returns [`HeaderError::Malformed`] if the signature is not followed by the
/// postfix.
pub fn find_header(content: &[u8], header: &HeaderTemplate) -> Result<Option<HeaderSpan>, HeaderError> {
  let signature = header.signature();
  let Some(start) = find(content, signature) else {
    return Ok(None);
  };

  let postfix = header.delims().postfix;
  let search_from = start + signature.len();
  let Some(offset) = find(&content[search_from..], postfix.as_bytes()) else {
    return Err(HeaderError::Malformed { start, postfix });
  };

  Ok(Some(HeaderSpan {
    start,
    end: search_from + offset + postfix.len(),
  }))
}

/// First lines that must stay at the top of a file. Matched case-insensitively.
const PREAMBLES: &[&str] = &[
  "#!",                       // shebang
  "<?xml",                    // XML declaration
  "<!doctype",                // HTML doctype
  "<?php",                    // PHP opening tag
  "# encoding:",              // Ruby encoding comment
  "# frozen_string_literal:", // Ruby magic comment
];

/// Rust inner attributes start like a shebang but are source code.
const INNER_ATTRIBUTE: &[u8] = b"#![";

/// Length of the preamble line (including its newline) that an inserted
/// header must follow, or 0 if the file has none.
pub fn preamble_len(content: &[u8]) -> usize {
  let first_line_end = content.iter().position(|&b| b == b'\n').map_or(content.len(), |i| i + 1);
  let first_line = content[..first_line_end].to_ascii_lowercase();

  if first_line.starts_with(INNER_ATTRIBUTE) {
    return 0;
  }

  if PREAMBLES.iter().any(|p| first_line.starts_with(p.as_bytes())) {
    first_line_end
  } else {
    0
  }
}

fn strip_whitespace(bytes: &[u8]) -> Vec<u8> {
  WHITESPACE_REGEX.replace_all(bytes, &b""[..]).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
  if needle.is_empty() || needle.len() > haystack.len() {
    return None;
  }
  haystack.windows(needle.len()).position(|window| window == needle)
}
