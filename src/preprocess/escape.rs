//! Placeholder encoding shared by preprocessing, parsing and codegen
//!
//! Text the grammar cannot tokenize (multi-line bodies, quotes nested inside
//! strings, backticks) is flattened into placeholder tokens before parsing and
//! decoded again when YAML is produced.

use once_cell::sync::Lazy;
use regex::Regex;

pub const NEWLINE: &str = "^^NEWLINE^^";
pub const BACKTICK: &str = "^^BACKTICK^^";
pub const DOUBLE_QUOTE: &str = "^^DOUBLEQUOTE^^";
pub const SINGLE_QUOTE: &str = "^^SINGLEQUOTE^^";
pub const MULTILINE_DOUBLE: &str = "^^MULTILINEDOUBLE^^";
pub const MULTILINE_SINGLE: &str = "^^MULTILINESINGLE^^";

static LEADING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s+)\S").expect("leading whitespace regex"));

/// Flatten a block body onto one line.
///
/// The body is dedented by the indentation of its first indented line (keeping
/// two columns of it), newlines become [`NEWLINE`] and backticks become
/// [`BACKTICK`] so the result fits inside a backtick raw string.
pub fn escape_body(body: &str) -> String {
    let mut prefix = "";
    let mut dedented = Vec::new();

    for line in body.split('\n') {
        if !line.is_empty() && prefix.is_empty() {
            if let Some(found) = LEADING_WHITESPACE.captures(line).and_then(|c| c.get(1)) {
                let ws = found.as_str();
                prefix = if ws.len() > 2 { ws.get(2..).unwrap_or(ws) } else { ws };
            }
        }
        dedented.push(line.strip_prefix(prefix).unwrap_or(line));
    }

    dedented.join(NEWLINE).replace('`', BACKTICK)
}

/// Escape the body of a `'''` or `"""` string.
///
/// Quote characters are encoded as well, so the body can be re-wrapped in a
/// plain single- or double-quoted string.
pub fn escape_triple_quoted(body: &str) -> String {
    escape_body(body)
        .replace('\'', SINGLE_QUOTE)
        .replace('"', DOUBLE_QUOTE)
}

/// Whether the value came from a `'''` / `"""` string
pub fn is_triple_quoted(encoded: &str) -> bool {
    encoded.contains(MULTILINE_SINGLE) || encoded.contains(MULTILINE_DOUBLE)
}

/// Decode every placeholder back to the characters it stands for
pub fn decode(encoded: &str) -> String {
    restore_triple_delimiters(encoded)
        .replace(MULTILINE_SINGLE, "")
        .replace(MULTILINE_DOUBLE, "")
        .replace(NEWLINE, "\n")
        .replace(BACKTICK, "`")
        .replace(DOUBLE_QUOTE, "\"")
        .replace(SINGLE_QUOTE, "'")
}

// A marker still next to its quote sits inside opaque text, where the
// surrounding quote and the marker together stood for a triple delimiter.
fn restore_triple_delimiters(encoded: &str) -> String {
    let single_open = format!("'{}", MULTILINE_SINGLE);
    let single_close = format!("{}'", MULTILINE_SINGLE);
    let double_open = format!("\"{}", MULTILINE_DOUBLE);
    let double_close = format!("{}\"", MULTILINE_DOUBLE);

    encoded
        .replace(&single_open, "'''")
        .replace(&single_close, "'''")
        .replace(&double_open, "\"\"\"")
        .replace(&double_close, "\"\"\"")
}

/// Render an escaped block body the way it was written, wrapped in braces
pub fn to_curly(encoded: &str) -> String {
    format!("{{{}}}", decode(encoded))
}
