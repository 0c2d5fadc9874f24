//! Quote and comment scanner
//!
//! Rewrites string literals the lexer could not tokenize as written:
//! `'''`/`"""` strings are flattened into single-line marked strings, and
//! single-quoted strings get their double quotes and newlines encoded.
//! Nothing inside a comment, a double-quoted string or a raw string is touched.

use crate::preprocess::escape::{self, DOUBLE_QUOTE, MULTILINE_DOUBLE, MULTILINE_SINGLE, NEWLINE};
use crate::preprocess::rewrite::{self, Rewrite};
use once_cell::sync::Lazy;
use regex::Regex;

static TRIPLE_SINGLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)'''(.*?)'''").expect("triple single quote regex"));
static TRIPLE_DOUBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)"""(.*?)""""#).expect("triple double quote regex"));

/// Escape every quoted literal in the text
pub fn escape_quotes(text: &str) -> String {
    let text = mark_triple_quoted(text, &TRIPLE_SINGLE, '\'', MULTILINE_SINGLE);
    let text = mark_triple_quoted(&text, &TRIPLE_DOUBLE, '"', MULTILINE_DOUBLE);
    let rewrites = single_quoted_rewrites(&text);
    rewrite::apply(&text, rewrites)
}

fn mark_triple_quoted(text: &str, pattern: &Regex, quote: char, marker: &str) -> String {
    let rewrites = pattern
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let body = captures.get(1)?;
            let replacement = format!(
                "{quote}{marker}{}{marker}{quote}",
                escape::escape_triple_quoted(body.as_str())
            );
            Some(Rewrite::new(whole.range(), replacement))
        })
        .collect();

    rewrite::apply(text, rewrites)
}

#[derive(Debug)]
enum Mode {
    Normal,
    LineComment,
    BlockComment,
    DoubleQuoted,
    Raw,
    SingleQuoted { start: usize, body: String },
}

fn single_quoted_rewrites(text: &str) -> Vec<Rewrite> {
    let mut rewrites = Vec::new();
    let mut mode = Mode::Normal;
    let mut prev: Option<char> = None;
    let mut escaped = false;

    for (offset, c) in text.char_indices() {
        // `escaped` means the previous char was a backslash that did not
        // itself get consumed as an escape
        let backslashed = escaped;
        escaped = c == '\\' && !backslashed;
        let in_code = matches!(mode, Mode::Normal);
        let in_block_comment = matches!(mode, Mode::BlockComment);

        let next = match mode {
            Mode::Normal => match c {
                '/' if prev == Some('/') => Mode::LineComment,
                '*' if prev == Some('/') => Mode::BlockComment,
                '"' if !backslashed => Mode::DoubleQuoted,
                '`' if !backslashed => Mode::Raw,
                '\'' if !backslashed => Mode::SingleQuoted {
                    start: offset,
                    body: String::new(),
                },
                _ => Mode::Normal,
            },
            Mode::LineComment if c == '\n' => Mode::Normal,
            Mode::LineComment => Mode::LineComment,
            Mode::BlockComment if c == '/' && prev == Some('*') => Mode::Normal,
            Mode::BlockComment => Mode::BlockComment,
            Mode::DoubleQuoted if c == '"' && !backslashed => Mode::Normal,
            Mode::DoubleQuoted => Mode::DoubleQuoted,
            Mode::Raw if c == '`' => Mode::Normal,
            Mode::Raw => Mode::Raw,
            Mode::SingleQuoted { start, mut body } => match c {
                '\'' if !backslashed => {
                    if body != text[start + 1..offset] {
                        rewrites.push(Rewrite::new(start..offset + 1, format!("'{}'", body)));
                    }
                    Mode::Normal
                }
                '"' if !backslashed => {
                    body.push_str(DOUBLE_QUOTE);
                    Mode::SingleQuoted { start, body }
                }
                '\n' => {
                    body.push_str(NEWLINE);
                    Mode::SingleQuoted { start, body }
                }
                _ => {
                    body.push(c);
                    Mode::SingleQuoted { start, body }
                }
            },
        };

        // Comment delimiters never share a char: `/*/` does not close
        let opened_comment = in_code && matches!(next, Mode::LineComment | Mode::BlockComment);
        let closed_comment = in_block_comment && matches!(next, Mode::Normal);
        prev = if opened_comment || closed_comment { None } else { Some(c) };
        mode = next;
    }

    rewrites
}
