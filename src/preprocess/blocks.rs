//! Block scanner
//!
//! Finds `name(...) { ... }` blocks purely structurally, by counting braces.
//! Braces inside strings and comments are not special here, which is why this
//! pass runs on the raw text before any escaping.

use crate::preprocess::escape;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static BLOCK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)(\([^\n]*?\))?\s*\{").expect("block header regex"));

/// A brace-delimited block found in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Identifier in front of the block
    pub name: String,

    /// Byte range of the whole block, header through closing brace
    pub span: Range<usize>,

    /// The block with its body escaped into a backtick raw string
    pub replacement: String,

    /// Blocks directly inside this block's body
    pub children: Vec<Block>,
}

impl Block {
    /// Visit this block and every block nested below it, depth first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Block)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Scan the whole text for blocks
pub fn scan(text: &str) -> Vec<Block> {
    scan_range(text, 0..text.len())
}

fn scan_range(text: &str, range: Range<usize>) -> Vec<Block> {
    let haystack = &text[..range.end];
    let mut blocks = Vec::new();
    let mut position = range.start;

    while let Some(captures) = BLOCK_HEADER.captures_at(haystack, position) {
        let (Some(header), Some(name)) = (captures.get(0), captures.get(1)) else {
            break;
        };
        let body_start = header.end();

        match closing_brace(haystack, body_start) {
            Some(close) => {
                let body = &text[body_start..close];
                let replacement = format!(
                    "{}`{}`",
                    &text[header.start()..body_start - 1],
                    escape::escape_body(body)
                );

                blocks.push(Block {
                    name: name.as_str().to_string(),
                    span: header.start()..close + 1,
                    replacement,
                    children: scan_range(text, body_start..close),
                });
                position = close + 1;
            }
            // Unterminated: skip the header and keep looking
            None => position = body_start,
        }
    }

    blocks
}

/// Byte offset of the brace closing the block whose body starts at `from`
fn closing_brace(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, c) in text[from..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + offset);
                }
            }
            _ => {}
        }
    }
    None
}
