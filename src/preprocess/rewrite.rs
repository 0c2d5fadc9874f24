//! Span-based text rewriting

use std::ops::Range;

/// Replace one byte range of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub span: Range<usize>,
    pub replacement: String,
}

impl Rewrite {
    pub fn new(span: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }
}

/// Apply rewrites in a single pass.
///
/// Rewrites are ordered by start offset, wider spans first. A rewrite that
/// overlaps one already applied is skipped, so a replacement nested inside a
/// larger replacement is subsumed by it.
pub fn apply(text: &str, mut rewrites: Vec<Rewrite>) -> String {
    if rewrites.is_empty() {
        return text.to_string();
    }

    rewrites.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then_with(|| b.span.end.cmp(&a.span.end))
    });

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    for rewrite in rewrites {
        if rewrite.span.start < cursor || rewrite.span.end > text.len() {
            continue;
        }
        output.push_str(&text[cursor..rewrite.span.start]);
        output.push_str(&rewrite.replacement);
        cursor = rewrite.span.end;
    }
    output.push_str(&text[cursor..]);

    output
}
