//! Lexical pre-processing
//!
//! Neutralizes everything the grammar cannot parse before the parser sees it:
//! disallowed blocks become raw strings and awkward string literals are
//! flattened into the placeholder encoding of [`escape`].

pub mod blocks;
pub mod escape;
pub mod gatekeeper;
pub mod quotes;
pub mod rewrite;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// `scm` is a bare variable, which the grammar has no value form for
static CHECKOUT_SCM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)checkout[ \t]+scm[ \t]*$").expect("checkout scm regex"));

/// Run the full pre-processing pass over a Jenkinsfile
pub fn preprocess(source: &str) -> String {
    let normalized = normalize(source);

    let found = blocks::scan(&normalized);
    let rewrites = gatekeeper::escape_disallowed(&found);
    debug!(
        blocks = found.len(),
        escaped = rewrites.len(),
        "Escaped disallowed blocks"
    );
    let gated = rewrite::apply(&normalized, rewrites);

    quotes::escape_quotes(&gated)
}

fn normalize(source: &str) -> String {
    let source = source.replace(".toLowerCase()", "");
    CHECKOUT_SCM.replace_all(&source, "${1}checkout 'scm'").into_owned()
}
