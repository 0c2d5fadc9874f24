//! Jenkinsfile parsing
//!
//! Pre-processes the source, lexes it with [`lexer`] and builds the
//! [`PipelineModel`] with the [`grammar`].

pub mod error;
pub mod grammar;
pub mod lexer;

pub use error::{LoadError, ParseError};

use crate::core::PipelineModel;
use crate::preprocess::preprocess;
use chumsky::error::{Simple, SimpleReason};
use lexer::Token;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// File name looked up by [`locate_and_parse_pipeline`]
pub const JENKINSFILE: &str = "Jenkinsfile";

/// Parse Jenkinsfile source text
pub fn parse_pipeline(source: &str) -> Result<PipelineModel, ParseError> {
    parse_pipeline_named(source, JENKINSFILE)
}

/// Parse Jenkinsfile source text, naming the document `name` in errors
pub fn parse_pipeline_named(source: &str, name: &str) -> Result<PipelineModel, ParseError> {
    let text = preprocess(source);
    debug!("Preprocessed {} ({} bytes)", name, text.len());

    let tokens = lexer::tokenize(&text).map_err(|span| {
        let detail = format!("unrecognized character at byte {} near '{}'", span.start, excerpt(&text, &span));
        ParseError::new(name, detail, span)
    })?;
    debug!("Lexed {} tokens", tokens.len());

    grammar::parse(tokens, text.len()).map_err(|errors| {
        // The first error is the furthest the grammar got
        match errors.into_iter().next() {
            Some(error) => ParseError::new(name, describe(&error, &text), error.span()),
            None => ParseError::new(name, "no pipeline block", 0..0),
        }
    })
}

/// Read and parse a Jenkinsfile
pub fn parse_pipeline_file<P: AsRef<Path>>(path: P) -> Result<PipelineModel, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }

    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(parse_pipeline_named(&source, &path.display().to_string())?)
}

/// Parse the `Jenkinsfile` inside a directory
pub fn locate_and_parse_pipeline<P: AsRef<Path>>(dir: P) -> Result<PipelineModel, LoadError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.display().to_string()));
    }

    parse_pipeline_file(dir.join(JENKINSFILE))
}

fn describe(error: &Simple<Token>, text: &str) -> String {
    let found = error
        .found()
        .map(ToString::to_string)
        .unwrap_or_else(|| "end of input".to_string());

    let mut expected: Vec<String> = error
        .expected()
        .map(|token| match token {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        })
        .collect();
    expected.sort();
    expected.dedup();

    let mut detail = match error.reason() {
        SimpleReason::Custom(message) => format!("{} at byte {}", message, error.span().start),
        _ => format!("found {} at byte {}", found, error.span().start),
    };
    if !expected.is_empty() {
        detail.push_str(&format!(", expected {}", expected.join(" or ")));
    }
    let near = excerpt(text, &error.span());
    if !near.is_empty() {
        detail.push_str(&format!(" near '{}'", near));
    }

    detail
}

fn excerpt(text: &str, span: &Range<usize>) -> String {
    text.get(span.start..)
        .unwrap_or_default()
        .chars()
        .take(40)
        .collect::<String>()
        .replace('\n', " ")
}
