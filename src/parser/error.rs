//! Error types for loading and parsing Jenkinsfiles

use std::ops::Range;
use thiserror::Error;

/// The grammar or the lexer rejected the pre-processed text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Jenkinsfile {file} cannot be parsed. It may contain code outside of the pipeline {{}} block, \
     or it may not have a pipeline {{}} block at all. ({detail})"
)]
pub struct ParseError {
    /// Label of the document, usually its path
    pub file: String,

    /// What the parser found and expected there
    pub detail: String,

    /// Byte range in the pre-processed text
    pub span: Range<usize>,
}

impl ParseError {
    pub fn new(file: impl Into<String>, detail: impl Into<String>, span: Range<usize>) -> Self {
        ParseError {
            file: file.into(),
            detail: detail.into(),
            span,
        }
    }
}

/// Error types for reading a Jenkinsfile from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The directory {0} does not exist or is not a directory")]
    NotADirectory(String),

    #[error("The file {0} does not exist or is not a file")]
    FileNotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
