//! jenkinsfile-convert - converts declarative Jenkinsfiles into GitHub Actions workflows

pub mod cli;
pub mod codegen;
pub mod core;
pub mod parser;
pub mod preprocess;

// Re-export commonly used types
pub use codegen::{render, render_with, ConversionResponse, Diagnostic, ErrorResponse, RenderError, Rendered, Severity};
pub use core::{PipelineModel, RenderConfig, Stage, Step};
pub use parser::{locate_and_parse_pipeline, parse_pipeline, parse_pipeline_file, parse_pipeline_named, LoadError, ParseError};
