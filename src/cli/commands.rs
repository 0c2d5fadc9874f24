//! CLI command definitions

use crate::core::{JobGroups, PipelineModel};
use crate::parser::{locate_and_parse_pipeline, parse_pipeline_file, LoadError};
use clap::Args;
use std::path::PathBuf;

/// Where the Jenkinsfile comes from
#[derive(Debug, Args, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Path to a Jenkinsfile
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Directory containing a Jenkinsfile
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Read and parse the selected Jenkinsfile
    pub fn load(&self) -> Result<PipelineModel, LoadError> {
        match (&self.file, &self.dir) {
            (Some(file), _) => parse_pipeline_file(file),
            (None, Some(dir)) => locate_and_parse_pipeline(dir),
            (None, None) => locate_and_parse_pipeline("."),
        }
    }
}

/// Convert a Jenkinsfile
#[derive(Debug, Args, Clone)]
pub struct ConvertCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the workflow here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the {message, result} body as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the configured job groups
    #[arg(long, value_enum)]
    pub job_groups: Option<JobGroups>,

    /// Exit with status 2 when anything could not be converted
    #[arg(long)]
    pub strict: bool,
}

/// Parse a Jenkinsfile
#[derive(Debug, Args, Clone)]
pub struct CheckCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output the parsed pipeline as JSON
    #[arg(long)]
    pub json: bool,
}
