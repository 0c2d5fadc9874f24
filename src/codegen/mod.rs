//! GitHub Actions workflow generation
//!
//! Turns a [`PipelineModel`] into workflow YAML. Constructs that have no
//! counterpart are kept as comments in the output and reported as
//! [`Diagnostic`]s.

pub mod diagnostics;
pub mod environment;
pub mod jobs;
pub mod response;
pub mod steps;
pub mod writer;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use response::{ConversionResponse, ErrorResponse};

use crate::core::{PipelineModel, RenderConfig};
use environment::render_environment;
use thiserror::Error;
use tracing::debug;
use writer::YamlWriter;

/// Subject of diagnostics about the pipeline as a whole
pub const PIPELINE: &str = "pipeline";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to serialize {what}: {source}")]
    Yaml {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A generated workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub yaml: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    /// Whether anything was dropped or replaced by a failing step
    pub fn has_issues(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_issue)
    }
}

/// Render with the default configuration
pub fn render(model: &PipelineModel) -> Result<Rendered, RenderError> {
    render_with(model, &RenderConfig::default())
}

pub fn render_with(model: &PipelineModel, config: &RenderConfig) -> Result<Rendered, RenderError> {
    let mut diagnostics = Diagnostics::new();
    let mut writer = YamlWriter::new();

    writer.line(0, format!("name: {}", scalar(&config.workflow_name)?));
    render_environment(model.environment(), PIPELINE, config, &mut diagnostics)?.write(&mut writer, 0);
    writer.blank();

    writer.comment(0, "setting github branch triggers: default-branch.");
    writer.comment(
        0,
        "for customizing: please check https://docs.github.com/en/actions/using-workflows/workflow-syntax-for-github-actions#on",
    );
    writer.line(0, "on:");
    let branch = scalar(&config.branch)?;
    for trigger in ["push", "pull_request"] {
        writer.line(1, format!("{}:", trigger));
        writer.line(2, "branches:");
        writer.line(3, format!("- {}", branch));
    }

    writer.line(0, "jobs:");
    jobs::write_jobs(model, config, &mut writer, &mut diagnostics)?;

    let rendered = Rendered {
        yaml: writer.finish(),
        diagnostics: diagnostics.into_vec(),
    };
    debug!(
        bytes = rendered.yaml.len(),
        diagnostics = rendered.diagnostics.len(),
        "Rendered workflow"
    );
    Ok(rendered)
}

/// A string as a single-line YAML scalar
pub(crate) fn scalar(text: &str) -> Result<String, RenderError> {
    let yaml = serde_yaml::to_string(text).map_err(|source| RenderError::Yaml {
        what: format!("'{}'", text),
        source,
    })?;
    let yaml = yaml.trim_end();

    if yaml.contains('\n') {
        // JSON strings are valid double-quoted YAML scalars
        Ok(serde_json::to_string(text).unwrap_or_else(|_| format!("'{}'", text.replace('\'', "''"))))
    } else {
        Ok(yaml.to_string())
    }
}
