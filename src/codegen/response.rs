//! JSON bodies reported for a conversion

use crate::codegen::Rendered;
use serde::Serialize;

pub const ATTENTION: &str = "ATTENTION: Some contents of the Jenkinsfile could not be converted. Please review the github-action.yml for more information.";

/// A successful conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResponse {
    /// Empty unless something could not be converted
    pub message: String,
    /// The workflow YAML
    pub result: String,
}

impl ConversionResponse {
    pub fn from_rendered(rendered: &Rendered) -> Self {
        let message = if rendered.has_issues() { ATTENTION } else { "" };
        ConversionResponse {
            message: message.to_string(),
            result: rendered.yaml.clone(),
        }
    }
}

/// A conversion that failed before any YAML was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        ErrorResponse {
            error: error.to_string(),
        }
    }
}
