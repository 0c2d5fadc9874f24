//! Conversion diagnostics

use serde::Serialize;
use std::fmt;
use tracing::warn;

/// How much a diagnostic matters for the converted workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, the workflow is still complete
    Note,
    /// A construct was dropped
    Warning,
    /// A failing placeholder was emitted
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Something the converter could not carry over as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,

    /// `pipeline` or the stage the construct belongs to
    pub subject: String,

    pub message: String,
}

impl Diagnostic {
    pub fn is_issue(&self) -> bool {
        self.severity >= Severity::Warning
    }
}

/// Collects diagnostics during one render
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, subject: &str, message: &str) {
        if severity >= Severity::Warning {
            warn!(subject, "{}", message);
        }
        self.items.push(Diagnostic {
            severity,
            subject: subject.to_string(),
            message: message.to_string(),
        });
    }

    pub fn note(&mut self, subject: &str, message: &str) {
        self.push(Severity::Note, subject, message);
    }

    pub fn warning(&mut self, subject: &str, message: &str) {
        self.push(Severity::Warning, subject, message);
    }

    pub fn error(&mut self, subject: &str, message: &str) {
        self.push(Severity::Error, subject, message);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
