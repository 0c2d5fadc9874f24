//! CLI output formatting

use crate::codegen::{Diagnostic, Severity};
use crate::core::PipelineModel;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");

/// Format a severity for display
pub fn format_severity(severity: Severity) -> String {
    match severity {
        Severity::Note => style("NOTE").dim().to_string(),
        Severity::Warning => style("WARNING").yellow().to_string(),
        Severity::Error => style("ERROR").red().to_string(),
    }
}

/// Format a diagnostic for display
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let icon = match diagnostic.severity {
        Severity::Note => INFO,
        Severity::Warning => WARN,
        Severity::Error => CROSS,
    };

    format!(
        "{}{} [{}] {}",
        icon,
        format_severity(diagnostic.severity),
        style(&diagnostic.subject).cyan(),
        diagnostic.message
    )
}

/// Summary lines printed by `check`
pub fn format_pipeline_summary(model: &PipelineModel) -> Vec<String> {
    let mut lines = Vec::new();

    let stages = model.stages();
    lines.push(format!("  Stages: {}", style(stages.len()).cyan()));
    for stage in stages {
        lines.push(format!(
            "    {} ({} steps)",
            style(&stage.name).bold(),
            stage.steps().len()
        ));
    }
    lines.push(format!("  Environment: {}", style(model.environment().len()).cyan()));

    let unsupported: Vec<&str> = model.all_unsupported().map(|block| block.name.as_str()).collect();
    if unsupported.is_empty() {
        lines.push(format!("  Unsupported directives: {}", style("none").dim()));
    } else {
        lines.push(format!(
            "  Unsupported directives: {}",
            style(unsupported.join(", ")).yellow()
        ));
    }

    lines
}
