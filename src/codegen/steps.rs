//! Step flattening and translation into workflow steps

use crate::codegen::diagnostics::Diagnostics;
use crate::codegen::writer::Line;
use crate::codegen::{scalar, RenderError};
use crate::core::{RenderConfig, Step, StepArg, Value};
use crate::preprocess::escape;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static CAT_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\?\$\(cat [^)]*?VERSION\)").expect("cat version regex"));
static BACKTICK_CAT_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`cat VERSION`").expect("backtick cat version regex"));

/// What a leaf step inherits from the wrappers around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepContext {
    pub working_directory: Option<String>,
    pub image: String,
}

/// Unwrap `dir` and `container` steps into leaves paired with their context
pub fn flatten<'a>(steps: &'a [Step], context: &StepContext, default_image: &str) -> Vec<(&'a Step, StepContext)> {
    let mut leaves = Vec::new();
    for step in steps {
        flatten_into(step, context, default_image, &mut leaves);
    }
    leaves
}

fn flatten_into<'a>(
    step: &'a Step,
    context: &StepContext,
    default_image: &str,
    leaves: &mut Vec<(&'a Step, StepContext)>,
) {
    let inner = match step.name.as_str() {
        _ if step.nested.is_empty() => None,
        "dir" => step
            .single_unnamed_arg()
            .and_then(Value::as_str)
            .map(|dir| StepContext {
                working_directory: working_directory(&escape::decode(dir)),
                ..context.clone()
            }),
        "container" => Some(StepContext {
            image: container_image(step, default_image),
            ..context.clone()
        }),
        _ => None,
    };

    match inner {
        Some(inner) => {
            for nested in &step.nested {
                flatten_into(nested, &inner, default_image, leaves);
            }
        }
        None => leaves.push((step, context.clone())),
    }
}

fn working_directory(dir: &str) -> Option<String> {
    let dir = dir.trim().trim_start_matches("./").trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        None
    } else {
        Some(dir.to_string())
    }
}

/// Image named by a `container` step
pub fn container_image(step: &Step, default_image: &str) -> String {
    step.single_unnamed_arg()
        .or_else(|| step.named_arg("name"))
        .map(Value::decoded)
        .unwrap_or_else(|| default_image.to_string())
}

/// Translate a stage's steps; each entry is the body of one workflow step
pub fn translate_steps(
    steps: &[Step],
    config: &RenderConfig,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Vec<Line>>, RenderError> {
    let stage_image = match steps.first() {
        Some(first) if first.name == "container" => container_image(first, &config.default_image),
        _ => config.default_image.clone(),
    };
    let base = StepContext {
        working_directory: None,
        image: stage_image.clone(),
    };

    flatten(steps, &base, &config.default_image)
        .into_iter()
        .filter(|(step, _)| !is_removed(step, config))
        .map(|(step, context)| translate(step, &context, &stage_image, config, subject, diagnostics))
        .collect()
}

fn is_removed(step: &Step, config: &RenderConfig) -> bool {
    let Some(Value::String(command)) = step.single_unnamed_arg() else {
        return false;
    };
    let command = escape::decode(command).replace("\\$", "$");

    match step.name.as_str() {
        "sh" => config.removed_steps.iter().any(|removed| *removed == command),
        // Every job starts by checking out the repository
        "checkout" => command == "scm",
        _ => false,
    }
}

fn translate(
    step: &Step,
    context: &StepContext,
    stage_image: &str,
    config: &RenderConfig,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Line>, RenderError> {
    let is_shell = step.name == "sh" || (step.name == "echo" && config.translate_echo);
    if !is_shell || step.body.is_some() || !step.nested.is_empty() {
        return Ok(invalid_step(step, None, subject, diagnostics));
    }

    let value = match step.args.as_slice() {
        [StepArg::Unnamed(value @ Value::String(_))] => value,
        [StepArg::Unnamed(_)] => {
            let reason = format!("Non-string parameters to the Jenkins Pipeline {} step are not supported", step.name);
            return Ok(invalid_step(step, Some(reason.as_str()), subject, diagnostics));
        }
        [StepArg::Named { .. }] => {
            let reason = format!("Named parameters to the Jenkins Pipeline {} step are not supported", step.name);
            return Ok(invalid_step(step, Some(reason.as_str()), subject, diagnostics));
        }
        _ => {
            let reason = format!("Additional parameters to the Jenkins Pipeline {} step are not supported", step.name);
            return Ok(invalid_step(step, Some(reason.as_str()), subject, diagnostics));
        }
    };

    let mut command = shell_command(value, config);
    if step.name == "echo" {
        command = format!("echo {}", command);
    }

    let block = value.as_str().is_some_and(escape::is_triple_quoted);
    let mut lines = run_lines(&command, block)?;
    if context.image != stage_image {
        lines.push(Line::new(0, format!("image: {}", scalar(&context.image)?)));
    }
    if let Some(dir) = &context.working_directory {
        lines.push(Line::new(0, format!("working-directory: ./{}", dir)));
    }

    Ok(lines)
}

/// The command text as the shell should see it
fn shell_command(value: &Value, config: &RenderConfig) -> String {
    let command = value.decoded();
    let command = CAT_VERSION.replace_all(&command, NoExpand(&config.version_expression));
    let command = BACKTICK_CAT_VERSION.replace_all(&command, NoExpand(&config.version_expression));
    command.replace("\\$", "$")
}

/// `block` forces a `|` scalar for commands written as `'''` strings
fn run_lines(command: &str, block: bool) -> Result<Vec<Line>, RenderError> {
    if block || command.contains('\n') {
        let trimmed: Vec<&str> = command.lines().map(str::trim).collect();
        let first = trimmed.iter().position(|line| !line.is_empty());
        let last = trimmed.iter().rposition(|line| !line.is_empty());

        if let (Some(first), Some(last)) = (first, last) {
            let mut lines = vec![Line::new(0, "run: |")];
            lines.extend(trimmed[first..=last].iter().map(|line| Line::new(1, *line)));
            return Ok(lines);
        }
    }

    Ok(vec![Line::new(0, format!("run: {}", scalar(command.trim())?))])
}

fn invalid_step(step: &Step, reason: Option<&str>, subject: &str, diagnostics: &mut Diagnostics) -> Vec<Line> {
    let headline = format!("The Jenkins Pipeline step {} cannot be translated directly.", step.name);
    diagnostics.error(subject, &headline);

    let mut lines = vec![
        Line::comment(0, &headline),
        Line::comment(
            0,
            reason.unwrap_or(
                "You may want to consider adding a shell script to your repository that replicates its behavior.",
            ),
        ),
        Line::comment(0, "Original step from Jenkinsfile:"),
    ];
    for source in step.to_groovy().lines() {
        lines.push(Line::new(0, format!("# {}", source).trim_end()));
    }
    lines.push(Line::new(
        0,
        format!("run: echo 'Invalid step {}, failing' && exit 1", step.name),
    ));

    lines
}
