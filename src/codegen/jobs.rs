//! Stage partitioning and job rendering

use crate::codegen::diagnostics::Diagnostics;
use crate::codegen::environment::render_environment;
use crate::codegen::steps::translate_steps;
use crate::codegen::writer::YamlWriter;
use crate::codegen::{scalar, RenderError, PIPELINE};
use crate::core::{merge_first_seen, JobGroups, PostCondition, RenderConfig, Stage, When};
use tracing::debug;

/// Which event a group of jobs runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    PullRequest,
    Release,
}

impl Group {
    fn prefix(self, dialect: JobGroups) -> &'static str {
        match (dialect, self) {
            (JobGroups::PullRequest, _) => "",
            (JobGroups::PullRequestAndRelease, Group::PullRequest) => "pr_",
            (JobGroups::PullRequestAndRelease, Group::Release) => "release_",
        }
    }

    fn event(self) -> &'static str {
        match self {
            Group::PullRequest => "pull_request",
            Group::Release => "push",
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Group::PullRequest => "pull request jobs",
            Group::Release => "release jobs",
        }
    }
}

/// Stages that run for each group
#[derive(Debug, Default)]
struct Partition<'a> {
    pull_request: Vec<&'a Stage>,
    release: Vec<&'a Stage>,
}

/// Write everything below `jobs:`
pub fn write_jobs(
    model: &crate::core::PipelineModel,
    config: &RenderConfig,
    writer: &mut YamlWriter,
    diagnostics: &mut Diagnostics,
) -> Result<(), RenderError> {
    let post = model.post();
    if !post.is_empty() && !PostCondition::is_default_clean_ws(post) {
        report(
            writer,
            diagnostics,
            PIPELINE,
            "The Jenkinsfile contains a post directive for its pipeline. This is not converted.",
        );
    }
    for block in model.all_unsupported() {
        let message = format!(
            "The Jenkinsfile contains the {} directive for its pipeline. This is not converted.",
            block.name
        );
        report(writer, diagnostics, PIPELINE, &message);
    }

    let partition = partition(model.stages(), config, writer, diagnostics);
    debug!(
        pull_request = partition.pull_request.len(),
        release = partition.release.len(),
        "Partitioned stages"
    );

    let groups = match config.job_groups {
        JobGroups::PullRequest => vec![(Group::PullRequest, partition.pull_request)],
        JobGroups::PullRequestAndRelease => vec![
            (Group::PullRequest, partition.pull_request),
            (Group::Release, partition.release),
        ],
    };

    let mut emitted: Vec<String> = Vec::new();
    for (group, stages) in groups {
        write_group(group, &stages, config, &mut emitted, writer, diagnostics)?;
    }

    Ok(())
}

fn report(writer: &mut YamlWriter, diagnostics: &mut Diagnostics, subject: &str, message: &str) {
    writer.comment(1, message);
    diagnostics.warning(subject, message);
}

/// Split stages by their `when { branch }` and comment on what each drops
fn partition<'a>(
    stages: &'a [Stage],
    config: &RenderConfig,
    writer: &mut YamlWriter,
    diagnostics: &mut Diagnostics,
) -> Partition<'a> {
    let mut partition = Partition::default();

    for stage in stages {
        if !stage.post().is_empty() {
            let message = format!(
                "The Jenkinsfile contains a post directive for the stage '{}'. This is not converted.",
                stage.name
            );
            report(writer, diagnostics, &stage.name, &message);
        }
        for block in stage.unsupported() {
            let message = format!(
                "The Jenkinsfile contains the {} directive for the stage '{}'. This is not converted.",
                block.name, stage.name
            );
            report(writer, diagnostics, &stage.name, &message);
        }

        match stage.when() {
            None => {
                partition.pull_request.push(stage);
                partition.release.push(stage);
            }
            Some(When::Branch(branch)) if *branch == config.branch => {
                if config.job_groups == JobGroups::PullRequest {
                    let message = format!(
                        "The stage '{}' only runs on the branch '{}', so it is not part of this workflow.",
                        stage.name, branch
                    );
                    writer.comment(1, &message);
                    diagnostics.note(&stage.name, &message);
                }
                partition.release.push(stage);
            }
            Some(When::Branch(branch)) if config.is_pr_branch(branch) => partition.pull_request.push(stage),
            Some(When::Branch(branch)) => {
                let message = format!(
                    "This Jenkinsfile contains the when condition branch '{}' on stage '{}', which matches no job group. The stage containing it will not be converted.",
                    branch, stage.name
                );
                report(writer, diagnostics, &stage.name, &message);
            }
            Some(When::Unsupported(block)) => {
                let message = format!(
                    "This Jenkinsfile contains the unsupported when condition '{}' on stage '{}'. The stage containing it will not be converted.",
                    block.name, stage.name
                );
                report(writer, diagnostics, &stage.name, &message);
            }
        }
    }

    partition
}

fn write_group(
    group: Group,
    stages: &[&Stage],
    config: &RenderConfig,
    emitted: &mut Vec<String>,
    writer: &mut YamlWriter,
    diagnostics: &mut Diagnostics,
) -> Result<(), RenderError> {
    let prefix = group.prefix(config.job_groups);
    let environment = merge_first_seen(stages.iter().map(|stage| stage.environment()));
    let env_block = render_environment(&environment, group.subject(), config, diagnostics)?;

    let mut translated = 0;
    for stage in stages {
        let steps = translate_steps(stage.steps(), config, &stage.name, diagnostics)?;
        translated += steps.len();

        let id = job_id(prefix, &stage.name, emitted);
        write_job_header(&id, group, config, emitted, writer)?;
        env_block.write(writer, 2);

        writer.line(2, "steps:");
        writer.comment(2, "Checks-out your repository under $GITHUB_WORKSPACE, so your job can access it");
        writer.line(2, format!("- uses: {}", scalar(&config.checkout_action)?));
        for (index, lines) in steps.iter().enumerate() {
            writer.line(2, format!("- name: step{}", index + 1));
            writer.extend(3, lines);
        }

        emitted.push(id);
    }

    if translated == 0 {
        let message = "No stages were found that will be run.";
        writer.comment(1, message);
        diagnostics.error(group.subject(), message);

        let id = job_id(prefix, "no_stages", emitted);
        write_job_header(&id, group, config, emitted, writer)?;
        writer.line(2, "steps:");
        writer.line(2, "- name: step0");
        writer.line(3, "run: echo 'No stages found, failing' && exit 1");
        emitted.push(id);
    }

    Ok(())
}

fn write_job_header(
    id: &str,
    group: Group,
    config: &RenderConfig,
    emitted: &[String],
    writer: &mut YamlWriter,
) -> Result<(), RenderError> {
    writer.line(1, format!("{}:", id));
    writer.line(2, format!("runs-on: {}", scalar(&config.runner)?));

    let condition = match (config.job_groups, emitted.is_empty()) {
        (JobGroups::PullRequest, true) => None,
        (JobGroups::PullRequest, false) => Some("always()".to_string()),
        (JobGroups::PullRequestAndRelease, true) => Some(format!("github.event_name == '{}'", group.event())),
        (JobGroups::PullRequestAndRelease, false) => {
            Some(format!("always() && github.event_name == '{}'", group.event()))
        }
    };
    if let Some(condition) = condition {
        writer.line(2, format!("if: ${{{{ {} }}}}", condition));
    }
    if !emitted.is_empty() {
        writer.line(2, format!("needs: [{}]", emitted.join(", ")));
    }

    Ok(())
}

/// A job id that is valid in Actions and not yet taken
fn job_id(prefix: &str, name: &str, emitted: &[String]) -> String {
    let mut base = format!("{}{}", prefix, name);
    if !base.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        base.insert(0, '_');
    }

    let mut id = base.clone();
    let mut suffix = 2;
    while emitted.contains(&id) {
        id = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    id
}
