//! Test utility functions for conversion scenarios

use jenkinsfile_convert::core::{JobGroups, RenderConfig};
use jenkinsfile_convert::{parse_pipeline, render_with, Rendered};
use serde_yaml::Value;

/// Parse and render with the default configuration
pub fn convert(source: &str) -> Rendered {
    convert_with(source, &RenderConfig::default())
}

/// Parse and render with both job groups
pub fn convert_two_groups(source: &str) -> Rendered {
    let config = RenderConfig {
        job_groups: JobGroups::PullRequestAndRelease,
        ..RenderConfig::default()
    };
    convert_with(source, &config)
}

pub fn convert_with(source: &str, config: &RenderConfig) -> Rendered {
    let model = parse_pipeline(source).expect("Jenkinsfile should parse");
    render_with(&model, config).expect("workflow should render")
}

/// The rendered workflow as a YAML document
pub fn workflow(rendered: &Rendered) -> Value {
    serde_yaml::from_str(&rendered.yaml).unwrap_or_else(|e| panic!("invalid YAML ({}):\n{}", e, rendered.yaml))
}

/// Job ids in emission order
pub fn job_ids(rendered: &Rendered) -> Vec<String> {
    workflow(rendered)["jobs"]
        .as_mapping()
        .expect("jobs mapping")
        .keys()
        .filter_map(|key| key.as_str().map(str::to_string))
        .collect()
}

/// Steps of a job, without the leading checkout step
pub fn job_steps(rendered: &Rendered, job: &str) -> Vec<Value> {
    let steps = workflow(rendered)["jobs"][job]["steps"]
        .as_sequence()
        .unwrap_or_else(|| panic!("job {} has no steps:\n{}", job, rendered.yaml))
        .clone();
    assert_eq!(steps[0]["uses"].as_str(), Some("actions/checkout@v3"));
    steps.into_iter().skip(1).collect()
}

/// Wrap stage bodies into a pipeline
pub fn pipeline_with_stages(stages: &str) -> String {
    format!("pipeline {{\n    agent any\n    stages {{\n{}\n    }}\n}}\n", stages)
}

/// A single stage with the given steps
pub fn single_stage(steps: &str) -> String {
    pipeline_with_stages(&format!(
        "        stage('Build') {{\n            steps {{\n{}\n            }}\n        }}",
        steps
    ))
}
