//! Test: steps without a workflow counterpart become failing placeholders

use crate::helpers::*;
use jenkinsfile_convert::Severity;

#[test]
fn test_custom_step_is_reproduced_as_comment() {
    let rendered = convert(&single_stage("                customStep(foo: 1)"));

    assert!(rendered.has_issues());
    assert!(rendered
        .yaml
        .contains("      # The Jenkins Pipeline step customStep cannot be translated directly.\n"));
    assert!(rendered.yaml.contains("      # Original step from Jenkinsfile:\n      # customStep(foo: 1)\n"));
    assert!(rendered
        .yaml
        .contains("      run: echo 'Invalid step customStep, failing' && exit 1\n"));

    let steps = job_steps(&rendered, "Build");
    assert_eq!(
        steps[0]["run"].as_str(),
        Some("echo 'Invalid step customStep, failing' && exit 1")
    );
}

#[test]
fn test_wrapper_block_is_kept_whole() {
    let rendered = convert(&single_stage(
        r#"
                timeout(time: 5, unit: 'MINUTES') {
                    sh 'make slow'
                }"#,
    ));

    assert!(rendered
        .yaml
        .contains("# The Jenkins Pipeline step timeout cannot be translated directly."));
    assert!(rendered.yaml.contains(
        "# You may want to consider adding a shell script to your repository that replicates its behavior."
    ));
    assert!(rendered.yaml.contains("sh 'make slow'"));

    let errors: Vec<_> = rendered
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].subject, "Build");
}

#[test]
fn test_sh_with_extra_parameters() {
    let rendered = convert(&single_stage("                sh script: 'ls', returnStdout: true"));
    assert!(rendered
        .yaml
        .contains("# Additional parameters to the Jenkins Pipeline sh step are not supported"));
    assert!(rendered.yaml.contains("# sh(script: 'ls', returnStdout: true)"));
}

#[test]
fn test_empty_stages_get_failing_job() {
    let source = r#"
pipeline {
    agent any
    stages {
        stage('Nothing') {
            steps {
                checkout scm
            }
        }
    }
}
"#;
    let rendered = convert(source);

    assert!(rendered.has_issues());
    assert_eq!(job_ids(&rendered), vec!["Nothing", "no_stages"]);
    let workflow = workflow(&rendered);
    let step = &workflow["jobs"]["no_stages"]["steps"][0];
    assert_eq!(step["name"].as_str(), Some("step0"));
    assert_eq!(step["run"].as_str(), Some("echo 'No stages found, failing' && exit 1"));
}

#[test]
fn test_sh_with_number_argument() {
    let rendered = convert(&single_stage("                sh 5"));

    assert!(rendered.has_issues());
    assert!(rendered
        .yaml
        .contains("      # Non-string parameters to the Jenkins Pipeline sh step are not supported\n"));
    assert!(rendered.yaml.contains("      # sh 5\n"));
    assert!(!rendered.yaml.contains("run: '5'"));
}
