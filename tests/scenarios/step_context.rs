//! Test: working directory and image inherited from wrapper steps

use crate::helpers::*;

#[test]
fn test_dir_and_container_apply_to_wrapped_step_only() {
    let source = single_stage(
        r#"
                sh 'make'
                dir('backend') {
                    container('node') {
                        sh 'echo hi'
                    }
                }
                sh 'make install'"#,
    );
    let rendered = convert(&source);
    let steps = job_steps(&rendered, "Build");

    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["run"].as_str(), Some("make"));
    assert!(steps[0].get("image").is_none());
    assert!(steps[0].get("working-directory").is_none());

    assert_eq!(steps[1]["run"].as_str(), Some("echo hi"));
    assert_eq!(steps[1]["image"].as_str(), Some("node"));
    assert_eq!(steps[1]["working-directory"].as_str(), Some("./backend"));

    assert_eq!(steps[2]["run"].as_str(), Some("make install"));
    assert!(steps[2].get("image").is_none());
    assert!(steps[2].get("working-directory").is_none());
    assert!(!rendered.has_issues());
}

#[test]
fn test_leading_container_sets_stage_image() {
    let source = single_stage(
        r#"
                container('golang') {
                    sh 'go build'
                }
                container('node') {
                    sh 'npm test'
                }"#,
    );
    let steps = job_steps(&convert(&source), "Build");

    assert!(steps[0].get("image").is_none());
    assert_eq!(steps[1]["image"].as_str(), Some("node"));
}

#[test]
fn test_dir_prefix_is_trimmed() {
    let source = single_stage(
        r#"
                dir('./frontend') {
                    sh 'npm ci'
                }"#,
    );
    let steps = job_steps(&convert(&source), "Build");
    assert_eq!(steps[0]["working-directory"].as_str(), Some("./frontend"));
}
