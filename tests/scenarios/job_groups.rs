//! Test: stages partitioned by `when { branch }`

use crate::helpers::*;
use jenkinsfile_convert::Severity;

fn source() -> String {
    pipeline_with_stages(
        r#"
        stage('Preview') {
            when {
                branch 'PR-*'
            }
            steps {
                sh 'make preview'
            }
        }
        stage('Release') {
            when {
                branch 'master'
            }
            steps {
                sh 'make release'
            }
        }
        stage('Always') {
            steps {
                sh 'make check'
            }
        }"#,
    )
}

#[test]
fn test_pull_request_dialect_drops_release_stages() {
    let rendered = convert(&source());

    assert_eq!(job_ids(&rendered), vec!["Preview", "Always"]);
    assert!(rendered
        .yaml
        .contains("  # The stage 'Release' only runs on the branch 'master', so it is not part of this workflow.\n"));
    assert!(rendered.diagnostics.iter().all(|d| d.severity == Severity::Note));
    assert!(!rendered.has_issues());
}

#[test]
fn test_two_groups_gate_on_event() {
    let rendered = convert_two_groups(&source());

    assert_eq!(
        job_ids(&rendered),
        vec!["pr_Preview", "pr_Always", "release_Release", "release_Always"]
    );

    let workflow = workflow(&rendered);
    let jobs = &workflow["jobs"];
    assert_eq!(
        jobs["pr_Preview"]["if"].as_str(),
        Some("${{ github.event_name == 'pull_request' }}")
    );
    assert_eq!(
        jobs["release_Release"]["if"].as_str(),
        Some("${{ always() && github.event_name == 'push' }}")
    );
    assert_eq!(
        serde_yaml::to_string(&jobs["release_Release"]["needs"]).unwrap(),
        "- pr_Preview\n- pr_Always\n"
    );
    assert!(!rendered.has_issues());
}

#[test]
fn test_unsupported_when_drops_stage() {
    let rendered = convert(&pipeline_with_stages(
        r#"
        stage('Maybe') {
            when {
                expression { return params.DEPLOY }
            }
            steps {
                sh 'make deploy'
            }
        }
        stage('Build') {
            steps {
                sh 'make'
            }
        }"#,
    ));

    assert!(rendered.has_issues());
    assert_eq!(job_ids(&rendered), vec!["Build"]);
    assert!(rendered.yaml.contains(
        "# This Jenkinsfile contains the unsupported when condition 'expression' on stage 'Maybe'. The stage containing it will not be converted."
    ));
}

#[test]
fn test_other_branch_drops_stage() {
    let rendered = convert(&pipeline_with_stages(
        r#"
        stage('Develop') {
            when {
                branch 'develop'
            }
            steps {
                sh 'make'
            }
        }"#,
    ));

    assert!(rendered.has_issues());
    assert!(rendered.yaml.contains("branch 'develop' on stage 'Develop'"));
    assert_eq!(job_ids(&rendered), vec!["no_stages"]);
}
