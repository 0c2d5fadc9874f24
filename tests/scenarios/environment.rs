//! Test: pipeline and stage environments

use crate::helpers::*;

#[test]
fn test_pipeline_environment() {
    let source = r#"
pipeline {
    agent any
    environment {
        ORG = 'acme'
        APP_NAME = 'demo'
        CHARTMUSEUM_CREDS = credentials('jenkins-x-chartmuseum')
        TAG = "$BUILD_NUMBER"
    }
    stages {
        stage('Build') {
            steps {
                sh 'make'
            }
        }
    }
}
"#;
    let rendered = convert(source);
    let workflow = workflow(&rendered);
    let env = workflow["env"].as_mapping().expect("workflow env");

    let keys: Vec<_> = env.keys().filter_map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["ORG", "CHARTMUSEUM_CREDS_USR", "CHARTMUSEUM_CREDS_PSW"]);
    assert_eq!(
        workflow["env"]["CHARTMUSEUM_CREDS_PSW"].as_str(),
        Some("${{ secrets.BASIC_AUTH_PASS }}")
    );
    assert!(rendered
        .yaml
        .contains("  # The variable 'TAG' has the value '$BUILD_NUMBER', which cannot be converted.\n"));
    assert!(rendered.has_issues());
}

#[test]
fn test_stage_environments_merge_onto_every_job() {
    let rendered = convert(&pipeline_with_stages(
        r#"
        stage('Build') {
            environment {
                GOAL = 'package'
            }
            steps {
                sh 'mvn $GOAL'
            }
        }
        stage('Test') {
            environment {
                GOAL = 'verify'
                PROFILE = 'ci'
            }
            steps {
                sh 'mvn $GOAL -P$PROFILE'
            }
        }"#,
    ));
    let workflow = workflow(&rendered);

    for job in ["Build", "Test"] {
        assert_eq!(workflow["jobs"][job]["env"]["GOAL"].as_str(), Some("package"));
        assert_eq!(workflow["jobs"][job]["env"]["PROFILE"].as_str(), Some("ci"));
    }
    assert!(!rendered.has_issues());
}

#[test]
fn test_no_env_key_without_entries() {
    let rendered = convert(&single_stage("                sh 'make'"));
    assert!(workflow(&rendered).get("env").is_none());
}
