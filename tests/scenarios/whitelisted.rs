//! Test: pipelines that convert without issues

use crate::helpers::*;
use jenkinsfile_convert::{parse_pipeline, render};

const SOURCE: &str = r#"
pipeline {
    agent any
    stages {
        stage('Build') {
            steps {
                sh 'make'
            }
        }
        stage('Test') {
            steps {
                sh "make test"
                echo 'done'
            }
        }
        stage('Package') {
            steps {
                sh 'make dist'
            }
        }
    }
    post {
        always {
            cleanWs()
        }
    }
}
"#;

#[test]
fn test_one_job_per_stage_in_order() {
    let rendered = convert(SOURCE);

    assert!(!rendered.has_issues(), "unexpected issues: {:?}", rendered.diagnostics);
    assert_eq!(job_ids(&rendered), vec!["Build", "Test", "Package"]);
}

#[test]
fn test_jobs_chain_on_previous_jobs() {
    let rendered = convert(SOURCE);
    let workflow = workflow(&rendered);
    let jobs = &workflow["jobs"];

    assert!(jobs["Build"].get("needs").is_none());
    assert!(jobs["Build"].get("if").is_none());
    assert_eq!(jobs["Test"]["if"].as_str(), Some("${{ always() }}"));
    assert_eq!(
        serde_yaml::to_string(&jobs["Package"]["needs"]).unwrap(),
        "- Build\n- Test\n"
    );
    assert_eq!(jobs["Package"]["runs-on"].as_str(), Some("ubuntu-latest"));
}

#[test]
fn test_steps_are_numbered_per_job() {
    let rendered = convert(SOURCE);
    let steps = job_steps(&rendered, "Test");

    let names: Vec<_> = steps.iter().map(|s| s["name"].as_str().unwrap().to_string()).collect();
    assert_eq!(names, vec!["step1", "step2"]);
    assert_eq!(steps[0]["run"].as_str(), Some("make test"));
    assert_eq!(steps[1]["run"].as_str(), Some("echo done"));
}

#[test]
fn test_triggers_follow_branch() {
    let workflow = workflow(&convert(SOURCE));
    for trigger in ["push", "pull_request"] {
        assert_eq!(workflow["on"][trigger]["branches"][0].as_str(), Some("master"));
    }
}

#[test]
fn test_rendering_twice_is_identical() {
    let model = parse_pipeline(SOURCE).unwrap();
    let first = render(&model).unwrap();
    let second = render(&model).unwrap();
    assert_eq!(first.yaml, second.yaml);
    assert_eq!(first, second);
}

#[test]
fn test_unsupported_top_level_directive() {
    let source = r#"
pipeline {
    agent any
    triggers {
        cron('H 4 * * 1-5')
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

    assert!(rendered.has_issues());
    assert!(rendered
        .yaml
        .contains("  # The Jenkinsfile contains the triggers directive for its pipeline. This is not converted.\n"));
    assert_eq!(job_ids(&rendered), vec!["Build"]);
}

#[test]
fn test_quoted_stage_name_makes_a_clean_job_id() {
    let rendered = convert(&pipeline_with_stages(
        r#"
        stage('Say "hi"') {
            steps {
                sh 'make'
            }
        }"#,
    ));

    assert_eq!(job_ids(&rendered), vec!["Say__hi_"]);
    assert!(!rendered.yaml.contains("DOUBLEQUOTE"), "{}", rendered.yaml);
    assert!(!rendered.has_issues());
}

#[test]
fn test_every_run_of_unsupported_directives_is_reported() {
    let source = r#"
pipeline {
    agent any
    options {
        timestamps()
    }
    environment {
        ORG = 'acme'
    }
    triggers {
        cron('H 4 * * 1-5')
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

    for directive in ["options", "triggers"] {
        let comment = format!(
            "  # The Jenkinsfile contains the {} directive for its pipeline. This is not converted.\n",
            directive
        );
        assert!(rendered.yaml.contains(&comment), "missing {}:\n{}", directive, rendered.yaml);
    }
    let reported = rendered
        .diagnostics
        .iter()
        .filter(|d| d.message.contains("directive for its pipeline"))
        .count();
    assert_eq!(reported, 2);
}
