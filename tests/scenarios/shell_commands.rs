//! Test: shell command text carried into `run:`

use crate::helpers::*;
use jenkinsfile_convert::core::RenderConfig;
use rstest::rstest;

#[test]
fn test_literal_newline_becomes_block_scalar() {
    let rendered = convert(&single_stage("                sh 'echo \"hi\"\ndone'"));
    let steps = job_steps(&rendered, "Build");

    assert_eq!(steps[0]["run"].as_str(), Some("echo \"hi\"\ndone\n"));
    assert!(rendered.yaml.contains("      run: |\n        echo \"hi\"\n        done\n"));
}

#[test]
fn test_triple_quoted_script() {
    let rendered = convert(&single_stage(
        r#"
                sh '''
                    echo "one"
                    echo 'two'
                '''"#,
    ));
    let steps = job_steps(&rendered, "Build");
    assert_eq!(steps[0]["run"].as_str(), Some("echo \"one\"\necho 'two'\n"));
}

#[rstest]
#[case(r#"sh "mvn deploy -Drevision=\$(cat VERSION)""#, "mvn deploy -Drevision=${{ inputs.version }}")]
#[case(r#"sh 'cp target/app.jar app-`cat VERSION`.jar'"#, "cp target/app.jar app-${{ inputs.version }}.jar")]
#[case(r#"sh "echo \$HOME""#, "echo $HOME")]
#[case(r#"sh 'ls -la'"#, "ls -la")]
fn test_command_text(#[case] step: &str, #[case] expected: &str) {
    let rendered = convert(&single_stage(&format!("                {}", step)));
    let steps = job_steps(&rendered, "Build");
    assert_eq!(steps[0]["run"].as_str(), Some(expected));
}

#[test]
fn test_version_expression_is_configurable() {
    let config = RenderConfig {
        version_expression: "${{ github.ref_name }}".to_string(),
        ..RenderConfig::default()
    };
    let rendered = convert_with(&single_stage("                sh \"make VERSION=\\$(cat VERSION)\""), &config);
    let steps = job_steps(&rendered, "Build");
    assert_eq!(steps[0]["run"].as_str(), Some("make VERSION=${{ github.ref_name }}"));
}

#[test]
fn test_release_bookkeeping_steps_are_dropped() {
    let rendered = convert(&single_stage(
        r#"
                sh "git checkout master"
                sh "jx step git credentials"
                sh "jx step tag --version \$(cat VERSION)"
                sh 'make'"#,
    ));
    let steps = job_steps(&rendered, "Build");
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["run"].as_str(), Some("make"));
}

#[test]
fn test_single_line_triple_quoted_script() {
    let rendered = convert(&single_stage("                sh '''make'''"));
    let steps = job_steps(&rendered, "Build");

    assert_eq!(steps[0]["run"].as_str(), Some("make\n"));
    assert!(rendered.yaml.contains("      run: |\n        make\n"));
}
