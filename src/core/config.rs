//! Render configuration from YAML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for the generated workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Value of the workflow's `name:` key
    pub workflow_name: String,

    /// Branch the workflow is triggered for
    pub branch: String,

    /// Prefix Jenkins uses for pull request branches (`PR-123`)
    pub pr_branch_prefix: String,

    /// `runs-on` value for every job
    pub runner: String,

    /// Action used by the first step of every job
    pub checkout_action: String,

    /// Image steps run in when no `container` says otherwise
    pub default_image: String,

    /// Expression substituted for `$(cat VERSION)`
    pub version_expression: String,

    /// Which job groups to generate
    pub job_groups: JobGroups,

    /// Translate `echo 'x'` steps into `run: echo x`
    pub translate_echo: bool,

    /// The one credential that maps onto repository secrets
    pub credential: CredentialMapping,

    /// Environment variables dropped without a trace
    pub removed_env_vars: Vec<String>,

    /// `sh` commands dropped without a trace
    pub removed_steps: Vec<String>,
}

/// Job groups generated from the stages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum JobGroups {
    /// One job per stage that runs for pull requests
    #[default]
    PullRequest,
    /// Pull request jobs followed by release jobs, gated on the event
    PullRequestAndRelease,
}

/// `credentials('<id>')` that expands into `<KEY>_USR` / `<KEY>_PSW`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CredentialMapping {
    pub id: String,
    pub user_secret: String,
    pub password_secret: String,
}

impl Default for CredentialMapping {
    fn default() -> Self {
        CredentialMapping {
            id: "jenkins-x-chartmuseum".to_string(),
            user_secret: "BASIC_AUTH_USER".to_string(),
            password_secret: "BASIC_AUTH_PASS".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            workflow_name: "Converted Jenkinsfile".to_string(),
            branch: "master".to_string(),
            pr_branch_prefix: "PR-".to_string(),
            runner: "ubuntu-latest".to_string(),
            checkout_action: "actions/checkout@v3".to_string(),
            default_image: "maven".to_string(),
            version_expression: "${{ inputs.version }}".to_string(),
            job_groups: JobGroups::default(),
            translate_echo: true,
            credential: CredentialMapping::default(),
            removed_env_vars: ["PREVIEW_VERSION", "APP_NAME", "DOCKER_REGISTRY", "DOCKER_REGISTRY_ORG"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            removed_steps: [
                "git checkout master",
                "checkout scm",
                "git config --global credential.helper store",
                "jx step git credentials",
                "echo $(jx-release-version) > VERSION",
                "mvn versions:set -DnewVersion=$(cat VERSION)",
                "jx step tag --version $(cat VERSION)",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl RenderConfig {
    /// Load render configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse render configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RenderConfig = serde_yaml::from_str(yaml).context("Invalid render config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the render configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("workflow_name", &self.workflow_name),
            ("branch", &self.branch),
            ("runner", &self.runner),
            ("checkout_action", &self.checkout_action),
            ("default_image", &self.default_image),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                anyhow::bail!("Render config field '{}' must not be empty", field);
            }
        }

        if self.credential.id.is_empty() {
            anyhow::bail!("Render config credential id must not be empty");
        }

        Ok(())
    }

    /// Whether a branch name from `when { branch ... }` is a pull request branch
    pub fn is_pr_branch(&self, branch: &str) -> bool {
        !self.pr_branch_prefix.is_empty() && branch.starts_with(&self.pr_branch_prefix)
    }
}
