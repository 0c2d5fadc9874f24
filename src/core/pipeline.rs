//! Pipeline domain model

use crate::core::environment::EnvironmentEntry;
use crate::core::stage::Stage;
use crate::core::step::Step;
use serde::Serialize;

/// A parsed `pipeline { ... }` block
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PipelineModel {
    /// Top-level directives in source order
    pub entries: Vec<PipelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PipelineEntry {
    Agent(Agent),
    Environment(Vec<EnvironmentEntry>),
    Stages(Vec<Stage>),
    Post(Vec<PostCondition>),
    /// A run of consecutive directives that are not modeled
    Unsupported(Vec<UnsupportedBlock>),
}

/// `agent any`, `agent { label 'x' }`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One condition block of a `post { }` section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCondition {
    /// `always`, `failure`, ...
    pub kind: String,
    pub steps: Vec<Step>,
}

/// A directive kept only so it can be reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedBlock {
    pub name: String,
    /// The directive as Groovy source
    pub text: String,
}

impl UnsupportedBlock {
    pub fn from_step(step: &Step) -> Self {
        UnsupportedBlock {
            name: step.name.clone(),
            text: step.to_groovy(),
        }
    }
}

impl PostCondition {
    /// Whether a post section is just `always { cleanWs() }`, which Actions
    /// runners make unnecessary
    pub fn is_default_clean_ws(conditions: &[PostCondition]) -> bool {
        match conditions {
            [only] => {
                only.kind == "always"
                    && matches!(only.steps.as_slice(), [step] if step.name == "cleanWs" && step.args.is_empty() && step.nested.is_empty())
            }
            _ => false,
        }
    }
}

impl PipelineModel {
    pub fn new(entries: Vec<PipelineEntry>) -> Self {
        PipelineModel { entries }
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.entries.iter().find_map(|entry| match entry {
            PipelineEntry::Agent(agent) => Some(agent),
            _ => None,
        })
    }

    pub fn environment(&self) -> &[EnvironmentEntry] {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                PipelineEntry::Environment(env) if !env.is_empty() => Some(env.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn stages(&self) -> &[Stage] {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                PipelineEntry::Stages(stages) if !stages.is_empty() => Some(stages.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn post(&self) -> &[PostCondition] {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                PipelineEntry::Post(post) if !post.is_empty() => Some(post.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// The first run of unsupported directives
    pub fn unsupported(&self) -> &[UnsupportedBlock] {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                PipelineEntry::Unsupported(blocks) if !blocks.is_empty() => Some(blocks.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Unsupported directives from every run, in source order
    pub fn all_unsupported(&self) -> impl Iterator<Item = &UnsupportedBlock> {
        self.entries.iter().flat_map(|entry| match entry {
            PipelineEntry::Unsupported(blocks) => blocks.as_slice(),
            _ => &[],
        })
    }
}
