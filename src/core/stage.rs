//! Stage domain model

use crate::core::environment::EnvironmentEntry;
use crate::core::pipeline::{Agent, PostCondition, UnsupportedBlock};
use crate::core::step::Step;
use crate::preprocess::escape;
use serde::Serialize;

/// A `stage('name') { ... }` block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    /// Stage name, safe to use as a job identifier
    pub name: String,

    /// Directives in source order
    pub entries: Vec<StageEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StageEntry {
    Agent(Agent),
    Environment(Vec<EnvironmentEntry>),
    Steps(Vec<Step>),
    Post(Vec<PostCondition>),
    When(When),
    Unsupported(Vec<UnsupportedBlock>),
}

/// Condition from a stage's `when { }` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum When {
    /// `branch 'name'`
    Branch(String),
    /// Any other condition, kept for the diagnostic
    Unsupported(UnsupportedBlock),
}

impl Stage {
    /// Build a stage, replacing characters that can't appear in a job id
    pub fn new(name: &str, entries: Vec<StageEntry>) -> Self {
        Stage {
            name: normalize_name(&escape::decode(name)),
            entries,
        }
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.entries.iter().find_map(|entry| match entry {
            StageEntry::Agent(agent) => Some(agent),
            _ => None,
        })
    }

    pub fn environment(&self) -> &[EnvironmentEntry] {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                StageEntry::Environment(env) if !env.is_empty() => Some(env.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn steps(&self) -> &[Step] {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                StageEntry::Steps(steps) if !steps.is_empty() => Some(steps.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn post(&self) -> &[PostCondition] {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                StageEntry::Post(post) if !post.is_empty() => Some(post.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// The first `when` block; later ones are ignored
    pub fn when(&self) -> Option<&When> {
        self.entries.iter().find_map(|entry| match entry {
            StageEntry::When(when) => Some(when),
            _ => None,
        })
    }

    /// Every unsupported directive of the stage, in source order
    pub fn unsupported(&self) -> impl Iterator<Item = &UnsupportedBlock> {
        self.entries.iter().flat_map(|entry| match entry {
            StageEntry::Unsupported(blocks) => blocks.as_slice(),
            _ => &[],
        })
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
