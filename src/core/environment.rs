//! Environment block entries

use serde::Serialize;

/// `KEY = value` inside an `environment { }` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentEntry {
    pub key: String,
    pub value: EnvValue,
}

/// Right-hand side of an environment entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvValue {
    /// A string literal, placeholder-encoded
    Literal(String),
    /// `credentials('id')`
    Credential(String),
}

impl EnvironmentEntry {
    pub fn literal(key: impl Into<String>, value: impl Into<String>) -> Self {
        EnvironmentEntry {
            key: key.into(),
            value: EnvValue::Literal(value.into()),
        }
    }

    pub fn credential(key: impl Into<String>, id: impl Into<String>) -> Self {
        EnvironmentEntry {
            key: key.into(),
            value: EnvValue::Credential(id.into()),
        }
    }
}

/// Merge environment lists, keeping the first entry seen for each key
pub fn merge_first_seen<'a, I>(lists: I) -> Vec<EnvironmentEntry>
where
    I: IntoIterator<Item = &'a [EnvironmentEntry]>,
{
    let mut merged: Vec<EnvironmentEntry> = Vec::new();
    for entry in lists.into_iter().flatten() {
        if !merged.iter().any(|seen| seen.key == entry.key) {
            merged.push(entry.clone());
        }
    }
    merged
}
