//! `env:` rendering

use crate::codegen::diagnostics::Diagnostics;
use crate::codegen::writer::YamlWriter;
use crate::codegen::RenderError;
use crate::core::{EnvValue, EnvironmentEntry, RenderConfig};
use crate::preprocess::escape;
use serde_yaml::{Mapping, Value};

/// Rendered environment: explanatory comments plus the mapping lines
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvBlock {
    comments: Vec<String>,
    mapping: Vec<String>,
}

impl EnvBlock {
    /// Write the block; the `env:` key only appears when it has entries
    pub fn write(&self, writer: &mut YamlWriter, depth: usize) {
        let inner = if self.mapping.is_empty() {
            depth
        } else {
            writer.line(depth, "env:");
            depth + 1
        };

        for comment in &self.comments {
            writer.comment(inner, comment);
        }
        for line in &self.mapping {
            writer.line(inner, line);
        }
    }
}

/// Translate environment entries, recording the ones that can't be translated
pub fn render_environment(
    entries: &[EnvironmentEntry],
    subject: &str,
    config: &RenderConfig,
    diagnostics: &mut Diagnostics,
) -> Result<EnvBlock, RenderError> {
    let mut block = EnvBlock::default();
    let mut mapping = Mapping::new();

    for entry in entries {
        if config.removed_env_vars.contains(&entry.key) {
            continue;
        }

        match &entry.value {
            EnvValue::Literal(value) => {
                let value = escape::decode(value);
                if value.contains('$') {
                    untranslatable(&mut block, diagnostics, subject, &entry.key, &value);
                } else {
                    insert(&mut mapping, entry.key.clone(), value);
                }
            }
            EnvValue::Credential(id) if *id == config.credential.id => {
                insert(
                    &mut mapping,
                    format!("{}_USR", entry.key),
                    format!("${{{{ secrets.{} }}}}", config.credential.user_secret),
                );
                insert(
                    &mut mapping,
                    format!("{}_PSW", entry.key),
                    format!("${{{{ secrets.{} }}}}", config.credential.password_secret),
                );
            }
            EnvValue::Credential(id) => untranslatable(&mut block, diagnostics, subject, &entry.key, id),
        }
    }

    if !mapping.is_empty() {
        let yaml = serde_yaml::to_string(&mapping).map_err(|source| RenderError::Yaml {
            what: format!("environment of {}", subject),
            source,
        })?;
        block.mapping = yaml.trim_end().lines().map(str::to_string).collect();
    }

    Ok(block)
}

fn insert(mapping: &mut Mapping, key: String, value: String) {
    let key = Value::String(key);
    if !mapping.contains_key(&key) {
        mapping.insert(key, Value::String(value));
    }
}

fn untranslatable(block: &mut EnvBlock, diagnostics: &mut Diagnostics, subject: &str, key: &str, value: &str) {
    let message = format!(
        "The variable '{}' has the value '{}', which cannot be converted.",
        key, value
    );
    diagnostics.warning(subject, &message);
    block.comments.push(message);
}
