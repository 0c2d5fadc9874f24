//! Field gatekeeper
//!
//! Decides, per context block, which child blocks keep their real contents
//! and which are neutralized into an opaque raw string the grammar accepts
//! as an unsupported directive.

use crate::preprocess::blocks::Block;
use crate::preprocess::rewrite::Rewrite;
use tracing::debug;

/// Which child block names a context lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Only these names stay parsable
    Allow(&'static [&'static str]),
    /// These names are escaped, everything else stays parsable
    Deny(&'static [&'static str]),
}

impl FieldPolicy {
    /// Whether a child block with this name keeps its contents
    pub fn permits(&self, name: &str) -> bool {
        match self {
            FieldPolicy::Allow(names) => names.contains(&name),
            FieldPolicy::Deny(names) => !names.contains(&name),
        }
    }
}

const STEP_BLOCKS: &[&str] = &["sh", "dir", "container"];

const POST_CONDITIONS: &[&str] = &[
    "always",
    "success",
    "failure",
    "unstable",
    "changed",
    "fixed",
    "regression",
    "aborted",
    "cleanup",
    "unsuccessful",
];

/// Policy for a context block name, if the name is a context at all
pub fn policy_for(context: &str) -> Option<FieldPolicy> {
    let policy = match context {
        "pipeline" => FieldPolicy::Deny(&["triggers", "options", "parameters", "tools", "libraries"]),
        "stage" => FieldPolicy::Deny(&["stages", "parallel", "matrix", "tools", "input", "options"]),
        "agent" => FieldPolicy::Deny(&["kubernetes", "docker", "dockerfile", "node"]),
        "when" => FieldPolicy::Allow(&["branch"]),
        "steps" | "dir" | "container" => FieldPolicy::Allow(STEP_BLOCKS),
        name if POST_CONDITIONS.contains(&name) => FieldPolicy::Allow(STEP_BLOCKS),
        _ => return None,
    };
    Some(policy)
}

/// Collect the rewrites that escape every disallowed child block
pub fn escape_disallowed(blocks: &[Block]) -> Vec<Rewrite> {
    let mut rewrites = Vec::new();

    for root in blocks {
        root.walk(&mut |block| {
            let Some(policy) = policy_for(&block.name) else {
                return;
            };
            for child in &block.children {
                if !policy.permits(&child.name) {
                    debug!("Escaping '{}' block inside '{}'", child.name, block.name);
                    rewrites.push(Rewrite::new(child.span.clone(), child.replacement.clone()));
                }
            }
        });
    }

    rewrites
}
